//! Roster registry and the per-message resolution algorithm.

use std::collections::BTreeSet;

use tracing::warn;

use crate::alias::AliasMap;
use crate::blacklist::Blacklist;
use crate::identity::{addresses_match, sender_name_matches};
use crate::message::MessageRecord;
use crate::roster::{Person, PersonId, Roster};

/// An unresolved sender: display name plus the first available address,
/// if any. The set of these is the batch output handed back for alias
/// file preparation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnknownSender {
    /// Sender display name (may be empty).
    pub name: String,
    /// First available raw address, if the message carried one.
    pub address: Option<String>,
}

/// How a single message was classified against the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one roster person matched.
    Assigned(PersonId),
    /// More than one person shared an address with the sender.
    AmbiguousAddress(Vec<PersonId>),
    /// No address match, and more than one person matched by name.
    AmbiguousName(Vec<PersonId>),
    /// Nobody matched by address or name.
    Unknown,
    /// The message carried no usable sender address.
    NoAddress,
    /// A blacklisted sender.
    Suppressed,
}

/// Owns the roster and the accumulated assignments for one run.
///
/// A registry is constructed per run; starting over means constructing a
/// new one. Loading may happen in any order and in several steps (alias
/// widening is re-applied after every roster or alias load), after which
/// message batches are resolved and the reporting projections read the
/// result.
#[derive(Debug, Default)]
pub struct Registry {
    roster: Roster,
    aliases: AliasMap,
    blacklist: Blacklist,
    assigned: Vec<Vec<MessageRecord>>,
    unmatched: Option<Vec<MessageRecord>>,
}

impl Registry {
    /// Creates an empty registry.
    ///
    /// With `count_unmatched` set, a catch-all bucket accumulates every
    /// message rejected as unknown so whole-population volume can be
    /// reported alongside per-person volume. Suppressed messages and
    /// messages without a usable address never reach the bucket.
    #[must_use]
    pub fn new(count_unmatched: bool) -> Self {
        Self {
            roster: Roster::new(),
            aliases: AliasMap::new(),
            blacklist: Blacklist::new(),
            assigned: Vec::new(),
            unmatched: count_unmatched.then(Vec::new),
        }
    }

    /// Adds people to the roster and re-applies alias widening.
    pub fn add_people<I>(&mut self, people: I)
    where
        I: IntoIterator<Item = Person>,
    {
        for person in people {
            self.roster.insert(person);
            self.assigned.push(Vec::new());
        }
        self.roster.apply_aliases(&self.aliases);
    }

    /// Merges alias entries and re-applies widening to the whole roster.
    pub fn add_aliases(&mut self, aliases: AliasMap) {
        self.aliases.merge(aliases);
        self.roster.apply_aliases(&self.aliases);
    }

    /// Merges blacklist entries.
    pub fn add_blacklist(&mut self, blacklist: Blacklist) {
        self.blacklist.merge(blacklist);
    }

    /// The loaded roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The merged alias map.
    #[must_use]
    pub fn aliases(&self) -> &AliasMap {
        &self.aliases
    }

    /// The merged blacklist.
    #[must_use]
    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    /// Messages assigned to a person, in processing order.
    #[must_use]
    pub fn assigned(&self, id: PersonId) -> &[MessageRecord] {
        self.assigned.get(id.index()).map_or(&[], Vec::as_slice)
    }

    /// Iterates every person with its assigned messages.
    pub fn iter_assigned(&self) -> impl Iterator<Item = (PersonId, &Person, &[MessageRecord])> {
        self.roster.iter().map(|(id, person)| {
            (
                id,
                person,
                self.assigned.get(id.index()).map_or(&[][..], Vec::as_slice),
            )
        })
    }

    /// The catch-all bucket, if enabled at construction.
    #[must_use]
    pub fn unmatched(&self) -> Option<&[MessageRecord]> {
        self.unmatched.as_deref()
    }

    /// Every accounted message: per-person assignments plus the
    /// catch-all bucket when enabled.
    pub fn all_messages(&self) -> impl Iterator<Item = &MessageRecord> {
        self.assigned
            .iter()
            .flatten()
            .chain(self.unmatched.iter().flatten())
    }

    /// Classifies one message against the roster without mutating
    /// anything.
    ///
    /// Suppression is checked first, then address usability, then the
    /// match precedence: a single address match wins outright, several
    /// address matches are ambiguous, and name matching is only consulted
    /// when no address matched at all.
    #[must_use]
    pub fn classify(&self, record: &MessageRecord) -> Resolution {
        if self.blacklist.suppresses(&record.sender) {
            return Resolution::Suppressed;
        }
        if !record.sender.has_addresses() {
            return Resolution::NoAddress;
        }

        let address_matches: Vec<PersonId> = self
            .roster
            .iter()
            .filter(|(_, person)| addresses_match(&record.sender, &person.identity))
            .map(|(id, _)| id)
            .collect();
        match address_matches.len() {
            1 => return Resolution::Assigned(address_matches[0]),
            0 => {}
            _ => return Resolution::AmbiguousAddress(address_matches),
        }

        let name_matches: Vec<PersonId> = self
            .roster
            .iter()
            .filter(|(_, person)| sender_name_matches(&record.sender, &person.identity))
            .map(|(id, _)| id)
            .collect();
        match name_matches.len() {
            1 => Resolution::Assigned(name_matches[0]),
            0 => Resolution::Unknown,
            _ => Resolution::AmbiguousName(name_matches),
        }
    }

    /// Resolves a batch of messages, accumulating assignments and
    /// returning the deduplicated set of unresolved senders seen in this
    /// batch.
    ///
    /// Submission is at-most-once per message: the registry keeps no
    /// dedup key, so resubmitting a batch double-counts it.
    pub fn resolve_batch<I>(&mut self, records: I) -> BTreeSet<UnknownSender>
    where
        I: IntoIterator<Item = MessageRecord>,
    {
        let mut unknown = BTreeSet::new();
        for record in records {
            match self.classify(&record) {
                Resolution::Suppressed => {}
                Resolution::NoAddress => {
                    warn!(
                        sender = record.sender.name(),
                        "no usable sender address, skipping"
                    );
                }
                Resolution::Assigned(id) => {
                    self.assigned[id.index()].push(record);
                }
                Resolution::AmbiguousAddress(candidates) => {
                    warn!(
                        sender = record.sender.name(),
                        candidates = ?self.candidate_names(&candidates),
                        "sender address matched multiple people, treating as unknown"
                    );
                    self.mark_unknown(record, &mut unknown);
                }
                Resolution::AmbiguousName(candidates) => {
                    warn!(
                        sender = record.sender.name(),
                        candidates = ?self.candidate_names(&candidates),
                        "sender name matched multiple people, treating as unknown"
                    );
                    self.mark_unknown(record, &mut unknown);
                }
                Resolution::Unknown => {
                    self.mark_unknown(record, &mut unknown);
                }
            }
        }
        unknown
    }

    fn candidate_names(&self, ids: &[PersonId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| self.roster.get(*id))
            .map(|person| person.identity.name().to_string())
            .collect()
    }

    fn mark_unknown(&mut self, record: MessageRecord, unknown: &mut BTreeSet<UnknownSender>) {
        unknown.insert(UnknownSender {
            name: record.sender.name().to_string(),
            address: record.sender.first_address().map(ToString::to_string),
        });
        if let Some(bucket) = self.unmatched.as_mut() {
            bucket.push(record);
        }
    }
}
