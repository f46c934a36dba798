//! Matchable identities and the matching predicates.

use std::collections::BTreeSet;

/// Normalizes an address for matching: trimmed, lower-cased, with every
/// `.` removed. Mirrors the common provider rule that dots in the local
/// part are insignificant; applied to the whole address for simplicity.
#[must_use]
pub fn normalize_address(address: &str) -> String {
    address.trim().to_lowercase().replace('.', "")
}

/// A matchable entity: display name, informal name, and the set of
/// addresses it is known by.
///
/// The raw and normalized address sets are kept in lockstep; the only way
/// to grow them is [`Identity::add_address`], which updates both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    preferred_name: String,
    addresses: BTreeSet<String>,
    normalized_addresses: BTreeSet<String>,
}

impl Identity {
    /// Creates an identity. Names and addresses are trimmed; empty
    /// address strings are dropped.
    pub fn new<I, S>(name: &str, preferred_name: &str, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut identity = Self {
            name: name.trim().to_string(),
            preferred_name: preferred_name.trim().to_string(),
            addresses: BTreeSet::new(),
            normalized_addresses: BTreeSet::new(),
        };
        for address in addresses {
            identity.add_address(address.as_ref());
        }
        identity
    }

    /// Display name (may be empty).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Informal/nickname form (may equal the display name).
    #[must_use]
    pub fn preferred_name(&self) -> &str {
        &self.preferred_name
    }

    /// Adds an address, keeping the normalized set in sync. Empty strings
    /// are ignored and re-adding a known address is a no-op.
    pub fn add_address(&mut self, address: &str) {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return;
        }
        self.addresses.insert(trimmed.to_string());
        self.normalized_addresses.insert(normalize_address(trimmed));
    }

    /// Raw addresses, case preserved.
    #[must_use]
    pub fn addresses(&self) -> &BTreeSet<String> {
        &self.addresses
    }

    /// Normalized addresses, used for matching only.
    #[must_use]
    pub fn normalized_addresses(&self) -> &BTreeSet<String> {
        &self.normalized_addresses
    }

    /// Whether at least one address is known.
    #[must_use]
    pub fn has_addresses(&self) -> bool {
        !self.addresses.is_empty()
    }

    /// The first available raw address, if any.
    #[must_use]
    pub fn first_address(&self) -> Option<&str> {
        self.addresses.iter().next().map(String::as_str)
    }
}

/// High-confidence signal: the two identities share at least one
/// normalized address.
#[must_use]
pub fn addresses_match(a: &Identity, b: &Identity) -> bool {
    !a.normalized_addresses.is_disjoint(&b.normalized_addresses)
}

/// Weak signal: exact, case-sensitive equality of display names or of
/// preferred names. No token-level or fuzzy comparison; missing a
/// reordered or misspelled name is preferred over a false positive.
#[must_use]
pub fn names_match(a: &Identity, b: &Identity) -> bool {
    a.name == b.name || a.preferred_name == b.preferred_name
}

/// Name match for the sender-to-roster-person direction: everything
/// [`names_match`] accepts, plus a sender whose display name equals the
/// person's preferred name (senders often go by the roster's nickname).
#[must_use]
pub fn sender_name_matches(sender: &Identity, person: &Identity) -> bool {
    sender.name == person.preferred_name || names_match(sender, person)
}
