//! Roster of known people, stored in an indexed arena.

use crate::alias::AliasMap;
use crate::identity::Identity;

/// Opaque handle to a person in a [`Roster`].
///
/// Ids are only meaningful for the roster that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(usize);

impl PersonId {
    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

/// A known person from the tracker export.
#[derive(Debug, Clone)]
pub struct Person {
    /// First name as it appears in the tracker.
    pub first_name: String,
    /// Preferred (informal) first name.
    pub preferred_name: String,
    /// Last name; always present, the tracker skips rows without one.
    pub last_name: String,
    /// Matchable identity, including every known address.
    pub identity: Identity,
}

impl Person {
    /// Builds a person from tracker fields.
    ///
    /// The matchable identity uses `"First Last"` as the display name and
    /// `"Preferred Last"` as the informal form, matching what sender
    /// display names look like in practice.
    pub fn new<I, S>(first_name: &str, preferred_name: &str, last_name: &str, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let first = first_name.trim();
        let preferred = preferred_name.trim();
        let last = last_name.trim();
        let identity = Identity::new(
            &format!("{first} {last}"),
            &format!("{preferred} {last}"),
            addresses,
        );
        Self {
            first_name: first.to_string(),
            preferred_name: preferred.to_string(),
            last_name: last.to_string(),
            identity,
        }
    }
}

/// Arena of known people.
///
/// Membership is fixed by loading; matching never grows the roster.
/// Persons are addressed by [`PersonId`] so address sets can be widened
/// in place without the mutable-map-key hazards of keying by identity.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    people: Vec<Person>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a person, returning its id.
    pub fn insert(&mut self, person: Person) -> PersonId {
        self.people.push(person);
        PersonId(self.people.len() - 1)
    }

    /// Looks up a person by id.
    #[must_use]
    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.people.get(id.index())
    }

    /// Iterates all people with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PersonId, &Person)> {
        self.people
            .iter()
            .enumerate()
            .map(|(index, person)| (PersonId(index), person))
    }

    /// Number of people.
    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Whether the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Alias widening: for every `(observed, canonical)` pair, adds
    /// `observed` to each person whose raw addresses contain `canonical`.
    ///
    /// Idempotent, and re-runnable after either the roster or the alias
    /// map changes; the full widened state is re-derived from the map on
    /// every call. Observed addresses whose canonical matches nobody are
    /// silently ignored.
    pub fn apply_aliases(&mut self, aliases: &AliasMap) {
        for (observed, canonical) in aliases.iter() {
            for person in &mut self.people {
                if person.identity.addresses().contains(canonical) {
                    person.identity.add_address(observed);
                }
            }
        }
    }
}
