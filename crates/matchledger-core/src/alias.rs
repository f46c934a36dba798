//! Observed-address to canonical-address indirection.

use std::collections::BTreeMap;

/// Lookup table translating an observed address to a canonical address
/// already owned by a known person.
///
/// Many observed addresses may map to the same canonical address; keys
/// are unique. Entries whose canonical address matches nobody in the
/// roster are legal and simply have no effect, so alias files can be
/// prepared before the corresponding person exists.
#[derive(Debug, Clone, Default)]
pub struct AliasMap {
    entries: BTreeMap<String, String>,
}

impl AliasMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mapping. Entries with an empty observed or canonical
    /// address are ignored; repeating an observed address keeps the
    /// latest canonical.
    pub fn insert(&mut self, observed: &str, canonical: &str) {
        let observed = observed.trim();
        let canonical = canonical.trim();
        if observed.is_empty() || canonical.is_empty() {
            return;
        }
        self.entries.insert(observed.to_string(), canonical.to_string());
    }

    /// Folds another map into this one; entries from `other` win on
    /// duplicate observed addresses.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Iterates `(observed, canonical)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(observed, canonical)| (observed.as_str(), canonical.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
