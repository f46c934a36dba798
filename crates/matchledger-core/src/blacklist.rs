//! Suppression set for bulk/spam senders.

use std::collections::HashSet;

use crate::identity::{Identity, normalize_address};

/// Set of normalized addresses excluded from matching and from the
/// unknown-sender report entirely.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    entries: HashSet<String>,
}

impl Blacklist {
    /// Creates an empty blacklist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an address. Normalization is applied here, so raw and
    /// pre-normalized entries behave the same.
    pub fn insert(&mut self, address: &str) {
        let normalized = normalize_address(address);
        if !normalized.is_empty() {
            self.entries.insert(normalized);
        }
    }

    /// Folds another blacklist into this one.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// True when any of the identity's normalized addresses is
    /// suppressed.
    #[must_use]
    pub fn suppresses(&self, identity: &Identity) -> bool {
        identity
            .normalized_addresses()
            .iter()
            .any(|address| self.entries.contains(address))
    }

    /// Number of suppressed addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the blacklist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_normalizes() {
        let mut blacklist = Blacklist::new();
        blacklist.insert("No.Reply@Bulk.COM");
        let sender = Identity::new("Bulk", "Bulk", ["noreply@bulk.com"]);
        assert!(blacklist.suppresses(&sender));
    }

    #[test]
    fn test_suppresses_requires_an_entry() {
        let mut blacklist = Blacklist::new();
        blacklist.insert("noreply@bulk.com");
        let sender = Identity::new("Ann Lee", "Annie Lee", ["ann@x.com"]);
        assert!(!blacklist.suppresses(&sender));
        let addressless = Identity::new("Ann Lee", "Annie Lee", Vec::<String>::new());
        assert!(!blacklist.suppresses(&addressless));
    }

    #[test]
    fn test_empty_lines_are_ignored() {
        let mut blacklist = Blacklist::new();
        blacklist.insert("   ");
        assert!(blacklist.is_empty());
    }
}
