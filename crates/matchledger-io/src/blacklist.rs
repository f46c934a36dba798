//! Blacklist loading.

use std::path::Path;

use matchledger_core::Blacklist;

use crate::error::Result;

/// Reads a blacklist file: one address per line, blank lines skipped.
/// Entries are normalized on insert, so raw and pre-normalized lists
/// behave the same.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_blacklist(path: &Path) -> Result<Blacklist> {
    let text = crate::read_to_string_lossy(path)?;
    let mut blacklist = Blacklist::new();
    for line in text.lines() {
        let line = line.trim();
        if !line.is_empty() {
            blacklist.insert(line);
        }
    }
    Ok(blacklist)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use matchledger_core::Identity;

    #[test]
    fn test_read_blacklist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blacklist.txt");
        std::fs::write(&path, "No.Reply@Bulk.COM\n\n  promo@ads.net  \n").unwrap();
        let blacklist = read_blacklist(&path).unwrap();
        assert_eq!(blacklist.len(), 2);
        let sender = Identity::new("Bulk", "Bulk", ["noreply@bulk.com"]);
        assert!(blacklist.suppresses(&sender));
    }
}
