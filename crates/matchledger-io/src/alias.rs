//! Alias-map loading and the unknown-sender template export.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use matchledger_core::{AliasMap, UnknownSender};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One entry of the alias file, keyed by the observed address.
///
/// The display name is carried for the human editing the file; only
/// `map_email` feeds matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Display name of the observed sender.
    #[serde(default)]
    pub name: String,
    /// Canonical address already owned by a roster person; empty until a
    /// human fills it in.
    #[serde(default)]
    pub map_email: String,
}

/// Reads an alias file (`observed address -> entry`).
///
/// Entries with an empty `map_email` are unfilled template rows and are
/// ignored.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn read_aliases(path: &Path) -> Result<AliasMap> {
    let text = crate::read_to_string_lossy(path)?;
    let raw: BTreeMap<String, AliasEntry> = serde_json::from_str(&text)?;
    let mut aliases = AliasMap::new();
    for (observed, entry) in &raw {
        aliases.insert(observed, &entry.map_email);
    }
    Ok(aliases)
}

/// Writes an alias template from the unknown-sender set: one entry per
/// address, `map_email` left empty for hand-editing.
///
/// Unknown senders without an address are omitted. When the target file
/// already exists its entries are kept over the generated ones, so
/// filled-in mappings survive a re-export.
///
/// # Errors
///
/// Returns an error if an existing file cannot be parsed or the file
/// cannot be written.
pub fn write_alias_template(path: &Path, unknown: &BTreeSet<UnknownSender>) -> Result<()> {
    let mut template: BTreeMap<String, AliasEntry> = unknown
        .iter()
        .filter_map(|sender| {
            sender.address.as_ref().map(|address| {
                (
                    address.clone(),
                    AliasEntry {
                        name: sender.name.clone(),
                        map_email: String::new(),
                    },
                )
            })
        })
        .collect();
    if path.exists() {
        let existing: BTreeMap<String, AliasEntry> =
            serde_json::from_str(&crate::read_to_string_lossy(path)?)?;
        template.extend(existing);
    }
    std::fs::write(path, serde_json::to_string_pretty(&template)?)?;
    Ok(())
}
