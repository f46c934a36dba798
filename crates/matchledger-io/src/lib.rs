//! # matchledger-io
//!
//! Collaborator-facing loaders and exporters for `MatchLedger`:
//!
//! - **Roster CSV** - tracker exports with quoted, multi-line fields
//! - **Alias JSON** - observed-address to canonical-address maps
//! - **Blacklist text** - one suppressed address per line
//! - **Message batches** - JSON Lines produced by the external archive
//!   reader
//! - **Exports** - the unknown-sender alias template, per-person totals
//!   CSV, and the weekly histogram
//!
//! File-level failures are real errors; malformed rows and records inside
//! an otherwise readable file are skipped with a diagnostic, never fatal.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod alias;
mod blacklist;
mod csv;
mod error;
mod messages;
mod report;
mod roster;

pub use alias::{AliasEntry, read_aliases, write_alias_template};
pub use blacklist::read_blacklist;
pub use error::{Error, Result};
pub use messages::{RawMessage, read_messages};
pub use report::{write_totals, write_weekly};
pub use roster::{parse_roster, read_roster};

/// Reads a file, decoding non-UTF-8 bytes lossily. Tracker and blacklist
/// exports come from tools that still emit Latin-1.
pub(crate) fn read_to_string_lossy(path: &std::path::Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
