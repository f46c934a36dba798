//! # matchledger-core
//!
//! Identity resolution and volume aggregation for mail/roster
//! reconciliation.
//!
//! This crate provides:
//! - **Identity matching** - address-first matching of inbound senders
//!   against a roster of known people
//! - **Alias widening** - retroactively linking observed addresses to a
//!   person via an external canonical-address mapping
//! - **Suppression** - a blacklist that removes bulk/spam senders from all
//!   accounting
//! - **Resolution** - the per-message match/ambiguity/fallback algorithm
//! - **Reporting** - per-person totals and fixed-width weekly histograms
//!
//! The crate is pure value logic: no file I/O, nothing fatal. Malformed or
//! ambiguous input is skipped with a `tracing` diagnostic and the batch
//! always completes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod alias;
mod blacklist;
mod identity;
mod message;
mod registry;
mod report;
mod roster;

pub use alias::AliasMap;
pub use blacklist::Blacklist;
pub use identity::{
    Identity, addresses_match, names_match, normalize_address, sender_name_matches,
};
pub use message::{MessageRecord, extract_sender_address};
pub use registry::{Registry, Resolution, UnknownSender};
pub use report::{TotalRow, total_counts, weekly_counts};
pub use roster::{Person, PersonId, Roster};
