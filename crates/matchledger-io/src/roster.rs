//! Tracker roster loading.

use std::path::Path;
use std::sync::LazyLock;

use matchledger_core::Person;
use regex::Regex;
use tracing::warn;

use crate::csv;
use crate::error::Result;

// Column layout of the tracker export.
const COL_FIRST_NAME: usize = 0;
const COL_PREFERRED_NAME: usize = 1;
const COL_LAST_NAME: usize = 2;
const COL_PRIMARY_ADDRESS: usize = 3;
const COL_NOTES: usize = 8;

/// Loose `token@token` match for addresses buried in the notes column.
static LOOSE_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\s@]+@[^\s@]+").expect("static pattern compiles"));

/// Reads a tracker CSV export.
///
/// Non-UTF-8 bytes are decoded lossily. See [`parse_roster`] for the row
/// semantics.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is structurally
/// invalid CSV.
pub fn read_roster(path: &Path) -> Result<Vec<Person>> {
    let text = crate::read_to_string_lossy(path)?;
    parse_roster(&text)
}

/// Parses tracker rows from CSV text.
///
/// The first record is a header and is skipped. Rows without a last name
/// are skipped with a diagnostic (the tracker uses blank rows as
/// separators). Every line of the notes column contributes its first
/// `local@domain` token as an extra candidate address alongside the
/// primary address.
///
/// # Errors
///
/// Returns an error if the text is structurally invalid CSV.
pub fn parse_roster(text: &str) -> Result<Vec<Person>> {
    let records = csv::parse(text)?;
    let mut people = Vec::new();
    for (number, record) in records.iter().enumerate().skip(1) {
        let field = |index: usize| record.get(index).map_or("", String::as_str);
        if field(COL_LAST_NAME).trim().is_empty() {
            if !record.iter().all(|value| value.trim().is_empty()) {
                warn!(row = number + 1, "tracker row without a last name, skipping");
            }
            continue;
        }
        let mut addresses = vec![field(COL_PRIMARY_ADDRESS).to_string()];
        for line in field(COL_NOTES).lines() {
            if let Some(found) = LOOSE_ADDRESS.find(line) {
                addresses.push(found.as_str().to_string());
            }
        }
        people.push(Person::new(
            field(COL_FIRST_NAME),
            field(COL_PREFERRED_NAME),
            field(COL_LAST_NAME),
            addresses,
        ));
    }
    Ok(people)
}
