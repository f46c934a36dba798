//! Report exports: per-person totals CSV and the weekly histogram.

use std::path::Path;

use matchledger_core::TotalRow;

use crate::csv;
use crate::error::Result;

/// Writes the totals report as CSV with a header row.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_totals(path: &Path, rows: &[TotalRow]) -> Result<()> {
    let mut out = String::new();
    out.push_str(&csv::write_record(&[
        "First Name",
        "Preferred Name",
        "Last Name",
        "Email Count",
    ]));
    out.push('\n');
    for row in rows {
        let count = row.count.to_string();
        out.push_str(&csv::write_record(&[
            &row.first_name,
            &row.preferred_name,
            &row.last_name,
            &count,
        ]));
        out.push('\n');
    }
    std::fs::write(path, out)?;
    Ok(())
}

/// Writes the weekly histogram, one count per line.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_weekly(path: &Path, counts: &[u64]) -> Result<()> {
    let lines: Vec<String> = counts.iter().map(ToString::to_string).collect();
    std::fs::write(path, lines.join("\n"))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_write_totals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("totals.csv");
        let rows = vec![
            TotalRow {
                first_name: "Ann".to_string(),
                preferred_name: "Annie".to_string(),
                last_name: "Lee".to_string(),
                count: 3,
            },
            TotalRow {
                first_name: "Chris, Jr.".to_string(),
                preferred_name: "Chris".to_string(),
                last_name: "Smith".to_string(),
                count: 0,
            },
        ];
        write_totals(&path, &rows).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("First Name,Preferred Name,Last Name,Email Count")
        );
        assert_eq!(lines.next(), Some("Ann,Annie,Lee,3"));
        assert_eq!(lines.next(), Some("\"Chris, Jr.\",Chris,Smith,0"));
    }

    #[test]
    fn test_write_weekly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weekly.txt");
        write_weekly(&path, &[3, 0, 7]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "3\n0\n7");
    }
}
