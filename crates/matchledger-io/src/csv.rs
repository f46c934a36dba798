//! Minimal CSV reading and writing.
//!
//! The tracker export carries quoted fields with embedded commas and
//! newlines (the free-text notes column), so line splitting is not
//! enough. This is a small RFC 4180-style reader; writing only needs
//! enough quoting for the totals export.

use crate::error::{Error, Result};

/// Parses CSV text into records of fields.
///
/// Quoted fields may contain commas, newlines, and doubled quotes. Both
/// `\n` and `\r\n` record separators are accepted.
///
/// # Errors
///
/// Returns an error on a quote inside an unquoted field or an
/// unterminated quoted field.
pub fn parse(text: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut line = 1_usize;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() && !field_was_quoted => {
                in_quotes = true;
                field_was_quoted = true;
            }
            '"' => {
                return Err(Error::Csv {
                    line,
                    message: "quote inside unquoted field".to_string(),
                });
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                field_was_quoted = false;
            }
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    field.push('\r');
                }
            }
            '\n' => {
                line += 1;
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
                field_was_quoted = false;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(Error::Csv {
            line,
            message: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || field_was_quoted || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}

/// Joins one record into a CSV line, quoting fields that need it.
#[must_use]
pub fn write_record(fields: &[&str]) -> String {
    fields.iter().map(|field| escape(field)).collect::<Vec<_>>().join(",")
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_records() {
        let records = parse("a,b,c\nd,e,f\n").unwrap();
        assert_eq!(records, vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]);
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let records = parse("a,b\nc,d").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], vec!["c", "d"]);
    }

    #[test]
    fn test_parse_quoted_comma_and_newline() {
        let records = parse("name,notes\nAnn,\"line one\nann@x.com, see notes\"\n").unwrap();
        assert_eq!(records[1][0], "Ann");
        assert_eq!(records[1][1], "line one\nann@x.com, see notes");
    }

    #[test]
    fn test_parse_doubled_quotes() {
        let records = parse("\"say \"\"hi\"\"\",b\n").unwrap();
        assert_eq!(records[0][0], "say \"hi\"");
        assert_eq!(records[0][1], "b");
    }

    #[test]
    fn test_parse_crlf_records() {
        let records = parse("a,b\r\nc,d\r\n").unwrap();
        assert_eq!(records, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_parse_empty_fields() {
        let records = parse(",,\n").unwrap();
        assert_eq!(records, vec![vec!["", "", ""]]);
    }

    #[test]
    fn test_parse_rejects_unterminated_quote() {
        assert!(matches!(parse("\"oops\n"), Err(Error::Csv { .. })));
    }

    #[test]
    fn test_parse_rejects_stray_quote() {
        assert!(matches!(parse("a\"b\n"), Err(Error::Csv { .. })));
    }

    #[test]
    fn test_write_record_quotes_when_needed() {
        assert_eq!(write_record(&["a", "b"]), "a,b");
        assert_eq!(write_record(&["a,b", "c\"d"]), "\"a,b\",\"c\"\"d\"");
    }
}
