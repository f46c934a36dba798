//! Message-batch loading.
//!
//! Batches arrive as JSON Lines produced by the external archive reader:
//! one object per email with the sender display name, the raw transport
//! headers, the delivery timestamp, and optionally the sanitized body.

use std::path::Path;

use matchledger_core::MessageRecord;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// One message as exported by the archive reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Sender display name from the message envelope.
    #[serde(default)]
    pub sender_name: String,
    /// Raw transport-header blob; the sender address is extracted from
    /// its `From:` line.
    #[serde(default)]
    pub transport_headers: String,
    /// Delivery timestamp, epoch milliseconds UTC.
    pub received_at_ms: i64,
    /// Sanitized body text, if the exporter kept it.
    #[serde(default)]
    pub body: Option<String>,
}

impl From<RawMessage> for MessageRecord {
    fn from(raw: RawMessage) -> Self {
        Self::new(
            &raw.sender_name,
            &raw.transport_headers,
            raw.received_at_ms,
            raw.body,
        )
    }
}

/// Reads a message batch: one JSON object per line.
///
/// Blank lines are skipped; lines that do not deserialize are skipped
/// with a diagnostic.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_messages(path: &Path) -> Result<Vec<MessageRecord>> {
    let text = crate::read_to_string_lossy(path)?;
    let mut records = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<RawMessage>(line) {
            Ok(raw) => records.push(raw.into()),
            Err(error) => {
                warn!(line = number + 1, %error, "skipping malformed message record");
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_messages_builds_sender_identities() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.jsonl");
        std::fs::write(
            &path,
            concat!(
                r#"{"sender_name": "Ann Lee", "transport_headers": "From: Ann <ann@x.com>", "received_at_ms": 1000}"#,
                "\n\n",
                r#"{"sender_name": "Quiet", "transport_headers": "Subject: hi", "received_at_ms": 2000, "body": "hello"}"#,
                "\n",
            ),
        )
        .unwrap();
        let records = read_messages(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].sender.addresses().contains("ann@x.com"));
        assert!(!records[1].sender.has_addresses());
        assert_eq!(records[1].body.as_deref(), Some("hello"));
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.jsonl");
        std::fs::write(
            &path,
            concat!(
                "not json\n",
                r#"{"sender_name": "Ann Lee", "transport_headers": "", "received_at_ms": 1000}"#,
                "\n",
                r#"{"sender_name": "Missing Timestamp"}"#,
                "\n",
            ),
        )
        .unwrap();
        let records = read_messages(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].received_at_ms, 1000);
    }
}
