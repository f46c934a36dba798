//! A single inbound message and sender-address extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::identity::Identity;

/// Address in angle brackets on the `From:` line, the preferred form.
static ANGLE_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^From:[^<\r\n]*<([^>\r\n]+)>").expect("static pattern compiles")
});

/// Bare `local@domain.tld` token on the `From:` line, the fallback form.
static BARE_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^From:\s*([^\s@<]+@[^\s@]+\.[^\s@]+)").expect("static pattern compiles")
});

/// Extracts the sender address from a raw transport-header blob.
///
/// Prefers an address inside angle brackets, falling back to the first
/// bare `local@domain` token. At most one address is kept; headers with
/// no recognizable `From:` address yield `None`.
#[must_use]
pub fn extract_sender_address(transport_headers: &str) -> Option<String> {
    let captured = ANGLE_ADDRESS
        .captures(transport_headers)
        .or_else(|| BARE_ADDRESS.captures(transport_headers))?;
    captured.get(1).map(|m| m.as_str().trim().to_string())
}

/// One inbound email, reduced to what matching and reporting need.
///
/// The sender identity uses the display name for both name forms; the
/// body is carried only for downstream consumers and never participates
/// in matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    /// Sender identity derived from the transport metadata.
    pub sender: Identity,
    /// Delivery timestamp, epoch milliseconds UTC.
    pub received_at_ms: i64,
    /// Sanitized body text, if the upstream extractor kept it.
    pub body: Option<String>,
}

impl MessageRecord {
    /// Builds a record from the sender display name, the raw transport
    /// headers, and the delivery timestamp.
    #[must_use]
    pub fn new(
        sender_name: &str,
        transport_headers: &str,
        received_at_ms: i64,
        body: Option<String>,
    ) -> Self {
        let address = extract_sender_address(transport_headers);
        Self {
            sender: Identity::new(sender_name, sender_name, address.as_deref()),
            received_at_ms,
            body,
        }
    }
}
