//! Verification verdicts

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of every violation description
pub const VIOLATION_PREFIX: &str = "Potential hallucination: ";

/// Render the violation text for a matched pattern
#[must_use]
pub fn violation_description(pattern: &str) -> String {
    format!("{VIOLATION_PREFIX}{pattern}")
}

/// One verdict produced by the engine. Never mutated after it is logged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Position in the engine's log, assigned at append time
    pub sequence: u64,
    /// Hex-encoded hash of the raw content bytes
    pub content_fingerprint: String,
    /// Claimed origin, echoed as submitted
    pub source: String,
    /// Capture time
    pub timestamp: DateTime<Utc>,
    /// True only if the source is trusted and no pattern fired
    pub verified: bool,
    /// Whether the source alone passed the registry check
    pub source_verified: bool,
    /// One entry per matched pattern, in ruleset order
    pub violations: Vec<String>,
}

impl VerificationRecord {
    /// Timestamp rendered as ISO-8601
    #[must_use]
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Content carried at least one red flag
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Patterns that fired, with the description prefix stripped
    pub fn matched_patterns(&self) -> impl Iterator<Item = &str> {
        self.violations
            .iter()
            .map(|v| v.strip_prefix(VIOLATION_PREFIX).unwrap_or(v))
    }
}
