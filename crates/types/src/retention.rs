//! Verification log retention and summary counters

use serde::{Deserialize, Serialize};

/// How many records the verification log keeps.
///
/// Defaults to `Unbounded`; a ring buffer only exists when the integrator
/// asks for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RetentionPolicy {
    /// Keep every record for the life of the engine. Memory grows without bound.
    Unbounded,
    /// Ring buffer; the oldest record is evicted once `capacity` is reached.
    Bounded { capacity: usize },
}

impl RetentionPolicy {
    /// Maximum number of retained records, if any
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Bounded { capacity } => Some(*capacity),
        }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::Unbounded
    }
}

impl std::fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unbounded => write!(f, "unbounded"),
            Self::Bounded { capacity } => write!(f, "ring({capacity})"),
        }
    }
}

/// Counters over everything the log has seen, evicted records included
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStats {
    /// Records ever appended
    pub total: u64,
    /// Records with `verified == true`
    pub verified: u64,
    /// Records with `verified == false`
    pub rejected: u64,
    /// Rejections where the source was not trusted
    pub untrusted_source: u64,
    /// Records with at least one violation
    pub flagged_content: u64,
    /// Records dropped by the ring buffer
    pub evicted: u64,
}
