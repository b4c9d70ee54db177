use serde::{Deserialize, Serialize};
use verigate_types::RetentionPolicy;

/// Events raised by the verification engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VerificationEvent {
    /// Engine constructed with its fixed tables
    EngineReady {
        categories: usize,
        identifiers: usize,
        rules: usize,
        retention: RetentionPolicy,
    },

    /// One `verify` call finished and its record was logged
    Completed {
        sequence: u64,
        fingerprint: String,
        source: String,
        verified: bool,
        source_verified: bool,
        violations: usize,
    },

    /// The ring buffer dropped its oldest record
    RecordEvicted { sequence: u64 },

    BatchStarted { items: usize },

    BatchCompleted { items: usize, verified: usize },
}
