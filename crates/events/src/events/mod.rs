use serde::{Deserialize, Serialize};

use crate::{EventLevel, EventMeta, EventSource};

pub mod general;
pub mod verification;

pub use general::*;
pub use verification::*;

/// Top-level application event enum that aggregates all domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General events (operator warnings)
    General(GeneralEvent),

    /// Verification engine events
    Verification(VerificationEvent),
}

impl AppEvent {
    /// Identify the source domain for this event
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::General(_) => EventSource::GENERAL,
            Self::Verification(_) => EventSource::VERIFICATION,
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::General(GeneralEvent::Warning { .. })
            | Self::Verification(VerificationEvent::Completed {
                verified: false, ..
            }) => Level::WARN,

            Self::Verification(VerificationEvent::RecordEvicted { .. }) => Level::DEBUG,

            _ => Level::INFO,
        }
    }
}

/// An event paired with its emission metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub meta: EventMeta,
    pub event: AppEvent,
}

impl EventMessage {
    /// Wrap an event, deriving level and source from the event itself
    #[must_use]
    pub fn from_event(event: AppEvent) -> Self {
        let level = EventLevel::from(event.log_level());
        let meta = EventMeta::new(level, event.event_source());
        Self { meta, event }
    }
}
