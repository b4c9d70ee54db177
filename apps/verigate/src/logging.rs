//! Structured logging integration for events
//!
//! Converts domain events received from the engine into tracing records with
//! structured fields.

use tracing::{debug, info, warn};
use verigate_events::{AppEvent, EventMessage, GeneralEvent, VerificationEvent};

/// Log an event message using the tracing infrastructure
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;

    match &message.event {
        AppEvent::Verification(event) => match event {
            VerificationEvent::EngineReady {
                categories,
                identifiers,
                rules,
                retention,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    categories = categories,
                    identifiers = identifiers,
                    rules = rules,
                    retention = %retention,
                    "Engine ready"
                );
            }
            VerificationEvent::Completed {
                sequence,
                fingerprint,
                source: claimed,
                verified,
                source_verified,
                violations,
            } => {
                if *verified {
                    info!(
                        source = meta.source.as_str(),
                        event_id = %meta.event_id,
                        sequence = sequence,
                        fingerprint = %fingerprint,
                        claimed_source = %claimed,
                        "Content verified"
                    );
                } else {
                    warn!(
                        source = meta.source.as_str(),
                        event_id = %meta.event_id,
                        sequence = sequence,
                        fingerprint = %fingerprint,
                        claimed_source = %claimed,
                        source_verified = source_verified,
                        violations = violations,
                        "Content rejected"
                    );
                }
            }
            VerificationEvent::RecordEvicted { sequence } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    sequence = sequence,
                    "Record evicted from log"
                );
            }
            VerificationEvent::BatchStarted { items } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    items = items,
                    "Batch started"
                );
            }
            VerificationEvent::BatchCompleted { items, verified } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    items = items,
                    verified = verified,
                    "Batch completed"
                );
            }
        },

        AppEvent::General(GeneralEvent::Warning { message }) => {
            warn!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                "{message}"
            );
        }
    }
}
