//! Event handling and user feedback

use console::{style, Term};
use verigate_events::{AppEvent, EventMessage, GeneralEvent, VerificationEvent};

use crate::logging::log_event_with_tracing;

/// Routes engine events to tracing and, in interactive mode, to stderr
pub struct EventHandler {
    colors_enabled: bool,
    debug_enabled: bool,
    quiet: bool,
    term: Term,
}

impl EventHandler {
    /// Create new event handler. `quiet` suppresses all stderr feedback.
    pub fn new(colors_enabled: bool, debug_enabled: bool, quiet: bool) -> Self {
        Self {
            colors_enabled,
            debug_enabled,
            quiet,
            term: Term::stderr(),
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, message: EventMessage) {
        log_event_with_tracing(&message);

        if self.quiet {
            return;
        }

        match message.event {
            AppEvent::General(GeneralEvent::Warning { message }) => {
                self.show_warning(&message);
            }
            AppEvent::Verification(VerificationEvent::RecordEvicted { sequence })
                if self.debug_enabled =>
            {
                self.show_status(&format!("log full, evicted record #{sequence}"));
            }
            AppEvent::Verification(VerificationEvent::BatchStarted { items })
                if self.debug_enabled =>
            {
                self.show_status(&format!("verifying {items} items"));
            }
            _ => {}
        }
    }

    fn show_status(&self, message: &str) {
        let line = if self.colors_enabled {
            style(message).dim().to_string()
        } else {
            message.to_string()
        };
        let _ = self.term.write_line(&line);
    }

    fn show_warning(&self, message: &str) {
        let line = if self.colors_enabled {
            format!("{} {message}", style("warning:").yellow().bold())
        } else {
            format!("warning: {message}")
        };
        let _ = self.term.write_line(&line);
    }
}
