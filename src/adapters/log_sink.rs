//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::GracePeriod { trim, secs } => {
                info!("GRACE | trim={} -> {}s", trim, secs);
            }
            AppEvent::EdgesCoalesced { source, edges } => {
                warn!("EDGES | {:?} saw {} edges since last poll", source, edges);
            }
            AppEvent::BothTriggersActive => {
                warn!("TRIGGER | remote and tool both active, ignoring");
            }
        }
    }
}
