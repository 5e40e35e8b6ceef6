//! Outbound application events.
//!
//! The [`Arbiter`](super::service::Arbiter) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; on the device they become log lines.

use crate::fsm::StateId;
use crate::sensors::TriggerSource;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The arbiter has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// A stop began; the trim was sampled and converted to a grace period.
    GracePeriod { trim: u16, secs: u16 },

    /// More than one edge on `source` arrived between two polls, so at
    /// least one intermediate level was never seen by the arbiter.
    EdgesCoalesced { source: TriggerSource, edges: u32 },

    /// Both latches became active together.  Nothing is started.
    BothTriggersActive,
}
