//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Arbiter (domain)
//! ```
//!
//! Driven adapters (trigger inputs, outputs, clocks, event sinks) implement
//! these traits.  The [`Arbiter`](super::service::Arbiter) consumes them via
//! generics, so the domain core never touches hardware directly.  Blocking
//! waits use [`embedded_hal::delay::DelayNs`] rather than a port of our own.

use serde::Serialize;

use crate::fsm::context::LatchSnapshot;

// ───────────────────────────────────────────────────────────────
// Trigger port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Edges counted per source since the previous poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeCounts {
    pub remote: u32,
    pub tool: u32,
}

/// Read-side port: the arbiter polls trigger state through this.
pub trait TriggerPort {
    /// Current state of both latches.
    fn read_latches(&mut self) -> LatchSnapshot;

    /// Edges seen on each source since the previous call.
    fn take_edge_counts(&mut self) -> EdgeCounts;

    /// Sample the off-delay trim now (0 – full scale).
    fn read_trim(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The four front-panel LEDs, in self-test order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Indicator {
    Power = 0,
    Vacuum = 1,
    Tool = 2,
    Remote = 3,
}

impl Indicator {
    /// Boot self-test order; matches `pins::PIN_TABLE.indicators`.
    pub const SELF_TEST_ORDER: [Self; 4] = [Self::Power, Self::Vacuum, Self::Tool, Self::Remote];
}

/// Write-side port: the arbiter drives indicators and the relay through this.
///
/// Reads return the last written level, like `digitalRead()` on an output.
pub trait OutputPort {
    fn set_indicator(&mut self, indicator: Indicator, on: bool);

    fn indicator(&self, indicator: Indicator) -> bool;

    /// Invert an indicator in place (used by the blink).
    fn toggle_indicator(&mut self, indicator: Indicator);

    /// Energise (`true`) or release the vacuum relay.
    fn set_relay(&mut self, on: bool);

    fn relay(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic milliseconds since boot.  Only the cooperative blink needs it.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
