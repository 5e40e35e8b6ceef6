//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the trim input and all output drivers, and borrows the
//! ISR-written latches, exposing them through [`TriggerPort`] and
//! [`OutputPort`].  On non-espidf targets, the underlying drivers use
//! cfg-gated simulation stubs.

use crate::app::ports::{EdgeCounts, Indicator, OutputPort, TriggerPort};
use crate::drivers::indicator::IndicatorBank;
use crate::drivers::relay::RelayDriver;
use crate::fsm::context::LatchSnapshot;
use crate::sensors::Latches;
use crate::sensors::trim::TrimInput;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    latches: &'static Latches,
    trim: TrimInput,
    indicators: IndicatorBank,
    relay: RelayDriver,
}

impl HardwareAdapter {
    pub fn new(
        latches: &'static Latches,
        trim: TrimInput,
        indicators: IndicatorBank,
        relay: RelayDriver,
    ) -> Self {
        Self {
            latches,
            trim,
            indicators,
            relay,
        }
    }
}

// ── TriggerPort implementation ────────────────────────────────

impl TriggerPort for HardwareAdapter {
    fn read_latches(&mut self) -> LatchSnapshot {
        self.latches.snapshot()
    }

    fn take_edge_counts(&mut self) -> EdgeCounts {
        EdgeCounts {
            remote: self.latches.remote.take_edges(),
            tool: self.latches.tool.take_edges(),
        }
    }

    fn read_trim(&mut self) -> u16 {
        self.trim.read()
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl OutputPort for HardwareAdapter {
    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        self.indicators.set(indicator, on);
    }

    fn indicator(&self, indicator: Indicator) -> bool {
        self.indicators.is_on(indicator)
    }

    fn toggle_indicator(&mut self, indicator: Indicator) {
        self.indicators.toggle(indicator);
    }

    fn set_relay(&mut self, on: bool) {
        if on {
            self.relay.energise();
        } else {
            self.relay.release();
        }
    }

    fn relay(&self) -> bool {
        self.relay.is_energised()
    }
}
