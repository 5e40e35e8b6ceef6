//! Mock hardware adapter for integration tests.
//!
//! Records every output call so tests can assert on the full command
//! history without touching GPIO.  The mock clock advances only when a
//! delay is requested, so flash timing is deterministic.

use embedded_hal::delay::DelayNs;
use shopvac::app::events::AppEvent;
use shopvac::app::ports::{Clock, EdgeCounts, EventSink, Indicator, OutputPort, TriggerPort};
use shopvac::fsm::context::LatchSnapshot;

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCall {
    Indicator(Indicator, bool),
    Toggle(Indicator),
    Relay(bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<OutputCall>,
    pub latches: LatchSnapshot,
    pub edges: EdgeCounts,
    pub trim: u16,
    pub trim_reads: u32,
    leds: [bool; 4],
    relay: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            latches: LatchSnapshot::default(),
            edges: EdgeCounts::default(),
            trim: 0,
            trim_reads: 0,
            leds: [false; 4],
            relay: false,
        }
    }

    pub fn set_latches(&mut self, remote: bool, tool: bool) {
        self.latches = LatchSnapshot { remote, tool };
    }

    pub fn led(&self, indicator: Indicator) -> bool {
        self.leds[indicator as usize]
    }

    pub fn relay_on(&self) -> bool {
        self.relay
    }

    pub fn toggle_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, OutputCall::Toggle(Indicator::Vacuum)))
            .count()
    }

    /// Vacuum LED toggles recorded before the first `Relay(on)`.
    pub fn toggles_before_relay_on(&self) -> Option<usize> {
        let idx = self.calls.iter().position(|c| *c == OutputCall::Relay(true))?;
        Some(
            self.calls[..idx]
                .iter()
                .filter(|c| matches!(c, OutputCall::Toggle(Indicator::Vacuum)))
                .count(),
        )
    }

    /// Vacuum LED toggles recorded before the first `Relay(off)`.
    pub fn toggles_before_relay_off(&self) -> Option<usize> {
        let idx = self.calls.iter().position(|c| *c == OutputCall::Relay(false))?;
        Some(
            self.calls[..idx]
                .iter()
                .filter(|c| matches!(c, OutputCall::Toggle(Indicator::Vacuum)))
                .count(),
        )
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerPort for MockHardware {
    fn read_latches(&mut self) -> LatchSnapshot {
        self.latches
    }

    fn take_edge_counts(&mut self) -> EdgeCounts {
        std::mem::take(&mut self.edges)
    }

    fn read_trim(&mut self) -> u16 {
        self.trim_reads += 1;
        self.trim
    }
}

impl OutputPort for MockHardware {
    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        self.leds[indicator as usize] = on;
        self.calls.push(OutputCall::Indicator(indicator, on));
    }

    fn indicator(&self, indicator: Indicator) -> bool {
        self.leds[indicator as usize]
    }

    fn toggle_indicator(&mut self, indicator: Indicator) {
        self.leds[indicator as usize] = !self.leds[indicator as usize];
        self.calls.push(OutputCall::Toggle(indicator));
    }

    fn set_relay(&mut self, on: bool) {
        self.relay = on;
        self.calls.push(OutputCall::Relay(on));
    }

    fn relay(&self) -> bool {
        self.relay
    }
}

// ── MockClock ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockClock {
    pub now_ms: u64,
    pub delayed_ms: u64,
    pub delay_calls: u32,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }
}

impl DelayNs for MockClock {
    fn delay_ns(&mut self, ns: u32) {
        let ms = u64::from(ns / 1_000_000);
        self.now_ms += ms;
        self.delayed_ms += ms;
        self.delay_calls += 1;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now_ms += u64::from(ms);
        self.delayed_ms += u64::from(ms);
        self.delay_calls += 1;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
