//! Relay arbiter, the hexagonal core.
//!
//! [`Arbiter`] owns the FSM and shared context.  All I/O flows through
//! port traits injected at call sites, making it testable with mock
//! adapters.
//!
//! ```text
//!  TriggerPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │        Arbiter          │
//!  OutputPort  ◀── │  FSM · flash · delay    │ ◀── DelayNs + Clock
//!                  └────────────────────────┘
//! ```
//!
//! ## One cycle
//!
//! 1. Sample both latches and their edge counters.
//! 2. Tick the FSM once.
//! 3. Apply the commanded outputs and run any flash the new state asked for.
//!    - `Blocking`: the flash runs to completion inside this call and the
//!      transient state is ticked through, so a cycle always ends in Idle
//!      or Running.
//!    - `Cooperative`: the flash advances by the clock and the cycle
//!      returns immediately.

use embedded_hal::delay::DelayNs;
use log::{debug, info};
use serde::Serialize;

use crate::config::{BlinkMode, ControllerConfig};
use crate::control::off_delay::off_delay_secs;
use crate::drivers::blink::BlinkJob;
use crate::fsm::context::{BlinkRequest, FsmContext, LatchSnapshot, OutputCommands};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::sensors::TriggerSource;

use super::events::AppEvent;
use super::ports::{Clock, EventSink, Indicator, OutputPort, TriggerPort};

/// Point-in-time view of the arbiter, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArbiterStatus {
    pub state: StateId,
    pub vac_active: bool,
    pub latches: LatchSnapshot,
    pub outputs: OutputCommands,
    pub source: Option<TriggerSource>,
    pub grace_secs: Option<u16>,
    pub cycles: u64,
}

impl ArbiterStatus {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// ───────────────────────────────────────────────────────────────
// Arbiter
// ───────────────────────────────────────────────────────────────

pub struct Arbiter {
    fsm: Fsm,
    ctx: FsmContext,
    cycle_count: u64,
    /// Latched so `BothTriggersActive` fires once per occurrence.
    both_active_reported: bool,
}

impl Arbiter {
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), StateId::Idle),
            ctx: FsmContext::new(config),
            cycle_count: 0,
            both_active_reported: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!(
            "Arbiter started in {:?} ({:?} flash)",
            self.fsm.current_state(),
            self.ctx.config.blink_mode
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one arbitration cycle.
    ///
    /// `hw` satisfies both [`TriggerPort`] and [`OutputPort`], and `time`
    /// both [`DelayNs`] and [`Clock`], which avoids double mutable borrows
    /// while keeping the port boundary explicit.
    pub fn cycle<H, T>(&mut self, hw: &mut H, time: &mut T, sink: &mut impl EventSink)
    where
        H: TriggerPort + OutputPort,
        T: DelayNs + Clock,
    {
        self.cycle_count += 1;

        // 1. Sample
        self.ctx.latches = hw.read_latches();
        let edges = hw.take_edge_counts();
        for (source, count) in [
            (TriggerSource::Remote, edges.remote),
            (TriggerSource::Tool, edges.tool),
        ] {
            if count > 1 {
                sink.emit(&AppEvent::EdgesCoalesced {
                    source,
                    edges: count,
                });
            }
        }
        self.report_both_active(sink);

        // 2. Decide
        self.tick_fsm(sink);

        // 3. Act
        match self.ctx.config.blink_mode {
            BlinkMode::Blocking => self.settle_blocking(hw, time, sink),
            BlinkMode::Cooperative => self.advance_cooperative(hw, &*time, sink),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// True while the relay is meant to be on.
    pub fn vac_active(&self) -> bool {
        self.fsm.current_state().vac_active()
    }

    pub fn status(&self) -> ArbiterStatus {
        ArbiterStatus {
            state: self.fsm.current_state(),
            vac_active: self.vac_active(),
            latches: self.ctx.latches,
            outputs: self.ctx.commands,
            source: self.ctx.source,
            grace_secs: self.ctx.grace_secs,
            cycles: self.cycle_count,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn tick_fsm(&mut self, sink: &mut impl EventSink) {
        let from = self.fsm.current_state();
        self.fsm.tick(&mut self.ctx);
        let to = self.fsm.current_state();
        if from != to {
            sink.emit(&AppEvent::StateChanged { from, to });
        }
    }

    fn report_both_active(&mut self, sink: &mut impl EventSink) {
        if !self.ctx.latches.both_active() {
            self.both_active_reported = false;
            return;
        }
        if !self.both_active_reported {
            self.both_active_reported = true;
            sink.emit(&AppEvent::BothTriggersActive);
        }
    }

    /// Run every requested flash to completion, ticking the transient
    /// state after each one.
    fn settle_blocking<H, D>(&mut self, hw: &mut H, delay: &mut D, sink: &mut impl EventSink)
    where
        H: TriggerPort + OutputPort,
        D: DelayNs,
    {
        self.apply_outputs(hw);
        while let Some(request) = self.ctx.blink_request.take() {
            let job = self.resolve_blink(request, hw, sink);
            job.run_blocking(hw, delay);
            self.ctx.blink_finished = true;
            self.tick_fsm(sink);
            self.apply_outputs(hw);
        }
    }

    fn advance_cooperative<H, C>(&mut self, hw: &mut H, clock: &C, sink: &mut impl EventSink)
    where
        H: TriggerPort + OutputPort,
        C: Clock,
    {
        self.apply_outputs(hw);
        if let Some(request) = self.ctx.blink_request.take() {
            self.ctx.blink = Some(self.resolve_blink(request, hw, sink));
        }
        if let Some(job) = self.ctx.blink.as_mut() {
            if job.poll(hw, clock.now_ms()) {
                self.ctx.blink = None;
                self.ctx.blink_finished = true;
            }
        }
    }

    fn resolve_blink(
        &mut self,
        request: BlinkRequest,
        hw: &mut impl TriggerPort,
        sink: &mut impl EventSink,
    ) -> BlinkJob {
        let secs = match request {
            BlinkRequest::PreStart => self.ctx.config.on_tool_delay_secs,
            BlinkRequest::Grace => {
                let trim = hw.read_trim();
                let secs = off_delay_secs(trim, &self.ctx.config);
                self.ctx.grace_secs = Some(secs);
                sink.emit(&AppEvent::GracePeriod { trim, secs });
                secs
            }
        };
        debug!(
            "flash: {:?} for {}s, {}ms per toggle",
            request,
            secs,
            self.ctx.config.blink_period_ms()
        );
        BlinkJob::new(self.ctx.config.flashes_per_second, secs)
    }

    /// Bring the outputs to the commanded levels.
    ///
    /// Only outputs that differ from their current level are written, and
    /// everything going off is written before anything going on.  The
    /// vacuum LED is left alone while a flash owns it.
    fn apply_outputs(&self, hw: &mut impl OutputPort) {
        let cmds = self.ctx.commands;
        let vac_owned = self.ctx.blink.is_none() && self.ctx.blink_request.is_none();

        // ── Off ──────────────────────────────────────────────
        if vac_owned && !cmds.vacuum_led {
            write_indicator(hw, Indicator::Vacuum, false);
        }
        if !cmds.relay && hw.relay() {
            hw.set_relay(false);
        }
        if !cmds.remote_led {
            write_indicator(hw, Indicator::Remote, false);
        }
        if !cmds.tool_led {
            write_indicator(hw, Indicator::Tool, false);
        }

        // ── On ───────────────────────────────────────────────
        if cmds.remote_led {
            write_indicator(hw, Indicator::Remote, true);
        }
        if cmds.tool_led {
            write_indicator(hw, Indicator::Tool, true);
        }
        if vac_owned && cmds.vacuum_led {
            write_indicator(hw, Indicator::Vacuum, true);
        }
        if cmds.relay && !hw.relay() {
            hw.set_relay(true);
        }
    }
}

fn write_indicator(hw: &mut impl OutputPort, indicator: Indicator, on: bool) {
    if hw.indicator(indicator) != on {
        hw.set_indicator(indicator, on);
    }
}

impl Default for Arbiter {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}
