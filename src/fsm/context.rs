//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It holds the latest latch snapshot, the output levels the
//! current state wants, the pending/active flash, and configuration.
//! Handlers never touch hardware; the arbiter applies `commands` and runs
//! flashes between ticks.

use serde::Serialize;

use crate::config::ControllerConfig;
use crate::drivers::blink::BlinkJob;
use crate::sensors::TriggerSource;

// ---------------------------------------------------------------------------
// Latch snapshot (read-only to state handlers; written by the arbiter)
// ---------------------------------------------------------------------------

/// Both trigger latches, sampled together at the top of a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LatchSnapshot {
    pub remote: bool,
    pub tool: bool,
}

impl LatchSnapshot {
    /// The single source asking to start, or `None` when neither or both are
    /// active.
    pub fn start_request(&self) -> Option<TriggerSource> {
        match (self.remote, self.tool) {
            (true, false) => Some(TriggerSource::Remote),
            (false, true) => Some(TriggerSource::Tool),
            _ => None,
        }
    }

    pub fn any_active(&self) -> bool {
        self.remote || self.tool
    }

    pub fn both_active(&self) -> bool {
        self.remote && self.tool
    }
}

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; applied by the arbiter)
// ---------------------------------------------------------------------------

/// Levels the current state wants on the arbiter-owned outputs.
///
/// The power LED is owned by the boot sequence and is not listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutputCommands {
    pub vacuum_led: bool,
    pub tool_led: bool,
    pub remote_led: bool,
    pub relay: bool,
}

impl OutputCommands {
    pub fn all_off() -> Self {
        Self::default()
    }
}

/// A flash a state wants run before it can complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkRequest {
    /// Fixed pre-start warning before a tool-triggered start.
    PreStart,
    /// Shutdown grace period, length taken from the trim.
    Grace,
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

pub struct FsmContext {
    pub latches: LatchSnapshot,
    pub commands: OutputCommands,
    pub config: ControllerConfig,

    /// Which trigger started the current run.
    pub source: Option<TriggerSource>,

    /// Set by `on_enter`; taken by the arbiter when it starts the flash.
    pub blink_request: Option<BlinkRequest>,
    /// Flash in progress (cooperative mode only).
    pub blink: Option<BlinkJob>,
    /// Set by the arbiter when the requested flash has completed.
    pub blink_finished: bool,

    /// Grace period computed at the most recent stop.
    pub grace_secs: Option<u16>,
}

impl FsmContext {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            latches: LatchSnapshot::default(),
            commands: OutputCommands::all_off(),
            config,
            source: None,
            blink_request: None,
            blink: None,
            blink_finished: false,
            grace_secs: None,
        }
    }

    /// Queue a flash and clear the completion flag from any earlier one.
    pub fn request_blink(&mut self, request: BlinkRequest) {
        self.blink_request = Some(request);
        self.blink = None;
        self.blink_finished = false;
    }

    pub fn cancel_blink(&mut self) {
        self.blink_request = None;
        self.blink = None;
        self.blink_finished = false;
    }
}
