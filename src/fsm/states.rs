//! Concrete state handler functions and table builder.
//!
//! Each state is defined by three plain `fn` pointers: no closures, no
//! dynamic dispatch, no heap.
//!
//! ```text
//!  IDLE ──[remote only]──────────────────────▶ RUNNING
//!    │                                          ▲   │
//!  [tool only]                      [flash done]│   │[both latches clear]
//!    ▼                                          │   ▼
//!  STARTING ────────────────────────────────────┘ STOPPING
//!                                                   │
//!    IDLE ◀──────────────[grace flash done]─────────┘
//! ```
//!
//! Both latches active while idle starts nothing.  Once running, only the
//! stop condition is watched; new triggers are ignored.

use super::context::{BlinkRequest, FsmContext, OutputCommands};
use super::{StateDescriptor, StateId};
use crate::config::BlinkMode;
use crate::sensors::TriggerSource;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        StateDescriptor {
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        StateDescriptor {
            name: "Starting",
            on_enter: Some(starting_enter),
            on_exit: Some(starting_exit),
            on_update: starting_update,
        },
        StateDescriptor {
            name: "Running",
            on_enter: Some(running_enter),
            on_exit: None,
            on_update: running_update,
        },
        StateDescriptor {
            name: "Stopping",
            on_enter: Some(stopping_enter),
            on_exit: Some(stopping_exit),
            on_update: stopping_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut FsmContext) {
    ctx.commands = OutputCommands::all_off();
    ctx.source = None;
}

fn idle_update(ctx: &mut FsmContext) -> Option<StateId> {
    match ctx.latches.start_request()? {
        TriggerSource::Remote => {
            info!("Idle: remote on, starting vacuum");
            ctx.source = Some(TriggerSource::Remote);
            Some(StateId::Running)
        }
        TriggerSource::Tool => {
            info!("Idle: tool current detected, pre-start warning");
            ctx.source = Some(TriggerSource::Tool);
            Some(StateId::Starting)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  STARTING: tool LED on, fixed flash, then run
// ═══════════════════════════════════════════════════════════════════════════

fn starting_enter(ctx: &mut FsmContext) {
    ctx.commands.tool_led = true;
    ctx.request_blink(BlinkRequest::PreStart);
}

fn starting_exit(ctx: &mut FsmContext) {
    ctx.cancel_blink();
}

fn starting_update(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.blink_finished.then_some(StateId::Running)
}

// ═══════════════════════════════════════════════════════════════════════════
//  RUNNING: relay on, wait for both latches to clear
// ═══════════════════════════════════════════════════════════════════════════

fn running_enter(ctx: &mut FsmContext) {
    let source = ctx.source;
    ctx.commands.remote_led = source == Some(TriggerSource::Remote);
    ctx.commands.tool_led = source == Some(TriggerSource::Tool);
    ctx.commands.vacuum_led = true;
    ctx.commands.relay = true;
}

fn running_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.latches.any_active() {
        return None;
    }
    info!("Running: both triggers clear, shutting down");
    Some(StateId::Stopping)
}

// ═══════════════════════════════════════════════════════════════════════════
//  STOPPING: grace flash, then idle
// ═══════════════════════════════════════════════════════════════════════════

fn stopping_enter(ctx: &mut FsmContext) {
    ctx.request_blink(BlinkRequest::Grace);
}

fn stopping_exit(ctx: &mut FsmContext) {
    ctx.cancel_blink();
}

fn stopping_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.blink_finished {
        return Some(StateId::Idle);
    }

    // A blocking flash completes inside one cycle, so this branch is only
    // reachable when the flash runs cooperatively.
    if ctx.config.blink_mode == BlinkMode::Cooperative && ctx.latches.any_active() {
        if let Some(source) = ctx.latches.start_request() {
            ctx.source = Some(source);
        }
        debug!("Stopping: trigger returned during grace, resuming");
        return Some(StateId::Running);
    }
    None
}
