//! Input subsystem: the two trigger latches and the off-delay trim.
//!
//! [`Latches`] is the single piece of state shared between interrupt
//! context and the control loop.  The board-wide instance [`LATCHES`] is
//! handed by reference both to ISR registration
//! ([`init_isr_service`](crate::drivers::hw_init::init_isr_service)) and to
//! the [`HardwareAdapter`](crate::adapters::hardware::HardwareAdapter) the
//! arbiter polls.

pub mod latch;
pub mod trim;

use serde::Serialize;

use crate::events::Event;
use crate::fsm::context::LatchSnapshot;
use crate::pins;
use latch::SignalLatch;

/// Which input asked for the vacuum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TriggerSource {
    /// Wireless keyfob receiver.
    Remote,
    /// Power-tool current sensor.
    Tool,
}

impl TriggerSource {
    /// Diagnostic event pushed by the ISR for this source.
    pub const fn edge_event(self) -> Event {
        match self {
            Self::Remote => Event::RemoteEdge,
            Self::Tool => Event::ToolEdge,
        }
    }
}

/// Both trigger latches.
pub struct Latches {
    pub remote: SignalLatch,
    pub tool: SignalLatch,
}

impl Latches {
    pub const fn new(remote_gpio: i32, tool_gpio: i32) -> Self {
        Self {
            remote: SignalLatch::new(TriggerSource::Remote, remote_gpio),
            tool: SignalLatch::new(TriggerSource::Tool, tool_gpio),
        }
    }

    /// Read both latches.  Each read is individually atomic; the pair is
    /// not, which matches two independent interrupt sources.
    pub fn snapshot(&self) -> LatchSnapshot {
        LatchSnapshot {
            remote: self.remote.is_active(),
            tool: self.tool.is_active(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignalLatch> {
        [&self.remote, &self.tool].into_iter()
    }
}

/// Board-wide latch pair, bound to the pins in [`pins::PIN_TABLE`].
pub static LATCHES: Latches = Latches::new(pins::PIN_TABLE.remote_int, pins::PIN_TABLE.tool_int);
