//! Edge-triggered trigger latch.
//!
//! The ISR for each trigger input calls [`SignalLatch::on_edge`] on every
//! rising *and* falling edge with the pin's instantaneous level.  The source
//! hardware is active-low, so the latch stores the inverse of that level.
//!
//! There is no debounce and no queue: the latch only remembers the last
//! edge.  If several edges arrive before the control loop polls, the
//! intermediate states are lost.  The edge counter lets the loop notice that
//! this happened (see [`SignalLatch::take_edges`]).
//!
//! Written only from interrupt context, read only from the main loop.
//! Both fields are atomics, so no critical section is needed on any target.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::TriggerSource;

pub struct SignalLatch {
    source: TriggerSource,
    gpio: i32,
    active: AtomicBool,
    edges: AtomicU32,
}

impl SignalLatch {
    pub const fn new(source: TriggerSource, gpio: i32) -> Self {
        Self {
            source,
            gpio,
            active: AtomicBool::new(false),
            edges: AtomicU32::new(0),
        }
    }

    /// ISR entry: record one edge.  `pin_high` is the level sampled in the
    /// handler.  Lock-free, safe from interrupt context.
    pub fn on_edge(&self, pin_high: bool) {
        self.active.store(!pin_high, Ordering::Release);
        self.edges.fetch_add(1, Ordering::Relaxed);
    }

    /// Whether the trigger source is currently asserted.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Edges observed since the previous call.
    pub fn take_edges(&self) -> u32 {
        self.edges.swap(0, Ordering::Relaxed)
    }

    pub fn source(&self) -> TriggerSource {
        self.source
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}
