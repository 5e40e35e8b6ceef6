//! Vacuum-indicator flash sequences.
//!
//! A flash runs `flashes_per_second * seconds * 2` toggles of the vacuum
//! LED, one every `500 / flashes_per_second` ms.  The LED's starting level
//! is whatever it was; each toggle inverts it.  With an even toggle count
//! the LED ends where it started.
//!
//! Two ways to run one:
//!
//! - [`flash`] / [`BlinkJob::run_blocking`] toggles and sleeps in a loop,
//!   returning only when the sequence is done.
//! - [`BlinkJob::poll`] advances one toggle per call against a clock, so the
//!   caller keeps running between toggles.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{Indicator, OutputPort};

/// Flash the vacuum LED for `seconds` at `flashes_per_second`, blocking.
pub fn flash<O, D>(out: &mut O, delay: &mut D, flashes_per_second: u16, seconds: u16)
where
    O: OutputPort + ?Sized,
    D: DelayNs + ?Sized,
{
    BlinkJob::new(flashes_per_second, seconds).run_blocking(out, delay);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkJob {
    toggles_left: u32,
    period_ms: u32,
    /// Deadline of the next toggle; set on the first poll.
    next_due_ms: Option<u64>,
}

impl BlinkJob {
    pub fn new(flashes_per_second: u16, seconds: u16) -> Self {
        let rate = u32::from(flashes_per_second.max(1));
        Self {
            toggles_left: rate * u32::from(seconds) * 2,
            period_ms: 500 / rate,
            next_due_ms: None,
        }
    }

    pub fn toggles_left(&self) -> u32 {
        self.toggles_left
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Toggle, wait one period, repeat.  Returns after the last wait.
    pub fn run_blocking<O, D>(mut self, out: &mut O, delay: &mut D)
    where
        O: OutputPort + ?Sized,
        D: DelayNs + ?Sized,
    {
        while self.toggles_left > 0 {
            out.toggle_indicator(Indicator::Vacuum);
            delay.delay_ms(self.period_ms);
            self.toggles_left -= 1;
        }
    }

    /// Advance against `now_ms`.  Returns `true` once every toggle has run
    /// and the trailing period has elapsed, matching the blocking timing.
    ///
    /// At most one toggle per call; a late caller catches up on later polls
    /// because deadlines advance by whole periods.
    pub fn poll<O>(&mut self, out: &mut O, now_ms: u64) -> bool
    where
        O: OutputPort + ?Sized,
    {
        let due = *self.next_due_ms.get_or_insert(now_ms);
        if now_ms < due {
            return false;
        }
        if self.toggles_left == 0 {
            return true;
        }
        out.toggle_indicator(Indicator::Vacuum);
        self.toggles_left -= 1;
        self.next_due_ms = Some(due + u64::from(self.period_ms));
        false
    }
}
