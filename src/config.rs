//! Controller configuration parameters
//!
//! Compile-time tunables for the vacuum controller.  The only runtime input
//! is the off-delay trim pot; nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How the indicator blink interacts with the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlinkMode {
    /// The blink occupies the control loop for its whole duration.  Latch
    /// changes during the blink are seen only after it completes.
    Blocking,
    /// The blink advances one toggle at a time as the clock allows, and the
    /// arbiter keeps sampling latches.  A fresh trigger during the grace
    /// period cancels the shutdown.
    Cooperative,
}

/// Core controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Start ---
    /// Pre-start blink between detecting the tool and energising the relay (seconds)
    pub on_tool_delay_secs: u16,

    // --- Stop ---
    /// Shortest grace period, trim fully anticlockwise (seconds)
    pub off_delay_min_secs: u16,
    /// Longest grace period, trim fully clockwise (seconds)
    pub off_delay_max_secs: u16,
    /// Trim reading that maps to the longest grace period
    pub trim_full_scale: u16,

    // --- Indicators ---
    /// Vacuum LED flash rate (flashes per second)
    pub flashes_per_second: u16,
    /// Per-LED on time during the boot self-test (milliseconds)
    pub self_test_ms: u32,
    /// Blocking (faithful) or cooperative blink
    pub blink_mode: BlinkMode,

    // --- Bench ---
    /// Pulse the relay once at boot
    pub relay_self_test: bool,

    // --- Timing ---
    /// Scheduler yield after each control cycle (milliseconds)
    pub cycle_yield_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Start
            on_tool_delay_secs: 3,

            // Stop
            off_delay_min_secs: 3,
            off_delay_max_secs: 30,
            trim_full_scale: 1032,

            // Indicators
            flashes_per_second: 4,
            self_test_ms: 1000,
            blink_mode: BlinkMode::Blocking,

            // Bench
            relay_self_test: cfg!(feature = "bench-relay"),

            // Timing
            cycle_yield_ms: 1, // lets the RTOS idle task run
        }
    }
}

impl ControllerConfig {
    /// Reject parameter combinations the controller cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.off_delay_min_secs > self.off_delay_max_secs {
            return Err(Error::Config("off_delay_min_secs exceeds off_delay_max_secs"));
        }
        if self.trim_full_scale == 0 {
            return Err(Error::Config("trim_full_scale must be non-zero"));
        }
        if self.flashes_per_second == 0 || self.flashes_per_second > 500 {
            return Err(Error::Config("flashes_per_second must be in 1..=500"));
        }
        if self.on_tool_delay_secs == 0 {
            return Err(Error::Config("on_tool_delay_secs must be non-zero"));
        }
        Ok(())
    }

    /// Half-period of the vacuum LED blink in milliseconds.
    pub fn blink_period_ms(&self) -> u32 {
        500 / u32::from(self.flashes_per_second.max(1))
    }
}
