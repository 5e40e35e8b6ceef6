//! GPIO / peripheral pin assignments for the controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  The role → pin bindings are collected in
//! [`PIN_TABLE`] so the boot sequence and ISR registration iterate the
//! table instead of naming pins inline.

// ---------------------------------------------------------------------------
// Trigger inputs (active-low, internal pull-up, any-edge interrupt)
// ---------------------------------------------------------------------------

/// Wireless keyfob receiver output. LOW while the remote is latched on.
pub const REMOTE_INT_GPIO: i32 = 4;
/// Current-transformer comparator output. LOW while the tool draws current.
pub const TOOL_INT_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Indicators (active HIGH discrete LEDs)
// ---------------------------------------------------------------------------

/// Red "Power" LED.
pub const POWER_LED_GPIO: i32 = 12;
/// Yellow "Vacuum" LED.
pub const VAC_LED_GPIO: i32 = 11;
/// Green "Tool" LED.
pub const TOOL_LED_GPIO: i32 = 10;
/// Blue "Remote" LED.
pub const REMOTE_LED_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Relay output
// ---------------------------------------------------------------------------

/// Solid-state relay drive (via jumper J2).
#[cfg(not(feature = "bench-relay"))]
pub const RELAY_GPIO: i32 = 7;
/// On-board LED, so the relay decision can be watched without mains wiring.
#[cfg(feature = "bench-relay")]
pub const RELAY_GPIO: i32 = 48;

// ---------------------------------------------------------------------------
// Analog trim (off-delay potentiometer)
// ---------------------------------------------------------------------------

/// Off-delay pot wiper. ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const TRIM_ADC_GPIO: i32 = 1;
/// ADC1 channel number for [`TRIM_ADC_GPIO`].
pub const TRIM_ADC_CHANNEL: u32 = 0;

// ---------------------------------------------------------------------------
// Role table
// ---------------------------------------------------------------------------

/// Role → GPIO bindings for the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinTable {
    pub remote_int: i32,
    pub tool_int: i32,
    /// Indicator pins in self-test order: power, vacuum, tool, remote.
    pub indicators: [i32; 4],
    pub relay: i32,
    pub trim_adc: i32,
}

impl PinTable {
    /// Both trigger inputs, remote first.
    pub const fn trigger_inputs(&self) -> [i32; 2] {
        [self.remote_int, self.tool_int]
    }

    /// Every digital output on the board (indicators then relay).
    pub const fn outputs(&self) -> [i32; 5] {
        let [a, b, c, d] = self.indicators;
        [a, b, c, d, self.relay]
    }
}

pub const PIN_TABLE: PinTable = PinTable {
    remote_int: REMOTE_INT_GPIO,
    tool_int: TOOL_INT_GPIO,
    indicators: [POWER_LED_GPIO, VAC_LED_GPIO, TOOL_LED_GPIO, REMOTE_LED_GPIO],
    relay: RELAY_GPIO,
    trim_adc: TRIM_ADC_GPIO,
};
