//! Front-panel indicator LEDs.
//!
//! Four discrete LEDs on plain GPIO outputs, active HIGH.  The pins are
//! configured input+output so the level can be read back; the blink toggles
//! the vacuum LED by reading its current level and writing the inverse.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO via hw_init helpers.
//! On host/test: hw_init keeps the levels in an in-memory pin bank.

use crate::app::ports::Indicator;
use crate::drivers::hw_init;

pub struct IndicatorBank {
    /// GPIO per indicator, indexed by `Indicator as usize`.
    pins: [i32; 4],
}

impl IndicatorBank {
    pub fn new(pins: [i32; 4]) -> Self {
        Self { pins }
    }

    pub fn set(&mut self, indicator: Indicator, on: bool) {
        hw_init::gpio_write(self.gpio(indicator), on);
    }

    pub fn is_on(&self, indicator: Indicator) -> bool {
        hw_init::gpio_read(self.gpio(indicator))
    }

    pub fn toggle(&mut self, indicator: Indicator) {
        let on = self.is_on(indicator);
        self.set(indicator, !on);
    }

    pub fn all_off(&mut self) {
        for indicator in Indicator::SELF_TEST_ORDER {
            self.set(indicator, false);
        }
    }

    pub fn gpio(&self, indicator: Indicator) -> i32 {
        self.pins[indicator as usize]
    }
}
