//! Off-delay trim potentiometer.
//!
//! A 10 kΩ pot wired as a divider into ADC1.  The ESP32-S3 converter is
//! 12-bit; readings are scaled to 10 bits (0 – 1023) to match the off-delay
//! calculator's full-scale constant of 1032.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads the injectable value behind `hw_init::sim_set_adc_raw`.

use crate::drivers::hw_init;

pub struct TrimInput {
    channel: u32,
}

impl TrimInput {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }

    /// Sample the pot now.  Never cached; every call converts.
    pub fn read(&mut self) -> u16 {
        hw_init::adc1_read(self.channel) >> 2
    }
}
