//! Vacuum solid-state relay driver.
//!
//! A single GPIO drives the SSR input (active HIGH).  The vacuum has no
//! speed control: the relay is either energised or released.
//!
//! ## Safety contract
//!
//! hw_init drives the pin LOW before enabling the output driver, so the
//! vacuum cannot start during boot.  This driver is a dumb actuator; the
//! arbiter decides when it switches.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use log::debug;

use crate::drivers::hw_init;

pub struct RelayDriver {
    gpio: i32,
    energised: bool,
}

impl RelayDriver {
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            energised: false,
        }
    }

    pub fn energise(&mut self) {
        hw_init::gpio_write(self.gpio, true);
        if !self.energised {
            debug!("relay: energised (GPIO {})", self.gpio);
        }
        self.energised = true;
    }

    pub fn release(&mut self) {
        hw_init::gpio_write(self.gpio, false);
        if self.energised {
            debug!("relay: released (GPIO {})", self.gpio);
        }
        self.energised = false;
    }

    pub fn is_energised(&self) -> bool {
        self.energised
    }
}
