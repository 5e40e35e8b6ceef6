//! Output drivers, hardware initialisation, and the flash sequencer.

pub mod blink;
pub mod hw_init;
pub mod indicator;
pub mod relay;
