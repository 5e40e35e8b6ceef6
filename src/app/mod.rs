//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the rules for the vacuum controller: relay
//! arbitration, the flash sequences around start and stop, and the boot
//! self-test.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod boot;
pub mod events;
pub mod ports;
pub mod service;
