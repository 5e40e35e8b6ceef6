//! Unified error types for the controller firmware.
//!
//! The control loop itself never fails; only boot-time plumbing does
//! (configuration validation and peripheral bring-up).  Every such failure
//! funnels into [`Error`], which is `Copy` so it can be logged and returned
//! without allocation.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid.  The message names the offending field.
    Config(&'static str),
    /// Peripheral or ISR-service initialisation failed.
    Init(HwInitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(e) => write!(f, "init: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
