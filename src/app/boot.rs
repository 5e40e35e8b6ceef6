//! Power-on sequence.
//!
//! ```text
//!  LED self-test ─▶ relay low ─▶ [relay pulse] ─▶ log off-delay ─▶ arm ISRs ─▶ power LED
//! ```
//!
//! Interrupts are armed only after the self-test.  Arming does not read the
//! trigger pins: both latches start inactive, and a trigger held through
//! power-up is ignored until its next edge.

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::ControllerConfig;
use crate::control::off_delay::off_delay_secs;
use crate::drivers::hw_init::HwInitError;
use crate::error::Result;

use super::ports::{Indicator, OutputPort, TriggerPort};

/// Relay pulse length when `relay_self_test` is set.
pub const RELAY_SELF_TEST_MS: u32 = 1_000;

/// Startup line logged before anything else.
pub fn banner() -> String {
    format!("ShopVac controller v{}", env!("CARGO_PKG_VERSION"))
}

/// Run the boot sequence.  `arm_interrupts` registers both edge callbacks;
/// if it fails the power LED stays off and the error is returned.
pub fn run_boot_sequence<H, D, F>(
    hw: &mut H,
    delay: &mut D,
    config: &ControllerConfig,
    arm_interrupts: F,
) -> Result<()>
where
    H: OutputPort + TriggerPort,
    D: DelayNs,
    F: FnOnce() -> core::result::Result<(), HwInitError>,
{
    for indicator in Indicator::SELF_TEST_ORDER {
        hw.set_indicator(indicator, true);
        delay.delay_ms(config.self_test_ms);
        hw.set_indicator(indicator, false);
    }

    hw.set_relay(false);
    if config.relay_self_test {
        info!("BOOT | relay self-test pulse");
        hw.set_relay(true);
        delay.delay_ms(RELAY_SELF_TEST_MS);
        hw.set_relay(false);
    }

    let trim = hw.read_trim();
    info!(
        "BOOT | off delay {}s (trim={}, range {}-{}s)",
        off_delay_secs(trim, config),
        trim,
        config.off_delay_min_secs,
        config.off_delay_max_secs
    );

    arm_interrupts()?;
    info!("BOOT | trigger interrupts armed");

    hw.set_indicator(Indicator::Power, true);
    Ok(())
}
