//! Trim reading → shutdown grace period.
//!
//! Linear interpolation between the configured minimum and maximum:
//!
//! ```text
//! secs = round((max - min) / full_scale * x + min)
//! ```
//!
//! Rounding is to nearest with ties away from zero (the same rule as C
//! `round()`), done in integer arithmetic so the result is exact.  Readings
//! above full scale are clamped.

use crate::config::ControllerConfig;

/// Grace period in whole seconds for trim reading `x`.
pub fn off_delay_secs(x: u16, config: &ControllerConfig) -> u16 {
    let full = u64::from(config.trim_full_scale.max(1));
    let min = u64::from(config.off_delay_min_secs);
    let span = u64::from(config.off_delay_max_secs.saturating_sub(config.off_delay_min_secs));
    let x = u64::from(x).min(full);

    // span*x/full rounded half-up; u64 holds 2*u16*u16 with room to spare.
    let scaled = (2 * span * x + full) / (2 * full);
    // scaled <= span, so the sum never exceeds off_delay_max_secs.
    (min + scaled) as u16
}
