//! Boot sequence: LED self-test, relay low, interrupt arming, power LED.

use std::cell::Cell;

use super::mock_hw::{MockClock, MockHardware, OutputCall};

use shopvac::app::boot::{banner, run_boot_sequence};
use shopvac::app::ports::Indicator;
use shopvac::config::ControllerConfig;
use shopvac::drivers::hw_init::HwInitError;
use shopvac::error::Error;

fn config(relay_self_test: bool) -> ControllerConfig {
    ControllerConfig {
        relay_self_test,
        ..ControllerConfig::default()
    }
}

#[test]
fn self_test_pulses_each_indicator_in_order() {
    let mut hw = MockHardware::new();
    let mut clock = MockClock::new();
    let armed = Cell::new(false);

    run_boot_sequence(&mut hw, &mut clock, &config(false), || {
        armed.set(true);
        Ok(())
    })
    .unwrap();

    use Indicator::*;
    let expected = vec![
        OutputCall::Indicator(Power, true),
        OutputCall::Indicator(Power, false),
        OutputCall::Indicator(Vacuum, true),
        OutputCall::Indicator(Vacuum, false),
        OutputCall::Indicator(Tool, true),
        OutputCall::Indicator(Tool, false),
        OutputCall::Indicator(Remote, true),
        OutputCall::Indicator(Remote, false),
        OutputCall::Relay(false),
        OutputCall::Indicator(Power, true),
    ];
    assert_eq!(hw.calls, expected);
    assert!(armed.get());
    assert_eq!(clock.delayed_ms, 4_000);
    assert_eq!(hw.trim_reads, 1, "off delay is logged once");
}

#[test]
fn relay_self_test_pulses_relay_after_leds() {
    let mut hw = MockHardware::new();
    let mut clock = MockClock::new();

    run_boot_sequence(&mut hw, &mut clock, &config(true), || Ok(())).unwrap();

    assert_eq!(
        &hw.calls[8..11],
        &[
            OutputCall::Relay(false),
            OutputCall::Relay(true),
            OutputCall::Relay(false),
        ]
    );
    assert!(!hw.relay_on());
    assert_eq!(clock.delayed_ms, 5_000);
}

#[test]
fn arming_failure_aborts_before_power_led() {
    let mut hw = MockHardware::new();
    let mut clock = MockClock::new();

    let result = run_boot_sequence(&mut hw, &mut clock, &config(false), || {
        Err(HwInitError::IsrInstallFailed(-1))
    });

    assert_eq!(
        result,
        Err(Error::Init(HwInitError::IsrInstallFailed(-1)))
    );
    assert!(!hw.led(Indicator::Power));
    assert_eq!(hw.calls.last(), Some(&OutputCall::Relay(false)));
}

#[test]
fn self_test_interval_follows_config() {
    let mut hw = MockHardware::new();
    let mut clock = MockClock::new();
    let cfg = ControllerConfig {
        self_test_ms: 250,
        ..config(false)
    };
    run_boot_sequence(&mut hw, &mut clock, &cfg, || Ok(())).unwrap();
    assert_eq!(clock.delayed_ms, 1_000);
    assert_eq!(clock.delay_calls, 4);
}

#[test]
fn pin_arming_error_code_reaches_caller() {
    // ESP_ERR_INVALID_ARG from gpio_set_intr_type / gpio_intr_enable.
    let mut hw = MockHardware::new();
    let mut clock = MockClock::new();

    let err = run_boot_sequence(&mut hw, &mut clock, &config(false), || {
        Err(HwInitError::IsrHandlerAddFailed(0x102))
    })
    .unwrap_err();

    assert_eq!(err, Error::Init(HwInitError::IsrHandlerAddFailed(0x102)));
    assert!(err.to_string().contains("rc=258"), "{err}");
    assert!(!hw.led(Indicator::Power));
}

#[test]
fn banner_is_one_plain_line_with_version() {
    let line = banner();
    assert!(line.ends_with(env!("CARGO_PKG_VERSION")), "{line}");
    assert!(!line.contains('\n'));
    assert!(line.is_ascii(), "{line}");
}
