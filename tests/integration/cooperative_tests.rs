//! Cooperative flash mode: the arbiter keeps cycling while the vacuum LED
//! flashes, and a returning trigger cancels a pending shutdown.

use super::mock_hw::{MockClock, MockHardware, OutputCall, RecordingSink};

use shopvac::app::ports::Indicator;
use shopvac::app::service::Arbiter;
use shopvac::config::{BlinkMode, ControllerConfig};
use shopvac::fsm::StateId;

const PERIOD_MS: u64 = 125;

fn make_arbiter() -> (Arbiter, MockHardware, MockClock, RecordingSink) {
    let mut arbiter = Arbiter::new(ControllerConfig {
        blink_mode: BlinkMode::Cooperative,
        ..ControllerConfig::default()
    });
    let mut sink = RecordingSink::new();
    arbiter.start(&mut sink);
    (arbiter, MockHardware::new(), MockClock::new(), sink)
}

/// Cycle once per flash period until `done` or the cycle budget runs out.
fn run_until(
    arbiter: &mut Arbiter,
    hw: &mut MockHardware,
    clock: &mut MockClock,
    sink: &mut RecordingSink,
    max_cycles: usize,
    done: impl Fn(&Arbiter) -> bool,
) -> usize {
    for n in 1..=max_cycles {
        arbiter.cycle(hw, clock, sink);
        if done(arbiter) {
            return n;
        }
        clock.advance(PERIOD_MS);
    }
    panic!("condition not reached within {max_cycles} cycles");
}

#[test]
fn cycle_never_blocks() {
    let (mut arbiter, mut hw, mut clock, mut sink) = make_arbiter();
    hw.set_latches(false, true);
    arbiter.cycle(&mut hw, &mut clock, &mut sink);
    assert_eq!(arbiter.state(), StateId::Starting);
    assert_eq!(clock.delayed_ms, 0);
    assert_eq!(clock.delay_calls, 0);
    assert!(hw.led(Indicator::Tool));
    assert!(!hw.relay_on());
}

#[test]
fn tool_start_completes_after_24_toggles() {
    let (mut arbiter, mut hw, mut clock, mut sink) = make_arbiter();
    hw.set_latches(false, true);
    run_until(&mut arbiter, &mut hw, &mut clock, &mut sink, 40, |a| {
        a.state() == StateId::Running
    });
    assert_eq!(hw.toggles_before_relay_on(), Some(24));
    assert!(hw.relay_on());
    assert!(hw.led(Indicator::Vacuum));
    assert!(clock.now_ms >= 24 * PERIOD_MS);
}

#[test]
fn grace_period_runs_to_idle_without_trigger() {
    let (mut arbiter, mut hw, mut clock, mut sink) = make_arbiter();
    hw.set_latches(true, false);
    arbiter.cycle(&mut hw, &mut clock, &mut sink);
    assert_eq!(arbiter.state(), StateId::Running);
    hw.clear_calls();

    hw.trim = 0; // 3 s
    hw.set_latches(false, false);
    run_until(&mut arbiter, &mut hw, &mut clock, &mut sink, 40, |a| {
        a.state() == StateId::Idle
    });
    assert_eq!(hw.toggles_before_relay_off(), Some(24));
    assert!(!hw.relay_on());
    assert!(!hw.led(Indicator::Vacuum));
    assert!(!hw.led(Indicator::Remote));
}

#[test]
fn trigger_during_grace_cancels_shutdown() {
    let (mut arbiter, mut hw, mut clock, mut sink) = make_arbiter();
    hw.set_latches(false, true);
    run_until(&mut arbiter, &mut hw, &mut clock, &mut sink, 40, |a| {
        a.state() == StateId::Running
    });
    hw.clear_calls();

    hw.trim = 1032; // 30 s
    hw.set_latches(false, false);
    for _ in 0..5 {
        arbiter.cycle(&mut hw, &mut clock, &mut sink);
        clock.advance(PERIOD_MS);
    }
    assert_eq!(arbiter.state(), StateId::Stopping);
    assert!(arbiter.vac_active());

    hw.set_latches(true, false);
    arbiter.cycle(&mut hw, &mut clock, &mut sink);

    assert_eq!(arbiter.state(), StateId::Running);
    assert!(hw.relay_on());
    assert!(!hw.calls.contains(&OutputCall::Relay(false)));
    assert!(hw.led(Indicator::Vacuum), "vacuum LED restored to steady on");
    assert!(hw.led(Indicator::Remote));
    assert!(!hw.led(Indicator::Tool), "LED follows the new source");
}
