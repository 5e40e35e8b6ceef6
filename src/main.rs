//! Shop-vacuum controller firmware main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogEventSink        Esp32TimeAdapter   │
//! │  (Trigger+Output)       (EventSink)         (DelayNs+Clock)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Arbiter (pure logic)                      │    │
//! │  │  FSM · flash · off-delay                               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  ISR latches (remote, tool) ──▶ atomics + edge event queue     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::{debug, info};

use shopvac::adapters::hardware::HardwareAdapter;
use shopvac::adapters::log_sink::LogEventSink;
use shopvac::adapters::time::Esp32TimeAdapter;
use shopvac::app::boot::{banner, run_boot_sequence};
use shopvac::app::service::Arbiter;
use shopvac::config::ControllerConfig;
use shopvac::drivers::hw_init;
use shopvac::drivers::indicator::IndicatorBank;
use shopvac::drivers::relay::RelayDriver;
use shopvac::events::{drain_events, Event};
use shopvac::pins::PIN_TABLE;
use shopvac::sensors::LATCHES;
use shopvac::sensors::trim::TrimInput;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("{}", banner());

    // ── 2. Configuration ──────────────────────────────────────
    let config = ControllerConfig::default();
    config.validate().context("invalid controller config")?;
    info!("Config: {:?}", config);

    // ── 3. Peripherals ────────────────────────────────────────
    // Outputs come up low, so the relay is off from here on.
    hw_init::init_peripherals().context("peripheral init failed")?;

    let mut hw = HardwareAdapter::new(
        &LATCHES,
        TrimInput::new(shopvac::pins::TRIM_ADC_CHANNEL),
        IndicatorBank::new(PIN_TABLE.indicators),
        RelayDriver::new(PIN_TABLE.relay),
    );
    let mut time = Esp32TimeAdapter::new();
    let mut sink = LogEventSink::new();

    // ── 4. Boot sequence (self-test, then arm ISRs) ───────────
    run_boot_sequence(&mut hw, &mut time, &config, || {
        hw_init::init_isr_service(&LATCHES)
    })
    .context("boot sequence failed")?;

    // ── 5. Arbiter ────────────────────────────────────────────
    let cycle_yield_ms = config.cycle_yield_ms;
    let mut arbiter = Arbiter::new(config);
    arbiter.start(&mut sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        drain_events(|event| match event {
            Event::RemoteEdge => debug!("ISR | remote edge"),
            Event::ToolEdge => debug!("ISR | tool edge"),
        });

        let before = arbiter.state();
        arbiter.cycle(&mut hw, &mut time, &mut sink);
        if arbiter.state() != before {
            if let Ok(json) = arbiter.status().to_json() {
                debug!("STATUS | {}", json);
            }
        }

        // Let the idle task run so the task watchdog stays fed.
        esp_idf_hal::delay::FreeRtos::delay_ms(cycle_yield_ms);
    }
}
