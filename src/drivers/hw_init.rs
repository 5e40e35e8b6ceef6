//! One-shot hardware peripheral initialization and raw pin access.
//!
//! Configures the trigger inputs, indicator/relay outputs and the trim ADC
//! channel using raw ESP-IDF sys calls, and installs the any-edge ISRs that
//! feed the trigger latches.  Called from `main()` and the boot sequence
//! before the control loop starts.
//!
//! On host targets the pin bank is an in-memory bitmask so drivers can read
//! back what they wrote, and the ADC returns an injectable value.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;
use crate::sensors::Latches;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    IsrHandlerAddFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc)       => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc)    => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc)    => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::IsrHandlerAddFailed(rc) => write!(f, "GPIO ISR handler add failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_gpio_outputs()?;
        init_gpio_inputs()?;
        init_adc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static ADC1_HANDLE: core::sync::atomic::AtomicPtr<adc_oneshot_unit_ctx_t> =
    core::sync::atomic::AtomicPtr::new(core::ptr::null_mut());

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    let mut handle: adc_oneshot_unit_handle_t = core::ptr::null_mut();
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &mut handle) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe { adc_oneshot_config_channel(handle, pins::TRIM_ADC_CHANNEL, &chan_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    ADC1_HANDLE.store(handle, core::sync::atomic::Ordering::Release);
    info!("hw_init: ADC1 configured (CH{}=trim)", pins::TRIM_ADC_CHANNEL);
    Ok(())
}

/// 12-bit raw reading from an ADC1 channel.  Returns 0 if the read fails.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let handle = ADC1_HANDLE.load(core::sync::atomic::Ordering::Acquire);
    if handle.is_null() {
        return 0;
    }
    let mut raw: i32 = 0;
    // SAFETY: handle was produced by adc_oneshot_new_unit() in init_adc();
    // only the main loop reads the ADC.
    let ret = unsafe { adc_oneshot_read(handle, channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
static SIM_ADC_RAW: core::sync::atomic::AtomicU16 = core::sync::atomic::AtomicU16::new(0);

/// Inject the raw 12-bit value the simulated ADC returns.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc_raw(raw: u16) {
    SIM_ADC_RAW.store(raw.min(4095), core::sync::atomic::Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    SIM_ADC_RAW.load(core::sync::atomic::Ordering::Relaxed)
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // Interrupts stay disabled until init_isr_service() arms them, after
    // the boot self-test.
    for pin in pins::PIN_TABLE.trigger_inputs() {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    }

    info!("hw_init: trigger inputs configured (pull-up, active-low)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access. Output pins are
    // configured INPUT_OUTPUT so the level reads back like digitalRead().
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
static SIM_PIN_LEVELS: core::sync::atomic::AtomicU64 = core::sync::atomic::AtomicU64::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    SIM_PIN_LEVELS.load(core::sync::atomic::Ordering::Relaxed) & (1u64 << pin) != 0
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    for pin in pins::PIN_TABLE.outputs() {
        // Latch LOW before the driver is enabled so the relay never glitches on.
        unsafe { gpio_set_level(pin, 0) };
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    }

    info!("hw_init: indicator + relay outputs configured (LOW)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe { gpio_set_level(pin, u32::from(high)); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    use core::sync::atomic::Ordering;
    if high {
        SIM_PIN_LEVELS.fetch_or(1u64 << pin, Ordering::Relaxed);
    } else {
        SIM_PIN_LEVELS.fetch_and(!(1u64 << pin), Ordering::Relaxed);
    }
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
use crate::sensors::latch::SignalLatch;

/// Any-edge handler shared by both trigger inputs.  `arg` is the
/// `&'static SignalLatch` registered for the pin.
#[cfg(target_os = "espidf")]
unsafe extern "C" fn trigger_gpio_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: arg was produced from a `&'static SignalLatch` in
    // init_isr_service(); the latch outlives every interrupt.
    let latch = unsafe { &*(arg as *const SignalLatch) };
    // SAFETY: gpio_get_level is a register read; safe in ISR context.
    let high = unsafe { gpio_get_level(latch.gpio()) } != 0;
    latch.on_edge(high);
    crate::events::push_event(latch.source().edge_event());
}

/// Install the GPIO ISR service and arm both trigger inputs on any edge.
///
/// Must run after the boot self-test so spurious edges during the LED
/// pulses cannot reach the arbiter.  The latches are not touched here: they
/// stay inactive until the first edge, so a trigger already asserted at
/// power-up does nothing until it is released and asserted again.
#[cfg(target_os = "espidf")]
pub fn init_isr_service(latches: &'static Latches) -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The handler argument is a
    // 'static latch reference, valid for the life of the program.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        for latch in latches.iter() {
            let pin = latch.gpio();
            let ret = gpio_set_intr_type(pin, gpio_int_type_t_GPIO_INTR_ANYEDGE);
            if ret != ESP_OK as i32 {
                return Err(HwInitError::IsrHandlerAddFailed(ret));
            }
            let arg = core::ptr::from_ref::<SignalLatch>(latch).cast_mut().cast();
            let ret = gpio_isr_handler_add(pin, Some(trigger_gpio_isr), arg);
            if ret != ESP_OK as i32 {
                return Err(HwInitError::IsrHandlerAddFailed(ret));
            }
            let ret = gpio_intr_enable(pin);
            if ret != ESP_OK as i32 {
                return Err(HwInitError::IsrHandlerAddFailed(ret));
            }
        }

        info!("hw_init: ISR service installed (remote, tool, any edge)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service(latches: &'static Latches) -> Result<(), HwInitError> {
    log::info!(
        "hw_init(sim): ISR service skipped, {} latches driven by sim edges",
        latches.iter().count()
    );
    Ok(())
}
