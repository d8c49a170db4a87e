//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions, the UART0 console driver, and the LEDC
//! carrier channel for the IR transmitter using raw ESP-IDF sys calls.
//! Called once from `main()` before the control loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    UartDriverFailed(i32),
    LedcInitFailed,
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::UartDriverFailed(rc) => write!(f, "UART driver install failed (rc={})", rc),
            Self::LedcInitFailed => write!(f, "LEDC carrier config failed"),
        }
    }
}

// ── Peripheral bring-up ───────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: called once from main() before the control loop; single-threaded.
    unsafe {
        init_gpio()?;
        init_uart()?;
    }
    log::info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio() -> Result<(), HwInitError> {
    let out_mask = (1u64 << pins::LED_BOOT_GPIO)
        | (1u64 << pins::LED_HEARTBEAT_GPIO)
        | (1u64 << pins::LED_FAULT_GPIO);
    let out_cfg = gpio_config_t {
        pin_bit_mask: out_mask,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let rc = unsafe { gpio_config(&out_cfg) };
    if rc != ESP_OK {
        return Err(HwInitError::GpioConfigFailed(rc));
    }

    let in_mask = (1u64 << pins::BUTTON_FAULT_GPIO) | (1u64 << pins::BUTTON_ADVANCE_GPIO);
    let in_cfg = gpio_config_t {
        pin_bit_mask: in_mask,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let rc = unsafe { gpio_config(&in_cfg) };
    if rc != ESP_OK {
        return Err(HwInitError::GpioConfigFailed(rc));
    }

    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_uart() -> Result<(), HwInitError> {
    // UART0 is already routed to the console; installing the driver gives
    // us non-blocking reads for the command intake.
    let rc = unsafe {
        uart_driver_install(
            i32::from(pins::UART_PORT),
            256,
            0,
            0,
            core::ptr::null_mut(),
            0,
        )
    };
    if rc != ESP_OK && rc != ESP_ERR_INVALID_STATE {
        return Err(HwInitError::UartDriverFailed(rc));
    }
    Ok(())
}

// ── GPIO helpers ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_set(pin: i32, on: bool) {
    // SAFETY: pin was configured as output in init_gpio.
    unsafe {
        gpio_set_level(pin, u32::from(on));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_set(_pin: i32, _on: bool) {}

/// Read a button line.  Returns `true` when the (active-low) line is held.
#[cfg(target_os = "espidf")]
pub fn button_held(pin: i32) -> bool {
    // SAFETY: pin was configured as input in init_gpio.
    unsafe { gpio_get_level(pin) == 0 }
}

#[cfg(not(target_os = "espidf"))]
pub fn button_held(_pin: i32) -> bool {
    false
}

// ── UART helper ───────────────────────────────────────────────

/// Non-blocking single-byte console read.
#[cfg(target_os = "espidf")]
pub fn uart_read_byte() -> Option<u8> {
    let mut byte = 0u8;
    // SAFETY: driver installed in init_uart; zero timeout never blocks.
    let n = unsafe { uart_read_bytes(i32::from(pins::UART_PORT), (&mut byte as *mut u8).cast(), 1, 0) };
    (n == 1).then_some(byte)
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_read_byte() -> Option<u8> {
    None
}

// ── IR carrier (LEDC) ─────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn ir_carrier_init(pin: i32, carrier_hz: u32) -> bool {
    // SAFETY: one-shot LEDC configuration from main before the loop.
    unsafe {
        let timer_cfg = ledc_timer_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            __bindgen_anon_1: ledc_timer_config_t__bindgen_ty_1 {
                duty_resolution: pins::IR_PWM_RESOLUTION_BITS,
            },
            timer_num: ledc_timer_t_LEDC_TIMER_0,
            freq_hz: carrier_hz,
            clk_cfg: ledc_clk_cfg_t_LEDC_AUTO_CLK,
            deconfigure: false,
        };
        if ledc_timer_config(&timer_cfg) != ESP_OK {
            return false;
        }

        let channel_cfg = ledc_channel_config_t {
            gpio_num: pin,
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: ledc_channel_t_LEDC_CHANNEL_0,
            intr_type: ledc_intr_type_t_LEDC_INTR_DISABLE,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            duty: 0,
            hpoint: 0,
            sleep_mode: ledc_sleep_mode_t_LEDC_SLEEP_MODE_NO_ALIVE_NO_PD,
            flags: Default::default(),
        };
        ledc_channel_config(&channel_cfg) == ESP_OK
    }
}

/// Gate the 38 kHz carrier on (50% duty).
#[cfg(target_os = "espidf")]
pub fn ir_carrier_on() {
    let half = 1u32 << (pins::IR_PWM_RESOLUTION_BITS - 1);
    // SAFETY: channel configured in ir_carrier_init.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_channel_t_LEDC_CHANNEL_0, half);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_channel_t_LEDC_CHANNEL_0);
    }
}

/// Gate the carrier off.
#[cfg(target_os = "espidf")]
pub fn ir_carrier_off() {
    // SAFETY: channel configured in ir_carrier_init.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_channel_t_LEDC_CHANNEL_0, 0);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_channel_t_LEDC_CHANNEL_0);
    }
}
