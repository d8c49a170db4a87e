//! System configuration parameters
//!
//! All tunable timing parameters for the ACSentry controller.
//! The watchdog window is fixed for the process lifetime; everything is
//! sized so that the longest legitimate code path (IR transmit + settle +
//! display refresh) fits comfortably inside it.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Watchdog ---
    /// Hardware watchdog window (milliseconds). Sized for IR transmission
    /// latency (~500 ms worst case) plus UART and display margin.
    pub watchdog_window_ms: u32,

    // --- Buttons ---
    /// Retrigger window for the two user buttons (milliseconds).
    pub button_debounce_ms: u32,

    // --- Indicators / display ---
    /// Heartbeat LED toggle period (milliseconds).
    pub heartbeat_period_ms: u32,
    /// Periodic status-screen refresh interval (milliseconds).
    pub display_refresh_ms: u32,

    // --- IR transport ---
    /// Post-transmission settle delay before the next command is accepted.
    pub ir_settle_ms: u32,

    // --- Loop pacing ---
    /// Idle delay at the end of every loop iteration (milliseconds).
    pub idle_delay_ms: u32,

    // --- Boot choreography ---
    /// How long the boot diagnostics screen is held (milliseconds).
    pub boot_splash_ms: u32,
    /// Boot LED blink half-period (milliseconds).
    pub boot_blink_ms: u32,
    /// Number of boot LED blinks before diagnostics are shown.
    pub boot_blink_count: u8,
    /// Fault LED blink half-period inside a fault branch (milliseconds).
    pub fault_blink_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            watchdog_window_ms: 5000,

            button_debounce_ms: 300,

            heartbeat_period_ms: 500,
            display_refresh_ms: 1000,

            ir_settle_ms: 100,

            idle_delay_ms: 10,

            boot_splash_ms: 3000,
            boot_blink_ms: 120,
            boot_blink_count: 3,
            fault_blink_ms: 200,
        }
    }
}
