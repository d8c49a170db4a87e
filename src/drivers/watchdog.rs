//! Task Watchdog Timer (TWDT) driver.
//!
//! Wraps the ESP-IDF TWDT API behind [`WatchdogPort`].  The timer is
//! configured to hard-reset (not panic) on expiry, matching the recovery
//! contract: a run that stops feeding is ended by the hardware, and the
//! next boot reads the retained fault record to explain why.
//!
//! On non-espidf targets the driver tracks state in-memory only so the
//! library and its consumers build on the host.

use crate::app::ports::WatchdogPort;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

pub struct TaskWatchdog {
    armed: bool,
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl TaskWatchdog {
    pub fn new() -> Self {
        Self {
            armed: false,
            #[cfg(target_os = "espidf")]
            subscribed: false,
        }
    }
}

impl Default for TaskWatchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchdogPort for TaskWatchdog {
    fn arm(&mut self, window_ms: u32) {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: one-shot configuration from the main task before the
            // control loop starts; no other task touches the TWDT.
            unsafe {
                // trigger_panic stays off: expiry must hard-reset the
                // device, not unwind through the panic handler.
                let cfg = esp_task_wdt_config_t {
                    timeout_ms: window_ms,
                    idle_core_mask: 0,
                    trigger_panic: false,
                };
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK {
                    log::warn!("TWDT reconfigure returned {} (may already be configured)", ret);
                }

                let ret = esp_task_wdt_add(core::ptr::null_mut());
                self.subscribed = ret == ESP_OK;
                if self.subscribed {
                    log::info!("watchdog armed ({} ms window)", window_ms);
                } else {
                    log::error!("watchdog subscribe failed ({})", ret);
                }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        log::info!("watchdog(sim): armed ({} ms window)", window_ms);

        self.armed = true;
    }

    fn feed(&mut self) {
        if !self.armed {
            return;
        }

        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                // SAFETY: plain counter reset, callable from any point in
                // the subscribed task.
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }

    fn caused_last_reset(&self) -> bool {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: esp_reset_reason reads a boot-time constant.
            let reason = unsafe { esp_reset_reason() };
            matches!(
                reason,
                esp_reset_reason_t_ESP_RST_TASK_WDT
                    | esp_reset_reason_t_ESP_RST_INT_WDT
                    | esp_reset_reason_t_ESP_RST_WDT
            )
        }

        #[cfg(not(target_os = "espidf"))]
        false
    }
}
