//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production).  A telemetry radio adapter
//! would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state.label());
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from.label(), to.label());
            }
            AppEvent::CommandRejected(target) => {
                warn!("REJECT | target={}", target.label());
            }
            AppEvent::FaultEntered(code) => {
                warn!("FAULT | 0x{:02X} ({})", code.code(), code.label());
            }
            AppEvent::BootDiagnostics {
                watchdog_reset,
                reset_count,
                code,
            } => {
                info!(
                    "BOOT | watchdog_reset={} | resets={} | fault=0x{:02X}",
                    watchdog_reset,
                    reset_count,
                    code.code(),
                );
            }
        }
    }
}
