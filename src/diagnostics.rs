//! Reset-surviving fault diagnostics.
//!
//! A single small [`FaultRecord`] lives in storage that survives a
//! watchdog-triggered reset (RTC no-init RAM on hardware). It is written
//! exactly once per fault, immediately before a fault branch stops
//! feeding the watchdog, and read exactly once at the next boot so the
//! firmware can explain why the previous run died.
//!
//! A boot whose cause was *not* the watchdog (power-on, manual reset)
//! zeroes the record — the history only spans watchdog recoveries.

use serde::{Deserialize, Serialize};

use crate::app::ports::{DiagnosticsPort, WatchdogPort};

// ---------------------------------------------------------------------------
// Fault codes
// ---------------------------------------------------------------------------

/// Why the firmware deliberately stopped feeding the watchdog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum FaultCode {
    /// No fault recorded.
    #[default]
    None = 0x00,
    /// Fault button pressed — manual lock-up injection.
    Manual = 0x01,
    /// 22 °C setpoint commanded — the transition with no IR binding.
    Temp22 = 0x02,
}

impl FaultCode {
    /// Raw register value, matching what the boot report prints.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Manual => "fault button (induced lock-up)",
            Self::Temp22 => "22C command (hung transition)",
        }
    }
}

// ---------------------------------------------------------------------------
// Fault record
// ---------------------------------------------------------------------------

/// The pair of values that survives a watchdog reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FaultRecord {
    /// Watchdog resets since the last clean (non-watchdog) boot.
    pub reset_count: u32,
    /// Cause of the most recent fault branch.
    pub code: FaultCode,
}

impl FaultRecord {
    /// The record to persist when entering a fault branch: bump the reset
    /// counter (the watchdog reset is now inevitable) and stamp the cause.
    pub fn escalate(self, code: FaultCode) -> Self {
        Self {
            reset_count: self.reset_count.saturating_add(1),
            code,
        }
    }
}

// ---------------------------------------------------------------------------
// Boot report
// ---------------------------------------------------------------------------

/// Everything the previous run left behind, collected once per boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootReport {
    /// True when the immediately preceding reset was forced by the watchdog.
    pub watchdog_reset: bool,
    /// The surviving fault record (zeroed on a non-watchdog boot).
    pub record: FaultRecord,
    /// The configured watchdog window, echoed for the diagnostics screen.
    pub window_ms: u32,
}

impl BootReport {
    /// Emit the textual half of the boot-time report.
    pub fn log(&self) {
        if self.watchdog_reset {
            log::warn!("recovered from a WATCHDOG reset");
        } else {
            log::info!("clean boot (power-on or manual reset)");
        }
        log::info!("watchdog resets since clean boot: {}", self.record.reset_count);
        log::info!(
            "last fault: 0x{:02X} ({})",
            self.record.code.code(),
            self.record.code.label()
        );
    }
}

/// Query the reset cause and reconcile the diagnostics store.
///
/// On a non-watchdog boot the store is zeroed; on a watchdog boot the
/// surviving record is kept untouched. Must run before the watchdog is
/// armed so the report is observable even if the new run faults early.
pub fn collect_boot_report(
    wdt: &impl WatchdogPort,
    diag: &mut impl DiagnosticsPort,
    window_ms: u32,
) -> BootReport {
    let watchdog_reset = wdt.caused_last_reset();
    if !watchdog_reset {
        diag.write(FaultRecord::default());
    }
    BootReport {
        watchdog_reset,
        record: diag.read(),
        window_ms,
    }
}
