//! Reset-surviving diagnostics store.
//!
//! On hardware the fault record lives in RTC no-init RAM, which keeps its
//! contents across a watchdog reset (but holds garbage after power-on —
//! hence the magic tag).  The record is stored as a postcard blob behind
//! a magic word; an unreadable or untagged blob decodes as the zero
//! record, which is exactly the right answer for a first boot.
//!
//! On host targets the store is a plain field: persistence across
//! simulated resets is the test harness's job.

use crate::app::ports::DiagnosticsPort;
use crate::diagnostics::FaultRecord;

/// Tag distinguishing a written record from power-on garbage.
#[cfg(target_os = "espidf")]
const RETAINED_MAGIC: u32 = 0x4143_5331; // "ACS1"

/// Magic word + encoded record.  FaultRecord encodes to well under 12
/// bytes of postcard.
#[cfg(target_os = "espidf")]
#[unsafe(link_section = ".rtc_noinit")]
static mut RETAINED_BLOB: (u32, [u8; 12]) = (0, [0; 12]);

pub struct RetainedDiagnostics {
    #[cfg(not(target_os = "espidf"))]
    record: FaultRecord,
}

impl RetainedDiagnostics {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            record: FaultRecord::default(),
        }
    }
}

impl Default for RetainedDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticsPort for RetainedDiagnostics {
    #[cfg(target_os = "espidf")]
    fn read(&self) -> FaultRecord {
        // SAFETY: single-threaded access by construction — the store is a
        // process-wide singleton touched only from the main task.
        let (magic, bytes) = unsafe { core::ptr::read(&raw const RETAINED_BLOB) };
        if magic != RETAINED_MAGIC {
            return FaultRecord::default();
        }
        postcard::from_bytes(&bytes).unwrap_or_default()
    }

    #[cfg(target_os = "espidf")]
    fn write(&mut self, record: FaultRecord) {
        let mut bytes = [0u8; 12];
        if postcard::to_slice(&record, &mut bytes).is_err() {
            log::error!("retained: fault record encode failed, store unchanged");
            return;
        }
        // SAFETY: see read().
        unsafe {
            core::ptr::write(&raw mut RETAINED_BLOB, (RETAINED_MAGIC, bytes));
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn read(&self) -> FaultRecord {
        self.record
    }

    #[cfg(not(target_os = "espidf"))]
    fn write(&mut self, record: FaultRecord) {
        self.record = record;
    }
}
