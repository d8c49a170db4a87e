//! Outbound application events.
//!
//! The controller and control loop emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — today they go to the serial log.

use crate::diagnostics::FaultCode;
use crate::state::AcState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The control loop has started (carries the initial state).
    Started(AcState),

    /// A transition committed.
    StateChanged { from: AcState, to: AcState },

    /// A commanded transition was rejected (no transport binding).
    CommandRejected(AcState),

    /// A fault branch was entered; the watchdog will reset the device.
    FaultEntered(FaultCode),

    /// Boot-time diagnostics summary from the previous run.
    BootDiagnostics {
        watchdog_reset: bool,
        reset_count: u32,
        code: FaultCode,
    },
}
