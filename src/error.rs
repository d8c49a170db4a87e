//! Unified error types for the ACSentry firmware.
//!
//! Follows embedded practice: a single `Error` enum that every fallible
//! subsystem converts into, keeping top-level error handling uniform.
//! All variants are `Copy` so they can be passed around without allocation.
//!
//! Note that the two deliberate fault branches are *not* errors — they are
//! represented by [`Outcome::FatalHalt`](crate::app::service::Outcome) and
//! resolved by the hardware watchdog, not by any caller.

use core::fmt;

use crate::state::AcState;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A commanded state transition was rejected.
    Transition(TransitionRejected),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transition(e) => write!(f, "transition: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

/// A state transition request that could not be dispatched.
///
/// Raised when the target has no bound IR transport command. No state
/// mutation occurs and no diagnostics are written — the caller may simply
/// retry with a valid target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRejected {
    /// The target state that was refused.
    pub target: AcState,
}

impl fmt::Display for TransitionRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no transport command bound for {}", self.target.label())
    }
}

impl From<TransitionRejected> for Error {
    fn from(e: TransitionRejected) -> Self {
        Self::Transition(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
