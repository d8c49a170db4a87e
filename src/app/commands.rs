//! Inbound commands to the controller.
//!
//! These represent actions requested by the outside world (serial
//! console, buttons) that the
//! [`AcController`](super::service::AcController) interprets and acts
//! upon.  Both input sources funnel through the same enum so the fault
//! semantics are identical regardless of which path asked for a state.

use crate::state::AcState;

/// Commands that external inputs can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Transition to a specific appliance state.
    SetState(AcState),

    /// Transition to the cyclic successor of the current state.
    AdvanceState,

    /// Print the serial help menu.  No transition, no watchdog activity.
    ShowMenu,
}

impl AppCommand {
    /// Map a serial input character to a command.
    ///
    /// `'0'`–`'6'` are bound; everything else is ignored.  Note `'3'`
    /// deliberately maps to the 22 °C setpoint, the always-faulting
    /// transition.
    pub fn from_serial(ch: char) -> Option<Self> {
        match ch {
            '0' => Some(Self::ShowMenu),
            '1' => Some(Self::SetState(AcState::On)),
            '2' => Some(Self::SetState(AcState::Off)),
            '3' => Some(Self::SetState(AcState::Temp22)),
            '4' => Some(Self::SetState(AcState::Temp20)),
            '5' => Some(Self::SetState(AcState::Fan1)),
            '6' => Some(Self::SetState(AcState::Fan2)),
            _ => None,
        }
    }
}

/// The serial help menu, one entry per line.
pub const HELP_LINES: &[&str] = &[
    "=== AC CONTROL MENU ===",
    "1 - power on",
    "2 - power off",
    "3 - cool 22C  (FAULTS!)",
    "4 - cool 20C",
    "5 - fan level 1",
    "6 - fan level 2",
    "0 - this menu",
];
