//! Command state machine — watchdog-protected transition execution.
//!
//! [`AcController`] owns the appliance's logical state and runs every
//! transition through a fixed protocol that brackets the long-latency IR
//! transmission with watchdog feeds:
//!
//! ```text
//!   pending ─▶ feed ─▶ [22C? → fault branch, never feed again]
//!                │
//!                └▶ IR send ─▶ feed ─▶ settle ─▶ commit
//! ```
//!
//! Feeding *immediately before* the transmission maximises the margin
//! against the fixed watchdog window; the second feed covers residual
//! I/O latency after it.  The 22 °C branch is not an error — it is the
//! designed-in lock-up, modelled as [`Outcome::FatalHalt`] so tests can
//! observe it as a value instead of a hung loop.

use log::{info, warn};

use crate::config::SystemConfig;
use crate::diagnostics::FaultCode;
use crate::error::TransitionRejected;
use crate::state::AcState;

use super::commands::{AppCommand, HELP_LINES};
use super::events::AppEvent;
use super::ports::{
    ClockPort, DiagnosticsPort, DisplayPort, EventSink, Indicator, IndicatorPort, IrTransportPort,
    WatchdogPort,
};

// ───────────────────────────────────────────────────────────────
// Outcome
// ───────────────────────────────────────────────────────────────

/// What a successfully dispatched operation did to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation finished; the loop keeps running.
    Completed,

    /// A fault branch was entered.  The fault record is written, the
    /// fault screen and indicator are up, and the watchdog must never be
    /// fed again: the caller's only remaining job is to blink until the
    /// hardware resets the device.
    FatalHalt(FaultCode),
}

// ───────────────────────────────────────────────────────────────
// AcController
// ───────────────────────────────────────────────────────────────

/// The command state machine.
///
/// All mutable run state (current appliance state, pending flag, the
/// diagnostic start timestamp) lives here so multiple independent
/// instances can coexist in tests.
pub struct AcController {
    current: AcState,
    /// True while an IR transmission is in flight.  Observability only —
    /// no control flow depends on it.
    pending: bool,
    /// When the in-flight operation started (diagnostic only).
    op_started_ms: u64,
    config: SystemConfig,
}

impl AcController {
    /// Construct with the initial state `Off`, independent of whatever
    /// the previous run was doing.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            current: AcState::Off,
            pending: false,
            op_started_ms: 0,
            config,
        }
    }

    /// Current appliance state.
    pub fn state(&self) -> AcState {
        self.current
    }

    /// True while an IR transmission is in flight.
    pub fn operation_pending(&self) -> bool {
        self.pending
    }

    // ── Command dispatch ──────────────────────────────────────

    /// Process an external command (serial or button).
    ///
    /// Rejected transitions are logged and reported through the sink but
    /// never stop the loop; only a fault branch escapes as `FatalHalt`.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut (impl IrTransportPort + DisplayPort + IndicatorPort),
        wdt: &mut impl WatchdogPort,
        diag: &mut impl DiagnosticsPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Outcome {
        let target = match cmd {
            AppCommand::ShowMenu => {
                for line in HELP_LINES {
                    info!("{line}");
                }
                return Outcome::Completed;
            }
            AppCommand::SetState(target) => target,
            AppCommand::AdvanceState => self.current.next(),
        };

        match self.execute(target, hw, wdt, diag, clock, sink) {
            Ok(outcome) => outcome,
            Err(rejected) => {
                warn!("command refused: {rejected}");
                sink.emit(&AppEvent::CommandRejected(rejected.target));
                Outcome::Completed
            }
        }
    }

    // ── Transition protocol ───────────────────────────────────

    /// Execute one state transition under watchdog protection.
    ///
    /// Feeds the watchdog exactly twice on the success path — once before
    /// the IR transmission and once after — and commits the state only
    /// after both feeds and the settle delay.  Commanding `Temp22` enters
    /// the fault branch instead and returns [`Outcome::FatalHalt`].
    pub fn execute(
        &mut self,
        target: AcState,
        hw: &mut (impl IrTransportPort + DisplayPort + IndicatorPort),
        wdt: &mut impl WatchdogPort,
        diag: &mut impl DiagnosticsPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<Outcome, TransitionRejected> {
        self.pending = true;
        self.op_started_ms = clock.now_ms();
        info!("transition requested: {} -> {}", self.current.label(), target.label());

        // The IR transmission below is the longest-latency operation in
        // the system; feed now so the full window is ahead of it.
        wdt.feed();

        if target == AcState::Temp22 {
            warn!("22C setpoint has no IR binding — entering fault branch");
            // The pending flag stays up: the operation never completes.
            return Ok(self.enter_fault(FaultCode::Temp22, "CMD 22C HUNG", hw, diag, sink));
        }

        let Some(command) = target.ir_command() else {
            self.pending = false;
            return Err(TransitionRejected { target });
        };

        info!("IR send: {}", command.label());
        hw.send(command);

        // Post-transmission margin: whatever I/O follows (display refresh,
        // UART echo) happens against a freshly reset window.
        wdt.feed();

        // Let the transport finish the physical transmission before the
        // next command can be accepted.
        clock.delay_ms(self.config.ir_settle_ms);

        self.pending = false;
        let from = self.current;
        self.current = target;
        sink.emit(&AppEvent::StateChanged { from, to: target });
        info!("transition committed: {}", target.label());

        Ok(Outcome::Completed)
    }

    // ── Fault branch ──────────────────────────────────────────

    /// Enter an unrecoverable fault: persist the escalated record, raise
    /// the fault surfaces, and report `FatalHalt`.
    ///
    /// This is the shared funnel for both fault triggers (22 °C command
    /// and fault button).  After it returns, no code path may feed the
    /// watchdog again; the hardware reset is the only exit.
    pub fn enter_fault(
        &mut self,
        code: FaultCode,
        label: &str,
        hw: &mut (impl DisplayPort + IndicatorPort),
        diag: &mut impl DiagnosticsPort,
        sink: &mut impl EventSink,
    ) -> Outcome {
        let record = diag.read().escalate(code);
        diag.write(record);
        warn!(
            "fault 0x{:02X} recorded (reset #{}) — watchdog will reset the device",
            code.code(),
            record.reset_count
        );

        hw.show_fault(label);
        hw.set(Indicator::Fault, true);
        sink.emit(&AppEvent::FaultEntered(code));

        Outcome::FatalHalt(code)
    }
}
