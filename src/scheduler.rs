//! Cooperative control loop.
//!
//! Single-threaded, non-preemptive.  Each iteration runs a fixed sequence
//! of suspension-free checks and ends with the baseline watchdog feed —
//! the steady-state "I am alive" signal.  If anything earlier in the
//! iteration blocks, that line never executes and the hardware resets the
//! device after the configured window.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ per iteration                                            │
//! │  1. fault button   ──▶ fault branch (never feed again)   │
//! │  2. advance button ──▶ execute(current.next())           │
//! │  3. serial char    ──▶ execute(target) / help            │
//! │  4. heartbeat LED toggle         (500 ms)                │
//! │  5. status display refresh       (1 s or state change)   │
//! │     └─ feed after refresh                                │
//! │  6. baseline feed                                        │
//! │  7. idle delay                   (10 ms)                 │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The two fault triggers return [`Outcome::FatalHalt`] instead of
//! looping forever; the literal never-feeding blink loop lives in the
//! hardware binary.

use log::{info, warn};

use crate::app::commands::AppCommand;
use crate::app::events::AppEvent;
use crate::app::ports::{
    ButtonPort, ClockPort, DiagnosticsPort, DisplayPort, EventSink, Indicator, IndicatorPort,
    IrTransportPort, SerialPort, WatchdogPort,
};
use crate::app::service::{AcController, Outcome};
use crate::config::SystemConfig;
use crate::diagnostics::FaultCode;
use crate::drivers::button::DebouncedInput;
use crate::state::AcState;

/// The cooperative scheduler loop and its per-loop state.
pub struct ControlLoop {
    controller: AcController,

    fault_input: DebouncedInput,
    advance_input: DebouncedInput,

    heartbeat_on: bool,
    heartbeat_due_ms: u64,

    display_due_ms: u64,
    /// Last state rendered to the status screen; `None` forces the first
    /// refresh immediately.
    last_shown: Option<AcState>,

    config: SystemConfig,
}

impl ControlLoop {
    pub fn new(config: SystemConfig) -> Self {
        let debounce = config.button_debounce_ms;
        Self {
            controller: AcController::new(config.clone()),
            fault_input: DebouncedInput::new(debounce),
            advance_input: DebouncedInput::new(debounce),
            heartbeat_on: false,
            heartbeat_due_ms: 0,
            display_due_ms: 0,
            last_shown: None,
            config,
        }
    }

    /// Current appliance state (delegated to the controller).
    pub fn state(&self) -> AcState {
        self.controller.state()
    }

    /// Initialise the periodic deadlines and announce the initial state.
    /// Call once, after the watchdog is armed and before the first
    /// [`poll`](Self::poll).
    pub fn start(&mut self, clock: &impl ClockPort, sink: &mut impl EventSink) {
        let now = clock.now_ms();
        self.heartbeat_due_ms = now + u64::from(self.config.heartbeat_period_ms);
        self.display_due_ms = now + u64::from(self.config.display_refresh_ms);
        sink.emit(&AppEvent::Started(self.controller.state()));
    }

    /// Run one loop iteration.
    ///
    /// Returns [`Outcome::FatalHalt`] when a fault branch was entered; the
    /// caller must then stop feeding the watchdog and wait for the reset.
    pub fn poll(
        &mut self,
        hw: &mut (impl IrTransportPort
              + DisplayPort
              + IndicatorPort
              + ButtonPort
              + SerialPort),
        wdt: &mut impl WatchdogPort,
        diag: &mut impl DiagnosticsPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Outcome {
        let now = clock.now_ms();

        // ── 1. Manual fault trigger ───────────────────────────
        if self.fault_input.triggered(hw.fault_pressed(), now) {
            warn!("fault button pressed — inducing lock-up");
            return self
                .controller
                .enter_fault(FaultCode::Manual, "FAULT BUTTON", hw, diag, sink);
        }

        // ── 2. Manual advance trigger ─────────────────────────
        if self.advance_input.triggered(hw.advance_pressed(), now) {
            info!("advance button pressed");
            let outcome =
                self.controller
                    .handle_command(AppCommand::AdvanceState, hw, wdt, diag, clock, sink);
            if let Outcome::FatalHalt(code) = outcome {
                return Outcome::FatalHalt(code);
            }
        }

        // ── 3. Serial command intake ──────────────────────────
        if let Some(ch) = hw.poll_char() {
            if let Some(cmd) = AppCommand::from_serial(ch) {
                info!("serial '{}' -> {:?}", ch, cmd);
                let outcome = self.controller.handle_command(cmd, hw, wdt, diag, clock, sink);
                if let Outcome::FatalHalt(code) = outcome {
                    return Outcome::FatalHalt(code);
                }
            }
            // Anything unbound is silently ignored.
        }

        // Command handling above may have slept through the settle delay;
        // re-read the clock so the periodic checks see fresh time.
        let now = clock.now_ms();

        // ── 4. Heartbeat indicator ────────────────────────────
        if now >= self.heartbeat_due_ms {
            self.heartbeat_on = !self.heartbeat_on;
            hw.set(Indicator::Heartbeat, self.heartbeat_on);
            self.heartbeat_due_ms = now + u64::from(self.config.heartbeat_period_ms);
        }

        // ── 5. Status display refresh ─────────────────────────
        // Edge-triggered on state change, periodic otherwise.
        let state = self.controller.state();
        if self.last_shown != Some(state) || now >= self.display_due_ms {
            hw.show_running(state);
            self.last_shown = Some(state);
            self.display_due_ms = now + u64::from(self.config.display_refresh_ms);
            // Display I/O can be slow; feed again so it never eats into
            // the margin of whatever comes next.
            wdt.feed();
        }

        // ── 6. Baseline feed ──────────────────────────────────
        // The strategic feed point: a lock-up anywhere above prevents
        // this line from running and the device resets.
        wdt.feed();

        // ── 7. Idle delay ─────────────────────────────────────
        clock.delay_ms(self.config.idle_delay_ms);

        Outcome::Completed
    }

    /// Iterate until a fault branch is entered; returns its fault code.
    pub fn run(
        &mut self,
        hw: &mut (impl IrTransportPort
              + DisplayPort
              + IndicatorPort
              + ButtonPort
              + SerialPort),
        wdt: &mut impl WatchdogPort,
        diag: &mut impl DiagnosticsPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> FaultCode {
        loop {
            if let Outcome::FatalHalt(code) = self.poll(hw, wdt, diag, clock, sink) {
                return code;
            }
        }
    }
}
