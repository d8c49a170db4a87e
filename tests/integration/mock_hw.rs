//! Mock hardware rig for integration tests.
//!
//! Everything observable — watchdog feeds, IR sends, diagnostics writes,
//! display and indicator calls — is appended to one shared journal with a
//! simulated-clock timestamp, so tests can assert on the exact interleaving
//! (e.g. "no feed after the fault record write") rather than on call counts
//! alone.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use acsentry::app::events::AppEvent;
use acsentry::app::ports::{
    ButtonPort, ClockPort, DiagnosticsPort, DisplayPort, EventSink, Indicator, IndicatorPort,
    IrTransportPort, SerialPort, WatchdogPort,
};
use acsentry::config::SystemConfig;
use acsentry::diagnostics::{BootReport, FaultRecord};
use acsentry::state::{AcState, IrCommand};

// ── Shared simulated time ─────────────────────────────────────

pub type SharedNow = Rc<Cell<u64>>;

// ── Trace journal ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Trace {
    Armed { window_ms: u32, at: u64 },
    Feed { at: u64 },
    IrSend { command: IrCommand, at: u64 },
    DiagWrite { record: FaultRecord, at: u64 },
    ShowBoot { at: u64 },
    ShowRunning { state: AcState, at: u64 },
    ShowFault { label: String, at: u64 },
    Indicator { line: Indicator, on: bool, at: u64 },
}

pub type Journal = Rc<RefCell<Vec<Trace>>>;

// ── Simulated clock ───────────────────────────────────────────

pub struct SimClock {
    now: SharedNow,
}

impl ClockPort for SimClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now.set(self.now.get() + u64::from(ms));
    }
}

// ── Simulated watchdog ────────────────────────────────────────

pub struct SimWatchdog {
    now: SharedNow,
    journal: Journal,
    window_ms: Option<u32>,
    last_feed_ms: u64,
    /// What `caused_last_reset` reports at the next boot.
    pub caused_reset: bool,
}

#[allow(dead_code)]
impl SimWatchdog {
    /// Absolute time at which the hardware would force a reset.
    pub fn reset_deadline(&self) -> Option<u64> {
        self.window_ms
            .map(|w| self.last_feed_ms + u64::from(w))
    }

    /// True once simulated time has reached the reset deadline.
    pub fn expired(&self) -> bool {
        self.reset_deadline()
            .is_some_and(|deadline| self.now.get() >= deadline)
    }

    pub fn last_feed_ms(&self) -> u64 {
        self.last_feed_ms
    }
}

impl WatchdogPort for SimWatchdog {
    fn arm(&mut self, window_ms: u32) {
        self.window_ms = Some(window_ms);
        self.last_feed_ms = self.now.get();
        self.journal.borrow_mut().push(Trace::Armed {
            window_ms,
            at: self.now.get(),
        });
    }

    fn feed(&mut self) {
        self.last_feed_ms = self.now.get();
        self.journal
            .borrow_mut()
            .push(Trace::Feed { at: self.now.get() });
    }

    fn caused_last_reset(&self) -> bool {
        self.caused_reset
    }
}

// ── In-memory diagnostics store ───────────────────────────────

pub struct MemDiagnostics {
    now: SharedNow,
    journal: Journal,
    record: FaultRecord,
}

#[allow(dead_code)]
impl MemDiagnostics {
    /// Pre-load the record a "previous run" left behind.
    pub fn preload(&mut self, record: FaultRecord) {
        self.record = record;
    }
}

impl DiagnosticsPort for MemDiagnostics {
    fn read(&self) -> FaultRecord {
        self.record
    }

    fn write(&mut self, record: FaultRecord) {
        self.record = record;
        self.journal.borrow_mut().push(Trace::DiagWrite {
            record,
            at: self.now.get(),
        });
    }
}

// ── Mock board (IR / display / indicators / buttons / serial) ─

pub struct MockBoard {
    now: SharedNow,
    journal: Journal,
    /// Raw (already active-high) button levels the next poll will see.
    pub fault_level: bool,
    pub advance_level: bool,
    /// Pending serial input characters.
    pub serial: VecDeque<char>,
    /// What `IrTransportPort::init` reports.
    pub init_ok: bool,
}

impl IrTransportPort for MockBoard {
    fn init(&mut self) -> bool {
        self.init_ok
    }

    fn send(&mut self, command: IrCommand) {
        self.journal.borrow_mut().push(Trace::IrSend {
            command,
            at: self.now.get(),
        });
    }
}

impl DisplayPort for MockBoard {
    fn show_boot(&mut self, _report: &BootReport) {
        self.journal
            .borrow_mut()
            .push(Trace::ShowBoot { at: self.now.get() });
    }

    fn show_running(&mut self, state: AcState) {
        self.journal.borrow_mut().push(Trace::ShowRunning {
            state,
            at: self.now.get(),
        });
    }

    fn show_fault(&mut self, label: &str) {
        self.journal.borrow_mut().push(Trace::ShowFault {
            label: label.to_string(),
            at: self.now.get(),
        });
    }
}

impl IndicatorPort for MockBoard {
    fn set(&mut self, line: Indicator, on: bool) {
        self.journal.borrow_mut().push(Trace::Indicator {
            line,
            on,
            at: self.now.get(),
        });
    }
}

impl ButtonPort for MockBoard {
    fn fault_pressed(&self) -> bool {
        self.fault_level
    }

    fn advance_pressed(&self) -> bool {
        self.advance_level
    }
}

impl SerialPort for MockBoard {
    fn poll_char(&mut self) -> Option<char> {
        self.serial.pop_front()
    }
}

// ── Recording event sink ──────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── The rig ───────────────────────────────────────────────────

/// One fully wired set of mock collaborators sharing a clock and journal.
pub struct Rig {
    pub now: SharedNow,
    pub journal: Journal,
    pub clock: SimClock,
    pub wdt: SimWatchdog,
    pub diag: MemDiagnostics,
    pub board: MockBoard,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        let now: SharedNow = Rc::new(Cell::new(0));
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        Self {
            clock: SimClock { now: now.clone() },
            wdt: SimWatchdog {
                now: now.clone(),
                journal: journal.clone(),
                window_ms: None,
                last_feed_ms: 0,
                caused_reset: false,
            },
            diag: MemDiagnostics {
                now: now.clone(),
                journal: journal.clone(),
                record: FaultRecord::default(),
            },
            board: MockBoard {
                now: now.clone(),
                journal: journal.clone(),
                fault_level: false,
                advance_level: false,
                serial: VecDeque::new(),
                init_ok: true,
            },
            sink: RecordingSink::default(),
            now,
            journal,
        }
    }

    pub fn config(&self) -> SystemConfig {
        SystemConfig::default()
    }

    // ── Journal queries ───────────────────────────────────────

    pub fn traces(&self) -> Vec<Trace> {
        self.journal.borrow().clone()
    }

    pub fn feed_times(&self) -> Vec<u64> {
        self.journal
            .borrow()
            .iter()
            .filter_map(|t| match t {
                Trace::Feed { at } => Some(*at),
                _ => None,
            })
            .collect()
    }

    pub fn ir_sends(&self) -> Vec<IrCommand> {
        self.journal
            .borrow()
            .iter()
            .filter_map(|t| match t {
                Trace::IrSend { command, .. } => Some(*command),
                _ => None,
            })
            .collect()
    }

    pub fn running_screens(&self) -> Vec<AcState> {
        self.journal
            .borrow()
            .iter()
            .filter_map(|t| match t {
                Trace::ShowRunning { state, .. } => Some(*state),
                _ => None,
            })
            .collect()
    }

    /// Journal index of the last fault-record write.
    pub fn last_diag_write_index(&self) -> Option<usize> {
        self.journal
            .borrow()
            .iter()
            .rposition(|t| matches!(t, Trace::DiagWrite { .. }))
    }

    /// Number of feeds that happened after the given journal index.
    pub fn feeds_after_index(&self, index: usize) -> usize {
        self.journal.borrow()[index + 1..]
            .iter()
            .filter(|t| matches!(t, Trace::Feed { .. }))
            .count()
    }
}
