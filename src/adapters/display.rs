//! Console status display.
//!
//! Renders the three controller screens as fixed-width framed text on the
//! serial console.  The frame mimics the 21-column status panel of the
//! control board; rows are built in fixed-capacity strings so a long
//! fault label can never grow a line past the frame.

use core::fmt::Write as _;

use heapless::String;
use log::info;

use crate::app::ports::DisplayPort;
use crate::diagnostics::BootReport;
use crate::state::AcState;

/// Printable width of one framed row.
const PANEL_COLS: usize = 21;

pub struct ConsoleDisplay;

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self
    }

    fn frame_top(&self) {
        info!("+{}+", "-".repeat(PANEL_COLS));
    }

    fn frame_bottom(&self) {
        info!("+{}+", "-".repeat(PANEL_COLS));
    }

    /// Emit one row, truncated/padded to the panel width.
    fn row(&self, text: &str) {
        let mut line: String<24> = String::new();
        for ch in text.chars().take(PANEL_COLS) {
            // Capacity is sized above PANEL_COLS; push cannot fail here.
            let _ = line.push(ch);
        }
        info!("|{:<width$}|", line.as_str(), width = PANEL_COLS);
    }

    fn rowf(&self, args: core::fmt::Arguments<'_>) {
        let mut text: String<64> = String::new();
        let _ = text.write_fmt(args);
        self.row(text.as_str());
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for ConsoleDisplay {
    fn show_boot(&mut self, report: &BootReport) {
        self.frame_top();
        self.row("IR + WDT CONTROLLER");
        self.row(if report.watchdog_reset {
            "RESET: WATCHDOG"
        } else {
            "RESET: NORMAL"
        });
        self.rowf(format_args!("COUNT: {}", report.record.reset_count));
        self.rowf(format_args!("FAULT: 0x{:02X}", report.record.code.code()));
        self.rowf(format_args!("WINDOW: {}ms", report.window_ms));
        self.frame_bottom();
    }

    fn show_running(&mut self, state: AcState) {
        self.frame_top();
        self.row("AC CONTROL + WDT");
        self.rowf(format_args!("AC: {}", state.label()));
        self.row("BTN A = FAULT");
        self.row("BTN B = NEXT CMD");
        self.row("WDT: ARMED");
        self.frame_bottom();
    }

    fn show_fault(&mut self, label: &str) {
        self.frame_top();
        self.row("FAULT INDUCED");
        self.row(label);
        self.row("WDT NOT FED");
        self.row("RESET IN ~5s...");
        self.frame_bottom();
    }
}
