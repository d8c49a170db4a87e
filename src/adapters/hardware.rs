//! Board adapter — bridges real peripherals to the domain port traits.
//!
//! Owns the IR transmitter and the console display, and maps the GPIO
//! lines (indicator LEDs, buttons) and the UART console onto the input
//! and output ports.  This is the only module besides the drivers that
//! touches actual hardware; on non-espidf targets the underlying helpers
//! are simulation stubs.

use crate::app::ports::{
    ButtonPort, DisplayPort, Indicator, IndicatorPort, IrTransportPort, SerialPort,
};
use crate::diagnostics::BootReport;
use crate::drivers::hw_init;
use crate::drivers::ir::IrTransmitter;
use crate::pins;
use crate::state::{AcState, IrCommand};

use super::display::ConsoleDisplay;

/// Concrete adapter that combines the whole board behind port traits.
pub struct BoardAdapter {
    ir: IrTransmitter,
    display: ConsoleDisplay,
}

impl BoardAdapter {
    pub fn new(ir: IrTransmitter, display: ConsoleDisplay) -> Self {
        Self { ir, display }
    }
}

// ── IR transport ──────────────────────────────────────────────

impl IrTransportPort for BoardAdapter {
    fn init(&mut self) -> bool {
        self.ir.init()
    }

    fn send(&mut self, command: IrCommand) {
        self.ir.send(command);
    }
}

// ── Display ───────────────────────────────────────────────────

impl DisplayPort for BoardAdapter {
    fn show_boot(&mut self, report: &BootReport) {
        self.display.show_boot(report);
    }

    fn show_running(&mut self, state: AcState) {
        self.display.show_running(state);
    }

    fn show_fault(&mut self, label: &str) {
        self.display.show_fault(label);
    }
}

// ── Indicator LEDs ────────────────────────────────────────────

impl IndicatorPort for BoardAdapter {
    fn set(&mut self, line: Indicator, on: bool) {
        let pin = match line {
            Indicator::Boot => pins::LED_BOOT_GPIO,
            Indicator::Heartbeat => pins::LED_HEARTBEAT_GPIO,
            Indicator::Fault => pins::LED_FAULT_GPIO,
        };
        hw_init::gpio_set(pin, on);
    }
}

// ── Buttons ───────────────────────────────────────────────────

impl ButtonPort for BoardAdapter {
    fn fault_pressed(&self) -> bool {
        hw_init::button_held(pins::BUTTON_FAULT_GPIO)
    }

    fn advance_pressed(&self) -> bool {
        hw_init::button_held(pins::BUTTON_ADVANCE_GPIO)
    }
}

// ── Serial console ────────────────────────────────────────────

impl SerialPort for BoardAdapter {
    fn poll_char(&mut self) -> Option<char> {
        hw_init::uart_read_byte().map(char::from)
    }
}
