//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AcController / ControlLoop (domain)
//! ```
//!
//! Driven adapters (IR transmitter, display, buttons, serial console,
//! watchdog, retained RAM, clock) implement these traits.  The domain core
//! consumes them via generics, so it never touches hardware directly and
//! every test can substitute an in-memory stand-in.
//!
//! ## Liveness notes
//!
//! - **WatchdogPort** is the safety boundary of the whole system.  Once
//!   `arm` has been called the timer is never disabled; the only sanctioned
//!   way to force a device reset is to stop calling `feed`.
//! - **ClockPort::delay_ms** is the sole suspension primitive.  Every delay
//!   in the core is bounded; the unbounded fault loops exist only in the
//!   hardware binary.

use crate::diagnostics::{BootReport, FaultRecord};
use crate::state::{AcState, IrCommand};

// ───────────────────────────────────────────────────────────────
// Liveness timer port (driven adapter: domain → hardware watchdog)
// ───────────────────────────────────────────────────────────────

/// The hardware watchdog as seen by the domain core.
pub trait WatchdogPort {
    /// Enable the watchdog with a fixed window.  Called exactly once,
    /// after all other subsystem initialisation and before the main loop.
    fn arm(&mut self, window_ms: u32);

    /// Reset the countdown to the full window.  Idempotent, callable at
    /// any time (including before `arm`, where it is a no-op).
    fn feed(&mut self);

    /// Whether the immediately preceding reset was produced by watchdog
    /// expiry (as opposed to power-on or a manual reset).
    fn caused_last_reset(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Fault diagnostics port (domain ↔ reset-surviving storage)
// ───────────────────────────────────────────────────────────────

/// Reset-surviving storage for the fault record.
///
/// Infallible: the backing store is a handful of retained RAM words,
/// not a filesystem.  Implementations must guarantee the record
/// survives a watchdog reset; clearing on clean boots is owned by
/// [`collect_boot_report`](crate::diagnostics::collect_boot_report),
/// not by the store.
pub trait DiagnosticsPort {
    fn read(&self) -> FaultRecord;
    fn write(&mut self, record: FaultRecord);
}

// ───────────────────────────────────────────────────────────────
// IR transport port (domain → infrared transmitter)
// ───────────────────────────────────────────────────────────────

/// The infrared command transport.
///
/// Waveform encoding, carrier generation and per-protocol timing all live
/// behind this trait.  `send` is fire-and-forget: transport failures are
/// not retried and not surfaced to the state machine.
pub trait IrTransportPort {
    /// Bring up the transmitter.  `false` is a fatal bring-up failure.
    fn init(&mut self) -> bool;

    /// Put exactly one logical command on the wire.
    fn send(&mut self, command: IrCommand);
}

// ───────────────────────────────────────────────────────────────
// Display port (domain → status display)
// ───────────────────────────────────────────────────────────────

/// The three screens the controller ever renders.  Pixel-level layout is
/// the adapter's business; failures are not handled by the core.
pub trait DisplayPort {
    /// Boot diagnostics: reset cause, reset count, fault code, window.
    fn show_boot(&mut self, report: &BootReport);

    /// Running status: current appliance state plus the fixed help hints.
    fn show_running(&mut self, state: AcState);

    /// Fault screen with a free-text fault label.
    fn show_fault(&mut self, label: &str);
}

// ───────────────────────────────────────────────────────────────
// Indicator port (domain → discrete status LEDs)
// ───────────────────────────────────────────────────────────────

/// The three independent indicator lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Boot,
    Heartbeat,
    Fault,
}

/// On/off control of the indicator LEDs.  Purely observational — no
/// protocol is encoded beyond the line level.
pub trait IndicatorPort {
    fn set(&mut self, line: Indicator, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Input ports (buttons, serial console)
// ───────────────────────────────────────────────────────────────

/// Raw button line levels.  Debouncing is domain logic
/// ([`DebouncedInput`](crate::drivers::button::DebouncedInput)), not the
/// adapter's job.
pub trait ButtonPort {
    /// Fault-injection button currently held.
    fn fault_pressed(&self) -> bool;

    /// Advance button currently held.
    fn advance_pressed(&self) -> bool;
}

/// Non-blocking single-character serial intake.
pub trait SerialPort {
    /// The next pending input character, if any.  Never blocks.
    fn poll_char(&mut self) -> Option<char>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (domain → monotonic time)
// ───────────────────────────────────────────────────────────────

/// Monotonic milliseconds plus the only suspension primitive in the core.
pub trait ClockPort {
    /// Milliseconds since boot (monotonic).
    fn now_ms(&self) -> u64;

    /// Sleep for a fixed, bounded duration.
    fn delay_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log today;
/// a radio link would implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
