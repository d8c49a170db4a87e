//! ACSentry firmware — main entry point.
//!
//! Watchdog-protected IR air-conditioner controller.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  BoardAdapter          RetainedDiagnostics   MonotonicClock    │
//! │  (IR/display/buttons/  (DiagnosticsPort,     (ClockPort)       │
//! │   serial/indicators)    RTC no-init RAM)                       │
//! │  TaskWatchdog          LogEventSink                            │
//! │  (WatchdogPort)        (EventSink)                             │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │   ControlLoop · AcController (pure logic)              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Boot order matters: diagnostics are reported *before* the watchdog is
//! armed (so a faulting run still explains the previous one), and the
//! watchdog is armed *after* every peripheral is up (so a bring-up hang
//! never turns into a reset loop).
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info};

use acsentry::adapters::display::ConsoleDisplay;
use acsentry::adapters::hardware::BoardAdapter;
use acsentry::adapters::log_sink::LogEventSink;
use acsentry::adapters::retained::RetainedDiagnostics;
use acsentry::adapters::time::MonotonicClock;
use acsentry::app::commands::HELP_LINES;
use acsentry::app::events::AppEvent;
use acsentry::app::ports::{
    ClockPort, DisplayPort, EventSink, Indicator, IndicatorPort, IrTransportPort, WatchdogPort,
};
use acsentry::config::SystemConfig;
use acsentry::diagnostics::{collect_boot_report, FaultCode};
use acsentry::drivers::hw_init;
use acsentry::drivers::ir::IrTransmitter;
use acsentry::drivers::watchdog::TaskWatchdog;
use acsentry::scheduler::ControlLoop;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ACSentry v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    let mut clock = MonotonicClock::new();
    let mut board = BoardAdapter::new(IrTransmitter::new(), ConsoleDisplay::new());
    let mut sink = LogEventSink::new();

    // ── 2. Peripheral bring-up ────────────────────────────────
    // A bring-up failure halts *without* arming the watchdog: there is
    // nothing a reset loop could fix, so the board just blinks for help.
    if let Err(e) = hw_init::init_peripherals() {
        error!("peripheral bring-up failed: {} — halting", e);
        bringup_failure_blink(&mut board, &mut clock, &config);
    }

    // ── 3. Boot indication (3 blinks) ─────────────────────────
    for _ in 0..config.boot_blink_count {
        board.set(Indicator::Boot, true);
        clock.delay_ms(config.boot_blink_ms);
        board.set(Indicator::Boot, false);
        clock.delay_ms(config.boot_blink_ms);
    }

    // ── 4. Boot diagnostics ───────────────────────────────────
    let mut wdt = TaskWatchdog::new();
    let mut diag = RetainedDiagnostics::new();
    let report = collect_boot_report(&wdt, &mut diag, config.watchdog_window_ms);
    report.log();
    sink.emit(&AppEvent::BootDiagnostics {
        watchdog_reset: report.watchdog_reset,
        reset_count: report.record.reset_count,
        code: report.record.code,
    });
    board.show_boot(&report);
    clock.delay_ms(config.boot_splash_ms);

    // ── 5. IR transport bring-up ──────────────────────────────
    if !board.init() {
        error!("IR transmitter init failed — halting");
        bringup_failure_blink(&mut board, &mut clock, &config);
    }
    info!("IR transmitter ready");

    // ── 6. Arm the watchdog ───────────────────────────────────
    // Last init step before the loop; from here on, going dark is the
    // only way out.
    wdt.arm(config.watchdog_window_ms);

    for line in HELP_LINES {
        info!("{line}");
    }

    // ── 7. Control loop ───────────────────────────────────────
    let mut control = ControlLoop::new(config.clone());
    control.start(&clock, &mut sink);
    let code = control.run(&mut board, &mut wdt, &mut diag, &mut clock, &mut sink);

    // A fault branch was entered: the record is written and the fault
    // screen is up. Blink until the watchdog pulls the plug.
    fault_halt_blink(code, &mut board, &mut clock, &config);
}

/// Terminal blink loop for a fault branch.  Deliberately never feeds the
/// watchdog — expiry is the sanctioned exit.
fn fault_halt_blink(
    code: FaultCode,
    board: &mut impl IndicatorPort,
    clock: &mut impl ClockPort,
    config: &SystemConfig,
) -> ! {
    error!(
        "fault 0x{:02X}: waiting for watchdog reset (~{} ms)",
        code.code(),
        config.watchdog_window_ms
    );
    let mut on = true;
    loop {
        board.set(Indicator::Fault, on);
        clock.delay_ms(config.fault_blink_ms);
        on = !on;
    }
}

/// Terminal blink loop for a peripheral bring-up failure.  The watchdog
/// was never armed, so this halt is permanent until a manual reset.
fn bringup_failure_blink(
    board: &mut impl IndicatorPort,
    clock: &mut impl ClockPort,
    config: &SystemConfig,
) -> ! {
    let mut on = true;
    loop {
        board.set(Indicator::Boot, on);
        clock.delay_ms(config.boot_blink_ms);
        on = !on;
    }
}
