//! Integration tests for the cooperative control loop.
//!
//! Drives `ControlLoop::poll` against the mock rig with a simulated
//! clock, asserting on the journal interleaving: baseline feeds, the
//! heartbeat and display cadence, button debouncing, and the two fault
//! triggers.

use crate::mock_hw::{Rig, Trace};

use acsentry::app::ports::{DiagnosticsPort, Indicator};
use acsentry::app::service::Outcome;
use acsentry::diagnostics::{FaultCode, FaultRecord};
use acsentry::scheduler::ControlLoop;
use acsentry::state::{AcState, IrCommand};

fn make_loop(rig: &mut Rig) -> ControlLoop {
    let mut control = ControlLoop::new(rig.config());
    control.start(&rig.clock, &mut rig.sink);
    control
}

fn poll(control: &mut ControlLoop, rig: &mut Rig) -> Outcome {
    control.poll(
        &mut rig.board,
        &mut rig.wdt,
        &mut rig.diag,
        &mut rig.clock,
        &mut rig.sink,
    )
}

// ── Baseline liveness ─────────────────────────────────────────

#[test]
fn every_idle_iteration_feeds_at_least_once() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);

    for _ in 0..50 {
        let before = rig.feed_times().len();
        assert_eq!(poll(&mut control, &mut rig), Outcome::Completed);
        assert!(rig.feed_times().len() > before, "iteration without a feed");
    }
}

#[test]
fn idle_iteration_without_refresh_feeds_exactly_once() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);

    // First iteration renders the initial screen (edge-triggered) and
    // therefore feeds twice: refresh feed + baseline feed.
    poll(&mut control, &mut rig);
    assert_eq!(rig.feed_times().len(), 2);

    // The next iteration has nothing to refresh: baseline feed only.
    poll(&mut control, &mut rig);
    assert_eq!(rig.feed_times().len(), 3);
}

#[test]
fn idle_delay_paces_the_loop() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);

    poll(&mut control, &mut rig);
    assert_eq!(rig.now.get(), u64::from(rig.config().idle_delay_ms));
}

// ── Heartbeat ─────────────────────────────────────────────────

#[test]
fn heartbeat_toggles_on_the_configured_period() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);

    // 10 ms per idle iteration; run past two heartbeat periods.
    for _ in 0..101 {
        poll(&mut control, &mut rig);
    }

    let toggles: Vec<(bool, u64)> = rig
        .traces()
        .iter()
        .filter_map(|t| match t {
            Trace::Indicator {
                line: Indicator::Heartbeat,
                on,
                at,
            } => Some((*on, *at)),
            _ => None,
        })
        .collect();

    assert_eq!(toggles, vec![(true, 500), (false, 1000)]);
}

// ── Display refresh ───────────────────────────────────────────

#[test]
fn initial_screen_renders_on_the_first_iteration() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);

    poll(&mut control, &mut rig);
    assert_eq!(rig.running_screens(), vec![AcState::Off]);
}

#[test]
fn unchanged_state_rerenders_only_on_the_periodic_boundary() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);

    for _ in 0..101 {
        poll(&mut control, &mut rig);
    }

    // Render at t=0 (initial edge) and t=1000 (periodic); nothing between.
    assert_eq!(rig.running_screens(), vec![AcState::Off, AcState::Off]);
}

#[test]
fn state_change_refreshes_immediately_and_only_once() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);
    poll(&mut control, &mut rig); // initial render at t=0

    rig.board.serial.push_back('1');
    poll(&mut control, &mut rig);

    // The refresh happened inside the same iteration, long before the
    // 1000 ms periodic boundary.
    let screens: Vec<(AcState, u64)> = rig
        .traces()
        .iter()
        .filter_map(|t| match t {
            Trace::ShowRunning { state, at } => Some((*state, *at)),
            _ => None,
        })
        .collect();
    assert_eq!(screens.len(), 2);
    assert_eq!(screens[1].0, AcState::On);
    assert!(screens[1].1 < 1000, "edge refresh must not wait for the period");

    // No further render for the same state until the next boundary.
    while rig.now.get() + u64::from(rig.config().idle_delay_ms) < screens[1].1 + 1000 {
        poll(&mut control, &mut rig);
    }
    assert_eq!(rig.running_screens().len(), 2);
}

#[test]
fn refresh_is_followed_by_a_feed() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);

    poll(&mut control, &mut rig);

    let traces = rig.traces();
    let render = traces
        .iter()
        .position(|t| matches!(t, Trace::ShowRunning { .. }))
        .unwrap();
    assert!(
        matches!(traces[render + 1], Trace::Feed { .. }),
        "display I/O must be covered by an immediate feed"
    );
}

// ── Serial intake ─────────────────────────────────────────────

#[test]
fn serial_digits_drive_transitions_one_per_iteration() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);

    rig.board.serial.extend(['1', '2']);
    poll(&mut control, &mut rig);
    assert_eq!(control.state(), AcState::On);
    poll(&mut control, &mut rig);
    assert_eq!(control.state(), AcState::Off);

    assert_eq!(
        rig.ir_sends(),
        vec![IrCommand::PowerOn, IrCommand::PowerOff]
    );
}

#[test]
fn serial_menu_request_changes_nothing() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);
    poll(&mut control, &mut rig); // settle the initial render

    rig.board.serial.push_back('0');
    let feeds_before = rig.feed_times().len();
    assert_eq!(poll(&mut control, &mut rig), Outcome::Completed);

    assert_eq!(control.state(), AcState::Off);
    assert!(rig.ir_sends().is_empty());
    // Only the baseline feed for that iteration.
    assert_eq!(rig.feed_times().len(), feeds_before + 1);
}

#[test]
fn unbound_serial_characters_are_ignored() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);

    rig.board.serial.extend(['x', '9', '\n']);
    for _ in 0..3 {
        assert_eq!(poll(&mut control, &mut rig), Outcome::Completed);
    }
    assert!(rig.ir_sends().is_empty());
    assert_eq!(control.state(), AcState::Off);
}

#[test]
fn serial_temp22_request_halts_the_loop() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);

    rig.board.serial.push_back('3');
    assert_eq!(
        poll(&mut control, &mut rig),
        Outcome::FatalHalt(FaultCode::Temp22)
    );
    assert_eq!(rig.diag.read().code, FaultCode::Temp22);
}

// ── Advance button ────────────────────────────────────────────

#[test]
fn advance_presses_walk_the_cycle_into_the_fault() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);

    // Press 1: Off -> On.
    rig.board.advance_level = true;
    assert_eq!(poll(&mut control, &mut rig), Outcome::Completed);
    assert_eq!(control.state(), AcState::On);
    rig.board.advance_level = false;
    poll(&mut control, &mut rig);

    // Press 2: On -> Temp20.
    rig.now.set(1_000);
    rig.board.advance_level = true;
    assert_eq!(poll(&mut control, &mut rig), Outcome::Completed);
    assert_eq!(control.state(), AcState::Temp20);
    rig.board.advance_level = false;
    poll(&mut control, &mut rig);

    // Press 3: Temp20 -> Temp22 — the advance button reaches the fault
    // target like any other input source.
    rig.now.set(2_000);
    rig.board.advance_level = true;
    assert_eq!(
        poll(&mut control, &mut rig),
        Outcome::FatalHalt(FaultCode::Temp22)
    );
    assert_eq!(
        rig.diag.read(),
        FaultRecord {
            reset_count: 1,
            code: FaultCode::Temp22,
        }
    );
}

#[test]
fn advance_edges_inside_the_debounce_window_collapse() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);

    // Qualifying press at t=0.
    rig.board.advance_level = true;
    poll(&mut control, &mut rig);
    rig.board.advance_level = false;
    poll(&mut control, &mut rig);
    assert_eq!(rig.ir_sends(), vec![IrCommand::PowerOn]);

    // Bounce edge 200 ms after the trigger: swallowed.
    rig.now.set(200);
    rig.board.advance_level = true;
    poll(&mut control, &mut rig);
    rig.board.advance_level = false;
    poll(&mut control, &mut rig);
    assert_eq!(rig.ir_sends(), vec![IrCommand::PowerOn]);

    // Edge 305 ms after the trigger: independent press.
    rig.now.set(305);
    rig.board.advance_level = true;
    poll(&mut control, &mut rig);
    assert_eq!(
        rig.ir_sends(),
        vec![IrCommand::PowerOn, IrCommand::Cool20]
    );
}

// ── Fault button ──────────────────────────────────────────────

#[test]
fn fault_button_halts_without_any_feed_in_that_iteration() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);
    poll(&mut control, &mut rig); // one normal iteration first
    let feeds_before = rig.feed_times().len();

    rig.now.set(400);
    rig.board.fault_level = true;
    assert_eq!(
        poll(&mut control, &mut rig),
        Outcome::FatalHalt(FaultCode::Manual)
    );

    // The iteration bailed out before every feed point.
    assert_eq!(rig.feed_times().len(), feeds_before);
    assert_eq!(
        rig.diag.read(),
        FaultRecord {
            reset_count: 1,
            code: FaultCode::Manual,
        }
    );
    let traces = rig.traces();
    assert!(traces
        .iter()
        .any(|t| matches!(t, Trace::ShowFault { label, .. } if label.contains("FAULT BUTTON"))));
    assert!(traces.iter().any(|t| matches!(
        t,
        Trace::Indicator {
            line: Indicator::Fault,
            on: true,
            ..
        }
    )));
}

#[test]
fn fault_button_outranks_the_advance_button() {
    let mut rig = Rig::new();
    let mut control = make_loop(&mut rig);

    rig.board.fault_level = true;
    rig.board.advance_level = true;
    assert_eq!(
        poll(&mut control, &mut rig),
        Outcome::FatalHalt(FaultCode::Manual)
    );
    assert!(rig.ir_sends().is_empty(), "no transition once the fault won");
}
