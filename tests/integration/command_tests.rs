//! Serial command handling, one byte per cycle.

use smartpark::app::barrier::GateState;
use smartpark::app::commands::Command;
use smartpark::app::events::ParkingEvent;
use smartpark::app::service::ParkingController;
use smartpark::config::ParkingConfig;
use smartpark::fsm::Occupancy;

use crate::mock_hw::{HwCall, MockHardware, MockLink};

fn setup() -> (ParkingController, MockHardware, MockLink) {
    let mut ctrl = ParkingController::new(ParkingConfig::DEFAULT);
    let mut hw = MockHardware::new();
    let mut link = MockLink::new();
    ctrl.start(&mut hw, &mut link);
    hw.clear_calls();
    link.clear();
    (ctrl, hw, link)
}

fn occupy(ctrl: &mut ParkingController, hw: &mut MockHardware, link: &mut MockLink) {
    hw.push_readings(&[10]);
    ctrl.sense(hw, link);
    hw.clear_calls();
    link.clear();
}

#[test]
fn status_reports_occupied_without_side_effects() {
    let (mut ctrl, mut hw, mut link) = setup();
    occupy(&mut ctrl, &mut hw, &mut link);

    link.send(b"s");
    let cmd = ctrl.poll_command(&mut hw, &mut link);

    assert_eq!(cmd, Some(Command::Status));
    assert_eq!(link.events, [ParkingEvent::Status(Occupancy::Occupied)]);
    assert_eq!(link.lines(), ["STATUS:OCCUPIED"]);
    assert!(hw.calls.is_empty());
}

#[test]
fn open_sets_barrier_and_waits_for_feedback() {
    let (mut ctrl, mut hw, mut link) = setup();
    link.send(b"o");
    ctrl.poll_command(&mut hw, &mut link);

    assert_eq!(ctrl.gate(), GateState::Open);
    assert_eq!(link.lines(), ["Gate OPENED"]);
    assert!(hw.calls.contains(&HwCall::Barrier(ParkingConfig::DEFAULT.gate_open_deg)));
    assert_eq!(
        hw.slept_ms(),
        u64::from(ParkingConfig::DEFAULT.command_feedback_ms)
    );
}

#[test]
fn close_is_idempotent() {
    let (mut ctrl, mut hw, mut link) = setup();
    link.send(b"cc");
    ctrl.poll_command(&mut hw, &mut link);
    ctrl.poll_command(&mut hw, &mut link);

    assert_eq!(ctrl.gate(), GateState::Closed);
    assert_eq!(link.lines(), ["Gate CLOSED", "Gate CLOSED"]);
    let servo_writes = hw
        .calls
        .iter()
        .filter(|c| matches!(c, HwCall::Barrier(_)))
        .count();
    assert_eq!(servo_writes, 2);
}

#[test]
fn reset_clears_occupancy() {
    let (mut ctrl, mut hw, mut link) = setup();
    occupy(&mut ctrl, &mut hw, &mut link);

    link.send(b"r");
    ctrl.poll_command(&mut hw, &mut link);

    assert_eq!(ctrl.occupancy(), Occupancy::Available);
    assert_eq!(link.lines(), ["SYSTEM RESET"]);
}

#[test]
fn unknown_byte_changes_nothing() {
    let (mut ctrl, mut hw, mut link) = setup();
    occupy(&mut ctrl, &mut hw, &mut link);

    link.send(b"x");
    let cmd = ctrl.poll_command(&mut hw, &mut link);

    assert_eq!(cmd, Some(Command::Invalid(b'x')));
    assert_eq!(link.lines(), ["INVALID COMMAND"]);
    assert!(hw.calls.is_empty());
    assert_eq!(ctrl.occupancy(), Occupancy::Occupied);
    assert_eq!(ctrl.gate(), GateState::Closed);
}

#[test]
fn commands_are_case_sensitive() {
    let (mut ctrl, mut hw, mut link) = setup();
    link.send(b"O");
    ctrl.poll_command(&mut hw, &mut link);
    assert_eq!(ctrl.gate(), GateState::Closed);
    assert_eq!(link.lines(), ["INVALID COMMAND"]);
}

#[test]
fn line_endings_are_invalid_commands() {
    let (mut ctrl, mut hw, mut link) = setup();
    link.send(b"s\r\n");
    for _ in 0..3 {
        ctrl.poll_command(&mut hw, &mut link);
    }
    assert_eq!(
        link.lines(),
        ["STATUS:AVAILABLE", "INVALID COMMAND", "INVALID COMMAND"]
    );
}

#[test]
fn one_byte_consumed_per_cycle() {
    let (mut ctrl, mut hw, mut link) = setup();
    hw.push_readings(&[40, 40, 40]);
    link.send(b"oc");

    let first = ctrl.run_cycle(&mut hw, &mut link);
    assert_eq!(first.command, Some(Command::Open));
    assert_eq!(link.pending(), 1);

    let second = ctrl.run_cycle(&mut hw, &mut link);
    assert_eq!(second.command, Some(Command::Close));
    assert_eq!(link.pending(), 0);

    let third = ctrl.run_cycle(&mut hw, &mut link);
    assert_eq!(third.command, None);
}

#[test]
fn idle_link_yields_no_command() {
    let (mut ctrl, mut hw, mut link) = setup();
    assert_eq!(ctrl.poll_command(&mut hw, &mut link), None);
    assert!(link.events.is_empty());
}
