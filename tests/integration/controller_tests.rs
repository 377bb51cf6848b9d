//! End-to-end control cycles against mock hardware.

use smartpark::app::barrier::GateState;
use smartpark::app::events::ParkingEvent;
use smartpark::app::indicator::{
    COLOUR_AVAILABLE, COLOUR_GATE_OPEN, COLOUR_NO_READING, COLOUR_OCCUPIED,
};
use smartpark::app::service::ParkingController;
use smartpark::config::ParkingConfig;
use smartpark::fsm::{Occupancy, Outcome};

use crate::mock_hw::{HwCall, MockHardware, MockLink};

fn started(readings: &[u32]) -> (ParkingController, MockHardware, MockLink) {
    let mut ctrl = ParkingController::new(ParkingConfig::DEFAULT);
    let mut hw = MockHardware::with_readings(readings);
    let mut link = MockLink::new();
    ctrl.start(&mut hw, &mut link);
    hw.clear_calls();
    link.clear();
    (ctrl, hw, link)
}

fn run(ctrl: &mut ParkingController, hw: &mut MockHardware, link: &mut MockLink, n: usize) {
    for _ in 0..n {
        ctrl.run_cycle(hw, link);
    }
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_closes_gate_and_prints_banner() {
    let mut ctrl = ParkingController::new(ParkingConfig::DEFAULT);
    let mut hw = MockHardware::new();
    let mut link = MockLink::new();
    ctrl.start(&mut hw, &mut link);

    assert_eq!(hw.barrier_angle(), Some(ParkingConfig::DEFAULT.gate_closed_deg));
    assert_eq!(hw.led(), Some(COLOUR_AVAILABLE));
    assert_eq!(
        link.lines(),
        [
            "Smart Parking System Initialized",
            "Parking threshold set to: 15 cm"
        ]
    );
    assert_eq!(ctrl.occupancy(), Occupancy::Available);
    assert_eq!(ctrl.gate(), GateState::Closed);
}

// ── Occupancy edges ───────────────────────────────────────────

#[test]
fn car_arriving_alerts_only_on_crossing() {
    let (mut ctrl, mut hw, mut link) = started(&[20, 20, 10]);
    run(&mut ctrl, &mut hw, &mut link, 3);

    assert_eq!(
        link.lines(),
        [
            "Distance: 20 cm",
            "AVAILABLE",
            "Distance: 20 cm",
            "AVAILABLE",
            "Distance: 10 cm",
            "OCCUPIED"
        ]
    );
    assert_eq!(ctrl.occupancy(), Occupancy::Occupied);
    assert_eq!(ctrl.alerts_played(), 1);
    assert_eq!(hw.beeps(), 2, "occupied pattern is a double beep");
    assert_eq!(hw.led(), Some(COLOUR_OCCUPIED));
}

#[test]
fn steady_occupied_never_repeats_side_effects() {
    let (mut ctrl, mut hw, mut link) = started(&[5; 20]);
    run(&mut ctrl, &mut hw, &mut link, 20);

    assert_eq!(ctrl.alerts_played(), 1);
    assert_eq!(hw.beeps(), 2);
    assert_eq!(hw.led_writes(), 1);
    let occupied = link
        .events
        .iter()
        .filter(|e| **e == ParkingEvent::Occupied)
        .count();
    assert_eq!(occupied, 20, "every cycle still reports its band");
}

#[test]
fn car_leaving_plays_long_beep() {
    let (mut ctrl, mut hw, mut link) = started(&[8, 40]);
    run(&mut ctrl, &mut hw, &mut link, 2);

    assert_eq!(ctrl.occupancy(), Occupancy::Available);
    assert_eq!(ctrl.alerts_played(), 2);
    assert_eq!(hw.beeps(), 3);
    assert_eq!(hw.led(), Some(COLOUR_AVAILABLE));

    let tail: Vec<HwCall> = hw.calls.iter().rev().take(4).rev().copied().collect();
    assert_eq!(
        tail,
        [
            HwCall::Buzzer(true),
            HwCall::DelayMs(ParkingConfig::DEFAULT.alert_long_ms),
            HwCall::Buzzer(false),
            HwCall::DelayMs(ParkingConfig::DEFAULT.loop_period_ms),
        ]
    );
}

#[test]
fn threshold_distance_counts_as_available() {
    let (mut ctrl, mut hw, mut link) = started(&[14, 15]);
    ctrl.run_cycle(&mut hw, &mut link);
    assert_eq!(ctrl.occupancy(), Occupancy::Occupied);
    ctrl.run_cycle(&mut hw, &mut link);
    assert_eq!(ctrl.occupancy(), Occupancy::Available);
}

// ── Invalid readings ──────────────────────────────────────────

#[test]
fn out_of_range_reading_keeps_occupancy() {
    let (mut ctrl, mut hw, mut link) = started(&[10, 150]);
    run(&mut ctrl, &mut hw, &mut link, 2);

    assert_eq!(ctrl.occupancy(), Occupancy::Occupied);
    assert_eq!(hw.led(), Some(COLOUR_NO_READING));
    assert_eq!(
        &link.lines()[2..],
        ["Distance: 150 cm", "NO READING"]
    );
    assert_eq!(ctrl.alerts_played(), 1);
}

#[test]
fn missing_echo_prints_no_distance() {
    let (mut ctrl, mut hw, mut link) = started(&[]);
    let report = ctrl.run_cycle(&mut hw, &mut link);

    assert_eq!(report.outcome, Outcome::NoReading);
    assert_eq!(link.lines(), ["NO READING"]);
    assert_eq!(ctrl.occupancy(), Occupancy::Available);
}

#[test]
fn valid_reading_after_dropout_restores_colour_without_alert() {
    let (mut ctrl, mut hw, mut link) = started(&[10, 300, 10]);
    run(&mut ctrl, &mut hw, &mut link, 3);

    assert_eq!(ctrl.alerts_played(), 1);
    assert_eq!(hw.led(), Some(COLOUR_OCCUPIED));
    assert_eq!(hw.led_writes(), 3);
}

// ── Gate interplay ────────────────────────────────────────────

#[test]
fn open_then_close_restores_occupancy_colour() {
    let (mut ctrl, mut hw, mut link) = started(&[10, 10, 10]);
    ctrl.run_cycle(&mut hw, &mut link);

    link.send(b"o");
    ctrl.run_cycle(&mut hw, &mut link);
    assert_eq!(ctrl.gate(), GateState::Open);
    assert_eq!(hw.led(), Some(COLOUR_GATE_OPEN));
    assert_eq!(hw.barrier_angle(), Some(ParkingConfig::DEFAULT.gate_open_deg));

    link.send(b"c");
    ctrl.run_cycle(&mut hw, &mut link);
    assert_eq!(ctrl.gate(), GateState::Closed);
    assert_eq!(hw.led(), Some(COLOUR_OCCUPIED));
    assert_eq!(ctrl.alerts_played(), 1);
}

#[test]
fn steady_cycle_after_open_repaints_occupancy_colour() {
    let (mut ctrl, mut hw, mut link) = started(&[30, 30]);
    link.send(b"o");
    ctrl.run_cycle(&mut hw, &mut link);
    assert_eq!(hw.led(), Some(COLOUR_GATE_OPEN));

    ctrl.run_cycle(&mut hw, &mut link);
    assert_eq!(hw.led(), Some(COLOUR_AVAILABLE));
    assert_eq!(ctrl.gate(), GateState::Open, "gate stays open until commanded");
}

#[test]
fn reset_while_occupied_and_open() {
    let (mut ctrl, mut hw, mut link) = started(&[10]);
    link.send(b"o");
    ctrl.run_cycle(&mut hw, &mut link);
    assert_eq!(ctrl.occupancy(), Occupancy::Occupied);
    assert_eq!(ctrl.gate(), GateState::Open);

    hw.clear_calls();
    link.clear();
    link.send(b"r");
    ctrl.run_cycle(&mut hw, &mut link);

    assert_eq!(ctrl.gate(), GateState::Closed);
    assert_eq!(ctrl.occupancy(), Occupancy::Available);
    assert_eq!(hw.led(), Some(COLOUR_AVAILABLE));
    assert_eq!(hw.barrier_angle(), Some(ParkingConfig::DEFAULT.gate_closed_deg));
    assert_eq!(link.lines().last().map(String::as_str), Some("SYSTEM RESET"));
    assert_eq!(hw.beeps(), 0, "reset is silent");
}

// ── Timing ────────────────────────────────────────────────────

#[test]
fn each_cycle_ends_with_loop_delay() {
    let (mut ctrl, mut hw, mut link) = started(&[50, 50, 50]);
    run(&mut ctrl, &mut hw, &mut link, 3);

    assert_eq!(hw.slept_ms(), 3 * u64::from(ParkingConfig::DEFAULT.loop_period_ms));
    assert_eq!(
        hw.calls.last(),
        Some(&HwCall::DelayMs(ParkingConfig::DEFAULT.loop_period_ms))
    );
    assert_eq!(ctrl.cycle_count(), 3);
}
