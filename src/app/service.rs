//! Parking controller: the hexagonal core.
//!
//! [`ParkingController`] owns the occupancy machine, indicator, alert and
//! barrier state.  All I/O flows through port traits injected at call
//! sites, making the whole controller testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌───────────────────────────┐ ──▶ EventSink
//!                 │     ParkingController      │
//! ActuatorPort ◀──│ Occupancy · Alert · Gate   │◀── CommandPort
//!                 └───────────────────────────┘
//! ```
//!
//! One cycle is strictly sequential:
//! sense → classify → indicate/alert → command → loop delay.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::ParkingConfig;
use crate::fsm::{Band, NO_ECHO_CM, Occupancy, OccupancyMachine, Outcome};

use super::alert::AlertController;
use super::barrier::{Barrier, GateState};
use super::commands::Command;
use super::events::ParkingEvent;
use super::indicator::{
    COLOUR_GATE_OPEN, COLOUR_NO_READING, IndicatorController, Rgb, occupancy_colour,
};
use super::ports::{ActuatorPort, CommandPort, EventSink, SensorPort};

/// What happened during one call to [`ParkingController::run_cycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub distance_cm: u32,
    pub outcome: Outcome,
    pub command: Option<Command>,
}

// ───────────────────────────────────────────────────────────────
// ParkingController
// ───────────────────────────────────────────────────────────────

pub struct ParkingController {
    config: ParkingConfig,
    occupancy: OccupancyMachine,
    indicator: IndicatorController,
    alerts: AlertController,
    barrier: Barrier,
    cycle_count: u64,
}

impl ParkingController {
    /// Construct the controller from configuration.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: ParkingConfig) -> Self {
        Self {
            alerts: AlertController::new(&config),
            barrier: Barrier::new(&config),
            occupancy: OccupancyMachine::new(),
            indicator: IndicatorController::new(),
            config,
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put the hardware in its initial state (gate closed, green) and
    /// print the boot banner.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.barrier.close(hw);
        self.indicator.show(hw, occupancy_colour(self.occupancy.state()));
        sink.emit(&ParkingEvent::Initialized);
        sink.emit(&ParkingEvent::Threshold(self.config.parking_threshold_cm));
        info!(
            "ParkingController started: threshold={} cm, period={} ms",
            self.config.parking_threshold_cm, self.config.loop_period_ms
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle: sense → classify → indicate/alert →
    /// command → loop delay.
    ///
    /// The `hw` parameter satisfies **all** hardware ports at once and
    /// `link` both serial directions, so neither is borrowed twice.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort + DelayNs),
        link: &mut (impl CommandPort + EventSink),
    ) -> CycleReport {
        self.cycle_count += 1;

        let (distance_cm, outcome) = self.sense(hw, link);
        let command = self.poll_command(hw, link);

        hw.delay_ms(self.config.loop_period_ms);

        debug!(
            "cycle {}: d={} cm, {:?}, cmd={:?}",
            self.cycle_count, distance_cm, outcome, command
        );
        CycleReport {
            distance_cm,
            outcome,
            command,
        }
    }

    /// Take one reading, update occupancy, and apply its indicator and
    /// alert effects.
    pub fn sense(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort + DelayNs),
        sink: &mut impl EventSink,
    ) -> (u32, Outcome) {
        let distance_cm = hw.measure_distance_cm();
        if distance_cm != NO_ECHO_CM {
            sink.emit(&ParkingEvent::Distance(distance_cm));
        }

        let band = Band::classify(
            distance_cm,
            self.config.parking_threshold_cm,
            self.config.max_valid_distance_cm,
        );
        let outcome = self.occupancy.update(band);

        match outcome {
            Outcome::Became(Occupancy::Occupied) => {
                sink.emit(&ParkingEvent::Occupied);
                self.indicator.show(hw, occupancy_colour(Occupancy::Occupied));
                self.alerts.alert_occupied(hw);
            }
            Outcome::Became(Occupancy::Available) => {
                sink.emit(&ParkingEvent::Available);
                self.indicator.show(hw, occupancy_colour(Occupancy::Available));
                self.alerts.alert_available(hw);
            }
            Outcome::Steady(occ) => {
                sink.emit(&occupancy_event(occ));
                self.indicator.restore(hw, occupancy_colour(occ));
            }
            Outcome::NoReading => {
                sink.emit(&ParkingEvent::NoReading);
                self.indicator.restore(hw, COLOUR_NO_READING);
            }
        }

        (distance_cm, outcome)
    }

    // ── Commands ─────────────────────────────────────────────

    /// Consume at most one pending byte and dispatch it.
    pub fn poll_command(
        &mut self,
        hw: &mut (impl ActuatorPort + DelayNs),
        link: &mut (impl CommandPort + EventSink),
    ) -> Option<Command> {
        let command = Command::from_byte(link.poll_byte()?);
        self.handle_command(command, hw, link);
        Some(command)
    }

    pub fn handle_command(
        &mut self,
        command: Command,
        hw: &mut (impl ActuatorPort + DelayNs),
        sink: &mut impl EventSink,
    ) {
        match command {
            Command::Open => {
                info!("Command: open");
                self.barrier.open(hw);
                sink.emit(&ParkingEvent::GateOpened);
                self.indicator.show(hw, COLOUR_GATE_OPEN);
                hw.delay_ms(self.config.command_feedback_ms);
            }
            Command::Close => {
                info!("Command: close");
                self.barrier.close(hw);
                sink.emit(&ParkingEvent::GateClosed);
                self.indicator
                    .show(hw, occupancy_colour(self.occupancy.state()));
                hw.delay_ms(self.config.command_feedback_ms);
            }
            Command::Status => {
                info!("Command: status ({})", self.occupancy.state());
                sink.emit(&ParkingEvent::Status(self.occupancy.state()));
            }
            Command::Reset => {
                info!("Command: reset");
                self.occupancy.reset();
                self.barrier.close(hw);
                self.indicator
                    .show(hw, occupancy_colour(Occupancy::Available));
                sink.emit(&ParkingEvent::SystemReset);
            }
            Command::Invalid(byte) => {
                warn!("Invalid command byte 0x{byte:02x}");
                sink.emit(&ParkingEvent::InvalidCommand);
            }
        }
    }

    // ── Accessors ────────────────────────────────────────────

    pub fn occupancy(&self) -> Occupancy {
        self.occupancy.state()
    }

    pub fn gate(&self) -> GateState {
        self.barrier.state()
    }

    /// The colour last written to the indicator.
    pub fn indicator_colour(&self) -> Option<Rgb> {
        self.indicator.current()
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Alerts sounded since boot.
    pub fn alerts_played(&self) -> u32 {
        self.alerts.played()
    }
}

fn occupancy_event(occupancy: Occupancy) -> ParkingEvent {
    match occupancy {
        Occupancy::Occupied => ParkingEvent::Occupied,
        Occupancy::Available => ParkingEvent::Available,
    }
}
