//! Barrier actuator: one servo, two positions.

use core::fmt;

use log::info;

use super::ports::ActuatorPort;
use crate::config::ParkingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Closed,
    Open,
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("CLOSED"),
            Self::Open => f.write_str("OPEN"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Barrier {
    state: GateState,
    open_deg: u8,
    closed_deg: u8,
}

impl Barrier {
    pub fn new(config: &ParkingConfig) -> Self {
        Self {
            state: GateState::Closed,
            open_deg: config.gate_open_deg,
            closed_deg: config.gate_closed_deg,
        }
    }

    /// Drive the servo to the open angle.  Always commands the servo, even
    /// if the gate is already open.
    pub fn open(&mut self, hw: &mut impl ActuatorPort) {
        hw.set_barrier_angle(self.open_deg);
        if self.state != GateState::Open {
            info!("Barrier: {} -> {}", self.state, GateState::Open);
        }
        self.state = GateState::Open;
    }

    /// Drive the servo to the closed angle.
    pub fn close(&mut self, hw: &mut impl ActuatorPort) {
        hw.set_barrier_angle(self.closed_deg);
        if self.state != GateState::Closed {
            info!("Barrier: {} -> {}", self.state, GateState::Closed);
        }
        self.state = GateState::Closed;
    }

    pub fn state(&self) -> GateState {
        self.state
    }
}
