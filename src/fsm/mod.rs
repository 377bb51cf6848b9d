//! Occupancy state machine.
//!
//! Two states, three input bands, edge-triggered outcomes:
//!
//! ```text
//!                  Occupied band
//!   ┌───────────┐ ──────────────▶ ┌──────────┐
//!   │ Available │                 │ Occupied │
//!   └───────────┘ ◀────────────── └──────────┘
//!                  Available band
//!
//!   Same-side band  → Steady(current)
//!   Invalid band    → NoReading, state untouched
//! ```
//!
//! Each update returns an [`Outcome`].  Only [`Outcome::Became`] carries
//! transition side effects (alert + colour change); the controller keys
//! off it so those effects fire at most once per threshold crossing.

pub mod band;

use core::fmt;

use log::info;

pub use band::{Band, NO_ECHO_CM};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Occupancy of the single monitored spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Occupancy {
    #[default]
    Available = 0,
    Occupied = 1,
}

impl Occupancy {
    pub fn name(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Occupied => "OCCUPIED",
        }
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Update outcome
// ---------------------------------------------------------------------------

/// Result of feeding one band into the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A threshold crossing: the machine moved into this state.
    Became(Occupancy),
    /// Same-side reading: the machine stayed in this state.
    Steady(Occupancy),
    /// Invalid reading: state untouched.
    NoReading,
}

// ---------------------------------------------------------------------------
// Machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct OccupancyMachine {
    current: Occupancy,
    /// Number of threshold crossings since construction or reset.
    transitions: u32,
    /// Valid readings observed since the last change of state.
    cycles_in_state: u32,
}

impl OccupancyMachine {
    pub const fn new() -> Self {
        Self {
            current: Occupancy::Available,
            transitions: 0,
            cycles_in_state: 0,
        }
    }

    pub fn update(&mut self, band: Band) -> Outcome {
        let signalled = match band {
            Band::Occupied => Occupancy::Occupied,
            Band::Available => Occupancy::Available,
            Band::Invalid => return Outcome::NoReading,
        };

        if signalled == self.current {
            self.cycles_in_state = self.cycles_in_state.saturating_add(1);
            return Outcome::Steady(signalled);
        }

        info!(
            "Occupancy transition: {} -> {} (after {} cycles)",
            self.current, signalled, self.cycles_in_state
        );
        self.current = signalled;
        self.transitions = self.transitions.saturating_add(1);
        self.cycles_in_state = 0;
        Outcome::Became(signalled)
    }

    /// Force AVAILABLE regardless of the current state.
    pub fn reset(&mut self) {
        if self.current != Occupancy::Available {
            info!("Occupancy reset: {} -> {}", self.current, Occupancy::Available);
        }
        *self = Self::new();
    }

    pub fn state(&self) -> Occupancy {
        self.current
    }

    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    pub fn cycles_in_state(&self) -> u32 {
        self.cycles_in_state
    }
}

impl Default for OccupancyMachine {
    fn default() -> Self {
        Self::new()
    }
}
