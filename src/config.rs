//! Controller configuration parameters
//!
//! All tunable parameters for the SmartPark controller.  Nothing is
//! persisted: the firmware boots from [`ParkingConfig::DEFAULT`] and
//! validates it before touching any peripheral.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingConfig {
    // --- Occupancy ---
    /// Readings strictly below this distance (cm) mean a car is present
    pub parking_threshold_cm: u32,
    /// Readings at or above this distance (cm) are treated as no reading
    pub max_valid_distance_cm: u32,

    // --- Timing ---
    /// Fixed delay at the end of every control cycle (milliseconds)
    pub loop_period_ms: u32,
    /// Blocking pause after an open/close command (milliseconds)
    pub command_feedback_ms: u32,

    // --- Alerts ---
    /// On/off time of each short beep in the occupied pattern (milliseconds)
    pub alert_short_ms: u32,
    /// Number of short beeps in the occupied pattern
    pub alert_short_count: u8,
    /// Duration of the single available beep (milliseconds)
    pub alert_long_ms: u32,

    // --- Barrier ---
    /// Servo angle for an open gate (degrees, 0-180)
    pub gate_open_deg: u8,
    /// Servo angle for a closed gate (degrees, 0-180)
    pub gate_closed_deg: u8,

    // --- Hardware ---
    /// Upper bound on one echo measurement (microseconds)
    pub echo_timeout_us: u32,
    /// Serial command link speed (8N1)
    pub serial_baud: u32,
}

impl ParkingConfig {
    pub const DEFAULT: Self = Self {
        // Occupancy
        parking_threshold_cm: 15,
        max_valid_distance_cm: 100,

        // Timing
        loop_period_ms: 500,
        command_feedback_ms: 1000,

        // Alerts
        alert_short_ms: 200,
        alert_short_count: 2,
        alert_long_ms: 500,

        // Barrier
        gate_open_deg: 90,
        gate_closed_deg: 0,

        // Hardware
        echo_timeout_us: 1_000_000, // 1 s
        serial_baud: 9600,
    };

    /// Reject parameter combinations the controller cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.parking_threshold_cm == 0 {
            return Err(Error::Config("parking threshold must be non-zero"));
        }
        if self.parking_threshold_cm >= self.max_valid_distance_cm {
            return Err(Error::Config(
                "parking threshold must be below the valid distance ceiling",
            ));
        }
        if self.gate_open_deg > 180 || self.gate_closed_deg > 180 {
            return Err(Error::Config("gate angles must be within 0-180"));
        }
        if self.gate_open_deg == self.gate_closed_deg {
            return Err(Error::Config("open and closed gate angles must differ"));
        }
        if self.alert_short_count == 0 || self.alert_short_ms == 0 || self.alert_long_ms == 0 {
            return Err(Error::Config("alert patterns must be audible"));
        }
        if self.echo_timeout_us == 0 {
            return Err(Error::Config("echo timeout must be non-zero"));
        }
        if self.serial_baud == 0 {
            return Err(Error::Config("serial baud must be non-zero"));
        }
        Ok(())
    }
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
