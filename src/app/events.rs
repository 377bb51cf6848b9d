//! Outbound application events.
//!
//! The [`ParkingController`](super::service::ParkingController) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Each event has
//! exactly one protocol line (its `Display` form); the serial adapter writes
//! it CRLF-terminated, and the host client parses it back with `FromStr`.

use core::fmt::{self, Write as _};
use core::str::FromStr;

use crate::error::SerialError;
use crate::fsm::Occupancy;

/// Capacity of a rendered protocol line, terminator excluded.
pub const LINE_CAPACITY: usize = 48;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParkingEvent {
    /// Boot banner.
    Initialized,
    /// Boot banner, second line: the configured threshold in cm.
    Threshold(u32),
    /// One range measurement in cm.
    Distance(u32),
    /// Occupied reading (on the crossing and on every steady cycle).
    Occupied,
    /// Available reading (on the crossing and on every steady cycle).
    Available,
    /// No usable echo this cycle.
    NoReading,
    GateOpened,
    GateClosed,
    /// Reply to `s`.
    Status(Occupancy),
    SystemReset,
    InvalidCommand,
}

impl ParkingEvent {
    /// Render into a fixed-capacity buffer for allocation-free output.
    pub fn to_line(&self) -> Result<heapless::String<LINE_CAPACITY>, SerialError> {
        let mut line = heapless::String::new();
        write!(line, "{self}").map_err(|_| SerialError::LineTooLong)?;
        Ok(line)
    }

    /// The occupancy this event reports, if any.
    pub fn occupancy(&self) -> Option<Occupancy> {
        match self {
            Self::Occupied | Self::Status(Occupancy::Occupied) => Some(Occupancy::Occupied),
            Self::Available | Self::Status(Occupancy::Available) => Some(Occupancy::Available),
            _ => None,
        }
    }
}

impl fmt::Display for ParkingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized => f.write_str("Smart Parking System Initialized"),
            Self::Threshold(cm) => write!(f, "Parking threshold set to: {cm} cm"),
            Self::Distance(cm) => write!(f, "Distance: {cm} cm"),
            Self::Occupied => f.write_str("OCCUPIED"),
            Self::Available => f.write_str("AVAILABLE"),
            Self::NoReading => f.write_str("NO READING"),
            Self::GateOpened => f.write_str("Gate OPENED"),
            Self::GateClosed => f.write_str("Gate CLOSED"),
            Self::Status(occ) => write!(f, "STATUS:{occ}"),
            Self::SystemReset => f.write_str("SYSTEM RESET"),
            Self::InvalidCommand => f.write_str("INVALID COMMAND"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing (host side)
// ---------------------------------------------------------------------------

/// A received line that is not a protocol line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseEventError;

impl fmt::Display for ParseEventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unrecognised protocol line")
    }
}

impl std::error::Error for ParseEventError {}

fn parse_cm(field: &str) -> Result<u32, ParseEventError> {
    field
        .strip_suffix(" cm")
        .and_then(|n| n.trim().parse().ok())
        .ok_or(ParseEventError)
}

impl FromStr for ParkingEvent {
    type Err = ParseEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let event = match line {
            "Smart Parking System Initialized" => Self::Initialized,
            "OCCUPIED" => Self::Occupied,
            "AVAILABLE" => Self::Available,
            "NO READING" => Self::NoReading,
            "Gate OPENED" => Self::GateOpened,
            "Gate CLOSED" => Self::GateClosed,
            "STATUS:OCCUPIED" => Self::Status(Occupancy::Occupied),
            "STATUS:AVAILABLE" => Self::Status(Occupancy::Available),
            "SYSTEM RESET" => Self::SystemReset,
            "INVALID COMMAND" => Self::InvalidCommand,
            _ => {
                if let Some(rest) = line.strip_prefix("Distance:") {
                    Self::Distance(parse_cm(rest)?)
                } else if let Some(rest) = line.strip_prefix("Parking threshold set to:") {
                    Self::Threshold(parse_cm(rest)?)
                } else {
                    return Err(ParseEventError);
                }
            }
        };
        Ok(event)
    }
}
