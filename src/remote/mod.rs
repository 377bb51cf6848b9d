//! Host-side remote control of a SmartPark controller.
//!
//! The controller streams one protocol line per event and accepts
//! single-byte commands.  This module holds the host's view of that
//! conversation:
//!
//! - [`RemoteAction`]: an operator request, its command byte, and the
//!   reply line that acknowledges it.
//! - [`activity`]: timestamped record of what the operator did and saw.
//! - [`monitor`]: occupancy-change detection over the event stream.
//! - `client`: async serial client (feature `host-cli`).
//! - `interrupt`: session-wide Ctrl+C listener (feature `host-cli`).

pub mod activity;
#[cfg(feature = "host-cli")]
pub mod client;
#[cfg(feature = "host-cli")]
pub mod interrupt;
pub mod monitor;

use core::fmt;

use crate::app::commands::Command;
use crate::app::events::ParkingEvent;

pub use activity::{Activity, ActivityEntry, ActivityLog};
pub use monitor::{MonitorReport, StatusMonitor};

/// Operator requests the host can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteAction {
    CheckStatus,
    OpenGate,
    CloseGate,
    Reset,
}

impl RemoteAction {
    pub fn command(self) -> Command {
        match self {
            Self::CheckStatus => Command::Status,
            Self::OpenGate => Command::Open,
            Self::CloseGate => Command::Close,
            Self::Reset => Command::Reset,
        }
    }

    pub fn byte(self) -> u8 {
        self.command().byte()
    }

    /// Whether `event` is the controller's acknowledgement of this action.
    pub fn is_reply(self, event: &ParkingEvent) -> bool {
        matches!(
            (self, event),
            (Self::CheckStatus, ParkingEvent::Status(_))
                | (Self::OpenGate, ParkingEvent::GateOpened)
                | (Self::CloseGate, ParkingEvent::GateClosed)
                | (Self::Reset, ParkingEvent::SystemReset)
        )
    }

    /// Activity recorded when the reply arrives.
    pub fn activity(self) -> Activity {
        match self {
            Self::CheckStatus => Activity::StatusCheck,
            Self::OpenGate => Activity::GateOpened,
            Self::CloseGate => Activity::GateClosed,
            Self::Reset => Activity::SystemReset,
        }
    }

    /// Status text to record in the activity log for `reply`, or `None`
    /// if `reply` does not acknowledge this action.
    pub fn record_status(self, reply: &ParkingEvent) -> Option<&'static str> {
        if !self.is_reply(reply) {
            return None;
        }
        Some(match reply {
            ParkingEvent::Status(occupancy) => occupancy.name(),
            _ => "SUCCESS",
        })
    }

    /// Actions that move hardware ask the operator first.
    pub fn needs_confirmation(self) -> bool {
        !matches!(self, Self::CheckStatus)
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Self::CheckStatus => "Check parking status?",
            Self::OpenGate => "Open barrier gate?",
            Self::CloseGate => "Close barrier gate?",
            Self::Reset => "Reset parking system?",
        }
    }
}

impl fmt::Display for RemoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckStatus => f.write_str("status check"),
            Self::OpenGate => f.write_str("open gate"),
            Self::CloseGate => f.write_str("close gate"),
            Self::Reset => f.write_str("system reset"),
        }
    }
}
