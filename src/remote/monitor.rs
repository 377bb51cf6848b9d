//! Occupancy-change detection over a stream of received events.
//!
//! The controller prints its occupancy every cycle; the monitor reduces
//! that to one report per change.  Both the per-cycle lines and `STATUS:`
//! replies count as observations.  The first observation after start is
//! always reported.

use crate::app::events::ParkingEvent;
use crate::fsm::Occupancy;

use super::activity::Activity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorReport {
    CarParked,
    CarLeft,
    Distance(u32),
}

impl MonitorReport {
    /// Activity-log entry for occupancy changes; `None` for samples.
    pub fn activity(self) -> Option<(Activity, Occupancy)> {
        match self {
            Self::CarParked => Some((Activity::CarParked, Occupancy::Occupied)),
            Self::CarLeft => Some((Activity::CarLeft, Occupancy::Available)),
            Self::Distance(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusMonitor {
    last: Option<Occupancy>,
}

impl StatusMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, event: &ParkingEvent) -> Option<MonitorReport> {
        if let ParkingEvent::Distance(cm) = event {
            return Some(MonitorReport::Distance(*cm));
        }
        let seen = event.occupancy()?;
        if self.last == Some(seen) {
            return None;
        }
        self.last = Some(seen);
        Some(match seen {
            Occupancy::Occupied => MonitorReport::CarParked,
            Occupancy::Available => MonitorReport::CarLeft,
        })
    }

    /// Occupancy as last observed, if any.
    pub fn last(&self) -> Option<Occupancy> {
        self.last
    }
}
