//! Operator activity log.
//!
//! Entries are appended as the host performs actions or observes
//! occupancy changes.  The log lives for one host session; nothing is
//! written to disk unless the operator exports it as JSON.

use core::fmt;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// How many entries [`ActivityLog::render`] shows.
pub const RECENT_ENTRIES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Activity {
    StatusCheck,
    GateOpened,
    GateClosed,
    SystemReset,
    CarParked,
    CarLeft,
}

impl Activity {
    pub fn name(self) -> &'static str {
        match self {
            Self::StatusCheck => "STATUS_CHECK",
            Self::GateOpened => "GATE_OPENED",
            Self::GateClosed => "GATE_CLOSED",
            Self::SystemReset => "SYSTEM_RESET",
            Self::CarParked => "CAR_PARKED",
            Self::CarLeft => "CAR_LEFT",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Caller-formatted local time.
    pub timestamp: String,
    #[serde(rename = "action")]
    pub activity: Activity,
    /// `OCCUPIED`, `AVAILABLE` or `SUCCESS`.
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        timestamp: impl Into<String>,
        activity: Activity,
        status: impl Into<String>,
    ) {
        self.entries.push(ActivityEntry {
            timestamp: timestamp.into(),
            activity,
            status: status.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[ActivityEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Entries not shown by [`recent`](Self::recent)`(n)`.
    pub fn hidden(&self, n: usize) -> usize {
        self.entries.len().saturating_sub(n)
    }

    /// Human-readable view: the most recent entries plus a count of the rest.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.entries.is_empty() {
            out.push_str("No activity logged yet\n");
            return out;
        }
        for e in self.recent(RECENT_ENTRIES) {
            let _ = writeln!(out, "{} | {} | {}", e.timestamp, e.activity, e.status);
        }
        let hidden = self.hidden(RECENT_ENTRIES);
        if hidden > 0 {
            let _ = writeln!(out, "\n... and {hidden} more entries");
        }
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
