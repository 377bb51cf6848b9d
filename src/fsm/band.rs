//! Distance band classification.
//!
//! Every reading falls into exactly one band:
//!
//! ```text
//!   0 ─────────── threshold ─────────── max_valid ──────────▶ cm
//!   │   Occupied   │      Available      │     Invalid ...
//! ```
//!
//! `NO_ECHO_CM` (a timed-out measurement) is always above `max_valid`, so
//! it lands in [`Band::Invalid`] without a special case.

/// Sentinel distance for a measurement that produced no echo.
pub const NO_ECHO_CM: u32 = u32::MAX;

/// Which side of the thresholds a single reading falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// `d < threshold`: something is parked in the spot.
    Occupied,
    /// `threshold <= d < max_valid`: the spot is clear.
    Available,
    /// `d >= max_valid`: no usable echo.
    Invalid,
}

impl Band {
    pub fn classify(distance_cm: u32, threshold_cm: u32, max_valid_cm: u32) -> Self {
        if distance_cm < threshold_cm {
            Self::Occupied
        } else if distance_cm < max_valid_cm {
            Self::Available
        } else {
            Self::Invalid
        }
    }
}
