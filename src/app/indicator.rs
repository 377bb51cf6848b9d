//! RGB indicator state.
//!
//! Remembers the last colour written so a steady cycle can skip the PWM
//! write when the indicator already shows the occupancy colour, and repaint
//! it when command feedback (yellow) is still displayed.

use log::debug;

use super::ports::ActuatorPort;
use crate::fsm::Occupancy;

pub type Rgb = (u8, u8, u8);

pub const COLOUR_OCCUPIED: Rgb = (255, 0, 0);
pub const COLOUR_AVAILABLE: Rgb = (0, 255, 0);
pub const COLOUR_NO_READING: Rgb = (0, 0, 255);
pub const COLOUR_GATE_OPEN: Rgb = (255, 255, 0);

/// Clamp a requested channel value into the PWM range.
pub fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

pub fn occupancy_colour(occupancy: Occupancy) -> Rgb {
    match occupancy {
        Occupancy::Occupied => COLOUR_OCCUPIED,
        Occupancy::Available => COLOUR_AVAILABLE,
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorController {
    shown: Option<Rgb>,
}

impl IndicatorController {
    pub const fn new() -> Self {
        Self { shown: None }
    }

    /// Write an arbitrary colour, clamping each channel to [0, 255].
    pub fn set_color(&mut self, hw: &mut impl ActuatorPort, r: i32, g: i32, b: i32) {
        self.show(hw, (clamp_channel(r), clamp_channel(g), clamp_channel(b)));
    }

    /// Unconditionally write `colour`.
    pub fn show(&mut self, hw: &mut impl ActuatorPort, colour: Rgb) {
        let (r, g, b) = colour;
        hw.set_led(r, g, b);
        self.shown = Some(colour);
    }

    /// Repaint `colour` only if something else is displayed.  Returns
    /// whether a write happened.
    pub fn restore(&mut self, hw: &mut impl ActuatorPort, colour: Rgb) -> bool {
        if self.shown == Some(colour) {
            return false;
        }
        debug!("Indicator restore: {:?} -> {:?}", self.shown, colour);
        self.show(hw, colour);
        true
    }

    /// The colour last written, if any.
    pub fn current(&self) -> Option<Rgb> {
        self.shown
    }
}
