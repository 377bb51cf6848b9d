//! Hobby servo driver for the barrier arm.
//!
//! 50 Hz frame; pulse width maps linearly from 544 µs (0°) to 2400 µs
//! (180°).  The PWM channel's full duty range must correspond to one
//! 20 ms frame.

use embedded_hal::pwm::SetDutyCycle;

use crate::error::ActuatorError;

pub const MIN_PULSE_US: u32 = 544;
pub const MAX_PULSE_US: u32 = 2400;
pub const FRAME_US: u32 = 20_000;
pub const MAX_ANGLE_DEG: u8 = 180;

/// Pulse width for `deg`, clamped to the servo's travel.
pub fn pulse_width_us(deg: u8) -> u32 {
    let deg = u32::from(deg.min(MAX_ANGLE_DEG));
    MIN_PULSE_US + (MAX_PULSE_US - MIN_PULSE_US) * deg / u32::from(MAX_ANGLE_DEG)
}

pub struct ServoDriver<P> {
    pwm: P,
    angle: Option<u8>,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm, angle: None }
    }

    pub fn set_angle(&mut self, deg: u8) -> Result<(), ActuatorError> {
        let deg = deg.min(MAX_ANGLE_DEG);
        let pulse = pulse_width_us(deg);
        self.pwm
            .set_duty_cycle_fraction(pulse as u16, FRAME_US as u16)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.angle = Some(deg);
        Ok(())
    }

    /// Last commanded angle, `None` before the first command.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }
}
