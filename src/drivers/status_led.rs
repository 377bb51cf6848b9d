//! RGB occupancy indicator driver.
//!
//! Three PWM channels drive a common-cathode RGB LED.  Generic over
//! `embedded_hal::pwm::SetDutyCycle`, so the same driver runs on LEDC
//! channels on the device and on recording mocks in tests.

use embedded_hal::pwm::SetDutyCycle;

use crate::error::ActuatorError;

pub struct StatusLed<P> {
    red: P,
    green: P,
    blue: P,
}

impl<P: SetDutyCycle> StatusLed<P> {
    pub fn new(red: P, green: P, blue: P) -> Self {
        Self { red, green, blue }
    }

    /// Set all three channels.  Each 0–255 value maps onto the channel's
    /// full duty range.
    pub fn set_colour(&mut self, r: u8, g: u8, b: u8) -> Result<(), ActuatorError> {
        set_channel(&mut self.red, r)?;
        set_channel(&mut self.green, g)?;
        set_channel(&mut self.blue, b)
    }
}

fn set_channel(channel: &mut impl SetDutyCycle, value: u8) -> Result<(), ActuatorError> {
    channel
        .set_duty_cycle_fraction(u16::from(value), 255)
        .map_err(|_| ActuatorError::PwmWriteFailed)
}
