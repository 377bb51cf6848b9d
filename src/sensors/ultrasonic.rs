//! HC-SR04 ultrasonic range sensor driver.
//!
//! A 10 µs HIGH on TRIG fires a burst; ECHO then goes HIGH for the
//! round-trip time of flight.  The echo wait busy-polls the pin against a
//! single deadline covering all three phases (previous pulse ends, pulse
//! starts, pulse ends), so one measurement never blocks longer than the
//! configured timeout plus the trigger pulse.
//!
//! Speed of sound is taken as 0.034 cm/µs; halving for the round trip
//! gives `cm = µs × 17 / 1000`, truncated.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::ClockPort;
use crate::error::SensorError;
use crate::fsm::NO_ECHO_CM;

/// Settle time with TRIG held low before the pulse.
const TRIGGER_SETTLE_US: u32 = 2;
/// Width of the trigger pulse.
const TRIGGER_PULSE_US: u32 = 10;

/// Convert an echo pulse width to whole centimetres.
pub const fn echo_to_cm(echo_us: u64) -> u32 {
    let cm = echo_us.saturating_mul(17) / 1000;
    if cm > u32::MAX as u64 { u32::MAX } else { cm as u32 }
}

pub struct UltrasonicSensor<T, E, C> {
    trigger: T,
    echo: E,
    clock: C,
    timeout_us: u32,
}

impl<T, E, C> UltrasonicSensor<T, E, C>
where
    T: OutputPin,
    E: InputPin,
    C: ClockPort,
{
    pub fn new(trigger: T, echo: E, clock: C, timeout_us: u32) -> Self {
        Self {
            trigger,
            echo,
            clock,
            timeout_us,
        }
    }

    /// Fire one ranging cycle and return the distance in centimetres.
    pub fn measure(&mut self, delay: &mut impl DelayNs) -> Result<u32, SensorError> {
        self.trigger
            .set_low()
            .map_err(|_| SensorError::TriggerWriteFailed)?;
        delay.delay_us(TRIGGER_SETTLE_US);
        self.trigger
            .set_high()
            .map_err(|_| SensorError::TriggerWriteFailed)?;
        delay.delay_us(TRIGGER_PULSE_US);
        self.trigger
            .set_low()
            .map_err(|_| SensorError::TriggerWriteFailed)?;

        let deadline = self.clock.now_us().saturating_add(u64::from(self.timeout_us));

        self.wait_for_level(false, deadline)?;
        self.wait_for_level(true, deadline)?;
        let rise = self.clock.now_us();
        self.wait_for_level(false, deadline)?;
        let fall = self.clock.now_us();

        Ok(echo_to_cm(fall.saturating_sub(rise)))
    }

    /// Like [`measure`](Self::measure) but folds every failure into
    /// [`NO_ECHO_CM`].
    pub fn measure_distance_cm(&mut self, delay: &mut impl DelayNs) -> u32 {
        self.measure(delay).unwrap_or(NO_ECHO_CM)
    }

    fn wait_for_level(&mut self, high: bool, deadline: u64) -> Result<(), SensorError> {
        loop {
            let level = self
                .echo
                .is_high()
                .map_err(|_| SensorError::EchoReadFailed)?;
            if level == high {
                return Ok(());
            }
            if self.clock.now_us() >= deadline {
                return Err(SensorError::EchoTimeout);
            }
        }
    }
}
