//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the range sensor, every actuator driver and the blocking delay,
//! exposing them through [`SensorPort`], [`ActuatorPort`] and `DelayNs`.
//! This is the only module that turns driver errors into log lines: the
//! domain sees infallible ports, and a failed write leaves the previous
//! output in place until the next command.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use log::{debug, warn};

use crate::app::ports::{ActuatorPort, ClockPort, SensorPort};
use crate::drivers::{Buzzer, ServoDriver, StatusLed};
use crate::error::SensorError;
use crate::fsm::NO_ECHO_CM;
use crate::sensors::UltrasonicSensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<Trig, Echo, Clk, Led, Buz, Srv, D> {
    sensor: UltrasonicSensor<Trig, Echo, Clk>,
    led: StatusLed<Led>,
    buzzer: Buzzer<Buz>,
    servo: ServoDriver<Srv>,
    delay: D,
    /// Driver errors seen since boot (echo timeouts excluded).
    faults: u32,
}

impl<Trig, Echo, Clk, Led, Buz, Srv, D> HardwareAdapter<Trig, Echo, Clk, Led, Buz, Srv, D>
where
    Trig: OutputPin,
    Echo: InputPin,
    Clk: ClockPort,
    Led: SetDutyCycle,
    Buz: OutputPin,
    Srv: SetDutyCycle,
    D: DelayNs,
{
    pub fn new(
        sensor: UltrasonicSensor<Trig, Echo, Clk>,
        led: StatusLed<Led>,
        buzzer: Buzzer<Buz>,
        servo: ServoDriver<Srv>,
        delay: D,
    ) -> Self {
        Self {
            sensor,
            led,
            buzzer,
            servo,
            delay,
            faults: 0,
        }
    }

    pub fn fault_count(&self) -> u32 {
        self.faults
    }

    fn note_fault(&mut self, what: &str, err: impl core::fmt::Display) {
        self.faults = self.faults.saturating_add(1);
        warn!("{what} failed: {err} (faults={})", self.faults);
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<Trig, Echo, Clk, Led, Buz, Srv, D> SensorPort
    for HardwareAdapter<Trig, Echo, Clk, Led, Buz, Srv, D>
where
    Trig: OutputPin,
    Echo: InputPin,
    Clk: ClockPort,
    Led: SetDutyCycle,
    Buz: OutputPin,
    Srv: SetDutyCycle,
    D: DelayNs,
{
    fn measure_distance_cm(&mut self) -> u32 {
        match self.sensor.measure(&mut self.delay) {
            Ok(cm) => cm,
            Err(SensorError::EchoTimeout) => {
                debug!("Range sensor: no echo");
                NO_ECHO_CM
            }
            Err(e) => {
                self.note_fault("Range measurement", e);
                NO_ECHO_CM
            }
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<Trig, Echo, Clk, Led, Buz, Srv, D> ActuatorPort
    for HardwareAdapter<Trig, Echo, Clk, Led, Buz, Srv, D>
where
    Trig: OutputPin,
    Echo: InputPin,
    Clk: ClockPort,
    Led: SetDutyCycle,
    Buz: OutputPin,
    Srv: SetDutyCycle,
    D: DelayNs,
{
    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        if let Err(e) = self.led.set_colour(r, g, b) {
            self.note_fault("Indicator write", e);
        }
    }

    fn set_buzzer(&mut self, on: bool) {
        if let Err(e) = self.buzzer.set(on) {
            self.note_fault("Buzzer write", e);
        }
    }

    fn set_barrier_angle(&mut self, deg: u8) {
        if let Err(e) = self.servo.set_angle(deg) {
            self.note_fault("Servo write", e);
        }
    }
}

// ── Blocking delay passthrough ────────────────────────────────

impl<Trig, Echo, Clk, Led, Buz, Srv, D> DelayNs
    for HardwareAdapter<Trig, Echo, Clk, Led, Buz, Srv, D>
where
    D: DelayNs,
{
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
