//! `HardwareAdapter` wired to recording embedded-hal pins.
//!
//! Exercises the real drivers (sensor, LED, buzzer, servo) behind the
//! port traits, including the fault path when a driver write fails.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use smartpark::adapters::hardware::HardwareAdapter;
use smartpark::app::ports::{ActuatorPort, ClockPort, SensorPort};
use smartpark::drivers::{Buzzer, ServoDriver, StatusLed};
use smartpark::fsm::NO_ECHO_CM;
use smartpark::sensors::UltrasonicSensor;

// ── Pin doubles ───────────────────────────────────────────────

#[derive(Clone)]
struct SharedClock(Rc<Cell<u64>>);

impl ClockPort for SharedClock {
    fn now_us(&self) -> u64 {
        let t = self.0.get() + 1;
        self.0.set(t);
        t
    }
}

struct Echo {
    time: Rc<Cell<u64>>,
    window: Option<(u64, u64)>,
}

impl embedded_hal::digital::ErrorType for Echo {
    type Error = Infallible;
}

impl InputPin for Echo {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        let t = self.time.get();
        Ok(self.window.is_some_and(|(rise, fall)| t >= rise && t < fall))
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|h| !h)
    }
}

#[derive(Clone, Default)]
struct Pin(Rc<Cell<bool>>);

impl embedded_hal::digital::ErrorType for Pin {
    type Error = Infallible;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.set(true);
        Ok(())
    }
}

#[derive(Debug)]
struct PwmFault;

impl embedded_hal::pwm::Error for PwmFault {
    fn kind(&self) -> embedded_hal::pwm::ErrorKind {
        embedded_hal::pwm::ErrorKind::Other
    }
}

/// PWM channel recording its duty; `broken` channels reject every write.
#[derive(Clone)]
struct Pwm {
    duty: Rc<Cell<u16>>,
    max: u16,
    broken: bool,
}

impl Pwm {
    fn new(max: u16) -> Self {
        Self {
            duty: Rc::new(Cell::new(0)),
            max,
            broken: false,
        }
    }
}

impl embedded_hal::pwm::ErrorType for Pwm {
    type Error = PwmFault;
}

impl SetDutyCycle for Pwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), PwmFault> {
        if self.broken {
            return Err(PwmFault);
        }
        self.duty.set(duty);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct Sleep(Rc<RefCell<Vec<u32>>>);

impl DelayNs for Sleep {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(ns);
    }
}

// ── Rig ───────────────────────────────────────────────────────

struct Rig {
    rgb: [Pwm; 3],
    buzzer: Pin,
    servo: Pwm,
    sleep: Sleep,
}

type Adapter = HardwareAdapter<Pin, Echo, SharedClock, Pwm, Pin, Pwm, Sleep>;

fn rig(window: Option<(u64, u64)>, servo_broken: bool) -> (Adapter, Rig) {
    let time = Rc::new(Cell::new(0));
    let sensor = UltrasonicSensor::new(
        Pin::default(),
        Echo {
            time: time.clone(),
            window,
        },
        SharedClock(time),
        10_000,
    );
    let rgb = [Pwm::new(255), Pwm::new(255), Pwm::new(255)];
    let mut servo = Pwm::new(u16::MAX);
    servo.broken = servo_broken;
    let buzzer = Pin::default();
    let sleep = Sleep::default();

    let adapter = HardwareAdapter::new(
        sensor,
        StatusLed::new(rgb[0].clone(), rgb[1].clone(), rgb[2].clone()),
        Buzzer::new(buzzer.clone()),
        ServoDriver::new(servo.clone()),
        sleep.clone(),
    );
    (
        adapter,
        Rig {
            rgb,
            buzzer,
            servo,
            sleep,
        },
    )
}

// ── Tests ─────────────────────────────────────────────────────

#[test]
fn measures_through_sensor_port() {
    let (mut hw, _rig) = rig(Some((100, 1130)), false);
    assert_eq!(hw.measure_distance_cm(), 17);
    assert_eq!(hw.fault_count(), 0);
}

#[test]
fn missing_echo_is_not_a_fault() {
    let (mut hw, _rig) = rig(None, false);
    assert_eq!(hw.measure_distance_cm(), NO_ECHO_CM);
    assert_eq!(hw.fault_count(), 0);
}

#[test]
fn led_channels_follow_colour() {
    let (mut hw, rig) = rig(None, false);
    hw.set_led(255, 255, 0);
    let duties: Vec<u16> = rig.rgb.iter().map(|p| p.duty.get()).collect();
    assert_eq!(duties, [255, 255, 0]);
}

#[test]
fn buzzer_pin_follows_port() {
    let (mut hw, rig) = rig(None, false);
    hw.set_buzzer(true);
    assert!(rig.buzzer.0.get());
    hw.set_buzzer(false);
    assert!(!rig.buzzer.0.get());
}

#[test]
fn servo_write_lands_on_pwm() {
    let (mut hw, rig) = rig(None, false);
    hw.set_barrier_angle(90);
    assert!(rig.servo.duty.get() > 0);
}

#[test]
fn failed_servo_write_is_counted() {
    let (mut hw, rig) = rig(None, true);
    hw.set_barrier_angle(90);
    hw.set_barrier_angle(0);
    assert_eq!(hw.fault_count(), 2);
    assert_eq!(rig.servo.duty.get(), 0);
}

#[test]
fn delay_is_forwarded() {
    let (mut hw, rig) = rig(None, false);
    hw.delay_ms(500);
    assert!(!rig.sleep.0.borrow().is_empty());
}
