//! SmartPark Firmware: Main Entry Point
//!
//! Hexagonal architecture with a fixed-period blocking control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter            SerialConsole      Esp32Time       │
//! │  (Sensor+Actuator+Delay)    (Command+Event)    (ClockPort)     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ParkingController (pure logic)              │    │
//! │  │  Occupancy · Indicator · Alert · Barrier · Commands    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::Delay;
use esp_idf_hal::gpio::{AnyInputPin, AnyOutputPin, PinDriver};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{self, UartDriver};
use esp_idf_hal::units::Hertz;
use log::info;

use smartpark::adapters::hardware::HardwareAdapter;
use smartpark::adapters::serial::SerialConsole;
use smartpark::adapters::time::Esp32TimeAdapter;
use smartpark::app::service::ParkingController;
use smartpark::config::ParkingConfig;
use smartpark::drivers::{Buzzer, ServoDriver, StatusLed};
use smartpark::pins;
use smartpark::sensors::UltrasonicSensor;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SmartPark v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = ParkingConfig::DEFAULT;
    config.validate()?;

    let peripherals = Peripherals::take()?;

    // ── 3. Range sensor ───────────────────────────────────────
    // SAFETY: each GPIO number in `pins` is claimed exactly once below.
    let trig = PinDriver::output(unsafe { AnyOutputPin::new(pins::SONAR_TRIG_GPIO) })?;
    let echo = PinDriver::input(unsafe { AnyInputPin::new(pins::SONAR_ECHO_GPIO) })?;
    let sensor = UltrasonicSensor::new(trig, echo, Esp32TimeAdapter::new(), config.echo_timeout_us);

    // ── 4. Indicator (LEDC timer0, 1 kHz / 8-bit) ─────────────
    let led_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new()
            .frequency(Hertz(pins::LED_PWM_FREQ_HZ))
            .resolution(Resolution::Bits8),
    )?;
    let red = LedcDriver::new(peripherals.ledc.channel0, &led_timer, unsafe {
        AnyOutputPin::new(pins::LED_R_GPIO)
    })?;
    let green = LedcDriver::new(peripherals.ledc.channel1, &led_timer, unsafe {
        AnyOutputPin::new(pins::LED_G_GPIO)
    })?;
    let blue = LedcDriver::new(peripherals.ledc.channel2, &led_timer, unsafe {
        AnyOutputPin::new(pins::LED_B_GPIO)
    })?;
    let led = StatusLed::new(red, green, blue);

    // ── 5. Barrier servo (LEDC timer1, 50 Hz / 14-bit) ────────
    let servo_timer = LedcTimerDriver::new(
        peripherals.ledc.timer1,
        &TimerConfig::new()
            .frequency(Hertz(pins::SERVO_PWM_FREQ_HZ))
            .resolution(Resolution::Bits14),
    )?;
    let servo_pwm = LedcDriver::new(peripherals.ledc.channel3, &servo_timer, unsafe {
        AnyOutputPin::new(pins::SERVO_GPIO)
    })?;
    let servo = ServoDriver::new(servo_pwm);

    // ── 6. Buzzer ─────────────────────────────────────────────
    let buzzer = Buzzer::new(PinDriver::output(unsafe {
        AnyOutputPin::new(pins::BUZZER_GPIO)
    })?);

    let mut hw = HardwareAdapter::new(sensor, led, buzzer, servo, Delay::new_default());

    // ── 7. Command link (UART1, 8N1) ──────────────────────────
    let uart = UartDriver::new(
        peripherals.uart1,
        unsafe { AnyOutputPin::new(pins::UART_TX_GPIO) },
        unsafe { AnyInputPin::new(pins::UART_RX_GPIO) },
        Option::<AnyInputPin>::None,
        Option::<AnyOutputPin>::None,
        &uart::config::Config::new().baudrate(Hertz(config.serial_baud)),
    )?;
    let mut console = SerialConsole::new(uart);

    // ── 8. Control loop ───────────────────────────────────────
    let mut controller = ParkingController::new(config);
    controller.start(&mut hw, &mut console);

    info!("System ready. Entering control loop.");

    loop {
        controller.run_cycle(&mut hw, &mut console);
    }
}
