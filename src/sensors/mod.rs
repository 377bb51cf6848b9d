//! Sensor subsystem.
//!
//! The controller reads a single range sensor once per cycle through the
//! [`SensorPort`](crate::app::ports::SensorPort) implemented by the
//! hardware adapter.

pub mod ultrasonic;

pub use ultrasonic::{UltrasonicSensor, echo_to_cm};
