//! Actuator drivers over `embedded-hal` traits.

pub mod buzzer;
pub mod servo;
pub mod status_led;

pub use buzzer::Buzzer;
pub use servo::ServoDriver;
pub use status_led::StatusLed;
