//! Buzzer alert patterns.
//!
//! Both patterns block the caller for their full duration; nothing else in
//! the cycle runs while the buzzer sounds.
//!
//! ```text
//!   Occupied   ██__██__        (short_ms on / short_ms off) × short_count
//!   Available  █████           long_ms on, then off
//! ```

use embedded_hal::delay::DelayNs;
use log::debug;

use super::ports::ActuatorPort;
use crate::config::ParkingConfig;

#[derive(Debug, Clone)]
pub struct AlertController {
    short_ms: u32,
    short_count: u8,
    long_ms: u32,
    played: u32,
}

impl AlertController {
    pub fn new(config: &ParkingConfig) -> Self {
        Self {
            short_ms: config.alert_short_ms,
            short_count: config.alert_short_count,
            long_ms: config.alert_long_ms,
            played: 0,
        }
    }

    /// Double beep for a car arriving.
    pub fn alert_occupied(&mut self, hw: &mut (impl ActuatorPort + DelayNs)) {
        debug!("Alert: occupied pattern");
        for _ in 0..self.short_count {
            hw.set_buzzer(true);
            hw.delay_ms(self.short_ms);
            hw.set_buzzer(false);
            hw.delay_ms(self.short_ms);
        }
        self.played = self.played.saturating_add(1);
    }

    /// Single long beep for a car leaving.
    pub fn alert_available(&mut self, hw: &mut (impl ActuatorPort + DelayNs)) {
        debug!("Alert: available pattern");
        hw.set_buzzer(true);
        hw.delay_ms(self.long_ms);
        hw.set_buzzer(false);
        self.played = self.played.saturating_add(1);
    }

    /// Total alerts sounded since boot.
    pub fn played(&self) -> u32 {
        self.played
    }
}
