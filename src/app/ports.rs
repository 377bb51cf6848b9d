//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ParkingController (domain)
//! ```
//!
//! Driven adapters (range sensor, indicator/buzzer/servo, serial link)
//! implement these traits.  The
//! [`ParkingController`](super::service::ParkingController) consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! Blocking pauses (alert patterns, command feedback, loop period) go
//! through `embedded_hal::delay::DelayNs`, which the hardware adapter also
//! implements.

use super::events::ParkingEvent;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
pub trait SensorPort {
    /// Take one range measurement.  Returns
    /// [`NO_ECHO_CM`](crate::fsm::NO_ECHO_CM) on timeout or pin fault.
    /// Bounded by the configured echo timeout.
    fn measure_distance_cm(&mut self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
///
/// Infallible from the domain's point of view; adapters log driver
/// failures and carry on.
pub trait ActuatorPort {
    /// Set the RGB indicator colour.
    fn set_led(&mut self, r: u8, g: u8, b: u8);

    /// Switch the buzzer on or off.
    fn set_buzzer(&mut self, on: bool);

    /// Move the barrier servo to `deg` (0–180).
    fn set_barrier_angle(&mut self, deg: u8);
}

// ───────────────────────────────────────────────────────────────
// Command port (driving adapter: serial → domain)
// ───────────────────────────────────────────────────────────────

/// Non-blocking source of single-byte commands.
pub trait CommandPort {
    /// Return the next pending byte, or `None` if nothing is waiting.
    /// Must never block.
    fn poll_byte(&mut self) -> Option<u8>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → serial / logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`ParkingEvent`]s through this port.  On the device
/// each one becomes a CRLF-terminated protocol line on the UART.
pub trait EventSink {
    fn emit(&mut self, event: &ParkingEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: monotonic time → domain / drivers)
// ───────────────────────────────────────────────────────────────

/// Monotonic microsecond clock.  Used by the range sensor to bound
/// its echo wait.
pub trait ClockPort {
    fn now_us(&self) -> u64;
}
