//! GPIO / peripheral pin assignments for the SmartPark controller board.
//!
//! Single source of truth: the firmware entry point references this module
//! rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Ultrasonic range sensor (HC-SR04)
// ---------------------------------------------------------------------------

/// Digital output: 10 µs HIGH pulse starts a ranging cycle.
pub const SONAR_TRIG_GPIO: i32 = 4;
/// Digital input: HIGH for the round-trip time of the echo.
/// The HC-SR04 drives 5 V; route through a divider to the 3.3 V input.
pub const SONAR_ECHO_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// RGB occupancy indicator (common cathode)
// ---------------------------------------------------------------------------

/// LEDC PWM channel for the red die.
pub const LED_R_GPIO: i32 = 11;
/// LEDC PWM channel for the green die.
pub const LED_G_GPIO: i32 = 12;
/// LEDC PWM channel for the blue die.
pub const LED_B_GPIO: i32 = 13;
/// Indicator PWM frequency.
pub const LED_PWM_FREQ_HZ: u32 = 1_000;

// ---------------------------------------------------------------------------
// Barrier servo (SG90-class hobby servo)
// ---------------------------------------------------------------------------

/// LEDC PWM channel for the servo signal line.
pub const SERVO_GPIO: i32 = 14;
/// Standard hobby-servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;

// ---------------------------------------------------------------------------
// Buzzer (active, driven through an NPN transistor)
// ---------------------------------------------------------------------------

/// Digital output: HIGH = sounding.
pub const BUZZER_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// Command link (UART1, 8N1)
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
