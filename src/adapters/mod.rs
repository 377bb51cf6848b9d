//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements          | Connects to                    |
//! |------------|---------------------|--------------------------------|
//! | `hardware` | SensorPort          | HC-SR04 trigger/echo GPIO      |
//! |            | ActuatorPort        | LEDC PWM (RGB, servo), GPIO    |
//! |            | DelayNs             | ESP-IDF delay                  |
//! | `serial`   | CommandPort         | UART RX                        |
//! |            | EventSink           | UART TX (protocol lines)       |
//! | `time`     | ClockPort           | ESP32 high-resolution timer    |

pub mod hardware;
pub mod serial;
pub mod time;
