//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the SmartPark controller:
//! occupancy tracking, indicator colours, alert patterns, barrier position
//! and command dispatch.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod alert;
pub mod barrier;
pub mod commands;
pub mod events;
pub mod indicator;
pub mod ports;
pub mod service;
