//! Serial console adapter.
//!
//! Implements [`CommandPort`] (one byte per poll, never blocking) and
//! [`EventSink`] (one CRLF-terminated protocol line per event) over a UART.
//! The UART itself sits behind the small [`UartIo`] trait so the console can
//! be driven by a mock on the host.

use log::{debug, warn};

use crate::app::events::ParkingEvent;
use crate::app::ports::{CommandPort, EventSink};
use crate::error::SerialError;

const LINE_END: &[u8] = b"\r\n";

/// Minimal UART surface the console needs.
pub trait UartIo {
    /// Return one received byte if any is buffered.  Must not block.
    fn try_read_byte(&mut self) -> Result<Option<u8>, SerialError>;

    /// Write every byte of `bytes`, blocking until queued.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SerialError>;
}

pub struct SerialConsole<U> {
    uart: U,
    errors: u32,
}

impl<U: UartIo> SerialConsole<U> {
    pub fn new(uart: U) -> Self {
        Self { uart, errors: 0 }
    }

    /// Read/write failures since boot.
    pub fn error_count(&self) -> u32 {
        self.errors
    }

    pub fn into_inner(self) -> U {
        self.uart
    }

    fn write_line(&mut self, event: &ParkingEvent) -> Result<(), SerialError> {
        let line = event.to_line()?;
        self.uart.write_bytes(line.as_bytes())?;
        self.uart.write_bytes(LINE_END)?;
        debug!("TX | {line}");
        Ok(())
    }
}

impl<U: UartIo> CommandPort for SerialConsole<U> {
    fn poll_byte(&mut self) -> Option<u8> {
        match self.uart.try_read_byte() {
            Ok(byte) => byte,
            Err(e) => {
                self.errors = self.errors.saturating_add(1);
                warn!("Serial read: {e}");
                None
            }
        }
    }
}

impl<U: UartIo> EventSink for SerialConsole<U> {
    fn emit(&mut self, event: &ParkingEvent) {
        if let Err(e) = self.write_line(event) {
            self.errors = self.errors.saturating_add(1);
            warn!("Serial write of {event:?}: {e}");
        }
    }
}

// ── ESP-IDF UART ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
impl UartIo for esp_idf_hal::uart::UartDriver<'_> {
    fn try_read_byte(&mut self) -> Result<Option<u8>, SerialError> {
        let mut buf = [0u8; 1];
        match self.read(&mut buf, esp_idf_hal::delay::NON_BLOCK) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(_) => Err(SerialError::ReadFailed),
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        let mut rest = bytes;
        while !rest.is_empty() {
            let n = self.write(rest).map_err(|_| SerialError::WriteFailed)?;
            if n == 0 {
                return Err(SerialError::WriteFailed);
            }
            rest = &rest[n..];
        }
        Ok(())
    }
}
