//! Async serial client for a SmartPark controller.
//!
//! Generic over any `AsyncRead + AsyncWrite` stream: a `tokio_serial`
//! port in `parkctl`, an in-memory duplex pipe in tests.  The controller
//! never stops streaming, so a request skips unrelated lines until the
//! matching reply shows up or the reply timeout expires.

use std::fmt;
use std::io;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufStream};
use tokio::time::{Instant, timeout, timeout_at};
use tracing::{debug, trace};

use super::RemoteAction;
use crate::app::events::ParkingEvent;

/// How long a request waits for its reply line.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(2);

/// Opening a USB serial port resets most dev boards; give the firmware
/// time to boot before sending.
pub const SETTLE_DELAY: Duration = Duration::from_secs(2);

// ── Errors ───────────────────────────────────────────────────

#[derive(Debug)]
pub enum ClientError {
    Io(io::Error),
    /// No matching reply within the reply timeout.
    Timeout(RemoteAction),
    /// The stream reached EOF.
    Closed,
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "serial I/O: {e}"),
            Self::Timeout(action) => write!(f, "no reply to {action}"),
            Self::Closed => write!(f, "connection closed"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ClientError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

// ── Client ───────────────────────────────────────────────────

pub struct RemoteClient<S> {
    stream: BufStream<S>,
    /// Bytes of a partially received line.  Kept across calls so a
    /// timed-out read loses nothing.
    pending: Vec<u8>,
    reply_timeout: Duration,
}

impl<S: AsyncRead + AsyncWrite + Unpin> RemoteClient<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream: BufStream::new(stream),
            pending: Vec::with_capacity(64),
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
        }
    }

    pub fn with_reply_timeout(mut self, reply_timeout: Duration) -> Self {
        self.reply_timeout = reply_timeout;
        self
    }

    /// Write the command byte for `action`.
    pub async fn send(&mut self, action: RemoteAction) -> Result<(), ClientError> {
        debug!(%action, byte = %char::from(action.byte()), "sending command");
        self.stream.write_all(&[action.byte()]).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Next protocol line from the controller.  Blank and unrecognised
    /// lines are skipped.  Cancel-safe.
    pub async fn next_event(&mut self) -> Result<ParkingEvent, ClientError> {
        loop {
            let n = self.stream.read_until(b'\n', &mut self.pending).await?;
            if n == 0 && self.pending.is_empty() {
                return Err(ClientError::Closed);
            }
            let line = String::from_utf8_lossy(&self.pending).into_owned();
            self.pending.clear();

            match line.parse::<ParkingEvent>() {
                Ok(event) => {
                    trace!(%event, "received");
                    return Ok(event);
                }
                Err(_) if line.trim().is_empty() => {}
                Err(_) => debug!(line = line.trim(), "skipping unrecognised line"),
            }
        }
    }

    /// Drop every line already received.  A late reply to an earlier,
    /// timed-out request must not answer the next one.
    pub async fn discard_received(&mut self) -> Result<usize, ClientError> {
        let mut dropped = 0;
        loop {
            match timeout(Duration::ZERO, self.stream.read_until(b'\n', &mut self.pending)).await {
                Ok(Ok(0)) | Err(_) => break,
                Ok(Ok(_)) => {
                    let complete = self.pending.ends_with(b"\n");
                    trace!(line = %String::from_utf8_lossy(&self.pending).trim(), "discarding stale line");
                    self.pending.clear();
                    dropped += 1;
                    if !complete {
                        break;
                    }
                }
                Ok(Err(e)) => return Err(e.into()),
            }
        }
        // A partial line left here is the head of a stale line too.
        self.pending.clear();
        if dropped > 0 {
            debug!(dropped, "discarded stale lines before request");
        }
        Ok(dropped)
    }

    /// Send `action` and wait for its acknowledgement.  Only lines
    /// received after the command byte is written can answer it.
    pub async fn request(&mut self, action: RemoteAction) -> Result<ParkingEvent, ClientError> {
        self.discard_received().await?;
        self.send(action).await?;
        let deadline = Instant::now() + self.reply_timeout;
        loop {
            let event = timeout_at(deadline, self.next_event())
                .await
                .map_err(|_| ClientError::Timeout(action))??;
            if action.is_reply(&event) {
                return Ok(event);
            }
            trace!(%event, %action, "not the reply, waiting");
        }
    }
}
