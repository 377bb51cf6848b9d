//! Session-wide Ctrl+C listener.
//!
//! Installing tokio's Ctrl+C handler replaces the default SIGINT action
//! for the rest of the process, so every prompt and wait in a session has
//! to race the same listener or the signal is swallowed.  The listener
//! future lives across waits: a signal that arrives while nothing is
//! waiting is delivered to the next wait.

use std::future::Future;
use std::io;
use std::pin::Pin;

pub type SignalFuture = Pin<Box<dyn Future<Output = io::Result<()>>>>;

pub struct Interrupt {
    arm: Box<dyn FnMut() -> SignalFuture>,
    signal: SignalFuture,
}

impl Interrupt {
    /// Listen for Ctrl+C.
    pub fn ctrl_c() -> Self {
        Self::with_source(|| -> SignalFuture { Box::pin(tokio::signal::ctrl_c()) })
    }

    /// Listen on any re-armable signal source.
    pub fn with_source(mut arm: impl FnMut() -> SignalFuture + 'static) -> Self {
        let signal = arm();
        Self {
            arm: Box::new(arm),
            signal,
        }
    }

    /// Resolves on the next signal, then re-arms.  Cancel-safe.
    pub async fn wait(&mut self) -> io::Result<()> {
        (&mut self.signal).await?;
        self.signal = (self.arm)();
        Ok(())
    }
}
