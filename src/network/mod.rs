//! A network abstraction layer for polling byte-oriented transports
//!
//! This module defines the seam between the M2X client and whatever carries
//! its bytes: a TCP socket, a cellular modem, a TLS session, or a scripted
//! mock in tests. The client never owns the transport; it borrows it for the
//! lifetime of a request/response cycle and drives it by polling.

#![allow(missing_docs)]
#![deny(unsafe_code)]

/// Common error types for network operations
pub mod error;

/// Protocol-specific client implementations
pub mod protocol;

use self::error::Error;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Delay, PollOptions, Transport};
}

/// A byte-oriented, possibly slow transport.
///
/// Implementations supply bytes one at a time with no guaranteed buffering.
/// `available` reports how many bytes can be read without blocking;
/// `read_byte` must only be expected to yield data after `available`
/// reported some. `connected` distinguishes a transport that is merely
/// silent from one that has dropped.
pub trait Transport {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Open a connection to `host:port`
    fn connect(&mut self, host: &str, port: u16) -> Result<(), Self::Error>;
    /// Number of bytes ready to read without blocking
    fn available(&mut self) -> usize;
    /// Read a single byte, if one is buffered
    fn read_byte(&mut self) -> Option<u8>;
    /// Write data to the connection
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush any data still buffered by the transport
    fn flush(&mut self) -> Result<(), Self::Error>;
    /// Whether the peer is still reachable
    fn connected(&self) -> bool;
    /// Tear the connection down
    fn stop(&mut self);
}

/// A blocking delay provider, used between polls of an idle transport.
pub trait Delay {
    /// Block the caller for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

/// A [`Delay`] backed by `std::thread::sleep`.
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl Delay for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

/// Polling behavior while a transport is connected but silent.
///
/// The defaults match the historical client behavior: poll every second and
/// wait indefinitely. Set `max_wait_ms` to bound the worst-case latency of
/// any single read operation; the bound is accounted in units of `delay_ms`,
/// not wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Delay between polls of an idle transport, in milliseconds.
    pub delay_ms: u32,
    /// Upper bound on the total idle wait, or `None` to wait forever.
    pub max_wait_ms: Option<u32>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            delay_ms: 1000,
            max_wait_ms: None,
        }
    }
}

/// Accounts idle time across the polls of one read operation.
pub(crate) struct Poller {
    waited_ms: u32,
}

impl Poller {
    pub(crate) fn new() -> Self {
        Self { waited_ms: 0 }
    }

    /// Sleep for one poll interval, or fail once the configured bound is
    /// exhausted.
    pub(crate) fn wait<D: Delay>(
        &mut self,
        delay: &mut D,
        options: &PollOptions,
    ) -> Result<(), Error> {
        if let Some(max_wait_ms) = options.max_wait_ms {
            if self.waited_ms >= max_wait_ms {
                return Err(Error::Timeout);
            }
        }
        delay.delay_ms(options.delay_ms);
        self.waited_ms = self.waited_ms.saturating_add(options.delay_ms);
        Ok(())
    }
}

/// Drain whatever the transport still buffers, then stop it.
pub(crate) fn close_transport<T: Transport>(transport: &mut T) {
    let _ = transport.flush();
    transport.stop();
}
