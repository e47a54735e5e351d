//! M2X feed/stream protocol implementation for embedded systems.
//!
//! This module provides a lightweight client for the AT&T M2X time-series
//! API, designed for `no_std` environments and resource-constrained devices.
//! It speaks a small HTTP/1.0 subset, just enough to publish a stream value
//! and to read a stream's values back, and never buffers a full response.
//!
//! # Protocol Overview
//!
//! M2X organizes data as *feeds*, each containing named *streams* of
//! timestamped values. The client issues one request per operation:
//!
//! - **Publish**: `PUT /v1/feeds/{feed}/streams/{stream}` with a
//!   form-encoded `value=` body
//! - **Read**: `GET /v1/feeds/{feed}/streams/{stream}/values`, whose
//!   response body is a JSON array of `{"at": ..., "value": ...}` records
//!
//! Responses are parsed as they arrive, byte by byte: the status line and
//! `Content-Length` header are located by scanning, the remaining headers
//! are skipped, and the body is tokenized incrementally in small chunks.
//! Each completed record is handed to a caller-supplied callback with
//! fixed-capacity, truncation-safe buffers.
//!
//! # Key Features
//!
//! - Bounded memory regardless of response or field size
//! - Connection agnostic (works with any [`Transport`](crate::network::Transport))
//! - Cooperative polling with a configurable delay and optional wait bound
//! - Percent-encoding of feed ids, stream names, and text values
//!
//! # Usage
//!
//! The main entry point is the [`client::Client`], constructed from a
//! borrowed transport, a [`Delay`](crate::network::Delay) provider, and a
//! [`client::Config`].
//!
//! ```rust,no_run
//! use libm2x::network::protocol::m2x::{Client, Config};
//! # struct MockTransport;
//! # impl libm2x::network::Transport for MockTransport {
//! #     type Error = ();
//! #     fn connect(&mut self, _host: &str, _port: u16) -> Result<(), ()> { Ok(()) }
//! #     fn available(&mut self) -> usize { 0 }
//! #     fn read_byte(&mut self) -> Option<u8> { None }
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, ()> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), ()> { Ok(()) }
//! #     fn connected(&self) -> bool { false }
//! #     fn stop(&mut self) {}
//! # }
//! # struct NoDelay;
//! # impl libm2x::network::Delay for NoDelay {
//! #     fn delay_ms(&mut self, _ms: u32) {}
//! # }
//!
//! let mut transport = MockTransport;
//! let mut client = Client::new(&mut transport, NoDelay, Config::new("<M2X-API-KEY>"));
//!
//! // let status = client.receive("my-feed", "temperature")?;
//! // if status == 200 {
//! //     client.read_stream_values(|at, value, index| {
//! //         // record `index` of the stream, oldest first
//! //     })?;
//! // }
//! // client.close();
//! ```

/// M2X client implementation and supporting types.
///
/// Contains the main [`Client`](client::Client) struct and all related types
/// for publishing stream values and reading them back.
pub mod client;

/// Percent-encoding of path segments and form values.
pub mod encode;

mod pattern;
mod stream;

pub use self::client::{
    Client, Config, StreamValue, DEFAULT_FIELD_CAPACITY, DEFAULT_HOST, DEFAULT_PORT,
};
