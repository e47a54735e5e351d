//! # libm2x - Rust M2X Client
//!
//! A Rust client library for the AT&T M2X IoT platform. It publishes stream
//! values and reads time-series data back without ever materializing a full
//! HTTP response in memory, which makes it suitable for embedded systems and
//! `no_std` environments.
//!
//! ## Features
//!
//! ### Streaming HTTP reads
//! - Status line and `Content-Length` parsing over a byte-oriented transport
//! - Incremental JSON tokenization of the response body in small chunks
//! - One callback per `{timestamp, value}` record, with fixed-capacity,
//!   truncation-safe field buffers
//!
//! ### Publishing
//! - `PUT`-based stream value updates with percent-encoded paths and bodies
//! - Integer, floating point, and free-form text values
//!
//! ### Transport abstraction
//! - Works over any byte source implementing the [`network::Transport`] trait
//! - Cooperative polling with a configurable delay and optional wait bound
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libm2x = "0.1.0"
//! ```
//!
//! ### Reading stream values
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
//! let config = Config::new("<M2X-API-KEY>");
//! let mut client = Client::new(&mut transport, NoDelay, config);
//!
//! // let status = client.receive("my-feed", "temperature")?;
//! // client.read_stream_values(|at, value, index| {
//! //     // one invocation per record, in stream order
//! // })?;
//! ```
//!
//! ### Publishing a value
//!
//! ```rust,no_run
//! use libm2x::network::protocol::m2x::{Client, Config, StreamValue};
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
//! let config = Config::new("<M2X-API-KEY>");
//! let mut client = Client::new(&mut transport, NoDelay, config);
//!
//! // let status = client.send("my-feed", "temperature", StreamValue::Number(23.5))?;
//! ```
//!
//! ## Platform support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Linux-based IoT devices (Raspberry Pi, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! The streaming JSON tokenizer allocates internally, so a global allocator
//! must be present. All buffers owned by this crate are fixed-capacity.
//!
//! ## Optional features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]
#![doc(html_root_url = "https://shishir-dey.github.io/libm2x/")]

/// Network abstraction layer providing the transport seam and the M2X
/// protocol client.
///
/// This module contains the byte-oriented transport trait the client polls,
/// the shared error type, and the M2X protocol implementation.
pub mod network;
