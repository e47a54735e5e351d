//! # Protocol Clients
//!
//! This module contains application-layer protocol implementations built on
//! the core [`Transport`](crate::network::Transport) trait. Each client is
//! connection agnostic, `no_std` compatible, and uses fixed-size buffers for
//! predictable memory usage.
//!
//! ## Available Protocols
//!
//! - **[`m2x`]**: AT&T M2X feed/stream client with bounded-memory streaming
//!   reads of time-series values

/// M2X feed/stream client implementation.
///
/// Publishes stream values over HTTP/1.0 and reads time-series data back
/// incrementally, one record at a time.
pub mod m2x;
