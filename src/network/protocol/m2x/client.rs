//! M2X client implementation.
//!
//! The client borrows a [`Transport`] for its whole lifetime and drives one
//! request/response cycle at a time: publish a value and read the status
//! code back, or request a stream's values and extract the records from the
//! response body as they arrive. Callers sequence the read side explicitly
//! (status code, then content length, then header skip, then body) or use
//! [`Client::read_stream_values`], which performs the last three in order.

use core::fmt;

use heapless::String;

use crate::network::error::Error;
use crate::network::{close_transport, Delay, PollOptions, Poller, Transport};

use super::{encode, pattern, stream};

/// Default M2X API host.
pub const DEFAULT_HOST: &str = "api-m2x.att.com";

/// Default M2X API port.
pub const DEFAULT_PORT: u16 = 80;

/// Default capacity, in bytes, of the captured timestamp and value fields.
///
/// Tokens longer than the capacity are silently truncated; see
/// [`Client::read_stream_values_with_capacity`] to choose another bound.
pub const DEFAULT_FIELD_CAPACITY: usize = 20;

const REQUEST_BUF_LEN: usize = 512;
const BODY_BUF_LEN: usize = 128;

/// A value to publish to a stream.
///
/// Covers the value shapes the M2X API accepts on the `PUT` path. Numeric
/// values are written in their decimal form; text is percent-encoded.
///
/// # Examples
///
/// ```rust
/// use libm2x::network::protocol::m2x::StreamValue;
///
/// let reading = StreamValue::Number(23.5);
/// let label = StreamValue::Text("door open");
/// # let _ = (reading, label);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreamValue<'a> {
    /// An integer reading.
    Integer(i64),
    /// A floating point reading.
    Number(f64),
    /// Free-form text, percent-encoded on the wire.
    Text(&'a str),
}

/// Configuration for an M2X client.
///
/// Created once and held for the client's lifetime. The defaults target the
/// public M2X API over plain HTTP; `poll` controls how the client waits on a
/// silent transport.
///
/// # Examples
///
/// ```rust
/// use libm2x::network::PollOptions;
/// use libm2x::network::protocol::m2x::Config;
///
/// let mut config = Config::new("<M2X-API-KEY>");
/// config.poll = PollOptions {
///     delay_ms: 100,
///     max_wait_ms: Some(30_000),
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Config<'a> {
    /// The M2X API key sent as `X-M2X-KEY` on every request.
    pub key: &'a str,
    /// API host; defaults to [`DEFAULT_HOST`].
    pub host: &'a str,
    /// API port; the `Host` header carries a `:port` suffix only when this
    /// differs from [`DEFAULT_PORT`].
    pub port: u16,
    /// Polling behavior while the transport is connected but silent.
    pub poll: PollOptions,
}

impl<'a> Config<'a> {
    /// A configuration for the public M2X API with default polling.
    pub fn new(key: &'a str) -> Self {
        Self {
            key,
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            poll: PollOptions::default(),
        }
    }
}

/// An M2X feed/stream client.
///
/// The client holds exclusive use of its transport for the whole
/// request/response cycle; only one operation is in flight at a time, and
/// waits block the caller by polling. Without a configured
/// [`PollOptions::max_wait_ms`] a read can block indefinitely while the
/// transport stays connected but silent.
///
/// # Examples
///
/// ```rust,no_run
/// use libm2x::network::protocol::m2x::{Client, Config, StreamValue};
/// # struct MockTransport;
/// # impl libm2x::network::Transport for MockTransport {
/// #     type Error = ();
/// #     fn connect(&mut self, _host: &str, _port: u16) -> Result<(), ()> { Ok(()) }
/// #     fn available(&mut self) -> usize { 0 }
/// #     fn read_byte(&mut self) -> Option<u8> { None }
/// #     fn write(&mut self, buf: &[u8]) -> Result<usize, ()> { Ok(buf.len()) }
/// #     fn flush(&mut self) -> Result<(), ()> { Ok(()) }
/// #     fn connected(&self) -> bool { false }
/// #     fn stop(&mut self) {}
/// # }
/// # struct NoDelay;
/// # impl libm2x::network::Delay for NoDelay {
/// #     fn delay_ms(&mut self, _ms: u32) {}
/// # }
///
/// let mut transport = MockTransport;
/// let mut client = Client::new(&mut transport, NoDelay, Config::new("<M2X-API-KEY>"));
///
/// // let status = client.send("my-feed", "temperature", StreamValue::Number(23.5))?;
/// // let status = client.receive("my-feed", "temperature")?;
/// // client.read_stream_values(|at, value, index| { /* ... */ })?;
/// // client.close();
/// ```
pub struct Client<'a, T: Transport, D: Delay> {
    transport: &'a mut T,
    delay: D,
    config: Config<'a>,
}

impl<'a, T: Transport, D: Delay> Client<'a, T, D> {
    /// Create a client over a borrowed transport.
    pub fn new(transport: &'a mut T, delay: D, config: Config<'a>) -> Self {
        Self {
            transport,
            delay,
            config,
        }
    }

    /// Publish a single value to a stream.
    ///
    /// Connects, issues `PUT /v1/feeds/{feed_id}/streams/{stream_name}` with
    /// a form-encoded `value=` body, and returns the HTTP status code from
    /// the response. Feed id, stream name, and text values are
    /// percent-encoded on the wire.
    pub fn send(
        &mut self,
        feed_id: &str,
        stream_name: &str,
        value: StreamValue<'_>,
    ) -> Result<u16, Error> {
        self.transport
            .connect(self.config.host, self.config.port)
            .map_err(|_| Error::NoConnection)?;

        let mut body: String<BODY_BUF_LEN> = String::new();
        write_value_body(&mut body, &value).map_err(|_| Error::WriteError)?;

        let mut request: String<REQUEST_BUF_LEN> = String::new();
        write_put_request(&mut request, &self.config, feed_id, stream_name, &body)
            .map_err(|_| Error::WriteError)?;

        self.transport
            .write(request.as_bytes())
            .map_err(|_| Error::WriteError)?;
        self.transport.flush().map_err(|_| Error::WriteError)?;

        self.read_status_code()
    }

    /// Request a stream's values.
    ///
    /// Connects, issues `GET /v1/feeds/{feed_id}/streams/{stream_name}/values`,
    /// and returns the HTTP status code. On success, follow up with
    /// [`Client::read_stream_values`] to extract the records from the body.
    pub fn receive(&mut self, feed_id: &str, stream_name: &str) -> Result<u16, Error> {
        self.transport
            .connect(self.config.host, self.config.port)
            .map_err(|_| Error::NoConnection)?;

        let mut request: String<REQUEST_BUF_LEN> = String::new();
        write_get_request(&mut request, &self.config, feed_id, stream_name)
            .map_err(|_| Error::WriteError)?;

        self.transport
            .write(request.as_bytes())
            .map_err(|_| Error::WriteError)?;
        self.transport.flush().map_err(|_| Error::WriteError)?;

        self.read_status_code()
    }

    /// Read the 3-digit status code from a response's status line.
    ///
    /// Scans for `HTTP/x.x ` (any version digits), then accumulates the
    /// next three bytes as decimal digits. The bytes are not validated as
    /// digits; a malformed status line corrupts the result silently.
    pub fn read_status_code(&mut self) -> Result<u16, Error> {
        pattern::wait_for(
            self.transport,
            &mut self.delay,
            &self.config.poll,
            b"HTTP/*.* ",
        )?;

        let mut code: u16 = 0;
        let mut digits = 0;
        let mut poller = Poller::new();
        loop {
            while self.transport.available() > 0 {
                let Some(byte) = self.transport.read_byte() else {
                    break;
                };
                code = code
                    .wrapping_mul(10)
                    .wrapping_add(u16::from(byte.wrapping_sub(b'0')));
                digits += 1;
                if digits == 3 {
                    return Ok(code);
                }
            }

            if !self.transport.connected() {
                return Err(Error::Disconnected);
            }

            poller.wait(&mut self.delay, &self.config.poll)?;
        }
    }

    /// Read the value of the `Content-Length` header.
    ///
    /// Scans for the header name, then accumulates decimal digits until a
    /// CR or LF. An accumulated value of zero, whether the header value was
    /// empty or a literal `0`, returns [`Error::Invalid`]; the two cases are
    /// indistinguishable here.
    pub fn read_content_length(&mut self) -> Result<usize, Error> {
        pattern::wait_for(
            self.transport,
            &mut self.delay,
            &self.config.poll,
            b"Content-Length: ",
        )?;

        let mut value: usize = 0;
        let mut poller = Poller::new();
        loop {
            while self.transport.available() > 0 {
                let Some(byte) = self.transport.read_byte() else {
                    break;
                };
                if byte == b'\r' || byte == b'\n' {
                    return if value == 0 { Err(Error::Invalid) } else { Ok(value) };
                }
                value = value
                    .wrapping_mul(10)
                    .wrapping_add(usize::from(byte.wrapping_sub(b'0')));
            }

            if !self.transport.connected() {
                return Err(Error::Disconnected);
            }

            poller.wait(&mut self.delay, &self.config.poll)?;
        }
    }

    /// Skip the remaining response headers.
    ///
    /// Positions the transport's read cursor at the first body byte by
    /// scanning for the blank-line terminator.
    pub fn skip_http_header(&mut self) -> Result<(), Error> {
        pattern::wait_for(
            self.transport,
            &mut self.delay,
            &self.config.poll,
            b"\r\n\r\n",
        )
    }

    /// Extract `{timestamp, value}` records from a response body.
    ///
    /// Reads the content length, skips the remaining headers, then consumes
    /// exactly that many body bytes, invoking `handler` once per completed
    /// record with the timestamp, the value, and a record index starting at
    /// zero. Fields longer than [`DEFAULT_FIELD_CAPACITY`] bytes are
    /// silently truncated.
    pub fn read_stream_values<F>(&mut self, handler: F) -> Result<(), Error>
    where
        F: FnMut(&str, &str, usize),
    {
        self.read_stream_values_with_capacity::<DEFAULT_FIELD_CAPACITY, F>(handler)
    }

    /// Like [`Client::read_stream_values`], with a caller-chosen field
    /// capacity.
    pub fn read_stream_values_with_capacity<const CAP: usize, F>(
        &mut self,
        handler: F,
    ) -> Result<(), Error>
    where
        F: FnMut(&str, &str, usize),
    {
        let length = self.read_content_length()?;
        self.skip_http_header()?;
        stream::read_values::<T, D, F, CAP>(
            self.transport,
            &mut self.delay,
            &self.config.poll,
            length,
            handler,
        )
    }

    /// Drain whatever the transport still buffers, then stop it.
    pub fn close(&mut self) {
        close_transport(self.transport);
    }
}

fn write_value_body(out: &mut impl fmt::Write, value: &StreamValue<'_>) -> fmt::Result {
    out.write_str("value=")?;
    match value {
        StreamValue::Integer(v) => write!(out, "{}", v),
        StreamValue::Number(v) => write!(out, "{}", v),
        StreamValue::Text(v) => encode::encode_to(out, v),
    }
}

fn write_request_line(
    out: &mut impl fmt::Write,
    method: &str,
    feed_id: &str,
    stream_name: &str,
    suffix: &str,
) -> fmt::Result {
    out.write_str(method)?;
    out.write_str(" /v1/feeds/")?;
    encode::encode_to(out, feed_id)?;
    out.write_str("/streams/")?;
    encode::encode_to(out, stream_name)?;
    out.write_str(suffix)?;
    out.write_str(" HTTP/1.0\r\n")
}

fn write_common_headers(out: &mut impl fmt::Write, config: &Config<'_>) -> fmt::Result {
    write!(out, "X-M2X-KEY: {}\r\n", config.key)?;
    out.write_str("Host: ")?;
    encode::encode_to(out, config.host)?;
    if config.port != DEFAULT_PORT {
        write!(out, ":{}", config.port)?;
    }
    out.write_str("\r\n")
}

fn write_put_request(
    out: &mut impl fmt::Write,
    config: &Config<'_>,
    feed_id: &str,
    stream_name: &str,
    body: &str,
) -> fmt::Result {
    write_request_line(out, "PUT", feed_id, stream_name, "")?;
    write_common_headers(out, config)?;
    write!(out, "Content-Length: {}\r\n", body.len())?;
    out.write_str("Content-Type: application/x-www-form-urlencoded\r\n\r\n")?;
    out.write_str(body)
}

fn write_get_request(
    out: &mut impl fmt::Write,
    config: &Config<'_>,
    feed_id: &str,
    stream_name: &str,
) -> fmt::Result {
    write_request_line(out, "GET", feed_id, stream_name, "/values")?;
    write_common_headers(out, config)?;
    out.write_str("\r\n")
}
