use libm2x::network::error::Error;
use libm2x::network::protocol::m2x::{Client, Config, StreamValue};
use libm2x::network::{PollOptions, Transport};

use crate::mock::{MockTransport, NoDelay};

fn new_client<'a>(transport: &'a mut MockTransport, key: &'a str) -> Client<'a, MockTransport, NoDelay> {
    Client::new(transport, NoDelay, Config::new(key))
}

#[test]
fn reads_status_code_from_status_line() {
    let mut transport = MockTransport::new(&b"HTTP/1.1 200 OK\r\nServer: nginx\r\n"[..]);
    let mut client = new_client(&mut transport, "key");
    assert_eq!(client.read_status_code(), Ok(200));
}

#[test]
fn status_line_version_digits_are_wildcards() {
    let mut transport = MockTransport::new(&b"HTTP/2.0 404 Not Found\r\n"[..]);
    let mut client = new_client(&mut transport, "key");
    assert_eq!(client.read_status_code(), Ok(404));
}

#[test]
fn status_code_survives_one_byte_bursts() {
    let mut transport = MockTransport::with_burst(&b"HTTP/1.1 503 Unavailable\r\n"[..], 1);
    let mut client = new_client(&mut transport, "key");
    assert_eq!(client.read_status_code(), Ok(503));
}

#[test]
fn disconnect_during_pattern_wait_closes_transport() {
    let mut transport = MockTransport::new(&b"HTTP"[..]);
    let mut client = new_client(&mut transport, "key");
    assert_eq!(client.read_status_code(), Err(Error::Disconnected));
    assert!(transport.stopped);
    assert!(transport.flushed);
}

#[test]
fn disconnect_during_digits_reports_disconnected() {
    // The pattern matched but the transport dropped before the third digit.
    let mut transport = MockTransport::new(&b"HTTP/1.1 20"[..]);
    let mut client = new_client(&mut transport, "key");
    assert_eq!(client.read_status_code(), Err(Error::Disconnected));
}

#[test]
fn reads_content_length() {
    let mut transport = MockTransport::new(&b"Content-Type: text/html\r\nContent-Length: 128\r\n"[..]);
    let mut client = new_client(&mut transport, "key");
    assert_eq!(client.read_content_length(), Ok(128));
}

#[test]
fn content_length_zero_is_invalid() {
    // A literal zero is indistinguishable from an empty value; both are
    // rejected. Documented behavior, kept on purpose.
    let mut transport = MockTransport::new(&b"Content-Length: 0\r\n"[..]);
    let mut client = new_client(&mut transport, "key");
    assert_eq!(client.read_content_length(), Err(Error::Invalid));
}

#[test]
fn content_length_empty_value_is_invalid() {
    let mut transport = MockTransport::new(&b"Content-Length: \r\n"[..]);
    let mut client = new_client(&mut transport, "key");
    assert_eq!(client.read_content_length(), Err(Error::Invalid));
}

#[test]
fn skip_http_header_stops_at_first_body_byte() {
    let mut transport =
        MockTransport::new(&b"HTTP/1.1 200 OK\r\nContent-Length: 4\r\n\r\nBODY"[..]);
    let mut client = new_client(&mut transport, "key");
    assert_eq!(client.read_status_code(), Ok(200));
    assert_eq!(client.skip_http_header(), Ok(()));
    assert_eq!(transport.read_byte(), Some(b'B'));
}

#[test]
fn receive_emits_get_request() {
    let mut transport = MockTransport::new(&b"HTTP/1.1 200 OK\r\n"[..]);
    let mut client = new_client(&mut transport, "secret-key");
    assert_eq!(client.receive("my feed", "temp/1"), Ok(200));
    assert_eq!(transport.connect_calls, vec![("api-m2x.att.com".to_string(), 80)]);
    assert_eq!(
        transport.written_data(),
        b"GET /v1/feeds/my%20feed/streams/temp%2F1/values HTTP/1.0\r\n\
          X-M2X-KEY: secret-key\r\n\
          Host: api-m2x.att.com\r\n\r\n"
            .as_slice()
    );
}

#[test]
fn send_emits_put_request_with_encoded_body() {
    let mut transport = MockTransport::new(&b"HTTP/1.1 202 Accepted\r\n"[..]);
    let mut client = new_client(&mut transport, "secret-key");
    assert_eq!(
        client.send("feed", "stream", StreamValue::Text("1.5 m")),
        Ok(202)
    );
    assert_eq!(
        transport.written_data(),
        b"PUT /v1/feeds/feed/streams/stream HTTP/1.0\r\n\
          X-M2X-KEY: secret-key\r\n\
          Host: api-m2x.att.com\r\n\
          Content-Length: 13\r\n\
          Content-Type: application/x-www-form-urlencoded\r\n\r\n\
          value=1.5%20m"
            .as_slice()
    );
}

#[test]
fn send_writes_numeric_values_in_decimal() {
    let mut transport = MockTransport::new(&b"HTTP/1.1 202 Accepted\r\n"[..]);
    let mut client = new_client(&mut transport, "key");
    assert_eq!(client.send("f", "s", StreamValue::Number(23.5)), Ok(202));
    let written = String::from_utf8(transport.writes.clone()).unwrap();
    assert!(written.ends_with("value=23.5"));

    let mut transport = MockTransport::new(&b"HTTP/1.1 202 Accepted\r\n"[..]);
    let mut client = new_client(&mut transport, "key");
    assert_eq!(client.send("f", "s", StreamValue::Integer(-40)), Ok(202));
    let written = String::from_utf8(transport.writes.clone()).unwrap();
    assert!(written.ends_with("value=-40"));
}

#[test]
fn host_header_carries_port_only_when_non_default() {
    let mut transport = MockTransport::new(&b"HTTP/1.1 200 OK\r\n"[..]);
    let mut config = Config::new("key");
    config.host = "staging.example.com";
    config.port = 8080;
    let mut client = Client::new(&mut transport, NoDelay, config);
    assert_eq!(client.receive("f", "s"), Ok(200));
    let written = String::from_utf8(transport.writes.clone()).unwrap();
    assert!(written.contains("Host: staging.example.com:8080\r\n"));
    assert_eq!(transport.connect_calls, vec![("staging.example.com".to_string(), 8080)]);
}

#[test]
fn refused_connect_reports_no_connection() {
    let mut transport = MockTransport::new(Vec::new());
    transport.refuse_connect = true;
    let mut client = new_client(&mut transport, "key");
    assert_eq!(client.receive("f", "s"), Err(Error::NoConnection));
    assert_eq!(
        client.send("f", "s", StreamValue::Integer(1)),
        Err(Error::NoConnection)
    );
}

#[test]
fn bounded_wait_times_out_on_silent_transport() {
    let mut transport = MockTransport::new(Vec::new());
    transport.stay_connected = true;
    let mut config = Config::new("key");
    config.poll = PollOptions {
        delay_ms: 10,
        max_wait_ms: Some(30),
    };
    let mut client = Client::new(&mut transport, NoDelay, config);
    assert_eq!(client.read_status_code(), Err(Error::Timeout));
}

#[test]
fn close_flushes_and_stops() {
    let mut transport = MockTransport::new(Vec::new());
    let mut client = new_client(&mut transport, "key");
    client.close();
    assert!(transport.flushed);
    assert!(transport.stopped);
}
