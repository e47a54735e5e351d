use criterion::Criterion;
use libm2x::network::protocol::m2x::{encode, Client, Config};
use libm2x::network::{Delay, Transport};

struct NoDelay;

impl Delay for NoDelay {
    fn delay_ms(&mut self, _ms: u32) {}
}

/// An in-memory transport serving a prepared response in one go.
struct MemTransport {
    data: Vec<u8>,
    pos: usize,
}

impl MemTransport {
    fn new(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }
}

impl Transport for MemTransport {
    type Error = ();

    fn connect(&mut self, _host: &str, _port: u16) -> Result<(), ()> {
        Ok(())
    }

    fn available(&mut self) -> usize {
        self.data.len() - self.pos
    }

    fn read_byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, ()> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }

    fn connected(&self) -> bool {
        self.pos < self.data.len()
    }

    fn stop(&mut self) {}
}

fn response_with_records(count: usize) -> Vec<u8> {
    let mut body = String::from("[");
    for index in 0..count {
        if index > 0 {
            body.push(',');
        }
        body.push_str(r#"{"at":"2023-01-01T00:00:00Z","value":"12.5"}"#);
    }
    body.push(']');
    format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    )
    .into_bytes()
}

pub fn bench_percent_encode(c: &mut Criterion) {
    c.bench_function("percent_encode", |b| {
        b.iter(|| {
            let mut out: heapless::String<256> = heapless::String::new();
            encode::encode_to(&mut out, "devices/weather station 1/temperature").unwrap();
            out
        })
    });
}

pub fn bench_read_stream_values(c: &mut Criterion) {
    let response = response_with_records(100);
    c.bench_function("read_stream_values_100", |b| {
        b.iter(|| {
            let mut transport = MemTransport::new(response.clone());
            let mut client = Client::new(&mut transport, NoDelay, Config::new("key"));
            let mut count = 0usize;
            client
                .read_stream_values(|_at, _value, _index| count += 1)
                .unwrap();
            count
        })
    });
}
