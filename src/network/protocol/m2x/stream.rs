//! Streaming extraction of `{timestamp, value}` records from a response
//! body.
//!
//! The body is read in small chunks, bounded by `Content-Length`, and fed to
//! an incremental JSON tokenizer. Field capture keeps one fixed-capacity
//! buffer per field; tokens longer than the capacity are silently truncated.
//! Memory stays bounded regardless of response or field size.

use core::fmt::Write as _;

use heapless::{String, Vec};
use jsonmodem::{ParseEvent, ParserOptions, PathComponent, StreamingParser};

use crate::network::error::Error;
use crate::network::{Delay, PollOptions, Poller, Transport};

/// Bytes pulled from the transport per tokenizer round.
const READ_CHUNK: usize = 32;

/// Longest UTF-8 tail that can be left dangling by a chunk boundary.
const CARRY_MAX: usize = 4;

const FEED_BUF: usize = READ_CHUNK + CARRY_MAX;

/// Read exactly `length` body bytes and emit one callback per completed
/// record.
///
/// The transport must already be positioned at the first body byte. A
/// transport that drops with the byte budget unmet yields `NoConnection`;
/// a body the tokenizer rejects, or one that ends mid-document, yields
/// `InvalidJson`. Chunk boundaries never affect the callback sequence.
pub(crate) fn read_values<T, D, F, const CAP: usize>(
    transport: &mut T,
    delay: &mut D,
    poll: &PollOptions,
    length: usize,
    mut handler: F,
) -> Result<(), Error>
where
    T: Transport,
    D: Delay,
    F: FnMut(&str, &str, usize),
{
    let mut parser = StreamingParser::new(ParserOptions {
        emit_completed_strings: true,
        ..ParserOptions::default()
    });
    let mut records = RecordAssembler::<CAP>::new();
    let mut carry: Vec<u8, CARRY_MAX> = Vec::new();
    let mut consumed = 0;
    let mut poller = Poller::new();

    while consumed < length {
        let mut chunk = [0u8; READ_CHUNK];
        let mut filled = 0;
        while filled < READ_CHUNK && consumed + filled < length && transport.available() > 0 {
            match transport.read_byte() {
                Some(byte) => {
                    chunk[filled] = byte;
                    filled += 1;
                }
                None => break,
            }
        }

        if !transport.connected() && transport.available() == 0 && consumed + filled < length {
            return Err(Error::NoConnection);
        }

        if filled == 0 {
            poller.wait(delay, poll)?;
            continue;
        }

        feed(&mut parser, &mut carry, &chunk[..filled])?;
        for event in parser.by_ref() {
            let event = event.map_err(|_| Error::InvalidJson)?;
            records.on_event(&event, &mut handler);
        }
        consumed += filled;
    }

    if !carry.is_empty() {
        // Body ended inside a multi-byte character.
        return Err(Error::InvalidJson);
    }
    for event in parser.finish() {
        let event = event.map_err(|_| Error::InvalidJson)?;
        records.on_event(&event, &mut handler);
    }
    Ok(())
}

/// Hand a chunk to the tokenizer, re-joining UTF-8 sequences split across
/// chunk boundaries.
fn feed(
    parser: &mut StreamingParser,
    carry: &mut Vec<u8, CARRY_MAX>,
    chunk: &[u8],
) -> Result<(), Error> {
    let mut input: Vec<u8, FEED_BUF> = Vec::new();
    input
        .extend_from_slice(carry)
        .map_err(|_| Error::NotReachable)?;
    input
        .extend_from_slice(chunk)
        .map_err(|_| Error::NotReachable)?;
    carry.clear();

    match core::str::from_utf8(&input) {
        Ok(text) => parser.feed(text),
        Err(err) if err.error_len().is_none() => {
            // An incomplete sequence at the chunk boundary; hold its bytes
            // back for the next round.
            let valid = err.valid_up_to();
            let text = core::str::from_utf8(&input[..valid]).map_err(|_| Error::NotReachable)?;
            parser.feed(text);
            carry
                .extend_from_slice(&input[valid..])
                .map_err(|_| Error::NotReachable)?;
        }
        Err(_) => return Err(Error::InvalidJson),
    }
    Ok(())
}

/// Assembles `{timestamp, value}` pairs from scalar tokenizer events.
///
/// A scalar fills the timestamp slot when its key begins with `at`, and the
/// value slot when its key begins with `value` and is not `values` (the
/// surrounding array key). The first capture per slot wins; the callback
/// fires as soon as both slots are filled, after which both reset.
struct RecordAssembler<const CAP: usize> {
    at: Option<String<CAP>>,
    value: Option<String<CAP>>,
    index: usize,
}

impl<const CAP: usize> RecordAssembler<CAP> {
    fn new() -> Self {
        Self {
            at: None,
            value: None,
            index: 0,
        }
    }

    fn on_event<F>(&mut self, event: &ParseEvent, handler: &mut F)
    where
        F: FnMut(&str, &str, usize),
    {
        match event {
            ParseEvent::String {
                path,
                value: Some(text),
                ..
            } => self.capture(path, text, handler),
            ParseEvent::Number { path, value } => {
                let mut text: String<32> = String::new();
                let _ = write!(text, "{}", value);
                self.capture(path, &text, handler);
            }
            _ => {}
        }
    }

    fn capture<F>(&mut self, path: &[PathComponent], text: &str, handler: &mut F)
    where
        F: FnMut(&str, &str, usize),
    {
        let Some(PathComponent::Key(key)) = path.last() else {
            return;
        };
        let key = key.as_bytes();
        if key.starts_with(b"at") {
            if self.at.is_none() {
                self.at = Some(truncate_to(text));
            }
        } else if key.starts_with(b"value") && key.get(5) != Some(&b's') {
            if self.value.is_none() {
                self.value = Some(truncate_to(text));
            }
        } else {
            return;
        }

        if let (Some(at), Some(value)) = (&self.at, &self.value) {
            handler(at.as_str(), value.as_str(), self.index);
            self.index += 1;
            self.at = None;
            self.value = None;
        }
    }
}

/// Copy at most `CAP` bytes of `text`, never splitting a character.
fn truncate_to<const CAP: usize>(text: &str) -> String<CAP> {
    let mut out = String::new();
    let mut end = text.len().min(CAP);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let _ = out.push_str(&text[..end]);
    out
}
