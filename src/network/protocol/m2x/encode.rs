//! Percent-encoding of path segments and form values.
//!
//! M2X feed ids, stream names, hostnames, and text values are emitted into
//! request lines and bodies percent-encoded. Only the RFC 3986 unreserved
//! characters (`A-Z a-z 0-9 - _ . ~`) pass through unchanged; every other
//! byte becomes `%` followed by two uppercase hexadecimal digits.

const HEX: &[u8; 16] = b"0123456789ABCDEF";

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~')
}

/// Write `input` percent-encoded into `out`.
///
/// Stateless and pure; the sink decides where the bytes go. Encoding an
/// input of only unreserved characters writes it unchanged.
///
/// # Examples
///
/// ```rust
/// use libm2x::network::protocol::m2x::encode::encode_to;
///
/// let mut out: heapless::String<32> = heapless::String::new();
/// encode_to(&mut out, "sensor 1/temp").unwrap();
/// assert_eq!(out.as_str(), "sensor%201%2Ftemp");
/// ```
pub fn encode_to<W: core::fmt::Write>(out: &mut W, input: &str) -> core::fmt::Result {
    encode_bytes_to(out, input.as_bytes())
}

/// Write `bytes` percent-encoded into `out`.
///
/// Like [`encode_to`], but operates on raw bytes; useful when the input is
/// not UTF-8 text.
pub fn encode_bytes_to<W: core::fmt::Write>(out: &mut W, bytes: &[u8]) -> core::fmt::Result {
    for &byte in bytes {
        if is_unreserved(byte) {
            out.write_char(byte as char)?;
        } else {
            out.write_char('%')?;
            out.write_char(HEX[usize::from(byte >> 4)] as char)?;
            out.write_char(HEX[usize::from(byte & 0x0f)] as char)?;
        }
    }
    Ok(())
}
