//! Byte-stream pattern scanning.
//!
//! The waiter consumes bytes one at a time until a literal pattern matches.
//! Matching is naive and restarting: on a mismatch the offset resets to zero
//! and the mismatched byte is consumed without being re-examined. That is
//! only correct for patterns without self-overlapping structure, which holds
//! for every pattern this crate uses; do not reuse this for arbitrary input.

use crate::network::error::Error;
use crate::network::{close_transport, Delay, PollOptions, Poller, Transport};

/// Matches any single byte in a wait pattern.
pub(crate) const WILDCARD: u8 = b'*';

/// Consume bytes until `pattern` is matched as a contiguous subsequence.
///
/// An empty pattern succeeds immediately without consuming anything. While
/// the transport is silent the waiter sleeps `poll.delay_ms` between polls,
/// re-checking the connection first; if the transport drops before a match
/// completes, it is flushed and stopped and `Disconnected` is returned.
pub(crate) fn wait_for<T, D>(
    transport: &mut T,
    delay: &mut D,
    poll: &PollOptions,
    pattern: &[u8],
) -> Result<(), Error>
where
    T: Transport,
    D: Delay,
{
    if pattern.is_empty() {
        return Ok(());
    }

    let mut offset = 0;
    let mut poller = Poller::new();
    loop {
        while transport.available() > 0 {
            let Some(byte) = transport.read_byte() else {
                break;
            };
            if pattern[offset] == WILDCARD || byte == pattern[offset] {
                offset += 1;
                if offset == pattern.len() {
                    return Ok(());
                }
            } else {
                // Restart; the mismatched byte is not re-examined.
                offset = 0;
            }
        }

        if !transport.connected() {
            close_transport(transport);
            return Err(Error::Disconnected);
        }

        poller.wait(delay, poll)?;
    }
}
