//! Unsigned LEB128 varints.
//!
//! Every integer field of a varsig envelope uses this encoding: seven bits
//! per byte, least significant group first, with the high bit set on every
//! byte except the last. A `u64` occupies between 1 and [`MAX_LEN`] bytes.
//!
//! Decoding accepts non-minimal encodings (e.g. `[0x80, 0x00]` for zero) so
//! long as they fit in [`MAX_LEN`] bytes and do not overflow a `u64`.

use thiserror::Error;

/// Maximum number of bytes a `u64` varint can occupy.
pub const MAX_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const PAYLOAD_MASK: u8 = 0x7f;

/// Append the varint encoding of `value` to `out`.
///
/// Returns the number of bytes written.
pub fn encode(mut value: u64, out: &mut Vec<u8>) -> usize {
    let start = out.len();
    loop {
        let byte = (value & u64::from(PAYLOAD_MASK)) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return out.len() - start;
        }
        out.push(byte | CONTINUATION);
    }
}

/// Encode `value` into a fresh buffer.
#[must_use]
pub fn to_vec(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(value));
    encode(value, &mut out);
    out
}

/// Number of bytes [`encode`] writes for `value`.
#[must_use]
pub const fn encoded_len(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

/// Decode a varint starting at `offset` in `buf`.
///
/// Returns the value and the number of bytes consumed.
///
/// # Errors
///
/// Returns [`MalformedVarint`] if `offset` is past the end of `buf`, if the
/// buffer ends before a terminating byte, or if the encoding does not fit
/// in a `u64`.
pub fn decode(buf: &[u8], offset: usize) -> Result<(u64, usize), MalformedVarint> {
    let Some(tail) = buf.get(offset..).filter(|tail| !tail.is_empty()) else {
        return Err(MalformedVarint {
            offset,
            fault: VarintFault::OffsetOutOfBounds,
        });
    };

    // Fast path: tags such as 0xed fit in a single byte.
    let first = tail[0];
    if first & CONTINUATION == 0 {
        return Ok((u64::from(first), 1));
    }

    let mut value = 0u64;
    for (i, &byte) in tail.iter().enumerate().take(MAX_LEN) {
        let group = u64::from(byte & PAYLOAD_MASK);
        let shift = 7 * i as u32;

        // The tenth byte may only carry the single remaining bit.
        if i == MAX_LEN - 1 && group > 1 {
            return Err(MalformedVarint {
                offset,
                fault: VarintFault::Overflow,
            });
        }

        value |= group << shift;
        if byte & CONTINUATION == 0 {
            return Ok((value, i + 1));
        }
    }

    let fault = if tail.len() >= MAX_LEN {
        VarintFault::Overflow
    } else {
        VarintFault::Truncated
    };
    Err(MalformedVarint { offset, fault })
}

/// A varint could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("malformed varint at offset {offset}: {fault}")]
pub struct MalformedVarint {
    /// Offset of the first byte of the varint.
    pub offset: usize,

    /// What went wrong.
    pub fault: VarintFault,
}

/// The ways a varint can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VarintFault {
    /// The starting offset is at or past the end of the buffer.
    #[error("offset is past the end of the buffer")]
    OffsetOutOfBounds,

    /// The buffer ended while the continuation bit was still set.
    #[error("buffer ends before the terminating byte")]
    Truncated,

    /// The encoding is longer than a `u64` allows.
    #[error("value overflows u64")]
    Overflow,
}
