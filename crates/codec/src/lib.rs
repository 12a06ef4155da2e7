//! # Codec
//!
//! Little-endian primitive encoding/decoding shared by the `wal` and
//! `sstable` crates, plus the handful of composite record types
//! (`KeyUpdate`, `IndexEntry`, `KeyRange`, `SliceHandle`) that are framed
//! bit-exactly the same way wherever they appear on disk.
//!
//! ## Primitives
//!
//! - Fixed width: `u8`, `u16`, `u32`, `u64`, all little-endian.
//! - `Array16`: a `u16` length prefix followed by that many raw bytes.
//! - `VarInt`: protocol-buffers base-128 varint, 7 data bits per byte, the
//!   high bit set on every byte but the last.
//!
//! Decoding past the end of the buffer is a [`CodecError::UnexpectedEof`] —
//! corrupt or truncated input, not a recoverable condition. The decoder
//! never panics; the encoder never fails (writes to a growable `Vec`).

mod decoder;
mod encoder;
mod types;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use types::{IndexEntry, Key, KeyRange, KeyUpdate, SliceHandle, Update, Value};

use thiserror::Error;

/// The tombstone sentinel for `KeyUpdate`'s value-length field. A value can
/// never legitimately have this length since values are capped below it.
pub const TOMBSTONE_LEN: u16 = 0xFFFF;

/// Values must be strictly shorter than the tombstone sentinel length.
pub const MAX_VALUE_LEN: usize = TOMBSTONE_LEN as usize - 1;

/// Errors raised while decoding a byte buffer.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The buffer ran out of bytes before the value being decoded was complete.
    #[error("unexpected end of buffer while decoding")]
    UnexpectedEof,

    /// A value was too large to encode with the length-prefixed scheme used
    /// (e.g. a byte array of length `>= 2^16`, or a value whose length
    /// collides with the tombstone sentinel).
    #[error("value too large to encode: {0}")]
    TooLarge(usize),
}

#[cfg(test)]
mod tests;
