use crate::{CodecError, Decoder, Encoder, MAX_VALUE_LEN, TOMBSTONE_LEN};

/// A lookup key: a 64-bit unsigned integer, totally ordered by numeric value.
pub type Key = u64;

/// An opaque value. Must be strictly shorter than [`crate::TOMBSTONE_LEN`]
/// bytes; the sentinel length is reserved to encode a tombstone.
pub type Value = Vec<u8>;

/// The two things a write can do to a key: install a value, or record a
/// tombstone (delete marker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// A live value.
    Put(Value),
    /// A tombstone, shadowing any older value for the same key.
    Delete,
}

impl Update {
    /// Returns the value if this is a `Put`, `None` for a `Delete`.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Update::Put(v) => Some(v),
            Update::Delete => None,
        }
    }

    /// `true` for `Put`, `false` for `Delete`.
    pub fn is_put(&self) -> bool {
        matches!(self, Update::Put(_))
    }
}

/// A single key mutation: the unit of both log records and table entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyUpdate {
    pub key: Key,
    pub update: Update,
}

impl KeyUpdate {
    pub fn put(key: Key, value: Value) -> Self {
        Self {
            key,
            update: Update::Put(value),
        }
    }

    pub fn delete(key: Key) -> Self {
        Self {
            key,
            update: Update::Delete,
        }
    }

    /// Encodes as `u64 key` then `u16 len` (`0xFFFF` for a tombstone,
    /// otherwise `len` raw value bytes).
    pub fn encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.u64(self.key);
        match &self.update {
            Update::Put(v) => {
                if v.len() > MAX_VALUE_LEN {
                    return Err(CodecError::TooLarge(v.len()));
                }
                enc.array16(v)
            }
            Update::Delete => {
                enc.u16(TOMBSTONE_LEN);
                Ok(())
            }
        }
    }

    pub fn decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let key = dec.u64()?;
        let len = dec.u16()?;
        if len == TOMBSTONE_LEN {
            return Ok(Self::delete(key));
        }
        let value = dec.bytes(len as usize)?.to_vec();
        Ok(Self::put(key, value))
    }
}

/// An inclusive range of keys, `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRange {
    pub min: Key,
    pub max: Key,
}

impl KeyRange {
    pub fn new(min: Key, max: Key) -> Self {
        Self { min, max }
    }

    pub fn singleton(k: Key) -> Self {
        Self { min: k, max: k }
    }

    pub fn contains(&self, k: Key) -> bool {
        self.min <= k && k <= self.max
    }

    /// Encodes as `varint min` then `varint max`.
    pub fn encode(&self, enc: &mut Encoder) {
        enc.varint(self.min);
        enc.varint(self.max);
    }

    pub fn decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let min = dec.varint()?;
        let max = dec.varint()?;
        Ok(Self { min, max })
    }
}

/// A `(offset, length)` pointer into a table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceHandle {
    pub offset: u64,
    pub length: u32,
}

impl SliceHandle {
    pub fn new(offset: u64, length: u32) -> Self {
        Self { offset, length }
    }

    pub fn is_valid(&self) -> bool {
        self.length > 0
    }

    /// Encodes as used inside a table's index section: `varint offset`
    /// then `varint length`.
    pub fn encode_varint(&self, enc: &mut Encoder) {
        enc.varint(self.offset);
        enc.varint(u64::from(self.length));
    }

    pub fn decode_varint(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let offset = dec.varint()?;
        let length = dec.varint()? as u32;
        Ok(Self { offset, length })
    }

    /// Encodes as the trailing fixed-offset pointer at the end of a table
    /// file: `u64 offset` then `u32 length`.
    pub fn encode_fixed(&self, enc: &mut Encoder) {
        enc.u64(self.offset);
        enc.u32(self.length);
    }

    pub fn decode_fixed(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let offset = dec.u64()?;
        let length = dec.u32()?;
        Ok(Self { offset, length })
    }
}

/// One entry in a table's block index: where a block lives and which keys
/// it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub handle: SliceHandle,
    pub keys: KeyRange,
}

impl IndexEntry {
    pub fn new(handle: SliceHandle, keys: KeyRange) -> Self {
        Self { handle, keys }
    }

    /// Encodes as `SliceHandle` (varint form) then `KeyRange`.
    pub fn encode(&self, enc: &mut Encoder) {
        self.handle.encode_varint(enc);
        self.keys.encode(enc);
    }

    pub fn decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let handle = SliceHandle::decode_varint(dec)?;
        let keys = KeyRange::decode(dec)?;
        Ok(Self { handle, keys })
    }
}
