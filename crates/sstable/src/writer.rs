use codec::{Encoder, Key, KeyRange, KeyUpdate, SliceHandle, IndexEntry};
use fs::WriteFile;

use crate::TableError;

/// Block granularity chosen in the absence of an explicit
/// `Config::table_block_size`: flush an index entry every 10 updates.
pub const DEFAULT_BLOCK_SIZE: usize = 10;

/// Streams `KeyUpdate`s in ascending key order to a new, immutable table
/// file.
///
/// Blocks are not separately buffered: each encoded update is written to
/// the underlying file as it arrives, and the writer only remembers the
/// byte range it occupies. A block boundary is purely a bookkeeping event
/// — fix the in-progress `IndexEntry`'s length and key range, push it, and
/// start tracking a new one.
pub struct TableWriter<W> {
    file: W,
    offset: u64,
    block_size: usize,
    completed: Vec<IndexEntry>,
    block_start: u64,
    block_range: Option<KeyRange>,
    block_updates: usize,
    last_key: Option<Key>,
}

impl<W: WriteFile> TableWriter<W> {
    pub fn new(file: W) -> Self {
        Self::with_block_size(file, DEFAULT_BLOCK_SIZE)
    }

    pub fn with_block_size(file: W, block_size: usize) -> Self {
        Self {
            file,
            offset: 0,
            block_size: block_size.max(1),
            completed: Vec::new(),
            block_start: 0,
            block_range: None,
            block_updates: 0,
            last_key: None,
        }
    }

    /// Encodes and appends one update. Keys across the whole file must be
    /// non-decreasing; a key smaller than the current block's maximum is a
    /// caller bug.
    pub fn put(&mut self, update: KeyUpdate) -> Result<(), TableError> {
        if let Some(last) = self.last_key {
            if update.key < last {
                return Err(TableError::NonMonotonicKey {
                    key: update.key,
                    current_max: last,
                });
            }
        }
        self.last_key = Some(update.key);

        let mut enc = Encoder::new();
        update.encode(&mut enc)?;
        let bytes = enc.into_bytes();
        self.file.write(&bytes)?;

        if self.block_range.is_none() {
            self.block_start = self.offset;
        }
        self.offset += bytes.len() as u64;
        self.block_range = Some(match self.block_range.take() {
            Some(mut r) => {
                r.max = update.key;
                r
            }
            None => KeyRange::singleton(update.key),
        });
        self.block_updates += 1;

        if self.block_updates >= self.block_size {
            self.flush_block();
        }
        Ok(())
    }

    fn flush_block(&mut self) {
        if let Some(range) = self.block_range.take() {
            let length = (self.offset - self.block_start) as u32;
            let handle = SliceHandle::new(self.block_start, length);
            self.completed.push(IndexEntry::new(handle, range));
        }
        self.block_updates = 0;
    }

    /// Flushes any in-progress block, writes the index and trailing
    /// handle, and syncs the file. Fails if no updates were ever written.
    pub fn close(mut self) -> Result<Vec<IndexEntry>, TableError> {
        self.flush_block();
        if self.completed.is_empty() {
            return Err(TableError::Empty);
        }

        let index_offset = self.offset;
        let mut enc = Encoder::new();
        for entry in &self.completed {
            entry.encode(&mut enc);
        }
        let index_bytes = enc.into_bytes();
        let index_len = index_bytes.len() as u32;
        self.file.write(&index_bytes)?;

        let mut trailer = Encoder::with_capacity(12);
        SliceHandle::new(index_offset, index_len).encode_fixed(&mut trailer);
        self.file.write(&trailer.into_bytes())?;
        self.file.sync()?;

        Ok(self.completed)
    }
}
