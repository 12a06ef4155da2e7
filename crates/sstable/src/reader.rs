use codec::{Decoder, IndexEntry, Key, KeyRange, KeyUpdate, SliceHandle, Update, Value};
use fs::ReadFile;

use crate::TableError;

/// The result of looking a key up in a single table: the table may have no
/// information about the key at all (`Unknown`), a live value (`Present`),
/// or a recorded tombstone (`Deleted`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Unknown,
    Present(Value),
    Deleted,
}

/// An opened, immutable table: its block index loaded into memory, ready
/// for point lookups and full scans.
pub struct Table<R> {
    file: R,
    entries: Vec<IndexEntry>,
}

impl<R: ReadFile> Table<R> {
    /// Reads the trailing 12-byte handle, then the index it points to, and
    /// decodes every `IndexEntry` in it.
    pub fn open(file: R) -> Result<Self, TableError> {
        let size = file.size()?;
        if size < 12 {
            return Err(TableError::TooSmall { size });
        }
        let trailer_bytes = file.read_at(size - 12, 12)?;
        let mut trailer_dec = Decoder::new(&trailer_bytes);
        let handle = SliceHandle::decode_fixed(&mut trailer_dec)?;

        let index_bytes = file.read_at(handle.offset, handle.length as usize)?;
        let mut dec = Decoder::new(&index_bytes);
        let mut entries = Vec::new();
        while dec.remaining() > 0 {
            entries.push(IndexEntry::decode(&mut dec)?);
        }

        Ok(Self { file, entries })
    }

    /// The inclusive key range this table covers, or `None` for a table
    /// with no entries (never produced by `TableWriter`, but reachable if
    /// a table file is hand-constructed with an empty index).
    pub fn keys(&self) -> Option<KeyRange> {
        match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => Some(KeyRange::new(first.keys.min, last.keys.max)),
            _ => None,
        }
    }

    /// Binary search over `entries` by `[min, max]` interval containment.
    /// Returns `None` if no entry's range contains `key`.
    fn find_entry(&self, key: Key) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let mut lo = 0i64;
        let mut hi = self.entries.len() as i64 - 1;
        while lo <= hi {
            let mid = lo + (hi - lo) / 2;
            let entry = &self.entries[mid as usize];
            if key < entry.keys.min {
                hi = mid - 1;
            } else if key > entry.keys.max {
                lo = mid + 1;
            } else {
                return Some(mid as usize);
            }
        }
        None
    }

    pub fn get(&self, key: Key) -> Result<Lookup, TableError> {
        let idx = match self.find_entry(key) {
            Some(i) => i,
            None => return Ok(Lookup::Unknown),
        };
        let entry = &self.entries[idx];
        let block = self
            .file
            .read_at(entry.handle.offset, entry.handle.length as usize)?;
        let mut dec = Decoder::new(&block);
        while dec.remaining() > 0 {
            let update = KeyUpdate::decode(&mut dec)?;
            if update.key == key {
                return Ok(match update.update {
                    Update::Put(v) => Lookup::Present(v),
                    Update::Delete => Lookup::Deleted,
                });
            }
        }
        Ok(Lookup::Unknown)
    }

    /// A lazy, forward-only iterator over every update in the table, in
    /// ascending key order, refilling one block at a time.
    pub fn updates(&self) -> TableUpdates<'_, R> {
        TableUpdates {
            table: self,
            next_entry: 0,
            current_block: Vec::new().into_iter(),
        }
    }

    pub fn len_entries(&self) -> usize {
        self.entries.len()
    }
}

/// Forward-only iterator over a [`Table`]'s updates, one block at a time.
pub struct TableUpdates<'a, R> {
    table: &'a Table<R>,
    next_entry: usize,
    current_block: std::vec::IntoIter<KeyUpdate>,
}

impl<'a, R: ReadFile> Iterator for TableUpdates<'a, R> {
    type Item = Result<KeyUpdate, TableError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(update) = self.current_block.next() {
                return Some(Ok(update));
            }
            if self.next_entry >= self.table.entries.len() {
                return None;
            }
            let entry = &self.table.entries[self.next_entry];
            self.next_entry += 1;

            let block = match self
                .table
                .file
                .read_at(entry.handle.offset, entry.handle.length as usize)
            {
                Ok(b) => b,
                Err(e) => return Some(Err(e.into())),
            };
            let mut dec = Decoder::new(&block);
            let mut updates = Vec::new();
            loop {
                if dec.remaining() == 0 {
                    break;
                }
                match KeyUpdate::decode(&mut dec) {
                    Ok(u) => updates.push(u),
                    Err(e) => return Some(Err(e.into())),
                }
            }
            self.current_block = updates.into_iter();
        }
    }
}
