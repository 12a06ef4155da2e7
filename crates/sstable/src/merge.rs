//! K-way merge over ascending update sources.
//!
//! Takes `n` finite, ascending iterators of `KeyUpdate` and emits them in
//! ascending key order. Callers pass sources newest-first (the database
//! passes level-0 tables newest-to-oldest, then level-1 tables); for keys
//! that appear in more than one source, only the update from the earliest
//! (newest) source survives — older duplicates are silently skipped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use codec::{Key, KeyUpdate, Update};

use crate::TableError;

/// One pending boxed source of ascending updates.
pub type UpdateSource<'a> = Box<dyn Iterator<Item = Result<KeyUpdate, TableError>> + 'a>;

struct HeapEntry {
    key: Key,
    source: usize,
    update: Update,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.source == other.source
    }
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by key, ties broken toward the lowest source index
        // (the newest source, by the caller's newest-first convention).
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.source.cmp(&self.source))
    }
}

/// Merges `n` ascending update sources into one ascending, deduplicated
/// stream.
pub struct MergeIterator<'a> {
    sources: Vec<UpdateSource<'a>>,
    heap: BinaryHeap<HeapEntry>,
}

impl<'a> MergeIterator<'a> {
    /// `sources[0]` is the newest; later sources are progressively older.
    pub fn new(mut sources: Vec<UpdateSource<'a>>) -> Result<Self, TableError> {
        let mut heap = BinaryHeap::new();
        for (i, source) in sources.iter_mut().enumerate() {
            if let Some(update) = source.next() {
                let update = update?;
                heap.push(HeapEntry {
                    key: update.key,
                    source: i,
                    update: update.update,
                });
            }
        }
        Ok(Self { sources, heap })
    }

    fn advance(&mut self, source: usize) -> Result<(), TableError> {
        if let Some(update) = self.sources[source].next() {
            let update = update?;
            self.heap.push(HeapEntry {
                key: update.key,
                source,
                update: update.update,
            });
        }
        Ok(())
    }

    /// Returns the next update in ascending key order, or `None` once
    /// every source is exhausted.
    pub fn next_update(&mut self) -> Result<Option<KeyUpdate>, TableError> {
        let top = match self.heap.pop() {
            Some(e) => e,
            None => return Ok(None),
        };
        let key = top.key;
        self.advance(top.source)?;

        // Drain and discard any other source's head at the same key —
        // `top` already holds the newest (lowest source index) update.
        while let Some(peek) = self.heap.peek() {
            if peek.key != key {
                break;
            }
            let dup = self.heap.pop().expect("peeked");
            self.advance(dup.source)?;
        }

        Ok(Some(KeyUpdate {
            key,
            update: top.update,
        }))
    }

    pub fn collect_all(&mut self) -> Result<Vec<KeyUpdate>, TableError> {
        let mut out = Vec::new();
        while let Some(u) = self.next_update()? {
            out.push(u);
        }
        Ok(out)
    }
}
