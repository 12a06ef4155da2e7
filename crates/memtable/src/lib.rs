//! # Memtable
//!
//! An in-memory, sorted, mutable write buffer for the storage engine.
//!
//! The memtable is the first point of contact for every write. It buffers
//! recent `Put` and `Delete` operations in ascending key order before they
//! are flushed to an immutable level-0 table.
//!
//! ## Key properties
//! - **Sorted order**: entries are always in ascending key order (required
//!   by the table writer).
//! - **No staleness gating**: every write to the memtable happens after its
//!   log record is durable, in program order, under the engine's exclusive
//!   lock — there is no concurrent-writer race to guard against, so unlike
//!   some memtable designs this one carries no sequence number.
//! - **Tombstone support**: deletes are recorded as `Update::Delete`
//!   markers, distinct from "key absent".
//! - **Approximate size tracking**: sums key and value bytes inserted, for
//!   flush-threshold decisions. Overwrites are not subtracted back out —
//!   it is a lower bound, not an exact byte count.
//!
//! ## Example
//! ```rust
//! use memtable::Memtable;
//!
//! let mut m = Memtable::new();
//! m.put(1, b"world".to_vec());
//! assert_eq!(m.get(1).unwrap().clone().into_value().unwrap(), b"world".to_vec());
//!
//! m.delete(1);
//! assert!(m.get(1).unwrap().is_put() == false);
//! ```

use std::collections::BTreeMap;

use codec::{Key, KeyUpdate, Update, Value};

/// An ordered, in-memory write buffer backed by a `BTreeMap`.
#[derive(Debug, Default)]
pub struct Memtable {
    map: BTreeMap<Key, Update>,
    size_estimate: usize,
}

impl Memtable {
    /// Creates a new, empty memtable.
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
            size_estimate: 0,
        }
    }

    /// Installs a live value for `key`, overwriting any prior entry.
    pub fn put(&mut self, key: Key, value: Value) {
        self.size_estimate = self
            .size_estimate
            .saturating_add(std::mem::size_of::<Key>())
            .saturating_add(value.len());
        self.map.insert(key, Update::Put(value));
    }

    /// Records a tombstone for `key`, overwriting any prior entry.
    pub fn delete(&mut self, key: Key) {
        self.size_estimate = self
            .size_estimate
            .saturating_add(std::mem::size_of::<Key>());
        self.map.insert(key, Update::Delete);
    }

    /// Returns this key's recorded update, if any. `None` means the key is
    /// not mentioned in the memtable at all — distinct from `Some(&Update::Delete)`,
    /// which means the memtable records the key as deleted.
    pub fn get(&self, key: Key) -> Option<&Update> {
        self.map.get(&key)
    }

    /// Returns every update recorded, sorted ascending by key.
    pub fn updates(&self) -> Vec<KeyUpdate> {
        self.map
            .iter()
            .map(|(&key, update)| KeyUpdate {
                key,
                update: update.clone(),
            })
            .collect()
    }

    /// A lower bound on the bytes of keys and values inserted so far.
    /// Overwrites are not subtracted back out.
    pub fn size_estimate(&self) -> usize {
        self.size_estimate
    }

    /// Number of distinct keys recorded, including tombstones.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Removes all entries and resets the size estimate to zero.
    pub fn clear(&mut self) {
        self.map.clear();
        self.size_estimate = 0;
    }
}
