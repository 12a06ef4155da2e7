//! # Table — sorted, immutable on-disk storage files
//!
//! When the in-memory memtable exceeds its size threshold the engine
//! flushes it to disk as a table. Tables are write-once, read-many — once
//! created they are never modified (only superseded during compaction).
//!
//! ## File layout
//!
//! ```text
//! 0 .. index_offset              : concatenation of blocks (KeyUpdate records)
//! index_offset .. +index_length  : concatenation of IndexEntry records
//! size-12 .. size                : trailing FixedHandle { offset, length } -> the index
//! ```
//!
//! A block is a run of `KeyUpdate` records delimited only by the offsets
//! and lengths recorded in the index — blocks carry no length prefix of
//! their own. Keys are non-decreasing across the whole file, strictly
//! sorted within a block, and index entries cover disjoint, ascending key
//! ranges. There is no bloom filter section and no per-record checksum:
//! both were present in this workspace's earlier table format and are
//! dropped here (see `DESIGN.md`).

mod error;
mod merge;
mod reader;
mod writer;

pub use error::TableError;
pub use merge::{MergeIterator, UpdateSource};
pub use reader::{Lookup, Table, TableUpdates};
pub use writer::{TableWriter, DEFAULT_BLOCK_SIZE};
