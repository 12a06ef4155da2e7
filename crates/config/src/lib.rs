//! # Config
//!
//! Tuning knobs for the storage engine, gathered into one struct passed at
//! open time rather than read from global state — every threshold below is
//! a magic number somewhere in `spec.md`'s component design, lifted here so
//! callers can tune it without touching engine code.

/// Engine-wide tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of updates a table writer accumulates per block before
    /// flushing an index entry. `spec.md` §4.5 chooses 10 as the block
    /// granularity; this makes it tunable rather than a hardcoded literal.
    pub table_block_size: usize,

    /// Memtable size estimate, in bytes, at or above which a `put`/`delete`
    /// triggers an inline minor compaction (`spec.md` §4.8: 4 MiB).
    pub wal_flush_threshold: usize,

    /// Number of level-0 tables at or above which a `put`/`delete` triggers
    /// an inline major compaction (`spec.md` §4.8: 4).
    pub level0_compaction_trigger: usize,

    /// Whether every log append is followed by an `fsync`. `spec.md`'s
    /// crash-safety proof does not require this (it only assumes
    /// append-order preservation), so it is an ambient durability/latency
    /// trade-off knob, not a correctness requirement.
    pub wal_sync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_block_size: 10,
            wal_flush_threshold: 4 * 1024 * 1024,
            level0_compaction_trigger: 4,
            wal_sync: false,
        }
    }
}
