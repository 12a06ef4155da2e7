//! # Engine — RiptideKV storage engine
//!
//! Composes [`wal`] (write-ahead log + memtable), [`sstable`] (immutable
//! sorted tables), and [`manifest`] (the crash-safe two-level index) into
//! the public store contract: `get`, `put`, `delete`, `compact`, `close`.
//!
//! ## Write path
//!
//! `put`/`delete` append to the log, install into the memtable, then run
//! minor compaction inline once the memtable's size estimate crosses
//! [`config::Config::wal_flush_threshold`], and major compaction inline
//! once level 0 holds at least [`config::Config::level0_compaction_trigger`]
//! tables. There is no background compaction thread — everything above
//! runs synchronously in the writer's call stack (`spec.md` §5).
//!
//! ## Read path
//!
//! `get` checks the memtable, then the manifest (level 0 newest-first,
//! then level 1), short-circuiting on the first definitive answer —
//! a live value or a tombstone.
//!
//! ## Recovery
//!
//! [`Engine::open`] recovers the manifest (sweeping orphan files), replays
//! the log into a scratch memtable, and — if that replay produced any
//! updates — writes them as a new level-0 table before truncating the log
//! and starting a fresh one. See [`recovery`].

mod compaction;
mod error;
mod manifest;
mod read;
mod recovery;
mod write;

#[cfg(test)]
mod tests;

pub use error::EngineError;
pub use manifest::{table_filename, Manifest};

use config::Config;
use fs::Filesystem;
use wal::Wal;

/// The central storage engine: a write-ahead log + memtable for absorbing
/// writes, and a manifest tracking the on-disk tables writes eventually
/// land in.
pub struct Engine<FS: Filesystem> {
    pub(crate) fs: FS,
    pub(crate) wal: Wal<FS::WriteFile>,
    pub(crate) manifest: Manifest<FS>,
    pub(crate) config: Config,
}

impl<FS: Filesystem + Clone> Engine<FS> {
    /// Returns the current level-0 table count (for tests and diagnostics).
    pub fn level0_len(&self) -> usize {
        self.manifest.level0_len()
    }

    /// Returns the memtable's current size estimate (for tests and
    /// diagnostics).
    pub fn memtable_size_estimate(&self) -> usize {
        self.wal.memtable().size_estimate()
    }

    /// Forces a minor compaction only: drains the memtable into a new
    /// level-0 table, unconditionally.
    pub fn flush(&mut self) -> Result<(), EngineError> {
        self.minor_compaction()
    }

    /// Forces both a minor and a major compaction, unconditionally.
    pub fn compact(&mut self) -> Result<(), EngineError> {
        self.minor_compaction()?;
        self.major_compaction()?;
        Ok(())
    }

    /// Flushes any pending writes (minor compaction) and closes the log.
    /// Behavior after `close` is undefined — the `Engine` is consumed.
    pub fn close(mut self) -> Result<(), EngineError> {
        self.minor_compaction()?;
        self.wal.close();
        Ok(())
    }
}
