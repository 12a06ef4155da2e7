//! # Write-ahead log
//!
//! Durability layer for the storage engine: every mutation is framed as a
//! `DATA | COMMIT` log record (see [`logfile`]) before it is installed into
//! the in-memory [`memtable::Memtable`], so a crash can never lose an
//! acknowledged write without also failing to have committed its log
//! record.
//!
//! This crate does not gate writes on any sequence number — unlike schemes
//! that need a counter to disambiguate concurrent writers, `Wal` is used
//! under the engine's single exclusive lock (see `engine`'s concurrency
//! model), so "every log record in file order, replayed in that order" is
//! already a total order on writes.

mod logfile;

#[cfg(test)]
mod tests;

use codec::{CodecError, Decoder, Encoder, Key, KeyUpdate, Update, Value};
use fs::{FsError, WriteFile};
use memtable::Memtable;

pub use logfile::{LogReader, LogWriter};

/// Errors that can occur while appending to or recovering a log.
#[derive(Debug, thiserror::Error)]
pub enum WalError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("corrupt log: unexpected tag where a DATA record was expected")]
    Corrupt,
}

/// Decodes a log record's payload into the `KeyUpdate`s it carries.
///
/// A single `Add` call may batch more than one `KeyUpdate` into one
/// `DATA` record; this decodes however many were packed in, in order.
pub fn decode_batch(bytes: &[u8]) -> Result<Vec<KeyUpdate>, WalError> {
    let mut dec = Decoder::new(bytes);
    let mut updates = Vec::new();
    while dec.remaining() > 0 {
        updates.push(KeyUpdate::decode(&mut dec)?);
    }
    Ok(updates)
}

fn encode_batch(updates: &[KeyUpdate]) -> Result<Vec<u8>, WalError> {
    let mut enc = Encoder::new();
    for u in updates {
        u.encode(&mut enc)?;
    }
    Ok(enc.into_bytes())
}

/// Composes a log with a memtable: the write-path entry point used by the
/// engine for every live mutation.
pub struct Wal<W> {
    log: LogWriter<W>,
    memtable: Memtable,
}

impl<W: WriteFile> Wal<W> {
    /// Wraps an already-open log file. The log is assumed to be positioned
    /// for appending (the filesystem façade opens files in append mode);
    /// any prior recovery must have happened before this is constructed.
    pub fn new(file: W) -> Self {
        Self {
            log: LogWriter::new(file),
            memtable: Memtable::new(),
        }
    }

    /// Rebuilds a `Wal` around an already-populated memtable, for use
    /// right after recovery has replayed the prior log's committed
    /// records into it.
    pub fn with_memtable(file: W, memtable: Memtable) -> Self {
        Self {
            log: LogWriter::new(file),
            memtable,
        }
    }

    pub fn put(&mut self, key: Key, value: Value) -> Result<(), WalError> {
        let update = KeyUpdate::put(key, value);
        self.append_and_install(update)
    }

    pub fn delete(&mut self, key: Key) -> Result<(), WalError> {
        let update = KeyUpdate::delete(key);
        self.append_and_install(update)
    }

    fn append_and_install(&mut self, update: KeyUpdate) -> Result<(), WalError> {
        let bytes = encode_batch(std::slice::from_ref(&update))?;
        self.log.add(&bytes)?;
        match update.update {
            Update::Put(v) => self.memtable.put(update.key, v),
            Update::Delete => self.memtable.delete(update.key),
        }
        Ok(())
    }

    /// Forces the log's write durable. Not called automatically by `put`/
    /// `delete`; the engine decides when to sync per `Config::wal_sync`.
    pub fn sync(&mut self) -> Result<(), WalError> {
        self.log.sync()
    }

    pub fn get(&self, key: Key) -> Option<&Update> {
        self.memtable.get(key)
    }

    pub fn memtable(&self) -> &Memtable {
        &self.memtable
    }

    /// Consumes this `Wal`, handing back its memtable (used when minor
    /// compaction flushes it to a level-0 table and a fresh, empty
    /// memtable takes its place).
    pub fn into_memtable(self) -> Memtable {
        self.memtable
    }

    /// Closes the underlying file handle by dropping it.
    pub fn close(self) {
        drop(self.log.into_inner());
    }
}
