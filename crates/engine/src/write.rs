//! Write path: `spec.md` §4.8 — forward to the log/memtable, then run
//! compactions inline when the configured size thresholds are crossed.

use codec::{Key, Value};
use fs::Filesystem;

use crate::{Engine, EngineError};

impl<FS: Filesystem + Clone> Engine<FS> {
    pub fn put(&mut self, key: Key, value: Value) -> Result<(), EngineError> {
        self.wal.put(key, value)?;
        self.maybe_sync()?;
        self.maybe_compact()
    }

    pub fn delete(&mut self, key: Key) -> Result<(), EngineError> {
        self.wal.delete(key)?;
        self.maybe_sync()?;
        self.maybe_compact()
    }

    fn maybe_sync(&mut self) -> Result<(), EngineError> {
        if self.config.wal_sync {
            self.wal.sync()?;
        }
        Ok(())
    }

    fn maybe_compact(&mut self) -> Result<(), EngineError> {
        if self.wal.memtable().size_estimate() >= self.config.wal_flush_threshold {
            self.minor_compaction()?;
        }
        if self.manifest.level0_len() >= self.config.level0_compaction_trigger {
            self.major_compaction()?;
        }
        Ok(())
    }
}
