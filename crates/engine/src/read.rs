//! Read path: `spec.md` §4.8 — consult the memtable first, then the
//! manifest (level 0 newest-first, then level 1).

use codec::{Key, Update, Value};
use fs::Filesystem;
use sstable::Lookup;

use crate::{Engine, EngineError};

impl<FS: Filesystem + Clone> Engine<FS> {
    /// Looks up `key`. `None` covers both "never written" and "deleted" —
    /// `spec.md`'s public contract does not distinguish them.
    pub fn get(&self, key: Key) -> Result<Option<Value>, EngineError> {
        if let Some(update) = self.wal.get(key) {
            return Ok(match update {
                Update::Put(v) => Some(v.clone()),
                Update::Delete => None,
            });
        }
        match self.manifest.get(key)? {
            Lookup::Present(v) => Ok(Some(v)),
            Lookup::Deleted | Lookup::Unknown => Ok(None),
        }
    }
}
