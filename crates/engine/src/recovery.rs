//! Recovery — reconstructing in-memory state after a clean shutdown or an
//! arbitrary mid-operation crash (`spec.md` §4.8 "Open").
//!
//! 1. Recover the manifest first (or `Init` it, on a brand-new directory);
//!    its own `cleanup()` sweeps orphan files before anything else touches
//!    the directory — this resolves the Open Question in `spec.md` §9 in
//!    favor of "cleanup before log replay," avoiding ever constructing a
//!    table whose backing files a stale sweep would later delete.
//! 2. Replay the log. Multiple records for the same key collapse to the
//!    last one in log order — exactly what installing them into a scratch
//!    [`memtable::Memtable`] gives for free.
//! 3. If replay produced anything, write it out as a new level-0 table and
//!    install it, then truncate the log to empty.
//! 4. Open a fresh log for append and return.

use config::Config;
use fs::Filesystem;
use memtable::Memtable;
use wal::{LogReader, Wal};

use crate::{manifest::Manifest, Engine, EngineError};

const LOG_NAME: &str = "log";

impl<FS: Filesystem + Clone> Engine<FS> {
    /// Opens (and if necessary initializes) a database directory.
    pub fn open(fs: FS, config: Config) -> Result<Self, EngineError> {
        let mut manifest = if Manifest::exists(&fs)? {
            Manifest::recover(fs.clone())?
        } else {
            Manifest::init(fs.clone())?
        };

        let replayed = replay_log(&fs)?;

        if !replayed.is_empty() {
            let mut tmp_mem = Memtable::new();
            for update in replayed {
                match update.update {
                    codec::Update::Put(v) => tmp_mem.put(update.key, v),
                    codec::Update::Delete => tmp_mem.delete(update.key),
                }
            }
            let creator = manifest.create_table(config.table_block_size)?;
            let ident = creator.ident;
            let mut writer = creator.writer;
            for update in tmp_mem.updates() {
                writer.put(update)?;
            }
            let _entries = writer.close()?;
            let table = sstable::Table::open(fs.open(&crate::table_filename(ident))?)?;
            manifest.install(ident, table, &Default::default(), 0)?;
        }

        // Truncate (or create) the log, then reopen it fresh for append.
        if log_exists(&fs)? {
            fs.truncate(LOG_NAME)?;
        }
        let log_file = fs.create(LOG_NAME)?;
        let wal = Wal::new(log_file);

        Ok(Self {
            fs,
            wal,
            manifest,
            config,
        })
    }
}

fn log_exists<FS: Filesystem>(fs: &FS) -> Result<bool, EngineError> {
    Ok(fs.list()?.iter().any(|n| n == LOG_NAME))
}

fn replay_log<FS: Filesystem>(fs: &FS) -> Result<Vec<codec::KeyUpdate>, EngineError> {
    if !log_exists(fs)? {
        return Ok(Vec::new());
    }
    let log_file = fs.open(LOG_NAME)?;
    let txns = LogReader::recover_txns(&log_file)?;
    let mut updates = Vec::new();
    for txn in txns {
        updates.extend(wal::decode_batch(&txn)?);
    }
    Ok(updates)
}
