//! Manifest — the crash-safe index of which tables currently belong to the
//! database, partitioned across two levels.
//!
//! On-disk format (`spec.md` §4.6), written via
//! [`fs::Filesystem::atomic_create_with`] so the rewrite is all-or-nothing:
//!
//! ```text
//! numTables: u32
//! entries  : numTables * (level: u8, ident: u32)
//! ```
//!
//! There is no incremental log for the manifest itself — every change
//! rewrites the whole file. The install ordering (manifest rewritten, then
//! subsumed files deleted) is what makes a crash mid-compaction leave at
//! worst an orphan file for the next `cleanup()` pass to sweep, never a
//! dangling reference to a file that no longer exists.

use std::collections::HashSet;

use codec::{Decoder, Encoder};
use fs::Filesystem;
use sstable::{Lookup, Table, TableWriter};

use crate::EngineError;

const LEVEL0: u8 = 0;
const LEVEL1: u8 = 1;

const MANIFEST_NAME: &str = "manifest";
const LOG_NAME: &str = "log";

/// Deterministic, fixed-width table filename for a given ident.
pub fn table_filename(ident: u32) -> String {
    format!("table-{ident:06}.ldb")
}

struct LevelEntry<R> {
    ident: u32,
    table: Table<R>,
}

/// The live set of tables, split across level 0 and level 1, plus the
/// counter that hands out fresh table idents.
pub struct Manifest<FS: Filesystem> {
    fs: FS,
    level0: Vec<LevelEntry<FS::ReadFile>>,
    level1: Vec<LevelEntry<FS::ReadFile>>,
    next_ident: u32,
}

/// A freshly created table file, not yet installed in any level.
pub struct TableCreator<W> {
    pub ident: u32,
    pub writer: TableWriter<W>,
}

impl<FS: Filesystem> Manifest<FS> {
    /// Wipes every file in the directory and writes an empty manifest.
    /// Used the first time a database directory is opened.
    pub fn init(fs: FS) -> Result<Self, EngineError> {
        for name in fs.list()? {
            fs.delete(&name)?;
        }
        let mut m = Self {
            fs,
            level0: Vec::new(),
            level1: Vec::new(),
            next_ident: 1,
        };
        m.write_manifest_file()?;
        Ok(m)
    }

    /// Reads the manifest, opens every table it references, sets
    /// `next_ident` past every ident ever assigned, and sweeps every file
    /// in the directory that isn't `log`, `manifest`, or a known table.
    pub fn recover(fs: FS) -> Result<Self, EngineError> {
        let bytes = fs.open(MANIFEST_NAME)?.read_all()?;
        let mut dec = Decoder::new(&bytes);
        let num_tables = dec.u32()?;

        let mut level0 = Vec::new();
        let mut level1 = Vec::new();
        let mut max_ident = 0u32;

        for _ in 0..num_tables {
            let level = dec.u8()?;
            let ident = dec.u32()?;
            max_ident = max_ident.max(ident);
            let name = table_filename(ident);
            let table = Table::open(fs.open(&name)?)?;
            match level {
                LEVEL0 => level0.push(LevelEntry { ident, table }),
                LEVEL1 => level1.push(LevelEntry { ident, table }),
                other => {
                    return Err(EngineError::Format(format!(
                        "manifest entry for table {ident} has unknown level {other}"
                    )))
                }
            }
        }

        let m = Self {
            fs,
            level0,
            level1,
            next_ident: max_ident + 1,
        };
        m.cleanup()?;
        Ok(m)
    }

    /// `true` iff a `manifest` file already exists in `fs`'s directory —
    /// the signal `engine::open` uses to pick `recover` over `init`.
    pub fn exists(fs: &FS) -> Result<bool, EngineError> {
        Ok(fs.list()?.iter().any(|n| n == MANIFEST_NAME))
    }

    /// Looks `key` up across level 0 (newest insertion first) then level 1,
    /// short-circuiting on the first table with a definitive answer.
    /// Tables whose key range excludes `key` are skipped without touching
    /// their data blocks (the range check happens against the in-memory
    /// index inside `Table::get`).
    pub fn get(&self, key: codec::Key) -> Result<Lookup, EngineError> {
        for entry in self.level0.iter().rev() {
            if !Self::in_range(&entry.table, key) {
                continue;
            }
            let lookup = entry.table.get(key)?;
            if !matches!(lookup, Lookup::Unknown) {
                return Ok(lookup);
            }
        }
        for entry in &self.level1 {
            if !Self::in_range(&entry.table, key) {
                continue;
            }
            let lookup = entry.table.get(key)?;
            if !matches!(lookup, Lookup::Unknown) {
                return Ok(lookup);
            }
        }
        Ok(Lookup::Unknown)
    }

    fn in_range(table: &Table<FS::ReadFile>, key: codec::Key) -> bool {
        table.keys().is_some_and(|r| r.contains(key))
    }

    /// Assigns the next ident and opens a new, empty table file for it.
    pub fn create_table(&mut self, block_size: usize) -> Result<TableCreator<FS::WriteFile>, EngineError> {
        let ident = self.next_ident;
        self.next_ident += 1;
        let name = table_filename(ident);
        let file = self.fs.create(&name)?;
        Ok(TableCreator {
            ident,
            writer: TableWriter::with_block_size(file, block_size),
        })
    }

    /// Installs `table` (just closed by a `TableCreator`) into
    /// `target_level`, dropping every currently-tracked table whose ident
    /// is in `subsumed`. Rewrites the manifest file atomically first, then
    /// deletes the subsumed tables' files — that ordering is load-bearing:
    /// a crash between the two leaves orphan files for the next
    /// `cleanup()` to remove, never a manifest pointing at a missing file.
    pub fn install(
        &mut self,
        ident: u32,
        table: Table<FS::ReadFile>,
        subsumed: &HashSet<u32>,
        target_level: u8,
    ) -> Result<(), EngineError> {
        let mut level0 = std::mem::take(&mut self.level0);
        let mut level1 = std::mem::take(&mut self.level1);
        level0.retain(|e| !subsumed.contains(&e.ident));
        level1.retain(|e| !subsumed.contains(&e.ident));

        let new_entry = LevelEntry { ident, table };
        match target_level {
            LEVEL0 => level0.push(new_entry),
            LEVEL1 => level1.push(new_entry),
            other => {
                return Err(EngineError::Contract(format!(
                    "install: unknown target level {other}"
                )))
            }
        }

        self.level0 = level0;
        self.level1 = level1;
        self.write_manifest_file()?;

        for &subsumed_ident in subsumed {
            let name = table_filename(subsumed_ident);
            self.fs.delete(&name)?;
        }
        Ok(())
    }

    /// Number of level-0 tables currently tracked.
    pub fn level0_len(&self) -> usize {
        self.level0.len()
    }

    /// Idents and tables currently in level 0, newest-insertion-last (the
    /// order they are stored in; callers that need newest-first reverse
    /// it themselves, matching `spec.md`'s "younger tables shadow older
    /// ones" rule).
    pub fn level0_entries(&self) -> impl Iterator<Item = (u32, &Table<FS::ReadFile>)> {
        self.level0.iter().map(|e| (e.ident, &e.table))
    }

    pub fn level1_entries(&self) -> impl Iterator<Item = (u32, &Table<FS::ReadFile>)> {
        self.level1.iter().map(|e| (e.ident, &e.table))
    }

    /// Deletes every file in the directory whose base name is not `log`,
    /// `manifest`, or one of the currently-tracked tables.
    pub fn cleanup(&self) -> Result<(), EngineError> {
        let known: HashSet<String> = self
            .level0
            .iter()
            .chain(self.level1.iter())
            .map(|e| table_filename(e.ident))
            .chain([MANIFEST_NAME.to_string(), LOG_NAME.to_string()])
            .collect();

        for name in self.fs.list()? {
            if !known.contains(&name) {
                self.fs.delete(&name)?;
            }
        }
        Ok(())
    }

    fn write_manifest_file(&self) -> Result<(), EngineError> {
        let mut enc = Encoder::new();
        let total = self.level0.len() + self.level1.len();
        enc.u32(total as u32);
        for entry in &self.level0 {
            enc.u8(LEVEL0);
            enc.u32(entry.ident);
        }
        for entry in &self.level1 {
            enc.u8(LEVEL1);
            enc.u32(entry.ident);
        }
        self.fs.atomic_create_with(MANIFEST_NAME, &enc.into_bytes())?;
        Ok(())
    }
}
