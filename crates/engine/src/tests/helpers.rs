use config::Config;
use fs::MemFilesystem;

use crate::Engine;

/// A config with small thresholds so tests can exercise compaction without
/// writing megabytes of data.
pub fn small_config() -> Config {
    Config {
        table_block_size: 4,
        wal_flush_threshold: 64,
        level0_compaction_trigger: 3,
        wal_sync: false,
    }
}

pub fn open(mfs: &MemFilesystem, config: Config) -> Engine<MemFilesystem> {
    Engine::open(mfs.clone(), config).unwrap()
}
