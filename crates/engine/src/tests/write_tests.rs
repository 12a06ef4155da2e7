use config::Config;
use fs::MemFilesystem;

use super::helpers::{open, small_config};
use crate::EngineError;

#[test]
fn put_then_get() {
    let mfs = MemFilesystem::new();
    let mut db = open(&mfs, Config::default());
    db.put(1, b"val".to_vec()).unwrap();
    assert_eq!(db.get(1).unwrap(), Some(b"val".to_vec()));
    assert_eq!(db.get(2).unwrap(), None);
}

#[test]
fn overwrite_then_delete_then_overwrite() {
    let mfs = MemFilesystem::new();
    let mut db = open(&mfs, Config::default());
    db.put(1, b"a".to_vec()).unwrap();
    db.put(1, b"b".to_vec()).unwrap();
    db.delete(1).unwrap();
    assert_eq!(db.get(1).unwrap(), None);
    db.put(1, b"c".to_vec()).unwrap();
    assert_eq!(db.get(1).unwrap(), Some(b"c".to_vec()));
}

#[test]
fn delete_of_absent_key_leaves_it_absent() {
    let mfs = MemFilesystem::new();
    let mut db = open(&mfs, Config::default());
    db.delete(42).unwrap();
    assert_eq!(db.get(42).unwrap(), None);
}

#[test]
fn value_at_tombstone_sentinel_length_is_rejected() {
    let mfs = MemFilesystem::new();
    let mut db = open(&mfs, Config::default());
    let value = vec![0u8; 0xFFFF];
    let err = db.put(1, value).unwrap_err();
    assert!(matches!(err, EngineError::Contract(_)));
}

#[test]
fn put_past_flush_threshold_triggers_minor_compaction() {
    let mfs = MemFilesystem::new();
    let mut db = open(&mfs, small_config());
    // small_config's wal_flush_threshold is 64 bytes; a handful of 20-byte
    // values should cross it and drain the memtable into a level-0 table
    // at least once.
    for i in 0..5 {
        db.put(i, vec![b'x'; 20]).unwrap();
    }
    assert!(db.level0_len() >= 1);
    db.compact().unwrap();
    assert_eq!(db.memtable_size_estimate(), 0);
    for i in 0..5 {
        assert_eq!(db.get(i).unwrap(), Some(vec![b'x'; 20]));
    }
}

#[test]
fn level0_count_past_trigger_runs_major_compaction() {
    let mfs = MemFilesystem::new();
    let mut db = open(&mfs, small_config());
    // Enough writes to repeatedly cross both the flush threshold and the
    // level0_compaction_trigger of 3 — level 0 must never be left sitting
    // above the trigger once a write returns.
    for batch in 0..6u64 {
        for i in 0..5u64 {
            db.put(batch * 100 + i, vec![b'y'; 20]).unwrap();
        }
        assert!(db.level0_len() < small_config().level0_compaction_trigger);
    }
    for batch in 0..6u64 {
        for i in 0..5u64 {
            assert_eq!(db.get(batch * 100 + i).unwrap(), Some(vec![b'y'; 20]));
        }
    }
}
