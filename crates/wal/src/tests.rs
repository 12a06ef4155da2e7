use fs::{Filesystem, MemFilesystem, ReadFile};

use crate::{decode_batch, LogReader, LogWriter, Wal, WalError};

#[test]
fn add_recover_round_trip() -> anyhow::Result<()> {
    let mfs = MemFilesystem::new();
    {
        let mut w = LogWriter::new(mfs.create("log")?);
        w.add(b"first")?;
        w.add(b"second")?;
    }
    let txns = LogReader::recover_txns(&mfs.open("log")?)?;
    assert_eq!(txns, vec![b"first".to_vec(), b"second".to_vec()]);
    Ok(())
}

#[test]
fn recovery_stops_at_clean_eof() -> anyhow::Result<()> {
    let mfs = MemFilesystem::new();
    mfs.create("log")?;
    let txns = LogReader::recover_txns(&mfs.open("log")?)?;
    assert!(txns.is_empty());
    Ok(())
}

#[test]
fn recovery_rewinds_past_crash_mid_data_header() -> anyhow::Result<()> {
    let mfs = MemFilesystem::new();
    {
        let mut w = LogWriter::new(mfs.create("log")?);
        w.add(b"committed")?;
    }
    let mut truncated = mfs.open("log")?.read_all()?;
    truncated.push(1); // start of a new DATA tag, then nothing else.
    mfs.atomic_create_with("log", &truncated)?;

    let txns = LogReader::recover_txns(&mfs.open("log")?)?;
    assert_eq!(txns, vec![b"committed".to_vec()]);
    Ok(())
}

#[test]
fn recovery_rewinds_past_crash_mid_data_body() -> anyhow::Result<()> {
    let mfs = MemFilesystem::new();
    {
        let mut w = LogWriter::new(mfs.create("log")?);
        w.add(b"committed")?;
    }
    let mut truncated = mfs.open("log")?.read_all()?;
    truncated.extend_from_slice(&[1u8, 10, 0]); // DATA tag, length=10, no body bytes.
    mfs.atomic_create_with("log", &truncated)?;

    let txns = LogReader::recover_txns(&mfs.open("log")?)?;
    assert_eq!(txns, vec![b"committed".to_vec()]);
    Ok(())
}

#[test]
fn recovery_rewinds_past_missing_commit() -> anyhow::Result<()> {
    let mfs = MemFilesystem::new();
    {
        let mut w = LogWriter::new(mfs.create("log")?);
        w.add(b"committed")?;
    }
    let mut truncated = mfs.open("log")?.read_all()?;
    // A full DATA record with no COMMIT byte after it.
    truncated.push(1);
    truncated.extend_from_slice(&3u16.to_le_bytes());
    truncated.extend_from_slice(b"abc");
    mfs.atomic_create_with("log", &truncated)?;

    let txns = LogReader::recover_txns(&mfs.open("log")?)?;
    assert_eq!(txns, vec![b"committed".to_vec()]);
    Ok(())
}

#[test]
fn recovery_hard_fails_on_bad_tag() -> anyhow::Result<()> {
    let mfs = MemFilesystem::new();
    mfs.atomic_create_with("log", &[9u8, 0, 0])?;
    let err = LogReader::recover_txns(&mfs.open("log")?).unwrap_err();
    assert!(matches!(err, WalError::Corrupt));
    Ok(())
}

#[test]
fn wal_put_delete_installs_into_memtable() -> anyhow::Result<()> {
    let mfs = MemFilesystem::new();
    let mut wal = Wal::new(mfs.create("log")?);
    wal.put(1, b"one".to_vec())?;
    wal.put(2, b"two".to_vec())?;
    wal.delete(1)?;

    assert_eq!(wal.get(2), Some(&codec::Update::Put(b"two".to_vec())));
    assert_eq!(wal.get(1), Some(&codec::Update::Delete));
    assert_eq!(wal.get(3), None);
    Ok(())
}

#[test]
fn wal_writes_replay_to_same_memtable_state() -> anyhow::Result<()> {
    let mfs = MemFilesystem::new();
    {
        let mut wal = Wal::new(mfs.create("log")?);
        wal.put(1, b"one".to_vec())?;
        wal.put(2, b"two".to_vec())?;
        wal.delete(1)?;
    }

    let txns = LogReader::recover_txns(&mfs.open("log")?)?;
    let mut memtable = memtable::Memtable::new();
    for txn in txns {
        for update in decode_batch(&txn)? {
            match update.update {
                codec::Update::Put(v) => memtable.put(update.key, v),
                codec::Update::Delete => memtable.delete(update.key),
            }
        }
    }

    assert_eq!(memtable.get(2), Some(&codec::Update::Put(b"two".to_vec())));
    assert_eq!(memtable.get(1), Some(&codec::Update::Delete));
    Ok(())
}
