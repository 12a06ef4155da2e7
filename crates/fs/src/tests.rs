use crate::{Filesystem, MemFilesystem, OsFilesystem, ReadFile, WriteFile};

#[test]
fn os_create_write_read_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let fs = OsFilesystem::open(dir.path())?;
    let mut w = fs.create("a")?;
    w.write(b"hello")?;
    w.sync()?;
    let r = fs.open("a")?;
    assert_eq!(r.size()?, 5);
    assert_eq!(r.read_at(0, 5)?, b"hello");
    Ok(())
}

#[test]
fn os_atomic_create_with_replaces_contents() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let fs = OsFilesystem::open(dir.path())?;
    fs.atomic_create_with("m", b"first")?;
    fs.atomic_create_with("m", b"second")?;
    let r = fs.open("m")?;
    assert_eq!(r.read_all()?, b"second");
    // no leftover tmp file.
    assert!(!fs.list()?.iter().any(|n| n.ends_with(".tmp")));
    Ok(())
}

#[test]
fn os_sweeps_leftover_tmp_on_open() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("m.tmp"), b"orphan")?;
    let fs = OsFilesystem::open(dir.path())?;
    assert!(!fs.list()?.iter().any(|n| n == "m.tmp"));
    Ok(())
}

#[test]
fn os_list_delete_truncate() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let fs = OsFilesystem::open(dir.path())?;
    fs.create("a")?;
    fs.create("b")?;
    let mut names = fs.list()?;
    names.sort();
    assert_eq!(names, vec!["a".to_string(), "b".to_string()]);

    fs.delete("a")?;
    assert_eq!(fs.list()?, vec!["b".to_string()]);

    let mut w = fs.create("b")?;
    w.write(b"data")?;
    fs.truncate("b")?;
    let r = fs.open("b")?;
    assert_eq!(r.size()?, 0);
    Ok(())
}

#[test]
fn os_open_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let fs = OsFilesystem::open(dir.path()).unwrap();
    let err = fs.open("missing").unwrap_err();
    assert!(matches!(err, crate::FsError::NotFound(_)));
}

#[test]
fn mem_write_read_round_trip() -> anyhow::Result<()> {
    let fs = MemFilesystem::new();
    let mut w = fs.create("log")?;
    w.write(b"record-1")?;
    w.write(b"record-2")?;
    let r = fs.open("log")?;
    assert_eq!(r.read_all()?, b"record-1record-2");
    Ok(())
}

#[test]
fn mem_crash_truncate_simulates_partial_write() -> anyhow::Result<()> {
    let fs = MemFilesystem::new();
    let mut w = fs.create("log")?;
    w.write(b"0123456789")?;
    fs.crash_truncate("log", 4);
    let r = fs.open("log")?;
    assert_eq!(r.read_all()?, b"0123");
    Ok(())
}

#[test]
fn mem_atomic_create_with_replaces_contents() -> anyhow::Result<()> {
    let fs = MemFilesystem::new();
    fs.atomic_create_with("m", b"first")?;
    fs.atomic_create_with("m", b"second")?;
    let r = fs.open("m")?;
    assert_eq!(r.read_all()?, b"second");
    Ok(())
}

#[test]
fn mem_delete_then_open_is_not_found() {
    let fs = MemFilesystem::new();
    fs.create("a").unwrap();
    fs.delete("a").unwrap();
    let err = fs.open("a").unwrap_err();
    assert!(matches!(err, crate::FsError::NotFound(_)));
}
