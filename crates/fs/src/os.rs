use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use crate::{FsError, ReadFile, WriteFile};

/// Suffix given to the temporary file used by [`OsFilesystem::atomic_create_with`].
const TMP_SUFFIX: &str = ".tmp";

/// A [`crate::Filesystem`] backed by a single real directory on disk.
///
/// Mirrors the teacher's manifest-rewrite discipline (write to `name.tmp`,
/// fsync, rename over `name`) but applies it uniformly to every file this
/// façade creates, not just the manifest.
///
/// `Clone` is cheap (a `PathBuf`) and lets the engine hand a second handle
/// to the same directory to the manifest without sharing a borrow.
#[derive(Clone)]
pub struct OsFilesystem {
    dir: PathBuf,
}

impl OsFilesystem {
    /// Opens `dir` as a filesystem root, creating it if it does not exist,
    /// and sweeping away any `*.tmp` files left behind by a process that
    /// crashed mid-rewrite.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, FsError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| FsError::io(dir.display().to_string(), e))?;
        let fs = Self { dir };
        fs.sweep_tmp_files()?;
        Ok(fs)
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn sweep_tmp_files(&self) -> Result<(), FsError> {
        let read_dir =
            fs::read_dir(&self.dir).map_err(|e| FsError::io(self.dir.display().to_string(), e))?;
        for entry in read_dir {
            let entry = entry.map_err(|e| FsError::io(self.dir.display().to_string(), e))?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name.ends_with(TMP_SUFFIX) {
                let _ = fs::remove_file(entry.path());
            }
        }
        Ok(())
    }
}

impl crate::Filesystem for OsFilesystem {
    type ReadFile = OsReadFile;
    type WriteFile = OsWriteFile;

    fn open(&self, name: &str) -> Result<Self::ReadFile, FsError> {
        let path = self.path(name);
        let file = File::open(&path).map_err(|e| FsError::io(path.display().to_string(), e))?;
        Ok(OsReadFile { path, file })
    }

    fn create(&self, name: &str) -> Result<Self::WriteFile, FsError> {
        let path = self.path(name);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| FsError::io(path.display().to_string(), e))?;
        Ok(OsWriteFile { path, file })
    }

    fn list(&self) -> Result<Vec<String>, FsError> {
        let read_dir =
            fs::read_dir(&self.dir).map_err(|e| FsError::io(self.dir.display().to_string(), e))?;
        let mut names = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| FsError::io(self.dir.display().to_string(), e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn delete(&self, name: &str) -> Result<(), FsError> {
        let path = self.path(name);
        fs::remove_file(&path).map_err(|e| FsError::io(path.display().to_string(), e))
    }

    fn truncate(&self, name: &str) -> Result<(), FsError> {
        let path = self.path(name);
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| FsError::io(path.display().to_string(), e))?;
        Ok(())
    }

    fn atomic_create_with(&self, name: &str, bytes: &[u8]) -> Result<(), FsError> {
        let path = self.path(name);
        let tmp_name = format!("{name}{TMP_SUFFIX}");
        let tmp_path = self.path(&tmp_name);

        {
            let mut f = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp_path)
                .map_err(|e| FsError::io(tmp_path.display().to_string(), e))?;
            f.write_all(bytes)
                .map_err(|e| FsError::io(tmp_path.display().to_string(), e))?;
            f.sync_all()
                .map_err(|e| FsError::io(tmp_path.display().to_string(), e))?;
        }

        fs::rename(&tmp_path, &path).map_err(|e| FsError::io(path.display().to_string(), e))
    }
}

/// A file opened via [`OsFilesystem::open`].
pub struct OsReadFile {
    path: PathBuf,
    file: File,
}

impl ReadFile for OsReadFile {
    fn size(&self) -> Result<u64, FsError> {
        self.file
            .metadata()
            .map(|m| m.len())
            .map_err(|e| FsError::io(self.path.display().to_string(), e))
    }

    fn read_at(&self, offset: u64, length: usize) -> Result<Vec<u8>, FsError> {
        let size = self.size()?;
        if offset.saturating_add(length as u64) > size {
            return Err(FsError::ReadPastEnd {
                offset,
                length,
                size,
            });
        }
        let mut file = self
            .file
            .try_clone()
            .map_err(|e| FsError::io(self.path.display().to_string(), e))?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|e| FsError::io(self.path.display().to_string(), e))?;
        let mut buf = vec![0u8; length];
        file.read_exact(&mut buf)
            .map_err(|e| FsError::io(self.path.display().to_string(), e))?;
        Ok(buf)
    }
}

/// A file opened via [`OsFilesystem::create`].
pub struct OsWriteFile {
    path: PathBuf,
    file: File,
}

impl WriteFile for OsWriteFile {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, FsError> {
        self.file
            .write_all(bytes)
            .map_err(|e| FsError::io(self.path.display().to_string(), e))?;
        Ok(bytes.len())
    }

    fn sync(&mut self) -> Result<(), FsError> {
        self.file
            .sync_all()
            .map_err(|e| FsError::io(self.path.display().to_string(), e))
    }
}
