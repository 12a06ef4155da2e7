use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{FsError, ReadFile, WriteFile};

/// An in-memory [`crate::Filesystem`], for crash-injection tests.
///
/// `MemFilesystem` is deliberately not a full filesystem emulation: it
/// exists so a test can write a log or table through the normal write path
/// and then truncate the resulting buffer to an arbitrary byte offset,
/// simulating a process that died mid-`write`, without needing to stop a
/// real process partway through a real syscall.
#[derive(Clone, Default)]
pub struct MemFilesystem {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Truncates `name`'s backing buffer to `len` bytes, as if a write had
    /// been interrupted after `len` bytes made it to "disk". Panics if
    /// `name` does not exist or `len` exceeds its current size.
    pub fn crash_truncate(&self, name: &str, len: usize) {
        let mut files = self.files.lock().unwrap();
        let buf = files.get_mut(name).expect("crash_truncate: no such file");
        assert!(len <= buf.len(), "crash_truncate: len exceeds file size");
        buf.truncate(len);
    }
}

impl crate::Filesystem for MemFilesystem {
    type ReadFile = MemReadFile;
    type WriteFile = MemWriteFile;

    fn open(&self, name: &str) -> Result<Self::ReadFile, FsError> {
        let files = self.files.lock().unwrap();
        let bytes = files
            .get(name)
            .ok_or_else(|| FsError::NotFound(name.to_string()))?
            .clone();
        Ok(MemReadFile { bytes })
    }

    fn create(&self, name: &str) -> Result<Self::WriteFile, FsError> {
        let mut files = self.files.lock().unwrap();
        files.insert(name.to_string(), Vec::new());
        Ok(MemWriteFile {
            name: name.to_string(),
            files: self.files.clone(),
        })
    }

    fn list(&self) -> Result<Vec<String>, FsError> {
        let files = self.files.lock().unwrap();
        Ok(files.keys().cloned().collect())
    }

    fn delete(&self, name: &str) -> Result<(), FsError> {
        let mut files = self.files.lock().unwrap();
        files
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| FsError::NotFound(name.to_string()))
    }

    fn truncate(&self, name: &str) -> Result<(), FsError> {
        let mut files = self.files.lock().unwrap();
        let buf = files
            .get_mut(name)
            .ok_or_else(|| FsError::NotFound(name.to_string()))?;
        buf.clear();
        Ok(())
    }

    fn atomic_create_with(&self, name: &str, bytes: &[u8]) -> Result<(), FsError> {
        let mut files = self.files.lock().unwrap();
        files.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// A snapshot of a file's bytes at the moment it was opened.
///
/// `MemFilesystem` hands out full copies rather than shared handles: it
/// keeps the reader/writer split honest (a reader never observes a writer's
/// later appends) at the cost of being unsuitable for anything but tests.
pub struct MemReadFile {
    bytes: Vec<u8>,
}

impl ReadFile for MemReadFile {
    fn size(&self) -> Result<u64, FsError> {
        Ok(self.bytes.len() as u64)
    }

    fn read_at(&self, offset: u64, length: usize) -> Result<Vec<u8>, FsError> {
        let size = self.bytes.len() as u64;
        if offset.saturating_add(length as u64) > size {
            return Err(FsError::ReadPastEnd {
                offset,
                length,
                size,
            });
        }
        let start = offset as usize;
        Ok(self.bytes[start..start + length].to_vec())
    }
}

pub struct MemWriteFile {
    name: String,
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl WriteFile for MemWriteFile {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, FsError> {
        let mut files = self.files.lock().unwrap();
        let buf = files
            .get_mut(&self.name)
            .ok_or_else(|| FsError::NotFound(self.name.clone()))?;
        buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn sync(&mut self) -> Result<(), FsError> {
        Ok(())
    }
}
