//! # Filesystem façade
//!
//! A small, database-specific view of a single directory: open, create,
//! list, delete, truncate, and an atomic create-or-replace primitive. Every
//! other crate in this workspace that touches disk (`wal`, `sstable`,
//! `engine::manifest`) goes through a [`Filesystem`] implementation instead
//! of calling `std::fs` directly, so that crash-safety tests can swap in
//! [`MemFilesystem`] and truncate a log or table file at an arbitrary byte
//! boundary without touching real disk.
//!
//! The store only requires [`Filesystem::atomic_create_with`] to actually be
//! atomic for the `manifest` file — ordinary writes need only
//! append-ordering, and `fsync` is the caller's responsibility (see
//! [`WriteFile::sync`]).

mod error;
mod mem;
mod os;

pub use error::FsError;
pub use mem::MemFilesystem;
pub use os::OsFilesystem;

#[cfg(test)]
mod tests;

/// A file open for sequential or random-access reads.
pub trait ReadFile {
    /// Total size of the file in bytes.
    fn size(&self) -> Result<u64, FsError>;

    /// Reads `length` bytes starting at `offset`.
    fn read_at(&self, offset: u64, length: usize) -> Result<Vec<u8>, FsError>;

    /// Reads the entire remaining contents of the file sequentially from
    /// the start.
    fn read_all(&self) -> Result<Vec<u8>, FsError> {
        let size = self.size()?;
        self.read_at(0, size as usize)
    }
}

/// A file open for append-only writes.
pub trait WriteFile {
    /// Appends `bytes` to the file, returning the number of bytes written.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, FsError>;

    /// Forces previously written bytes to durable storage. The façade's
    /// append-ordering guarantee holds regardless of whether this is ever
    /// called; `sync` only affects how soon writes become durable, not
    /// their order.
    fn sync(&mut self) -> Result<(), FsError>;
}

/// A database-specific view of a single directory.
///
/// Implementations are not expected to be safe for concurrent use by more
/// than one database process; within a process, callers serialize access
/// through the engine's own lock (see the concurrency model in
/// `SPEC_FULL.md` §5).
pub trait Filesystem {
    type ReadFile: ReadFile;
    type WriteFile: WriteFile;

    /// Opens an existing file for reading. `name` must already exist.
    fn open(&self, name: &str) -> Result<Self::ReadFile, FsError>;

    /// Creates a new, empty file for appending. If `name` already exists
    /// its previous contents are discarded.
    fn create(&self, name: &str) -> Result<Self::WriteFile, FsError>;

    /// Lists the base names of every entry directly in this directory.
    fn list(&self) -> Result<Vec<String>, FsError>;

    /// Deletes `name`. `name` must exist.
    fn delete(&self, name: &str) -> Result<(), FsError>;

    /// Truncates `name` to zero length. `name` must exist.
    fn truncate(&self, name: &str) -> Result<(), FsError>;

    /// Durably replaces `name` with `bytes`, atomically: the file either
    /// has its old contents or the new ones, never a partial write, even
    /// across a crash. Implementations typically do this with a temp file
    /// plus rename.
    fn atomic_create_with(&self, name: &str, bytes: &[u8]) -> Result<(), FsError>;
}
