use std::io;

/// Fatal, I/O-class errors from the filesystem façade.
///
/// Every variant here is expected to propagate as-is up through
/// `engine::EngineError::Io` — none of them are recoverable at this layer.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}: not found")]
    NotFound(String),

    #[error("read past end of file: offset {offset} + length {length} > size {size}")]
    ReadPastEnd {
        offset: u64,
        length: usize,
        size: u64,
    },
}

impl FsError {
    pub(crate) fn io(path: impl Into<String>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            return FsError::NotFound(path);
        }
        FsError::Io { path, source }
    }
}
