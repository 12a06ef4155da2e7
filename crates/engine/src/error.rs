/// Fatal errors surfaced by the engine.
///
/// Mirrors `spec.md` §7's three fatal error kinds: an I/O failure from the
/// filesystem façade, a format/corruption error from decoding, and a
/// contract violation (an invariant broken by the caller or by a lower
/// crate's own API misuse). `spec.md`'s fourth case, `Absent`, is not an
/// error at all — every read-path method returns `Option` instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Io(#[from] fs::FsError),

    #[error("format error: {0}")]
    Format(String),

    #[error("contract violation: {0}")]
    Contract(String),
}

impl From<codec::CodecError> for EngineError {
    fn from(e: codec::CodecError) -> Self {
        match e {
            codec::CodecError::TooLarge(_) => EngineError::Contract(e.to_string()),
            codec::CodecError::UnexpectedEof => EngineError::Format(e.to_string()),
        }
    }
}

impl From<wal::WalError> for EngineError {
    fn from(e: wal::WalError) -> Self {
        match e {
            wal::WalError::Fs(fe) => EngineError::Io(fe),
            wal::WalError::Codec(ce) => ce.into(),
            other => EngineError::Format(other.to_string()),
        }
    }
}

impl From<sstable::TableError> for EngineError {
    fn from(e: sstable::TableError) -> Self {
        match e {
            sstable::TableError::Fs(fe) => EngineError::Io(fe),
            sstable::TableError::Codec(ce) => ce.into(),
            sstable::TableError::NonMonotonicKey { .. } => EngineError::Contract(e.to_string()),
            other => EngineError::Format(other.to_string()),
        }
    }
}
