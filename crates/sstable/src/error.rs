use codec::CodecError;

/// Fatal errors from table writing, reading, or merging.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Fs(#[from] fs::FsError),

    #[error("table has zero entries; empty tables are not allowed")]
    Empty,

    #[error("table file is smaller than the trailing handle ({size} bytes)")]
    TooSmall { size: u64 },

    #[error("out-of-order update: key {key} is not >= current block max {current_max}")]
    NonMonotonicKey { key: u64, current_max: u64 },
}
