use codec::Encoder;
use fs::{ReadFile, WriteFile};

use crate::WalError;

const TAG_DATA: u8 = 1;
const TAG_COMMIT: u8 = 2;

/// Appends opaque byte records to a log file, each framed as a `DATA`
/// sub-record immediately followed by a `COMMIT` sub-record.
///
/// `add` builds the whole two-sub-record frame in a scratch buffer and
/// issues a single `write`, so a crash can never land between the `DATA`
/// and `COMMIT` halves of two different calls — only within one.
pub struct LogWriter<W> {
    file: W,
    buf: Vec<u8>,
}

impl<W: WriteFile> LogWriter<W> {
    pub fn new(file: W) -> Self {
        Self {
            file,
            buf: Vec::with_capacity(256),
        }
    }

    /// Appends one `DATA(data) || COMMIT` frame. Does not fsync; callers
    /// that need durability at a specific point call [`LogWriter::sync`].
    pub fn add(&mut self, data: &[u8]) -> Result<(), WalError> {
        self.buf.clear();
        let mut enc = Encoder::with_capacity(data.len() + 4);
        enc.u8(TAG_DATA);
        enc.array16(data)?;
        enc.u8(TAG_COMMIT);
        self.buf.extend_from_slice(enc.as_bytes());
        self.file.write(&self.buf)?;
        Ok(())
    }

    pub fn sync(&mut self) -> Result<(), WalError> {
        self.file.sync()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.file
    }
}

/// Replays a log file, returning the bytes of every transaction whose
/// `DATA` sub-record was fully present and immediately followed by a
/// valid `COMMIT`.
pub struct LogReader;

impl LogReader {
    /// Reads the entirety of `file` and recovers every committed record.
    ///
    /// Stops gracefully (returns what it has so far) on clean EOF, a
    /// truncated `DATA` header, a truncated `DATA` body, or a missing
    /// `COMMIT`. Returns `WalError::Corrupt` only when a byte is present
    /// where a `DATA` tag was expected and it is not `1`.
    pub fn recover_txns<R: ReadFile>(file: &R) -> Result<Vec<Vec<u8>>, WalError> {
        let bytes = file.read_all()?;
        Self::recover_txns_from_bytes(&bytes)
    }

    pub fn recover_txns_from_bytes(bytes: &[u8]) -> Result<Vec<Vec<u8>>, WalError> {
        let mut txns = Vec::new();
        let mut pos = 0usize;

        loop {
            if pos >= bytes.len() {
                break;
            }

            let tag = bytes[pos];
            if tag != TAG_DATA {
                // Tag 0 is reserved as "invalid" and never written by a
                // correct writer; treat it as a graceful stop rather than
                // corruption. Any other unexpected tag is real corruption.
                if tag == 0 {
                    break;
                }
                return Err(WalError::Corrupt);
            }

            // tag(1) + length(u16)
            if pos + 3 > bytes.len() {
                break;
            }
            let len = u16::from_le_bytes([bytes[pos + 1], bytes[pos + 2]]) as usize;
            let body_start = pos + 3;
            let body_end = body_start + len;
            if body_end >= bytes.len() {
                // truncated DATA body, or no room left for a COMMIT byte.
                break;
            }
            if bytes[body_end] != TAG_COMMIT {
                break;
            }

            txns.push(bytes[body_start..body_end].to_vec());
            pos = body_end + 1;
        }

        Ok(txns)
    }
}
