use std::str::Utf8Error;

use thiserror::Error;

/// Failures while reading or writing a journal.
#[derive(Error, Debug)]
pub enum JournalError {
    /// The underlying file failed.
    #[error("journal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The file does not start with a current `ORJ1` header.
    #[error("bad journal header: {0}")]
    InvalidHeader(String),
    /// A frame header is malformed.
    #[error("bad frame at byte {offset}: {reason}")]
    InvalidFrame {
        /// Offset of the frame header.
        offset: u64,
        /// What is wrong with it.
        reason: String,
    },
    /// A record does not fit in one frame.
    #[error("record payload of {size} bytes exceeds the {max} byte frame limit")]
    PayloadTooLarge {
        /// Payload length.
        size: u64,
        /// Frame limit.
        max: u32,
    },
    /// A record payload is not UTF-8.
    #[error("record payload is not UTF-8: {0}")]
    PayloadEncoding(#[from] Utf8Error),
    /// A record payload is not a document put or delete.
    #[error("malformed document record: {0}")]
    Record(#[from] serde_json::Error),
    /// The file has some bytes but fewer than a header.
    #[error("{len}-byte file is too short to be a journal")]
    ShortFile {
        /// File length.
        len: u64,
    },
    /// The last frame is cut short (strict reads only).
    #[error("frame at byte {offset} is cut short")]
    TruncatedFrame {
        /// Offset of the frame header.
        offset: u64,
    },
}
