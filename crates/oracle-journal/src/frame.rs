use crate::errors::JournalError;

/// Journal file magic bytes.
pub const MAGIC: &[u8; 4] = b"ORJ1";

/// Current journal format version.
pub const VERSION: u16 = 0x0001;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 16;

/// Frame header size in bytes.
pub const FRAME_HEADER_SIZE: usize = 8;

/// Largest payload a single frame may carry: 16 MiB.
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

/// Frame kind byte for a document put.
pub const FRAME_KIND_PUT: u8 = 0x01;

/// Frame kind byte for a document delete.
pub const FRAME_KIND_DELETE: u8 = 0x02;

/// Journal file header.
///
/// Layout: magic (4), version LE (2), flags LE (2), reserved (8). Flags and
/// reserved bytes must be zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalHeader {
    /// Format version.
    pub version: u16,
}

impl JournalHeader {
    /// Header for the current format version.
    pub fn new() -> Self {
        Self { version: VERSION }
    }

    /// Serializes the header.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(MAGIC);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes
    }

    /// Parses and validates a header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, JournalError> {
        let Some(bytes) = bytes.get(..HEADER_SIZE) else {
            return Err(JournalError::InvalidHeader(format!(
                "need {} bytes, got {}",
                HEADER_SIZE,
                bytes.len()
            )));
        };

        if &bytes[0..4] != MAGIC {
            return Err(JournalError::InvalidHeader(format!(
                "not an oracle journal (magic {:02x?})",
                &bytes[0..4]
            )));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(JournalError::InvalidHeader(format!(
                "version {} is not supported (expected {})",
                version, VERSION
            )));
        }

        if bytes[6..].iter().any(|b| *b != 0) {
            return Err(JournalError::InvalidHeader(
                "flags and reserved bytes must be zero".to_string(),
            ));
        }

        Ok(Self { version })
    }
}

impl Default for JournalHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind of a record frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Insert or replace a document.
    Put,
    /// Remove a document.
    Delete,
    /// Written by a newer format; readers skip it.
    Unknown(u8),
}

impl FrameKind {
    /// Decodes a kind byte.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            FRAME_KIND_PUT => FrameKind::Put,
            FRAME_KIND_DELETE => FrameKind::Delete,
            other => FrameKind::Unknown(other),
        }
    }

    /// Encodes the kind byte.
    pub fn to_byte(self) -> u8 {
        match self {
            FrameKind::Put => FRAME_KIND_PUT,
            FrameKind::Delete => FRAME_KIND_DELETE,
            FrameKind::Unknown(b) => b,
        }
    }
}

/// Header preceding each payload: kind (1), reserved zeros (3), length LE (4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFrame {
    /// Frame kind.
    pub kind: FrameKind,
    /// Payload length in bytes.
    pub len: u32,
}

impl RecordFrame {
    /// Creates a frame header, rejecting oversized payloads.
    pub fn new(kind: FrameKind, len: u32) -> Result<Self, JournalError> {
        if len > MAX_PAYLOAD_SIZE {
            return Err(JournalError::PayloadTooLarge {
                size: u64::from(len),
                max: MAX_PAYLOAD_SIZE,
            });
        }
        Ok(Self { kind, len })
    }

    /// Serializes the frame header.
    pub fn to_bytes(&self) -> [u8; FRAME_HEADER_SIZE] {
        let mut bytes = [0u8; FRAME_HEADER_SIZE];
        bytes[0] = self.kind.to_byte();
        bytes[4..8].copy_from_slice(&self.len.to_le_bytes());
        bytes
    }

    /// Parses a frame header found at `offset`.
    pub fn from_bytes(bytes: &[u8], offset: u64) -> Result<Self, JournalError> {
        let invalid = |reason: String| JournalError::InvalidFrame { offset, reason };

        let Some(bytes) = bytes.get(..FRAME_HEADER_SIZE) else {
            return Err(invalid(format!(
                "need {} header bytes, got {}",
                FRAME_HEADER_SIZE,
                bytes.len()
            )));
        };
        if bytes[1..4] != [0, 0, 0] {
            return Err(invalid("reserved bytes must be zero".to_string()));
        }

        let len = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if len > MAX_PAYLOAD_SIZE {
            return Err(invalid(format!(
                "declared length {} is over the {} byte limit",
                len, MAX_PAYLOAD_SIZE
            )));
        }

        Ok(Self {
            kind: FrameKind::from_byte(bytes[0]),
            len,
        })
    }
}
