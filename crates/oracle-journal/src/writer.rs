//! Journal writer implementation.

use crate::errors::JournalError;
use crate::frame::{FrameKind, JournalHeader, RecordFrame, HEADER_SIZE, MAX_PAYLOAD_SIZE};
use crate::record::DocumentRecord;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// How a journal is opened for writing.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// fsync after every append. Off by default.
    pub sync: bool,
    /// Create a missing file. On by default.
    pub create: bool,
    /// Keep the records already in the file. On by default; when off the
    /// journal is emptied down to its header.
    pub append: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sync: false,
            create: true,
            append: true,
        }
    }
}

/// Appends document records to a journal file.
///
/// A new or empty file receives a header first. An existing file must start
/// with a valid header; records are appended after the last frame.
///
/// # Example
///
/// ```rust
/// use oracle_journal::{DocumentRecord, JournalWriter, WriteOptions};
/// use serde_json::json;
///
/// let dir = tempfile::tempdir()?;
/// let mut writer = JournalWriter::open(dir.path().join("store.orj"), WriteOptions::default())?;
/// writer.append(&DocumentRecord::Put {
///     table: "balances".to_string(),
///     id: "near".to_string(),
///     doc: json!({ "balance": "100" }),
/// })?;
/// writer.finish()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct JournalWriter {
    file: File,
    sync: bool,
}

impl JournalWriter {
    /// Opens or creates a journal file for writing.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened, holds fewer bytes than a header
    /// without being empty, or starts with a foreign header.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, JournalError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(options.create)
            .open(path)?;
        let mut writer = Self {
            file,
            sync: options.sync,
        };

        match writer.file.metadata()?.len() {
            0 => {
                writer
                    .file
                    .write_all(&JournalHeader::new().to_bytes())?;
                writer.flush()?;
            }
            len if len < HEADER_SIZE as u64 => return Err(JournalError::ShortFile { len }),
            _ => writer.position_after_header(options.append)?,
        }

        Ok(writer)
    }

    fn position_after_header(&mut self, keep_records: bool) -> Result<(), JournalError> {
        let mut header = [0u8; HEADER_SIZE];
        self.file.seek(SeekFrom::Start(0))?;
        self.file.read_exact(&mut header)?;
        JournalHeader::from_bytes(&header)?;

        if !keep_records {
            self.file.set_len(HEADER_SIZE as u64)?;
        }
        self.file.seek(SeekFrom::End(0))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), JournalError> {
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        Ok(())
    }

    /// Appends one document record.
    pub fn append(&mut self, record: &DocumentRecord) -> Result<(), JournalError> {
        let payload = record.encode()?;
        self.append_raw(record.kind(), &payload)
    }

    /// Appends a frame with an arbitrary kind and payload.
    pub fn append_raw(&mut self, kind: FrameKind, payload: &[u8]) -> Result<(), JournalError> {
        let size = payload.len() as u64;
        if size > u64::from(MAX_PAYLOAD_SIZE) {
            return Err(JournalError::PayloadTooLarge {
                size,
                max: MAX_PAYLOAD_SIZE,
            });
        }
        let frame = RecordFrame::new(kind, size as u32)?;

        let mut bytes = Vec::with_capacity(frame.to_bytes().len() + payload.len());
        bytes.extend_from_slice(&frame.to_bytes());
        bytes.extend_from_slice(payload);

        let start = self.file.stream_position()?;
        if let Err(err) = self.file.write_all(&bytes).map_err(JournalError::from) {
            self.rollback(start);
            return Err(err);
        }
        self.flush()
    }

    /// Cuts a failed append back to `len` so later frames follow a complete one.
    fn rollback(&mut self, len: u64) {
        let restored = self
            .file
            .set_len(len)
            .and_then(|()| self.file.seek(SeekFrom::Start(len)).map(|_| ()));
        if let Err(err) = restored {
            tracing::error!(len, error = %err, "could not roll back a partial journal append");
        }
    }

    /// Flushes and closes the file.
    pub fn finish(mut self) -> Result<(), JournalError> {
        self.flush()
    }
}

impl Drop for JournalWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
