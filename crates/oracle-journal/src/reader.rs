//! Journal reader implementation.

use crate::errors::JournalError;
use crate::frame::{FrameKind, JournalHeader, RecordFrame, FRAME_HEADER_SIZE, HEADER_SIZE};
use crate::record::DocumentRecord;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read mode for handling truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Strict mode: truncated frames are errors.
    Strict,
    /// Permissive mode: truncation is treated as end-of-file.
    Permissive,
}

/// Sequential reader over a journal file.
///
/// A crash mid-append leaves a partial frame at the tail. [`ReadMode::Permissive`]
/// stops cleanly before it; [`ReadMode::Strict`] reports it.
pub struct JournalReader {
    reader: BufReader<File>,
    mode: ReadMode,
    position: u64,
    len: u64,
}

impl JournalReader {
    /// Opens a journal and validates its header.
    pub fn open<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<Self, JournalError> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        let mut reader = BufReader::new(file);

        let mut header_bytes = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header_bytes)?;
        JournalHeader::from_bytes(&header_bytes)?;

        Ok(Self {
            reader,
            mode,
            position: HEADER_SIZE as u64,
            len,
        })
    }

    /// Byte offset just past the last complete frame read.
    pub fn position(&self) -> u64 {
        self.position
    }

    fn truncated(&self, offset: u64) -> Result<Option<(FrameKind, Vec<u8>)>, JournalError> {
        match self.mode {
            ReadMode::Permissive => Ok(None),
            ReadMode::Strict => Err(JournalError::TruncatedFrame { offset }),
        }
    }

    /// Reads the next raw frame. Returns `Ok(None)` at end-of-file.
    pub fn read_frame(&mut self) -> Result<Option<(FrameKind, Vec<u8>)>, JournalError> {
        if self.position >= self.len {
            return Ok(None);
        }

        let frame_offset = self.position;
        let mut header = [0u8; FRAME_HEADER_SIZE];
        match self.reader.read_exact(&mut header) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return self.truncated(frame_offset)
            }
            Err(e) => return Err(e.into()),
        }
        let frame = RecordFrame::from_bytes(&header, frame_offset)?;

        let mut payload = vec![0u8; frame.len as usize];
        match self.reader.read_exact(&mut payload) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return self.truncated(frame_offset)
            }
            Err(e) => return Err(e.into()),
        }
        // only advance past complete frames so a torn tail can be cut off
        self.position = frame_offset + FRAME_HEADER_SIZE as u64 + frame.len as u64;

        Ok(Some((frame.kind, payload)))
    }

    /// Reads the next document record, skipping frames of unknown kinds.
    pub fn read_record(&mut self) -> Result<Option<DocumentRecord>, JournalError> {
        while let Some((kind, payload)) = self.read_frame()? {
            if let Some(record) = DocumentRecord::decode(kind, &payload)? {
                return Ok(Some(record));
            }
            tracing::debug!(kind = kind.to_byte(), "skipping unknown journal frame");
        }
        Ok(None)
    }
}

impl Iterator for JournalReader {
    type Item = Result<DocumentRecord, JournalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}
