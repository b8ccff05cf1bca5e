//! Append-only journal of document writes.
//!
//! This crate provides:
//! - A framed, append-only file format for document put/delete records
//! - Reader/writer APIs with strict and permissive handling of a torn tail
//!
//! The store replays a journal front to back; the last record for a
//! `(table, id)` pair wins.
//!
//! ## Layout
//!
//! ```text
//! header  : "ORJ1" | version u16 LE | flags u16 LE (0) | reserved [0; 8]
//! frame*  : kind u8 | reserved [0; 3] | len u32 LE | payload (UTF-8 JSON)
//! ```
//!
//! Put payloads are `{"table", "id", "doc"}`, delete payloads `{"table", "id"}`.

#![deny(missing_docs)]

/// Error types for journal operations.
pub mod errors;
/// Frame and header encoding.
pub mod frame;
/// Journal reader implementation.
pub mod reader;
/// Document records carried in frames.
pub mod record;
/// Journal writer implementation.
pub mod writer;

pub use errors::JournalError;
pub use frame::{FrameKind, JournalHeader, RecordFrame};
pub use reader::{JournalReader, ReadMode};
pub use record::{Document, DocumentRecord};
pub use writer::{JournalWriter, WriteOptions};
