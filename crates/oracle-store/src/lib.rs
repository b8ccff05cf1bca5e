//! Document storage for the oracle node.
//!
//! This crate provides:
//! - The `DocumentStore` contract (find/create/upsert/delete/list by table)
//! - `MemoryStore`, an in-memory backend
//! - `JournalStore`, a backend persisted through `oracle-journal`
//! - Typed helpers for the data requests table
//!
//! A missing document is a normal answer (`Ok(None)`), not an error.

#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// Journal-backed storage implementation.
pub mod journal;
/// In-memory storage implementation.
pub mod memory;
/// Storage contract and table names.
pub mod traits;
/// Typed data request access.
pub mod typed;

pub use error::StoreError;
pub use journal::JournalStore;
pub use memory::MemoryStore;
pub use oracle_journal::{Document, WriteOptions};
pub use traits::{DocumentStore, TABLE_BALANCES, TABLE_DATA_REQUESTS};
pub use typed::{all_requests, delete_request, load_request, save_request};
