//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Journal backend error.
    #[error("journal error: {0}")]
    Journal(#[from] oracle_journal::JournalError),
    /// A document could not be encoded or decoded.
    #[error("document error: {0}")]
    Document(#[from] serde_json::Error),
    /// `create_document` hit an existing id.
    #[error("document '{id}' already exists in table '{table}'")]
    AlreadyExists {
        /// Table name.
        table: String,
        /// Document id.
        id: String,
    },
}
