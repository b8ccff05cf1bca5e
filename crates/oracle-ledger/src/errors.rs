use thiserror::Error;

/// Errors raised while persisting or restoring a ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The store failed.
    #[error("store error: {0}")]
    Store(#[from] oracle_store::StoreError),
    /// The persisted document does not have the ledger shape.
    #[error("malformed ledger document '{key}': {source}")]
    Malformed {
        /// Ledger key.
        key: String,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The ledger could not be encoded.
    #[error("ledger encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
