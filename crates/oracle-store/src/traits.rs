//! Storage contract consumed by the ledger and the node.

use crate::error::StoreError;
use oracle_journal::Document;

/// Table holding ledger documents, keyed by ledger key.
pub const TABLE_BALANCES: &str = "balances";
/// Table holding data requests, keyed by internal id.
pub const TABLE_DATA_REQUESTS: &str = "data_requests";

/// Document store keyed by `(table, id)`.
///
/// A missing document is `Ok(None)`, never an error.
pub trait DocumentStore {
    /// Looks up a document.
    fn find_document_by_id(&self, table: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Inserts a document; fails with [`StoreError::AlreadyExists`] if the id is taken.
    fn create_document(&mut self, table: &str, id: &str, doc: Document) -> Result<(), StoreError>;

    /// Inserts or replaces a document.
    fn create_or_update_document(
        &mut self,
        table: &str,
        id: &str,
        doc: Document,
    ) -> Result<(), StoreError>;

    /// Removes a document; removing a missing document succeeds.
    fn delete_document(&mut self, table: &str, id: &str) -> Result<(), StoreError>;

    /// All documents of a table, ordered by id.
    fn get_all_from_table(&self, table: &str) -> Result<Vec<Document>, StoreError>;
}
