//! In-memory document store.

use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::traits::DocumentStore;
use oracle_journal::{Document, DocumentRecord};

/// Document store held entirely in memory.
///
/// Also serves as the index behind [`JournalStore`](crate::JournalStore).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: BTreeMap<String, BTreeMap<String, Document>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a journal record.
    pub fn apply(&mut self, record: DocumentRecord) {
        match record {
            DocumentRecord::Put { table, id, doc } => {
                self.tables.entry(table).or_default().insert(id, doc);
            }
            DocumentRecord::Delete { table, id } => {
                if let Some(rows) = self.tables.get_mut(&table) {
                    rows.remove(&id);
                }
            }
        }
    }

    /// Returns true if `(table, id)` holds a document.
    pub fn contains(&self, table: &str, id: &str) -> bool {
        self.tables
            .get(table)
            .is_some_and(|rows| rows.contains_key(id))
    }

    /// Number of live documents across all tables.
    pub fn len(&self) -> usize {
        self.tables.values().map(BTreeMap::len).sum()
    }

    /// Returns true if no table holds a document.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live documents as put records, table by table.
    pub fn records(&self) -> impl Iterator<Item = DocumentRecord> + '_ {
        self.tables.iter().flat_map(|(table, rows)| {
            rows.iter().map(move |(id, doc)| DocumentRecord::Put {
                table: table.clone(),
                id: id.clone(),
                doc: doc.clone(),
            })
        })
    }
}

impl DocumentStore for MemoryStore {
    fn find_document_by_id(&self, table: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.tables.get(table).and_then(|rows| rows.get(id)).cloned())
    }

    fn create_document(&mut self, table: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        if self.contains(table, id) {
            return Err(StoreError::AlreadyExists {
                table: table.to_string(),
                id: id.to_string(),
            });
        }
        self.create_or_update_document(table, id, doc)
    }

    fn create_or_update_document(
        &mut self,
        table: &str,
        id: &str,
        doc: Document,
    ) -> Result<(), StoreError> {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(id.to_string(), doc);
        Ok(())
    }

    fn delete_document(&mut self, table: &str, id: &str) -> Result<(), StoreError> {
        if let Some(rows) = self.tables.get_mut(table) {
            rows.remove(id);
        }
        Ok(())
    }

    fn get_all_from_table(&self, table: &str) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .tables
            .get(table)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }
}
