//! Typed access to the data requests table.

use crate::error::StoreError;
use crate::traits::{DocumentStore, TABLE_DATA_REQUESTS};
use oracle_core::DataRequest;

/// Stores `request` under its internal id, replacing any previous version.
pub fn save_request<S: DocumentStore + ?Sized>(
    store: &mut S,
    request: &DataRequest,
) -> Result<(), StoreError> {
    let doc = serde_json::to_value(request)?;
    store.create_or_update_document(TABLE_DATA_REQUESTS, &request.internal_id, doc)
}

/// Loads the request stored under `internal_id`.
pub fn load_request<S: DocumentStore + ?Sized>(
    store: &S,
    internal_id: &str,
) -> Result<Option<DataRequest>, StoreError> {
    match store.find_document_by_id(TABLE_DATA_REQUESTS, internal_id)? {
        Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
        None => Ok(None),
    }
}

/// Removes the request stored under `internal_id`.
pub fn delete_request<S: DocumentStore + ?Sized>(
    store: &mut S,
    internal_id: &str,
) -> Result<(), StoreError> {
    store.delete_document(TABLE_DATA_REQUESTS, internal_id)
}

/// All stored requests, ordered by internal id.
///
/// Documents that no longer decode are skipped with a warning rather than
/// failing the whole listing.
pub fn all_requests<S: DocumentStore + ?Sized>(store: &S) -> Result<Vec<DataRequest>, StoreError> {
    let mut requests = Vec::new();
    for doc in store.get_all_from_table(TABLE_DATA_REQUESTS)? {
        match serde_json::from_value::<DataRequest>(doc) {
            Ok(request) => requests.push(request),
            Err(err) => tracing::warn!(error = %err, "skipping undecodable data request"),
        }
    }
    Ok(requests)
}
