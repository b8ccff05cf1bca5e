//! Subcommand implementations.

pub mod balance;
pub mod check_config;
pub mod inspect;
pub mod requests;
pub mod stake_amount;

use oracle_core::DataRequest;
use oracle_store::{JournalStore, MemoryStore};

/// Reads and decodes a request document.
pub fn read_request(path: &str) -> Result<DataRequest, Box<dyn std::error::Error>> {
    let source =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    let request = DataRequest::from_json(&source)
        .map_err(|e| format!("Invalid data request {}: {}", path, e))?;
    Ok(request)
}

/// Loads a read-only copy of an existing store journal.
///
/// The file is neither created, truncated nor held open for writing, so a
/// running node can keep appending to it.
pub fn open_store(path: &str) -> Result<MemoryStore, Box<dyn std::error::Error>> {
    let store = JournalStore::read_snapshot(path)
        .map_err(|e| format!("Failed to open store {}: {}", path, e))?;
    Ok(store)
}
