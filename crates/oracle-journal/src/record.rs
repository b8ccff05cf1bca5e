use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::JournalError;
use crate::frame::FrameKind;

/// Opaque stored document.
pub type Document = Value;

/// A single mutation recorded in the journal.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentRecord {
    /// `doc` becomes the document stored under `(table, id)`.
    Put {
        /// Table name.
        table: String,
        /// Document id within the table.
        id: String,
        /// Document body.
        doc: Document,
    },
    /// The document under `(table, id)` is removed.
    Delete {
        /// Table name.
        table: String,
        /// Document id within the table.
        id: String,
    },
}

#[derive(Serialize, Deserialize)]
struct PutPayload {
    table: String,
    id: String,
    doc: Document,
}

#[derive(Serialize, Deserialize)]
struct DeletePayload {
    table: String,
    id: String,
}

impl DocumentRecord {
    /// Table the record applies to.
    pub fn table(&self) -> &str {
        match self {
            DocumentRecord::Put { table, .. } | DocumentRecord::Delete { table, .. } => table,
        }
    }

    /// Document id the record applies to.
    pub fn id(&self) -> &str {
        match self {
            DocumentRecord::Put { id, .. } | DocumentRecord::Delete { id, .. } => id,
        }
    }

    /// Frame kind used to store this record.
    pub fn kind(&self) -> FrameKind {
        match self {
            DocumentRecord::Put { .. } => FrameKind::Put,
            DocumentRecord::Delete { .. } => FrameKind::Delete,
        }
    }

    /// Encodes the frame payload.
    pub fn encode(&self) -> Result<Vec<u8>, JournalError> {
        let bytes = match self {
            DocumentRecord::Put { table, id, doc } => serde_json::to_vec(&PutPayload {
                table: table.clone(),
                id: id.clone(),
                doc: doc.clone(),
            })?,
            DocumentRecord::Delete { table, id } => serde_json::to_vec(&DeletePayload {
                table: table.clone(),
                id: id.clone(),
            })?,
        };
        Ok(bytes)
    }

    /// Decodes a payload of a known frame kind. Unknown kinds yield `None`.
    pub fn decode(kind: FrameKind, payload: &[u8]) -> Result<Option<Self>, JournalError> {
        if let FrameKind::Unknown(_) = kind {
            return Ok(None);
        }
        let text = std::str::from_utf8(payload)?;
        match kind {
            FrameKind::Put => {
                let PutPayload { table, id, doc } = serde_json::from_str(text)?;
                Ok(Some(DocumentRecord::Put { table, id, doc }))
            }
            FrameKind::Delete => {
                let DeletePayload { table, id } = serde_json::from_str(text)?;
                Ok(Some(DocumentRecord::Delete { table, id }))
            }
            FrameKind::Unknown(_) => Ok(None),
        }
    }
}
