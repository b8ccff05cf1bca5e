//! Journal-backed document store.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::memory::MemoryStore;
use crate::traits::DocumentStore;
use oracle_journal::{
    Document, DocumentRecord, JournalReader, JournalWriter, ReadMode, WriteOptions,
};

/// Document store persisted as an append-only journal.
///
/// Opening replays the journal into an in-memory index; every mutation is
/// appended before the index changes. A torn tail left by a crash is cut
/// off on open.
pub struct JournalStore {
    path: PathBuf,
    options: WriteOptions,
    writer: JournalWriter,
    index: MemoryStore,
}

impl JournalStore {
    /// Opens (or creates) the journal at `path` and replays it.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut index = MemoryStore::new();

        if options.append {
            if let Some((file_len, valid_len)) = replay(&path, &mut index)? {
                if valid_len < file_len {
                    tracing::warn!(
                        path = %path.display(),
                        valid_len,
                        file_len,
                        "dropping torn journal tail"
                    );
                    OpenOptions::new().write(true).open(&path)?.set_len(valid_len)?;
                }
            }
        }

        let writer = JournalWriter::open(&path, options.clone())?;

        Ok(Self {
            path,
            options,
            writer,
            index,
        })
    }

    /// Replays the journal at `path` into a detached in-memory copy.
    ///
    /// The file is never written: a torn tail is skipped, not cut, so this is
    /// safe while another process appends. Fails if the file does not exist.
    pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<MemoryStore, StoreError> {
        let path = path.as_ref();
        let mut index = MemoryStore::new();
        if replay(path, &mut index)?.is_none() {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no journal at {}", path.display()),
            )));
        }
        Ok(index)
    }

    /// Path of the backing journal.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of live documents.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Rewrites the journal so it only holds the live documents.
    pub fn compact(&mut self) -> Result<(), StoreError> {
        let mut compact_path = self.path.clone().into_os_string();
        compact_path.push(".compact");
        let compact_path = PathBuf::from(compact_path);

        let rewrite = WriteOptions {
            append: false,
            create: true,
            sync: self.options.sync,
        };
        let mut writer = JournalWriter::open(&compact_path, rewrite)?;
        for record in self.index.records() {
            writer.append(&record)?;
        }
        writer.finish()?;

        fs::rename(&compact_path, &self.path)?;
        self.writer = JournalWriter::open(
            &self.path,
            WriteOptions {
                append: true,
                create: false,
                sync: self.options.sync,
            },
        )?;

        tracing::debug!(path = %self.path.display(), documents = self.index.len(), "journal compacted");
        Ok(())
    }

    fn commit(&mut self, record: DocumentRecord) -> Result<(), StoreError> {
        self.writer.append(&record)?;
        self.index.apply(record);
        Ok(())
    }
}

impl DocumentStore for JournalStore {
    fn find_document_by_id(&self, table: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.index.find_document_by_id(table, id)
    }

    fn create_document(&mut self, table: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        if self.index.contains(table, id) {
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
        self.commit(DocumentRecord::Put {
            table: table.to_string(),
            id: id.to_string(),
            doc,
        })
    }

    fn delete_document(&mut self, table: &str, id: &str) -> Result<(), StoreError> {
        if !self.index.contains(table, id) {
            return Ok(());
        }
        self.commit(DocumentRecord::Delete {
            table: table.to_string(),
            id: id.to_string(),
        })
    }

    fn get_all_from_table(&self, table: &str) -> Result<Vec<Document>, StoreError> {
        self.index.get_all_from_table(table)
    }
}

/// Replays `path` into `index` in permissive mode.
///
/// Returns `None` for a missing file, otherwise the file length and the
/// length covered by complete frames.
fn replay(path: &Path, index: &mut MemoryStore) -> Result<Option<(u64, u64)>, StoreError> {
    let file_len = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    if file_len == 0 {
        return Ok(Some((0, 0)));
    }

    let mut reader = JournalReader::open(path, ReadMode::Permissive)?;
    let mut replayed = 0usize;
    while let Some(record) = reader.read_record()? {
        index.apply(record);
        replayed += 1;
    }

    tracing::debug!(
        path = %path.display(),
        replayed,
        documents = index.len(),
        "journal replayed"
    );
    Ok(Some((file_len, reader.position())))
}
