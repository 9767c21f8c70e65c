//! Document store contract and in-memory implementation

use crate::document::StoredDocument;
use crate::error::StoreError;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use std::fmt;

/// Persistence contract for one document generation
///
/// Text export/import are provided in terms of the other operations.
pub trait DocumentStore<D: StoredDocument> {
    /// All documents, ordered by id
    fn list(&self) -> Vec<D>;

    /// One document by id
    fn get(&self, id: &str) -> Option<D>;

    /// Save a document, stamping `updatedAt` and the next revision
    ///
    /// Returns the revision written.
    ///
    /// # Errors
    /// [`StoreError::EmptyId`] for a blank id, [`StoreError::RevisionOverflow`]
    /// when the revision counter is exhausted
    fn save(&self, doc: D) -> Result<u64, StoreError>;

    /// Insert a document exactly as given, without stamping
    ///
    /// # Errors
    /// [`StoreError::EmptyId`] for a blank id
    fn restore(&self, doc: D) -> Result<(), StoreError>;

    /// Delete by id; returns whether a document was removed
    fn delete(&self, id: &str) -> bool;

    /// Export every document as a pretty-printed JSON array
    ///
    /// # Errors
    /// [`StoreError::Serialize`] if a document cannot be encoded
    fn export_text(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(&self.list()).map_err(|source| StoreError::Serialize {
            collection: D::COLLECTION,
            source,
        })
    }

    /// Import a JSON array produced by [`DocumentStore::export_text`]
    ///
    /// Every element is checked and decoded before anything is written, so a
    /// bad element leaves the store unchanged. Imported documents are
    /// restored as is. Returns the number imported.
    ///
    /// # Errors
    /// [`StoreError`] naming the first offending element
    fn import_text(&self, text: &str) -> Result<usize, StoreError> {
        let value: Value = serde_json::from_str(text).map_err(|source| StoreError::Parse {
            collection: D::COLLECTION,
            source,
        })?;
        let Value::Array(items) = value else {
            return Err(StoreError::NotAnArray {
                collection: D::COLLECTION,
            });
        };

        let docs = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                D::validate_stored(&item, index)?;
                serde_json::from_value::<D>(item).map_err(|source| StoreError::InvalidDocument {
                    collection: D::COLLECTION,
                    index,
                    source,
                })
            })
            .collect::<Result<Vec<D>, StoreError>>()?;

        let count = docs.len();
        for doc in docs {
            self.restore(doc)?;
        }

        tracing::info!("Imported {} documents into {}", count, D::COLLECTION);
        Ok(count)
    }
}

/// A stored document and its store revision
#[derive(Debug, Clone)]
struct StoredRecord<D> {
    document: D,
    revision: u64,
}

/// Concurrent in-memory store
pub struct MemoryStore<D: StoredDocument> {
    records: DashMap<String, StoredRecord<D>>,
}

impl<D: StoredDocument> MemoryStore<D> {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Number of documents
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Current revision of a document
    #[must_use]
    pub fn revision(&self, id: &str) -> Option<u64> {
        self.records.get(id).map(|record| record.revision)
    }

    fn check_id(doc: &D) -> Result<String, StoreError> {
        let id = doc.id().trim();
        if id.is_empty() {
            return Err(StoreError::EmptyId {
                collection: D::COLLECTION,
            });
        }
        Ok(doc.id().to_string())
    }
}

impl<D: StoredDocument> Default for MemoryStore<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: StoredDocument> fmt::Debug for MemoryStore<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("collection", &D::COLLECTION)
            .field("len", &self.records.len())
            .finish()
    }
}

impl<D: StoredDocument> DocumentStore<D> for MemoryStore<D> {
    fn list(&self) -> Vec<D> {
        let mut docs: Vec<D> = self
            .records
            .iter()
            .map(|entry| entry.value().document.clone())
            .collect();
        docs.sort_by(|a, b| a.id().cmp(b.id()));
        docs
    }

    fn get(&self, id: &str) -> Option<D> {
        self.records.get(id).map(|record| record.document.clone())
    }

    fn save(&self, mut doc: D) -> Result<u64, StoreError> {
        let id = Self::check_id(&doc)?;

        let entry = self.records.entry(id);
        let current = match &entry {
            Entry::Occupied(occupied) => occupied.get().revision,
            Entry::Vacant(_) => 0,
        };
        // nothing is written when the counter cannot advance
        let revision = current
            .max(doc.revision())
            .checked_add(1)
            .ok_or_else(|| StoreError::RevisionOverflow {
                collection: D::COLLECTION,
                id: entry.key().clone(),
            })?;

        doc.stamp(Utc::now(), revision);
        let stored = entry.insert(StoredRecord {
            document: doc,
            revision,
        });

        tracing::debug!("Saved {} revision {} in {}", stored.key(), revision, D::COLLECTION);
        Ok(revision)
    }

    fn restore(&self, doc: D) -> Result<(), StoreError> {
        let id = Self::check_id(&doc)?;
        let revision = doc.revision();
        self.records.insert(
            id,
            StoredRecord {
                document: doc,
                revision,
            },
        );
        Ok(())
    }

    fn delete(&self, id: &str) -> bool {
        self.records.remove(id).is_some()
    }
}
