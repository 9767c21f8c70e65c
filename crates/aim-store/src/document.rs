//! Per-generation storage contract
//!
//! Each document generation lives in its own logical collection. This trait
//! captures what the store needs to know about a generation: its collection
//! name, how to identify a document, how to stamp a save, and which fields
//! an imported document must carry.

use crate::error::StoreError;
use aim_schema::{LayeredDocument, LegacyDocument, LAYERED_GENERATION, LEGACY_GENERATION};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Meta key holding the store revision of a layered document
pub const REVISION_META_KEY: &str = "revision";

/// A document that can live in a [`crate::DocumentStore`]
pub trait StoredDocument: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Logical collection name
    const COLLECTION: &'static str;

    /// Document id
    fn id(&self) -> &str;

    /// Revision recorded on the document itself (0 if none)
    fn revision(&self) -> u64;

    /// Record a save at `now` with the given revision
    fn stamp(&mut self, now: DateTime<Utc>, revision: u64);

    /// Minimal shape check on an untyped document before decoding
    ///
    /// # Errors
    /// [`StoreError`] naming the first missing or wrong field
    fn validate_stored(value: &Value, index: usize) -> Result<(), StoreError> {
        require_str(value, "id", Self::COLLECTION, index)
    }
}

impl StoredDocument for LegacyDocument {
    const COLLECTION: &'static str = LEGACY_GENERATION;

    fn id(&self) -> &str {
        &self.id
    }

    /// The integer-as-string `version` counter
    fn revision(&self) -> u64 {
        self.version.trim().parse().unwrap_or(0)
    }

    fn stamp(&mut self, now: DateTime<Utc>, revision: u64) {
        self.updated_at = now;
        self.version = revision.to_string();
    }

    fn validate_stored(value: &Value, index: usize) -> Result<(), StoreError> {
        require_str(value, "id", Self::COLLECTION, index)?;
        require_str(value, "characterName", Self::COLLECTION, index)
    }
}

impl StoredDocument for LayeredDocument {
    const COLLECTION: &'static str = LAYERED_GENERATION;

    fn id(&self) -> &str {
        &self.id
    }

    fn revision(&self) -> u64 {
        self.meta
            .as_ref()
            .and_then(|meta| meta.get(REVISION_META_KEY))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }

    fn stamp(&mut self, now: DateTime<Utc>, revision: u64) {
        self.updated_at = now;
        self.set_meta(REVISION_META_KEY, revision);
    }

    fn validate_stored(value: &Value, index: usize) -> Result<(), StoreError> {
        require_str(value, "id", Self::COLLECTION, index)?;

        match value.get("version").and_then(Value::as_str) {
            Some(LAYERED_GENERATION) => Ok(()),
            found => Err(StoreError::WrongGeneration {
                collection: Self::COLLECTION,
                index,
                expected: LAYERED_GENERATION,
                found: found.map(str::to_string),
            }),
        }
    }
}

fn require_str(
    value: &Value,
    field: &'static str,
    collection: &'static str,
    index: usize,
) -> Result<(), StoreError> {
    match value.get(field).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(StoreError::MissingField {
            collection,
            index,
            field,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aim_test_utils::{created_at, empty_legacy_document};
    use serde_json::json;

    #[test]
    fn legacy_revision_is_the_version_counter() {
        let mut doc = empty_legacy_document("x");
        doc.version = "7".into();
        assert_eq!(doc.revision(), 7);

        doc.version = "seven".into();
        assert_eq!(doc.revision(), 0);

        doc.stamp(created_at(), 8);
        assert_eq!(doc.version, "8");
    }

    #[test]
    fn layered_revision_lives_in_meta() {
        let mut doc = LayeredDocument::scaffold("x");
        assert_eq!(doc.revision(), 0);
        doc.stamp(created_at(), 3);
        assert_eq!(doc.revision(), 3);
        assert_eq!(doc.updated_at, created_at());
    }

    #[test]
    fn layered_validation_checks_marker() {
        assert!(LayeredDocument::validate_stored(&json!({"id": "x", "version": "aim-v2"}), 0).is_ok());

        let err = LayeredDocument::validate_stored(&json!({"id": "x", "version": "1"}), 2).unwrap_err();
        assert!(matches!(
            err,
            StoreError::WrongGeneration { index: 2, found: Some(ref f), .. } if f == "1"
        ));

        let err = LayeredDocument::validate_stored(&json!({"version": "aim-v2"}), 0).unwrap_err();
        assert!(matches!(err, StoreError::MissingField { field: "id", .. }));
    }

    #[test]
    fn legacy_validation_requires_name() {
        let err = LegacyDocument::validate_stored(&json!({"id": "x", "characterName": " "}), 1)
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingField { field: "characterName", index: 1, .. }));
    }
}
