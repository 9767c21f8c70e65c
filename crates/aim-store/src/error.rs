//! Error types for document storage
//!
//! Parse and format failures are returned to the caller here, unlike
//! migration which folds its failures into a result object.

/// Errors from store operations and text import/export
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Document ids must be non-empty
    #[error("{collection}: document id must not be empty")]
    EmptyId { collection: &'static str },

    /// Import text is not valid JSON
    #[error("{collection}: failed to parse import text: {source}")]
    Parse {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Import text is not a JSON array
    #[error("{collection}: import text must be a JSON array of documents")]
    NotAnArray { collection: &'static str },

    /// An imported document lacks a required field
    #[error("{collection}: document #{index} is missing required field '{field}'")]
    MissingField {
        collection: &'static str,
        index: usize,
        field: &'static str,
    },

    /// An imported document belongs to another generation
    #[error("{collection}: document #{index} has generation {found:?}, expected \"{expected}\"")]
    WrongGeneration {
        collection: &'static str,
        index: usize,
        expected: &'static str,
        found: Option<String>,
    },

    /// An imported document does not match the schema
    #[error("{collection}: document #{index} is invalid: {source}")]
    InvalidDocument {
        collection: &'static str,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The document's revision counter cannot advance
    #[error("{collection}: revision of document '{id}' cannot advance past u64::MAX")]
    RevisionOverflow { collection: &'static str, id: String },

    /// Export failed
    #[error("{collection}: failed to serialize export: {source}")]
    Serialize {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Collection the error belongs to
    #[must_use]
    pub fn collection(&self) -> &'static str {
        match self {
            Self::EmptyId { collection }
            | Self::Parse { collection, .. }
            | Self::NotAnArray { collection }
            | Self::MissingField { collection, .. }
            | Self::WrongGeneration { collection, .. }
            | Self::InvalidDocument { collection, .. }
            | Self::RevisionOverflow { collection, .. }
            | Self::Serialize { collection, .. } => *collection,
        }
    }
}
