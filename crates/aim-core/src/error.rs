//! Error types for AIM Core
//!
//! Migration never returns these to its caller directly; they are folded into
//! [`crate::MigrationResult::errors`]. They exist so the migration steps can
//! use `?` internally and so the failure message stays actionable.

use aim_schema::SchemaError;

/// Structural failures while migrating a legacy document
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Input is not a JSON object
    #[error("legacy document is not an object")]
    NotAnObject,

    /// A required nested group is absent or null
    #[error("legacy document is missing required group '{0}'")]
    MissingGroup(String),

    /// A required nested group has the wrong shape
    #[error("legacy document group '{0}' must be an object")]
    InvalidGroup(String),

    /// A required scalar field is absent or blank
    #[error("legacy document is missing required field '{0}'")]
    MissingField(String),

    /// Document could not be decoded
    #[error("malformed legacy document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The produced document broke the layer invariant
    #[error("layer invariant violated: {0}")]
    Schema(#[from] SchemaError),
}

impl MigrationError {
    /// Whether the input itself is at fault (as opposed to the engine)
    #[inline]
    #[must_use]
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::Schema(_))
    }
}
