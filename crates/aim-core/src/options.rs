//! Migration configuration

use serde::{Deserialize, Serialize};

/// Prefix of derived document ids
pub const MIGRATED_ID_PREFIX: &str = "migrated-";

/// Options controlling how a legacy document is re-projected
///
/// Deserializes with every field optional, so a partial config file only
/// overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationOptions {
    /// Keep the legacy id instead of deriving `migrated-<id>`
    pub preserve_original_id: bool,
    /// Chain recorded in `subject.chain`
    pub default_chain: String,
    /// Contract recorded in `subject.contract`
    pub default_contract: String,
    /// Collection used when the legacy document names none
    pub default_collection: String,
    /// Accepted but currently ignored: the token id is always copied from
    /// the legacy `oraNumber`. Left as a no-op until its intent is decided.
    pub generate_token_id: bool,
}

impl MigrationOptions {
    /// Create default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With id preservation
    #[inline]
    #[must_use]
    pub fn with_preserve_original_id(mut self, preserve: bool) -> Self {
        self.preserve_original_id = preserve;
        self
    }

    /// With default chain
    #[inline]
    #[must_use]
    pub fn with_default_chain(mut self, chain: impl Into<String>) -> Self {
        self.default_chain = chain.into();
        self
    }

    /// With default contract
    #[inline]
    #[must_use]
    pub fn with_default_contract(mut self, contract: impl Into<String>) -> Self {
        self.default_contract = contract.into();
        self
    }

    /// With default collection
    #[inline]
    #[must_use]
    pub fn with_default_collection(mut self, collection: impl Into<String>) -> Self {
        self.default_collection = collection.into();
        self
    }

    /// With token id generation flag (no effect, see field docs)
    #[inline]
    #[must_use]
    pub fn with_generate_token_id(mut self, generate: bool) -> Self {
        self.generate_token_id = generate;
        self
    }

    /// Id of the migrated document for a given legacy id
    #[must_use]
    pub fn derive_id(&self, original_id: &str) -> String {
        if self.preserve_original_id {
            original_id.to_string()
        } else {
            format!("{MIGRATED_ID_PREFIX}{original_id}")
        }
    }
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            preserve_original_id: false,
            default_chain: "ethereum".to_string(),
            default_contract: "unknown".to_string(),
            default_collection: "unknown".to_string(),
            generate_token_id: false,
        }
    }
}
