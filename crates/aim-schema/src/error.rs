//! Error types for the document model

/// Errors raised by guarded layer mutations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The key already belongs to the canonical layer
    #[error("trait '{key}' is canonical and cannot be overridden by the persona layer")]
    CanonicalConflict {
        /// Colliding key
        key: String,
    },

    /// Trait keys must be non-empty
    #[error("trait key must not be empty")]
    EmptyTraitKey,

    /// Persona and canonical layers overlap
    #[error("persona traits overlap canonical traits: {}", keys.join(", "))]
    InvariantViolated {
        /// Keys present in both layers
        keys: Vec<String>,
    },
}

impl SchemaError {
    /// Keys involved in the error, if any
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::CanonicalConflict { key } => vec![key.as_str()],
            Self::EmptyTraitKey => Vec::new(),
            Self::InvariantViolated { keys } => keys.iter().map(String::as_str).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_keys() {
        let err = SchemaError::InvariantViolated {
            keys: vec!["eyes".into(), "hat".into()],
        };
        assert_eq!(
            err.to_string(),
            "persona traits overlap canonical traits: eyes, hat"
        );
        assert_eq!(err.keys(), vec!["eyes", "hat"]);

        let err = SchemaError::CanonicalConflict { key: "eyes".into() };
        assert!(err.to_string().contains("'eyes'"));
    }
}
