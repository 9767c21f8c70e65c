//! Persona trait extraction
//!
//! Derives the supplementary `persona.traitsAdd` attributes from structured
//! legacy fields.
//!
//! The key vocabulary is fixed, lower-case snake case. It is *assumed* not to
//! collide with canonical keys sourced from external metadata; nothing here
//! can enforce that, since canonical keys are unknown at extraction time. The
//! orchestrator runs the conflict validator on the result regardless.

use aim_schema::{LegacyDocument, TraitMap};

/// Extracted trait keys, in emission order
pub mod keys {
    pub const PRIMARY_TRAITS: &str = "primary_traits";
    pub const SECONDARY_TRAITS: &str = "secondary_traits";
    pub const STRENGTHS: &str = "strengths";
    pub const SPECIAL_POWERS: &str = "special_powers";
    pub const SOCIAL_STYLE: &str = "social_style";
    pub const HEIGHT: &str = "height";
    pub const BUILD: &str = "build";

    /// Full vocabulary
    pub const ALL: [&str; 7] = [
        PRIMARY_TRAITS,
        SECONDARY_TRAITS,
        STRENGTHS,
        SPECIAL_POWERS,
        SOCIAL_STYLE,
        HEIGHT,
        BUILD,
    ];
}

/// Separator for list-valued fields
pub const LIST_SEPARATOR: &str = ", ";

/// Extract persona traits from a legacy document
///
/// The map is sparse: a key appears only when its source is non-empty, and
/// no value is ever an empty string.
#[must_use]
pub fn extract_traits(doc: &LegacyDocument) -> TraitMap {
    let candidates = [
        (keys::PRIMARY_TRAITS, join(&doc.personality.primary_traits)),
        (keys::SECONDARY_TRAITS, join(&doc.personality.secondary_traits)),
        (keys::STRENGTHS, join(&doc.abilities.strengths)),
        (keys::SPECIAL_POWERS, join(&doc.abilities.special_powers)),
        (keys::SOCIAL_STYLE, doc.behavior.social_style.clone()),
        (keys::HEIGHT, doc.appearance.height.clone().unwrap_or_default()),
        (keys::BUILD, doc.appearance.build.clone().unwrap_or_default()),
    ];

    candidates
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn join(items: &[String]) -> String {
    join_present(items, LIST_SEPARATOR)
}

/// Join the items of a list field that are not blank
pub(crate) fn join_present(items: &[String], separator: &str) -> String {
    items
        .iter()
        .filter(|item| !item.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Whether a list field has at least one non-blank item
pub(crate) fn has_present(items: &[String]) -> bool {
    items.iter().any(|item| !item.trim().is_empty())
}
