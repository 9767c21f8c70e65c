//! Crystallized key selection

use crate::extract::{has_present, keys};
use aim_schema::LegacyDocument;

/// Key emphasized when the legacy alignment is set
pub const ALIGNMENT_KEY: &str = "alignment";

/// Propose which keys to emphasize in the UI
///
/// Subset of `[primary_traits, special_powers, alignment]`, always in that
/// order.
#[must_use]
pub fn suggest_crystallized_keys(doc: &LegacyDocument) -> Vec<String> {
    let mut selected = Vec::with_capacity(3);

    if has_present(&doc.personality.primary_traits) {
        selected.push(keys::PRIMARY_TRAITS.to_string());
    }
    if has_present(&doc.abilities.special_powers) {
        selected.push(keys::SPECIAL_POWERS.to_string());
    }
    if doc.personality.alignment.is_some() {
        selected.push(ALIGNMENT_KEY.to_string());
    }

    selected
}
