//! Canonical trait normalization
//!
//! External metadata uses whatever key spelling the marketplace chose
//! (`"Background Color"`, `"Eye-Type"`). The normalized layer holds the same
//! facts under lower-case snake-case keys so they compare directly with the
//! persona vocabulary, and records which persona keys they shadow.

use aim_schema::{find_conflicts, LayeredDocument, TraitMap};
use once_cell::sync::Lazy;
use regex::Regex;

/// Registry version stamped into `normalized.registryVersion`
pub const REGISTRY_VERSION: &str = "1";

static NON_KEY_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("static pattern compiles"));

/// Normalize one key: lower-case, runs of other characters become `_`
#[must_use]
pub fn normalize_key(key: &str) -> String {
    let lowered = key.to_lowercase();
    NON_KEY_RUN
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// Normalize a canonical trait map
///
/// Values are trimmed. Pairs whose key or value becomes empty are dropped;
/// when two keys normalize to the same spelling the first one wins.
#[must_use]
pub fn normalize_traits(canonical: &TraitMap) -> TraitMap {
    let mut normalized = TraitMap::with_capacity(canonical.len());

    for (key, value) in canonical {
        let key = normalize_key(key);
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        normalized.entry(key).or_insert_with(|| value.to_string());
    }

    normalized
}

/// Rebuild `doc.normalized` from `doc.canonical`
///
/// Records persona keys shadowed by normalized keys in
/// `normalized.conflicts` and returns them. Reports only; persona traits are
/// left untouched.
pub fn normalize(doc: &mut LayeredDocument) -> Vec<String> {
    let traits = normalize_traits(&doc.canonical.traits);
    let conflicts = find_conflicts(&traits, &doc.persona.traits_add);

    if !conflicts.is_empty() {
        tracing::warn!(
            document_id = %doc.id,
            "Normalized canonical traits shadow persona traits: {}",
            conflicts.join(", ")
        );
    }

    doc.normalized.traits = traits;
    doc.normalized.registry_version = REGISTRY_VERSION.to_string();
    doc.normalized.conflicts.clone_from(&conflicts);
    conflicts
}
