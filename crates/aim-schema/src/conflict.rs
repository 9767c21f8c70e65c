//! Trait-layer conflict validation
//!
//! The canonical layer is ground truth; the persona layer only supplements
//! it. A key present in both layers is a conflict. These functions are the
//! single authority for detecting and stripping such keys: every path that
//! inserts into `persona.traitsAdd` goes through them.
//!
//! Conflicts compare keys only. Two layers holding the same key with the same
//! value still conflict.

use indexmap::IndexMap;

/// Insertion-ordered attribute map used by every trait layer
pub type TraitMap = IndexMap<String, String>;

/// Keys present in both maps
///
/// Returned in `traits_add` iteration order, so output is stable for a given
/// input. Neither map is modified.
#[must_use]
pub fn find_conflicts(canonical: &TraitMap, traits_add: &TraitMap) -> Vec<String> {
    if canonical.is_empty() {
        return Vec::new();
    }

    traits_add
        .keys()
        .filter(|key| canonical.contains_key(key.as_str()))
        .cloned()
        .collect()
}

/// Strip every conflicting key from a copy of `traits_add`
///
/// Returns the cleaned map and the stripped keys. `canonical` always wins;
/// a colliding key is never kept. Surviving entries keep their order.
#[must_use]
pub fn resolve_conflicts(canonical: &TraitMap, traits_add: &TraitMap) -> (TraitMap, Vec<String>) {
    let conflicts = find_conflicts(canonical, traits_add);
    if conflicts.is_empty() {
        return (traits_add.clone(), conflicts);
    }

    let cleaned = traits_add
        .iter()
        .filter(|(key, _)| !canonical.contains_key(key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    (cleaned, conflicts)
}

/// Whether the two maps share no key
#[inline]
#[must_use]
pub fn is_disjoint(canonical: &TraitMap, traits_add: &TraitMap) -> bool {
    !traits_add
        .keys()
        .any(|key| canonical.contains_key(key.as_str()))
}
