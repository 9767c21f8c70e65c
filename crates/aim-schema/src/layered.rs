//! Layered ("aim-v2") character document
//!
//! Separates what a document is *about* and what an external authority says
//! about it (`subject`, `sources`, `canonical`, `normalized`) from what the
//! user authored (`persona`) and how it is presented (`ui`).
//!
//! # Layer invariant
//!
//! `keys(persona.traitsAdd) ∩ keys(canonical.traits) = ∅`
//!
//! The mutators on [`LayeredDocument`] keep it; code writing the fields
//! directly must call [`crate::resolve_conflicts`] (or
//! [`LayeredDocument::check_invariant`]) itself.

use crate::conflict::{find_conflicts, is_disjoint, resolve_conflicts, TraitMap};
use crate::error::SchemaError;
use crate::legacy::{Alignment, Goals};
use crate::marker::Generation;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form metadata bag
pub type MetaBag = Map<String, Value>;

/// Two-layer character document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayeredDocument {
    /// Always `"aim-v2"`
    pub version: Generation,
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub subject: Subject,
    pub sources: Sources,
    pub canonical: Canonical,
    pub normalized: Normalized,
    pub persona: Persona,
    pub ui: UiHints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<IndexMap<String, bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaBag>,
}

/// The real-world entity a document describes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub chain: String,
    pub contract: String,
    pub token_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub collection: String,
}

/// Provenance of the canonical layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sources {
    pub metadata_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
    /// Hash of the fetched metadata payload
    pub hash: String,
    pub image: String,
    pub marketplace_url: String,
}

/// Externally sourced ground truth; read-only for the persona layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Canonical {
    pub traits: TraitMap,
    /// Original metadata payload as fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

/// Processed copy of the canonical traits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Normalized {
    pub traits: TraitMap,
    pub registry_version: String,
    pub conflicts: Vec<String>,
}

/// The user-editable layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    pub tone: String,
    pub tags: Vec<String>,
    pub lore: String,
    pub goals: Goals,
    /// Supplementary traits; never shares a key with `canonical.traits`
    pub traits_add: TraitMap,
}

/// Presentation hints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UiHints {
    /// Emphasized keys
    pub crystallized_keys: Vec<String>,
    /// Keys editors must not change
    pub locked_keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl LayeredDocument {
    /// Empty document stamped with the current instant
    #[inline]
    #[must_use]
    pub fn scaffold(id: impl Into<String>) -> Self {
        Self::scaffold_at(id, Utc::now())
    }

    /// Empty document stamped with `now`
    ///
    /// Every nested structure exists (empty containers, empty strings), so
    /// callers may write into any field without existence checks.
    #[must_use]
    pub fn scaffold_at(id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            version: Generation,
            id: id.into(),
            created_at: now,
            updated_at: now,
            subject: Subject::default(),
            sources: Sources::default(),
            canonical: Canonical::default(),
            normalized: Normalized::default(),
            persona: Persona::default(),
            ui: UiHints::default(),
            capabilities: None,
            meta: None,
        }
    }

    /// Set `updatedAt` to now
    #[inline]
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Add or overwrite one persona trait
    ///
    /// # Errors
    /// - [`SchemaError::EmptyTraitKey`] for an empty key
    /// - [`SchemaError::CanonicalConflict`] if the key is canonical
    pub fn add_trait(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), SchemaError> {
        let key = key.into();
        if key.is_empty() {
            return Err(SchemaError::EmptyTraitKey);
        }
        if self.canonical.traits.contains_key(&key) {
            return Err(SchemaError::CanonicalConflict { key });
        }

        self.persona.traits_add.insert(key, value.into());
        self.touch();
        Ok(())
    }

    /// Remove one persona trait, returning its value
    ///
    /// Order of the remaining traits is preserved.
    pub fn remove_trait(&mut self, key: &str) -> Option<String> {
        let removed = self.persona.traits_add.shift_remove(key);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Bulk insert persona traits, stripping any that collide with canonical
    ///
    /// Returns the stripped keys.
    pub fn extend_traits(&mut self, traits: TraitMap) -> Vec<String> {
        let mut merged = std::mem::take(&mut self.persona.traits_add);
        merged.extend(traits.into_iter().filter(|(key, _)| !key.is_empty()));

        let (cleaned, conflicts) = resolve_conflicts(&self.canonical.traits, &merged);
        self.persona.traits_add = cleaned;
        self.touch();
        conflicts
    }

    /// Replace the canonical layer
    ///
    /// Write path for the attribute source. Persona traits colliding with the
    /// new canonical keys are stripped and recorded in
    /// `normalized.conflicts`; canonical keys become locked in the UI.
    /// Returns the stripped keys.
    pub fn set_canonical(&mut self, traits: TraitMap, raw: Option<Value>) -> Vec<String> {
        let (cleaned, conflicts) = resolve_conflicts(&traits, &self.persona.traits_add);

        self.persona.traits_add = cleaned;
        self.ui.locked_keys = traits.keys().cloned().collect();
        self.normalized.conflicts.clone_from(&conflicts);
        self.canonical = Canonical { traits, raw };
        self.touch();
        conflicts
    }

    /// Keys currently shared by the canonical and persona layers
    #[inline]
    #[must_use]
    pub fn conflicts(&self) -> Vec<String> {
        find_conflicts(&self.canonical.traits, &self.persona.traits_add)
    }

    /// Verify the layer invariant
    ///
    /// # Errors
    /// [`SchemaError::InvariantViolated`] listing the overlapping keys
    pub fn check_invariant(&self) -> Result<(), SchemaError> {
        if is_disjoint(&self.canonical.traits, &self.persona.traits_add) {
            return Ok(());
        }
        Err(SchemaError::InvariantViolated {
            keys: self.conflicts(),
        })
    }

    /// Insert one entry into the meta bag, creating it if needed
    pub fn set_meta(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.meta
            .get_or_insert_with(MetaBag::new)
            .insert(key.into(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(pairs: &[(&str, &str)]) -> TraitMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn scaffold_is_fully_populated() {
        let doc = LayeredDocument::scaffold("doc-1");
        assert_eq!(doc.id, "doc-1");
        assert_eq!(doc.created_at, doc.updated_at);
        assert!(doc.canonical.traits.is_empty());
        assert!(doc.persona.traits_add.is_empty());
        assert_eq!(doc.persona.goals, Goals::default());
        assert!(doc.ui.crystallized_keys.is_empty());
        assert!(doc.meta.is_none());
    }

    #[test]
    fn rescaffold_differs_only_in_timestamps() {
        let first = LayeredDocument::scaffold("same");
        let mut second = LayeredDocument::scaffold("same");
        second.created_at = first.created_at;
        second.updated_at = first.updated_at;
        assert_eq!(first, second);
    }

    #[test]
    fn scaffold_serializes_every_group() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let value = serde_json::to_value(LayeredDocument::scaffold_at("x", now)).unwrap();

        assert_eq!(value["version"], json!("aim-v2"));
        assert_eq!(value["createdAt"], json!("2024-05-01T12:00:00Z"));
        for group in ["subject", "sources", "canonical", "normalized", "persona", "ui"] {
            assert!(value[group].is_object(), "missing {group}");
        }
        assert_eq!(value["persona"]["traitsAdd"], json!({}));
        assert_eq!(value["ui"]["lockedKeys"], json!([]));
    }

    #[test]
    fn add_trait_rejects_canonical_keys() {
        let mut doc = LayeredDocument::scaffold("x");
        doc.canonical.traits = map(&[("eyes", "red")]);

        let err = doc.add_trait("eyes", "blue").unwrap_err();
        assert_eq!(err, SchemaError::CanonicalConflict { key: "eyes".into() });
        assert!(doc.persona.traits_add.is_empty());

        assert_eq!(doc.add_trait("", "x"), Err(SchemaError::EmptyTraitKey));

        doc.add_trait("mood", "calm").unwrap();
        assert_eq!(doc.persona.traits_add.get("mood").map(String::as_str), Some("calm"));
        assert!(doc.check_invariant().is_ok());
    }

    #[test]
    fn remove_trait_preserves_order() {
        let mut doc = LayeredDocument::scaffold("x");
        doc.persona.traits_add = map(&[("a", "1"), ("b", "2"), ("c", "3")]);

        assert_eq!(doc.remove_trait("b").as_deref(), Some("2"));
        assert_eq!(doc.remove_trait("b"), None);
        assert_eq!(doc.persona.traits_add.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn extend_traits_strips_collisions() {
        let mut doc = LayeredDocument::scaffold("x");
        doc.canonical.traits = map(&[("hat", "crown")]);
        doc.persona.traits_add = map(&[("mood", "calm")]);

        let stripped = doc.extend_traits(map(&[("hat", "cap"), ("pet", "cat"), ("", "x")]));

        assert_eq!(stripped, vec!["hat"]);
        assert_eq!(doc.persona.traits_add, map(&[("mood", "calm"), ("pet", "cat")]));
        assert!(doc.check_invariant().is_ok());
    }

    #[test]
    fn set_canonical_strips_records_and_locks() {
        let mut doc = LayeredDocument::scaffold("x");
        doc.persona.traits_add = map(&[("eyes", "blue"), ("mood", "calm")]);

        let stripped = doc.set_canonical(
            map(&[("eyes", "red"), ("fur", "black")]),
            Some(json!({"name": "Ora #42"})),
        );

        assert_eq!(stripped, vec!["eyes"]);
        assert_eq!(doc.persona.traits_add, map(&[("mood", "calm")]));
        assert_eq!(doc.normalized.conflicts, vec!["eyes"]);
        assert_eq!(doc.ui.locked_keys, vec!["eyes", "fur"]);
        assert_eq!(doc.canonical.raw, Some(json!({"name": "Ora #42"})));
        assert!(doc.check_invariant().is_ok());
    }

    #[test]
    fn check_invariant_reports_direct_writes() {
        let mut doc = LayeredDocument::scaffold("x");
        doc.canonical.traits = map(&[("eyes", "red")]);
        doc.persona.traits_add = map(&[("eyes", "blue")]);

        assert_eq!(
            doc.check_invariant(),
            Err(SchemaError::InvariantViolated { keys: vec!["eyes".into()] })
        );
    }

    #[test]
    fn roundtrip_preserves_trait_order() {
        let mut doc = LayeredDocument::scaffold("x");
        doc.persona.traits_add = map(&[("z", "1"), ("a", "2"), ("m", "3")]);
        doc.set_meta("notes", "hello");

        let text = serde_json::to_string(&doc).unwrap();
        let back: LayeredDocument = serde_json::from_str(&text).unwrap();

        assert_eq!(back, doc);
        assert_eq!(back.persona.traits_add.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[test]
    fn rejects_legacy_generation_marker() {
        let mut value = serde_json::to_value(LayeredDocument::scaffold("x")).unwrap();
        value["version"] = json!("aim-v1");
        assert!(serde_json::from_value::<LayeredDocument>(value).is_err());
    }
}
