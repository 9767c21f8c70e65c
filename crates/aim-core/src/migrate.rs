//! Legacy to layered migration
//!
//! [`Migrator`] is the single entry point. It re-projects a legacy document
//! onto a freshly scaffolded layered document and reports the outcome as a
//! value: callers branch on [`MigrationResult::success`], never on errors or
//! panics.
//!
//! # Workflow
//! 1. Scaffold an empty layered document under the derived id
//! 2. Carry over `createdAt`, stamp `updatedAt`
//! 3. Fill `subject` from options and the legacy token number
//! 4. Fill `sources` (image and fetch time only)
//! 5. Leave `canonical` and `normalized` empty: migration never fabricates
//!    canonical data from user-authored content
//! 6. Fill `persona`: lore, extracted traits (validated against canonical),
//!    direct copies
//! 7. Fill `ui` emphasis and highlights
//! 8. Record provenance in `meta`
//! 9. Collect advisory warnings

use crate::error::MigrationError;
use crate::extract::extract_traits;
use crate::highlight::suggest_crystallized_keys;
use crate::lore::compose_lore;
use crate::options::MigrationOptions;
use aim_schema::{
    resolve_conflicts, LayeredDocument, LegacyDocument, Persona, Subject, LEGACY_GENERATION,
    REQUIRED_GROUPS,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

/// Number of primary traits copied into `ui.highlights`
pub const MAX_HIGHLIGHTS: usize = 3;

/// Meta keys written by migration
pub mod meta_keys {
    pub const NOTES: &str = "notes";
    pub const LEGACY_VERSION: &str = "legacyVersion";
    pub const MIGRATED_FROM: &str = "migratedFrom";
    pub const MIGRATION_DATE: &str = "migrationDate";
}

/// Anything a legacy document can be read from
///
/// Typed documents are used as is. Untyped stored values are checked for the
/// required groups first so a failure names exactly what is missing.
pub trait LegacySource {
    /// Borrow or decode the legacy document
    ///
    /// # Errors
    /// [`MigrationError`] if the input is structurally incomplete
    fn to_legacy(&self) -> Result<Cow<'_, LegacyDocument>, MigrationError>;

    /// Best-effort id for diagnostics
    fn source_id(&self) -> Option<&str>;
}

impl LegacySource for LegacyDocument {
    #[inline]
    fn to_legacy(&self) -> Result<Cow<'_, LegacyDocument>, MigrationError> {
        Ok(Cow::Borrowed(self))
    }

    #[inline]
    fn source_id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

impl LegacySource for Value {
    fn to_legacy(&self) -> Result<Cow<'_, LegacyDocument>, MigrationError> {
        let object = self.as_object().ok_or(MigrationError::NotAnObject)?;

        for group in REQUIRED_GROUPS {
            match object.get(group) {
                None | Some(Value::Null) => {
                    return Err(MigrationError::MissingGroup(group.to_string()))
                }
                Some(Value::Object(_)) => {}
                Some(_) => return Err(MigrationError::InvalidGroup(group.to_string())),
            }
        }

        let doc = LegacyDocument::deserialize(self)?;
        Ok(Cow::Owned(doc))
    }

    fn source_id(&self) -> Option<&str> {
        self.get("id").and_then(Value::as_str)
    }
}

/// Advisory conditions; never affect success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MigrationWarning {
    /// Temperament was empty, so the persona tone is empty
    MissingTemperament,
    /// Neither origin nor childhood were set
    LimitedBackstory,
}

impl Display for MigrationWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTemperament => {
                f.write_str("no personality temperament found, tone will be empty")
            }
            Self::LimitedBackstory => f.write_str("limited backstory data available for lore"),
        }
    }
}

/// Outcome of migrating one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<LayeredDocument>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl MigrationResult {
    /// Successful migration
    #[must_use]
    pub fn succeeded(document: LayeredDocument, warnings: &[MigrationWarning]) -> Self {
        Self {
            success: true,
            document: Some(document),
            errors: Vec::new(),
            warnings: warnings.iter().map(ToString::to_string).collect(),
        }
    }

    /// Failed migration
    #[must_use]
    pub fn failed(error: &MigrationError) -> Self {
        Self {
            success: false,
            document: None,
            errors: vec![error.to_string()],
            warnings: Vec::new(),
        }
    }

    /// Borrow the migrated document
    #[inline]
    #[must_use]
    pub fn document(&self) -> Option<&LayeredDocument> {
        self.document.as_ref()
    }

    /// Take the migrated document
    #[inline]
    #[must_use]
    pub fn into_document(self) -> Option<LayeredDocument> {
        self.document
    }
}

/// Legacy to layered migrator
#[derive(Debug, Clone, Default)]
pub struct Migrator {
    options: MigrationOptions,
}

impl Migrator {
    /// Create migrator with options
    #[inline]
    #[must_use]
    pub fn new(options: MigrationOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    #[inline]
    #[must_use]
    pub fn options(&self) -> &MigrationOptions {
        &self.options
    }

    /// Migrate one document, stamped with the current instant
    pub fn migrate<S: LegacySource + ?Sized>(&self, source: &S) -> MigrationResult {
        self.migrate_at(source, Utc::now())
    }

    /// Migrate one document, stamped with `now`
    ///
    /// The caller's document is never modified; every output is fresh.
    pub fn migrate_at<S: LegacySource + ?Sized>(
        &self,
        source: &S,
        now: DateTime<Utc>,
    ) -> MigrationResult {
        let source_id = source.source_id().unwrap_or("<unknown>");

        let outcome = source
            .to_legacy()
            .and_then(|legacy| self.build(&legacy, now));

        match outcome {
            Ok((document, warnings)) => {
                for warning in &warnings {
                    tracing::warn!(document_id = %source_id, "Migration warning: {}", warning);
                }
                tracing::debug!("Migrated {} -> {}", source_id, document.id);
                MigrationResult::succeeded(document, &warnings)
            }
            Err(e) if e.is_structural() => {
                tracing::warn!(document_id = %source_id, "Migration failed: {}", e);
                MigrationResult::failed(&e)
            }
            Err(e) => {
                tracing::error!(document_id = %source_id, "Migration produced an invalid document: {}", e);
                MigrationResult::failed(&e)
            }
        }
    }

    fn build(
        &self,
        legacy: &LegacyDocument,
        now: DateTime<Utc>,
    ) -> Result<(LayeredDocument, Vec<MigrationWarning>), MigrationError> {
        if legacy.id.trim().is_empty() {
            return Err(MigrationError::MissingField("id".to_string()));
        }

        // 1-2
        let mut doc = LayeredDocument::scaffold_at(self.options.derive_id(&legacy.id), now);
        doc.created_at = legacy.created_at;
        doc.updated_at = now;

        // 3. token id always mirrors the legacy number, generate_token_id is a no-op
        doc.subject = Subject {
            chain: self.options.default_chain.clone(),
            contract: self.options.default_contract.clone(),
            token_id: legacy.ora_number.clone(),
            owner: None,
            collection: legacy
                .collection
                .clone()
                .unwrap_or_else(|| self.options.default_collection.clone()),
        };

        // 4. metadata uri and hash are unknowable here
        doc.sources.image.clone_from(&legacy.image);
        doc.sources.fetched_at = Some(legacy.created_at);

        // 5. canonical and normalized stay as scaffolded

        // 6
        let extracted = extract_traits(legacy);
        let (traits_add, stripped) = resolve_conflicts(&doc.canonical.traits, &extracted);
        if !stripped.is_empty() {
            tracing::warn!(
                document_id = %legacy.id,
                "Dropped extracted traits shadowed by canonical: {}",
                stripped.join(", ")
            );
        }

        doc.persona = Persona {
            title: legacy.character_name.clone(),
            nickname: legacy.nickname.clone(),
            alignment: legacy.personality.alignment,
            tone: legacy.personality.temperament.clone(),
            tags: legacy.tags.clone(),
            lore: compose_lore(legacy),
            goals: legacy.goals.clone().unwrap_or_default(),
            traits_add,
        };

        // 7
        doc.ui.crystallized_keys = suggest_crystallized_keys(legacy);
        doc.ui.locked_keys = Vec::new();
        doc.ui.highlights = Some(
            legacy
                .personality
                .primary_traits
                .iter()
                .filter(|item| !item.trim().is_empty())
                .take(MAX_HIGHLIGHTS)
                .cloned()
                .collect(),
        );

        // 8
        doc.set_meta(meta_keys::NOTES, legacy.notes.clone());
        doc.set_meta(meta_keys::LEGACY_VERSION, legacy.version.clone());
        doc.set_meta(meta_keys::MIGRATED_FROM, LEGACY_GENERATION);
        doc.set_meta(
            meta_keys::MIGRATION_DATE,
            now.to_rfc3339_opts(SecondsFormat::Millis, true),
        );

        doc.check_invariant()?;

        // 9
        let mut warnings = Vec::new();
        if legacy.personality.temperament.is_empty() {
            warnings.push(MigrationWarning::MissingTemperament);
        }
        if legacy.backstory.origin.is_empty() && legacy.backstory.childhood.is_empty() {
            warnings.push(MigrationWarning::LimitedBackstory);
        }

        Ok((doc, warnings))
    }
}

/// Migrate one document with the given options
///
/// Shorthand for `Migrator::new(options).migrate(source)`.
pub fn migrate<S: LegacySource + ?Sized>(source: &S, options: MigrationOptions) -> MigrationResult {
    Migrator::new(options).migrate(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aim_schema::Alignment;
    use aim_test_utils::{
        empty_legacy_document, legacy_value, legacy_value_without, migration_time, nyx,
        rich_legacy_document,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn migrator() -> Migrator {
        Migrator::new(MigrationOptions::new())
    }

    #[test]
    fn nyx_scenario() {
        let result = migrator().migrate(&nyx());
        assert!(result.success);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());

        let doc = result.document().unwrap();
        assert_eq!(doc.id, "migrated-a1");
        assert_eq!(doc.persona.title, "Nyx");
        assert_eq!(doc.persona.tone, "fierce");
        assert_eq!(doc.persona.lore, "Origin: born of void");
        assert_eq!(doc.persona.alignment, Some(Alignment::ChaoticGood));

        let traits: Vec<(&str, &str)> = doc
            .persona
            .traits_add
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            traits,
            vec![
                ("primary_traits", "bold"),
                ("strengths", "speed"),
                ("social_style", "Introverted"),
            ]
        );

        assert!(doc.ui.crystallized_keys.contains(&"primary_traits".to_string()));
        assert!(doc.ui.crystallized_keys.contains(&"alignment".to_string()));
        assert!(!doc.ui.crystallized_keys.contains(&"special_powers".to_string()));
    }

    #[test]
    fn subject_sources_and_meta() {
        let now = migration_time();
        let legacy = nyx();
        let doc = migrator().migrate_at(&legacy, now).into_document().unwrap();

        assert_eq!(doc.created_at, legacy.created_at);
        assert_eq!(doc.updated_at, now);

        assert_eq!(doc.subject.chain, "ethereum");
        assert_eq!(doc.subject.contract, "unknown");
        assert_eq!(doc.subject.token_id, "42");
        assert_eq!(doc.subject.owner, None);

        assert_eq!(doc.sources.image, "ipfs://nyx.png");
        assert_eq!(doc.sources.fetched_at, Some(legacy.created_at));
        assert_eq!(doc.sources.metadata_uri, "");
        assert_eq!(doc.sources.hash, "");

        assert!(doc.canonical.traits.is_empty());
        assert!(doc.canonical.raw.is_none());
        assert!(doc.normalized.traits.is_empty());
        assert!(doc.normalized.conflicts.is_empty());

        let meta = doc.meta.unwrap();
        assert_eq!(meta[meta_keys::MIGRATED_FROM], json!("aim-v1"));
        assert_eq!(meta[meta_keys::LEGACY_VERSION], json!("1"));
        assert_eq!(meta[meta_keys::NOTES], json!(""));
        assert_eq!(meta[meta_keys::MIGRATION_DATE], json!("2024-06-01T09:30:00.000Z"));
    }

    #[test]
    fn empty_document_warns_twice() {
        let result = migrator().migrate(&empty_legacy_document("e"));
        assert!(result.success);
        assert_eq!(
            result.warnings,
            vec![
                "no personality temperament found, tone will be empty",
                "limited backstory data available for lore",
            ]
        );
        let doc = result.document().unwrap();
        assert_eq!(doc.persona.tone, "");
        assert_eq!(doc.persona.lore, "");
        assert!(doc.persona.traits_add.is_empty());
        assert_eq!(doc.ui.highlights, Some(Vec::new()));
    }

    #[test]
    fn highlights_capped_at_three() {
        let doc = migrator()
            .migrate(&rich_legacy_document("r"))
            .into_document()
            .unwrap();
        assert_eq!(
            doc.ui.highlights,
            Some(vec!["curious".to_string(), "loyal".into(), "stubborn".into()])
        );
        assert_eq!(doc.subject.collection, "Sugartown Oras");
        assert_eq!(doc.persona.nickname.as_deref(), Some("Ves"));
        assert_eq!(
            doc.persona.goals.current_quest.as_deref(),
            Some("the missing gear")
        );
    }

    #[test]
    fn options_are_applied() {
        let options = MigrationOptions::new()
            .with_preserve_original_id(true)
            .with_default_chain("polygon")
            .with_default_contract("0xabc")
            .with_default_collection("Oras")
            .with_generate_token_id(true);
        let doc = Migrator::new(options)
            .migrate(&nyx())
            .into_document()
            .unwrap();

        assert_eq!(doc.id, "a1");
        assert_eq!(doc.subject.chain, "polygon");
        assert_eq!(doc.subject.contract, "0xabc");
        assert_eq!(doc.subject.collection, "Oras");
        // generate_token_id has no effect
        assert_eq!(doc.subject.token_id, "42");
    }

    #[test]
    fn missing_group_is_reported_not_raised() {
        let value = legacy_value_without(&nyx(), "personality");
        let result = migrator().migrate(&value);

        assert!(!result.success);
        assert!(result.document.is_none());
        assert!(result.warnings.is_empty());
        assert_eq!(
            result.errors,
            vec!["legacy document is missing required group 'personality'"]
        );
    }

    #[test]
    fn malformed_inputs_fail_gracefully() {
        let m = migrator();

        assert!(!m.migrate(&json!("not a document")).success);
        assert!(!m.migrate(&json!(null)).success);

        let mut value = legacy_value(&nyx());
        value["behavior"] = json!([]);
        let result = m.migrate(&value);
        assert_eq!(result.errors, vec!["legacy document group 'behavior' must be an object"]);

        let result = m.migrate(&legacy_value_without(&nyx(), "createdAt"));
        assert!(!result.success);
        assert!(result.errors[0].contains("createdAt"));

        let mut blank = nyx();
        blank.id = "  ".into();
        let result = m.migrate(&blank);
        assert_eq!(result.errors, vec!["legacy document is missing required field 'id'"]);
    }

    #[test]
    fn blank_alignment_migrates_as_unset() {
        let mut value = legacy_value(&nyx());
        value["personality"]["alignment"] = json!("");

        let result = migrator().migrate(&value);

        assert!(result.success, "errors: {:?}", result.errors);
        let doc = result.document().unwrap();
        assert_eq!(doc.persona.alignment, None);
        assert_eq!(doc.ui.crystallized_keys, vec!["primary_traits"]);
    }

    #[test]
    fn unusual_skill_levels_do_not_fail_migration() {
        let mut value = legacy_value(&nyx());
        value["abilities"]["skills"] = json!([{"name": "archery", "level": 300}]);

        let result = migrator().migrate(&value);

        assert!(result.success, "errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn value_and_typed_inputs_agree() {
        let now = migration_time();
        let legacy = rich_legacy_document("r");
        let typed = migrator().migrate_at(&legacy, now);
        let untyped = migrator().migrate_at(&legacy_value(&legacy), now);
        assert_eq!(typed, untyped);
    }

    #[test]
    fn rerun_yields_equivalent_document() {
        let now = migration_time();
        let legacy = rich_legacy_document("r");
        let first = migrator().migrate_at(&legacy, now);
        let second = migrator().migrate_at(&legacy, now);
        assert_eq!(first, second);
    }

    #[test]
    fn caller_document_is_untouched() {
        let legacy = rich_legacy_document("r");
        let before = legacy.clone();
        let _ = migrate(&legacy, MigrationOptions::default());
        assert_eq!(legacy, before);
    }

    #[test]
    fn result_serializes_for_ui() {
        let result = migrator().migrate(&json!({}));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["success"], json!(false));
        assert!(value.get("document").is_none());
        assert_eq!(value["warnings"], json!([]));
    }
}
