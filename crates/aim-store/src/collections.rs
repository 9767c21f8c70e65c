//! One store per document generation

use crate::store::{DocumentStore, MemoryStore};
use aim_core::{BatchOutcome, Migrator};
use aim_schema::{LayeredDocument, LegacyDocument};

/// The `"aim-v1"` and `"aim-v2"` collections side by side
#[derive(Debug, Default)]
pub struct Collections {
    pub legacy: MemoryStore<LegacyDocument>,
    pub layered: MemoryStore<LayeredDocument>,
}

impl Collections {
    /// Create empty collections
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Migrate every legacy document and save the successes as layered
    ///
    /// Legacy documents are left in place. Results follow the legacy
    /// collection's id order.
    pub fn migrate_legacy(&self, migrator: &Migrator) -> BatchOutcome {
        let legacy = self.legacy.list();
        let outcome = migrator.migrate_all(&legacy);

        let mut saved = 0usize;
        for doc in outcome.documents() {
            match self.layered.save(doc.clone()) {
                Ok(_) => saved += 1,
                Err(e) => tracing::warn!(document_id = %doc.id, error = %e, "Failed to save migrated document"),
            }
        }

        tracing::info!(
            "Migrated legacy collection: {} succeeded, {} failed, {} saved",
            outcome.summary.success,
            outcome.summary.failed,
            saved
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aim_core::MigrationOptions;
    use aim_test_utils::{nyx, rich_legacy_document};
    use pretty_assertions::assert_eq;

    #[test]
    fn migrate_legacy_fills_layered_collection() {
        let collections = Collections::new();
        collections.legacy.save(nyx()).unwrap();
        collections.legacy.save(rich_legacy_document("b2")).unwrap();

        let outcome = collections.migrate_legacy(&Migrator::default());

        assert!(outcome.summary.all_succeeded());
        assert_eq!(collections.legacy.len(), 2);
        let ids: Vec<String> = collections.layered.list().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["migrated-a1", "migrated-b2"]);
        assert_eq!(collections.layered.revision("migrated-a1"), Some(1));
    }

    #[test]
    fn preserved_ids_overwrite_on_rerun() {
        let collections = Collections::new();
        collections.legacy.save(nyx()).unwrap();
        let migrator = Migrator::new(MigrationOptions::new().with_preserve_original_id(true));

        collections.migrate_legacy(&migrator);
        collections.migrate_legacy(&migrator);

        assert_eq!(collections.layered.len(), 1);
        assert_eq!(collections.layered.revision("a1"), Some(2));
    }
}
