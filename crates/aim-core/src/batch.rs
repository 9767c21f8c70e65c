//! Batch migration
//!
//! A fold of [`Migrator::migrate_at`] over many documents. Each document is
//! migrated in isolation: one failure never aborts or alters another, and
//! `results[i]` always belongs to `docs[i]`.

use crate::migrate::{LegacySource, MigrationResult, Migrator};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Success/failure tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub success: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// Tally a slice of results
    #[must_use]
    pub fn tally(results: &[MigrationResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, result| {
            if result.success {
                acc.success += 1;
            } else {
                acc.failed += 1;
            }
            acc
        })
    }

    /// Documents processed
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.success + self.failed
    }

    /// Whether every document migrated
    #[inline]
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Results of a batch, positionally aligned with the input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<MigrationResult>,
    pub summary: BatchSummary,
}

impl BatchOutcome {
    fn from_results(results: Vec<MigrationResult>) -> Self {
        let summary = BatchSummary::tally(&results);
        tracing::info!(
            "Batch migration finished: {} succeeded, {} failed",
            summary.success,
            summary.failed
        );
        Self { results, summary }
    }

    /// Successfully migrated documents, in input order
    pub fn documents(&self) -> impl Iterator<Item = &aim_schema::LayeredDocument> {
        self.results.iter().filter_map(MigrationResult::document)
    }
}

impl Migrator {
    /// Migrate every document in order
    ///
    /// All documents share one migration timestamp.
    pub fn migrate_all<S: LegacySource>(&self, docs: &[S]) -> BatchOutcome {
        self.migrate_all_at(docs, Utc::now())
    }

    /// Migrate every document in order, stamped with `now`
    pub fn migrate_all_at<S: LegacySource>(&self, docs: &[S], now: DateTime<Utc>) -> BatchOutcome {
        tracing::debug!("Migrating batch of {} documents", docs.len());
        let results = docs.iter().map(|doc| self.migrate_at(doc, now)).collect();
        BatchOutcome::from_results(results)
    }

    /// Migrate every document on the rayon pool
    ///
    /// Same ordering and summary as [`Migrator::migrate_all`].
    pub fn migrate_all_parallel<S: LegacySource + Sync>(&self, docs: &[S]) -> BatchOutcome {
        self.migrate_all_parallel_at(docs, Utc::now())
    }

    /// Parallel variant of [`Migrator::migrate_all_at`]
    pub fn migrate_all_parallel_at<S: LegacySource + Sync>(
        &self,
        docs: &[S],
        now: DateTime<Utc>,
    ) -> BatchOutcome {
        tracing::debug!("Migrating batch of {} documents in parallel", docs.len());
        let results = docs
            .par_iter()
            .map(|doc| self.migrate_at(doc, now))
            .collect();
        BatchOutcome::from_results(results)
    }
}
