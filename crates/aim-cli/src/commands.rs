//! Subcommand implementations
//!
//! Each command returns a report; `main` decides the exit status.

use crate::config::{load_options, OptionOverrides};
use crate::input::{read_documents, write_documents};
use aim_core::{BatchSummary, Migrator};
use aim_schema::{LayeredDocument, LegacyDocument};
use aim_store::StoredDocument;
use anyhow::Context;
use std::path::PathBuf;

/// Arguments of `aim migrate`
#[derive(Debug, Clone, Default)]
pub struct MigrateRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub preserve_ids: bool,
    pub parallel: bool,
}

/// Migrate a legacy file and write the successful documents
///
/// Per-document failures are counted in the summary, not returned as errors.
pub fn migrate(request: &MigrateRequest) -> anyhow::Result<BatchSummary> {
    let options = load_options(
        request.config.as_deref(),
        OptionOverrides {
            preserve_ids: request.preserve_ids,
        },
    )?;
    let docs = read_documents(&request.input)?;
    tracing::info!("Migrating {} documents from {}", docs.len(), request.input.display());

    let migrator = Migrator::new(options);
    let outcome = if request.parallel {
        migrator.migrate_all_parallel(&docs)
    } else {
        migrator.migrate_all(&docs)
    };

    for (index, result) in outcome.results.iter().enumerate() {
        for warning in &result.warnings {
            tracing::warn!(index, "{}", warning);
        }
        for error in &result.errors {
            tracing::error!(index, "{}", error);
        }
    }

    let migrated: Vec<&LayeredDocument> = outcome.documents().collect();
    write_documents(&request.output, &migrated)?;
    tracing::info!("Wrote {} documents to {}", migrated.len(), request.output.display());

    Ok(outcome.summary)
}

/// Result of `aim check`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub checked: usize,
    /// Document id and the canonical keys its persona layer shadows
    pub violations: Vec<(String, Vec<String>)>,
}

impl CheckReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Verify the layer invariant of every layered document in a file
///
/// Fails outright if a document is not a layered document at all.
pub fn check(input: &std::path::Path) -> anyhow::Result<CheckReport> {
    let values = read_documents(input)?;
    let mut report = CheckReport::default();

    for (index, value) in values.into_iter().enumerate() {
        LayeredDocument::validate_stored(&value, index)?;
        let doc: LayeredDocument = serde_json::from_value(value)
            .with_context(|| format!("document #{index} is not a layered document"))?;

        if let Err(e) = doc.check_invariant() {
            tracing::warn!(document_id = %doc.id, "{}", e);
            let keys = e.keys().into_iter().map(str::to_string).collect();
            report.violations.push((doc.id.clone(), keys));
        }
        report.checked += 1;
    }

    Ok(report)
}

/// Which document generation to describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SchemaKind {
    Legacy,
    Layered,
}

/// JSON Schema of a document generation, pretty-printed
pub fn schema(kind: SchemaKind) -> anyhow::Result<String> {
    let root = match kind {
        SchemaKind::Legacy => schemars::schema_for!(LegacyDocument),
        SchemaKind::Layered => schemars::schema_for!(LayeredDocument),
    };
    serde_json::to_string_pretty(&root).context("failed to serialize schema")
}
