//! AIM Core - Legacy Document Migration
//!
//! Upgrades flat "aim-v1" character profiles into layered "aim-v2"
//! documents:
//! - Composes the consolidated lore paragraph block
//! - Extracts supplementary persona traits
//! - Proposes crystallized (emphasized) keys
//! - Validates the persona layer against the canonical layer
//! - Reports every outcome as a value, never as an error or panic
//!
//! # Example
//!
//! ```rust,ignore
//! use aim_core::{MigrationOptions, Migrator};
//!
//! let migrator = Migrator::new(MigrationOptions::new());
//! let outcome = migrator.migrate_all(&stored_documents);
//!
//! for result in &outcome.results {
//!     if !result.success {
//!         eprintln!("{}", result.errors.join("; "));
//!     }
//! }
//! println!("{} migrated, {} failed", outcome.summary.success, outcome.summary.failed);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod batch;
pub mod error;
pub mod extract;
pub mod highlight;
pub mod lore;
pub mod migrate;
pub mod normalize;
pub mod options;

// Re-exports for convenience
pub use batch::{BatchOutcome, BatchSummary};
pub use error::MigrationError;
pub use extract::extract_traits;
pub use highlight::suggest_crystallized_keys;
pub use lore::compose_lore;
pub use migrate::{migrate, LegacySource, MigrationResult, MigrationWarning, Migrator};
pub use normalize::{normalize, normalize_key, normalize_traits};
pub use options::MigrationOptions;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for migrating documents
    pub use crate::{
        BatchOutcome, BatchSummary, LegacySource, MigrationOptions, MigrationResult, Migrator,
    };
    pub use aim_schema::{find_conflicts, resolve_conflicts, LayeredDocument, LegacyDocument};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
