//! AIM Document Store
//!
//! Persistence contract for both document generations, with a concurrent
//! in-memory implementation.
//!
//! # Core Concepts
//!
//! - [`StoredDocument`]: what a generation tells the store about itself
//!   (collection name, revision, import checks)
//! - [`DocumentStore`]: list/get/save/delete plus JSON text export and import
//! - [`MemoryStore`]: [`DocumentStore`] over a sharded concurrent map
//! - [`Collections`]: the `"aim-v1"` and `"aim-v2"` stores together
//!
//! Unlike migration, store failures are returned as [`StoreError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use aim_store::{Collections, DocumentStore};
//!
//! let collections = Collections::new();
//! collections.legacy.import_text(&legacy_json)?;
//! let outcome = collections.migrate_legacy(&Migrator::default());
//! let v2_json = collections.layered.export_text()?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod collections;
pub mod document;
pub mod error;
pub mod store;

pub use collections::Collections;
pub use document::{StoredDocument, REVISION_META_KEY};
pub use error::StoreError;
pub use store::{DocumentStore, MemoryStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
