//! AIM Document Schema
//!
//! The two generations of character profile documents and the validator that
//! keeps their attribute layers apart.
//!
//! # Core Concepts
//!
//! - [`LegacyDocument`]: flat "aim-v1" profile, one layer, user authored
//! - [`LayeredDocument`]: "aim-v2" profile separating canonical (external,
//!   read-only) traits from persona (user) traits
//! - [`find_conflicts`] / [`resolve_conflicts`]: the only authority on the
//!   layer invariant `keys(persona.traitsAdd) ∩ keys(canonical.traits) = ∅`
//!
//! # Example
//!
//! ```rust
//! use aim_schema::{LayeredDocument, TraitMap};
//!
//! let mut doc = LayeredDocument::scaffold("ora-42");
//! let mut canonical = TraitMap::new();
//! canonical.insert("eyes".to_string(), "red".to_string());
//! doc.set_canonical(canonical, None);
//!
//! assert!(doc.add_trait("eyes", "blue").is_err());
//! assert!(doc.add_trait("mood", "calm").is_ok());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod conflict;
mod error;
mod layered;
mod legacy;
mod marker;

pub use conflict::{find_conflicts, is_disjoint, resolve_conflicts, TraitMap};
pub use error::SchemaError;
pub use layered::{
    Canonical, LayeredDocument, MetaBag, Normalized, Persona, Sources, Subject, UiHints,
};
pub use legacy::{
    Abilities, Alignment, Appearance, Backstory, Behavior, Goals, LegacyDocument, Personality,
    Skill, LEGACY_GENERATION, REQUIRED_GROUPS,
};
pub use marker::{Generation, LAYERED_GENERATION};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
