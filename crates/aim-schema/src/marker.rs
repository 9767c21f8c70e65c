//! Generation marker for layered documents
//!
//! [`Generation`] serializes only as the literal `"aim-v2"` and refuses any
//! other value, so a document of another generation can never be read as a
//! layered one by accident.

use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Literal marker carried by every layered document
pub const LAYERED_GENERATION: &str = "aim-v2";

/// Zero-sized generation tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Generation;

impl Generation {
    /// The literal value
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        LAYERED_GENERATION
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(LAYERED_GENERATION)
    }
}

impl Serialize for Generation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(LAYERED_GENERATION)
    }
}

impl<'de> Deserialize<'de> for Generation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GenerationVisitor;

        impl Visitor<'_> for GenerationVisitor {
            type Value = Generation;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "the generation marker \"{LAYERED_GENERATION}\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Generation, E> {
                if v == LAYERED_GENERATION {
                    Ok(Generation)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_str(GenerationVisitor)
    }
}

impl JsonSchema for Generation {
    fn schema_name() -> String {
        "Generation".to_string()
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            const_value: Some(serde_json::Value::String(LAYERED_GENERATION.to_string())),
            ..Default::default()
        }
        .into()
    }
}
