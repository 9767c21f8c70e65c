//! Legacy ("aim-v1") character document
//!
//! A flat, single-generation profile. Every user-authored fact lives side by
//! side with identity data; there is no separation between externally
//! sourced attributes and customization.
//!
//! The five nested groups `personality`, `backstory`, `abilities`, `behavior`
//! and `appearance` are required. Fields *inside* a group default when
//! missing, since older editors wrote partial groups.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::de::value::StrDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{self, Display, Formatter};

/// Collection / generation tag for legacy documents
pub const LEGACY_GENERATION: &str = "aim-v1";

/// Groups a legacy document must carry to be readable
pub const REQUIRED_GROUPS: [&str; 5] = [
    "personality",
    "backstory",
    "abilities",
    "behavior",
    "appearance",
];

/// Flat legacy character profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDocument {
    /// Opaque identifier
    pub id: String,
    /// External subject (token) number, kept as text
    pub ora_number: String,
    /// Display name
    pub character_name: String,
    /// Image reference
    #[serde(default)]
    pub image: String,
    /// Nickname
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Age, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    /// Species, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    /// Collection name, only present in some older exports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    /// Personality group
    pub personality: Personality,
    /// Backstory group
    pub backstory: Backstory,
    /// Abilities group
    pub abilities: Abilities,
    /// Behavior group
    pub behavior: Behavior,
    /// Appearance group
    pub appearance: Appearance,
    /// Goals group (absent in the earliest documents)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Goals>,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
    /// Save counter, integer as string
    #[serde(default = "default_version")]
    pub version: String,
    /// First save
    pub created_at: DateTime<Utc>,
    /// Last save
    pub updated_at: DateTime<Utc>,
}

fn default_version() -> String {
    "1".to_string()
}

/// Personality traits and temperament
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Personality {
    pub primary_traits: Vec<String>,
    pub secondary_traits: Vec<String>,
    /// Always set by the editor, but unvalidated documents may lack it.
    /// A blank string reads as unset.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "blank_alignment_as_none"
    )]
    #[schemars(with = "Option<Alignment>")]
    pub alignment: Option<Alignment>,
    pub temperament: String,
    pub motivations: Vec<String>,
    pub fears: Vec<String>,
    pub quirks: Vec<String>,
}

/// Narrative history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Backstory {
    pub origin: String,
    pub childhood: String,
    pub formative_events: Vec<String>,
    pub relationships: Vec<String>,
    pub achievements: Vec<String>,
    pub failures: Vec<String>,
}

/// Strengths, weaknesses and skills
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Abilities {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub special_powers: Vec<String>,
    pub skills: Vec<Skill>,
}

/// A named skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Skill {
    pub name: String,
    /// Proficiency; the editor offers 1 to 10 but stored values are not clamped
    pub level: i64,
    #[serde(default)]
    pub description: String,
}

/// Speech and social behavior
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Behavior {
    pub speech_patterns: String,
    pub mannerisms: Vec<String>,
    pub habits: Vec<String>,
    /// Categorical in the editor ("Introverted", "Extroverted", ...), kept as text
    pub social_style: String,
    pub conflict_resolution: String,
    pub decision_making: String,
}

/// Physical description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Appearance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
    pub distinctive_features: Vec<String>,
    pub clothing: String,
    pub accessories: Vec<String>,
}

/// Goals; shared verbatim by both generations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Goals {
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    pub dreams: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_quest: Option<String>,
}

/// Nine-cell moral alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Alignment {
    #[serde(rename = "Lawful Good")]
    LawfulGood,
    #[serde(rename = "Neutral Good")]
    NeutralGood,
    #[serde(rename = "Chaotic Good")]
    ChaoticGood,
    #[serde(rename = "Lawful Neutral")]
    LawfulNeutral,
    #[serde(rename = "True Neutral", alias = "Neutral")]
    TrueNeutral,
    #[serde(rename = "Chaotic Neutral")]
    ChaoticNeutral,
    #[serde(rename = "Lawful Evil")]
    LawfulEvil,
    #[serde(rename = "Neutral Evil")]
    NeutralEvil,
    #[serde(rename = "Chaotic Evil")]
    ChaoticEvil,
}

impl Alignment {
    /// Display label, identical to the serialized form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LawfulGood => "Lawful Good",
            Self::NeutralGood => "Neutral Good",
            Self::ChaoticGood => "Chaotic Good",
            Self::LawfulNeutral => "Lawful Neutral",
            Self::TrueNeutral => "True Neutral",
            Self::ChaoticNeutral => "Chaotic Neutral",
            Self::LawfulEvil => "Lawful Evil",
            Self::NeutralEvil => "Neutral Evil",
            Self::ChaoticEvil => "Chaotic Evil",
        }
    }
}

impl Display for Alignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn blank_alignment_as_none<'de, D>(deserializer: D) -> Result<Option<Alignment>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => {
            let label: StrDeserializer<'_, D::Error> = label.into_deserializer();
            Alignment::deserialize(label).map(Some)
        }
    }
}
