//! Testing utilities for AIM workspace
//!
//! Shared legacy document fixtures.

#![allow(missing_docs)]

use aim_schema::{
    Abilities, Alignment, Appearance, Backstory, Behavior, Goals, LegacyDocument, Personality,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn migration_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
}

/// Legacy document with every group present and every field empty
pub fn empty_legacy_document(id: &str) -> LegacyDocument {
    LegacyDocument {
        id: id.to_string(),
        ora_number: "0".to_string(),
        character_name: String::new(),
        image: String::new(),
        nickname: None,
        age: None,
        species: None,
        collection: None,
        personality: Personality::default(),
        backstory: Backstory::default(),
        abilities: Abilities::default(),
        behavior: Behavior::default(),
        appearance: Appearance::default(),
        goals: None,
        tags: Vec::new(),
        notes: String::new(),
        version: "1".to_string(),
        created_at: created_at(),
        updated_at: created_at(),
    }
}

/// The "Nyx" document used by the full-migration scenario
pub fn nyx() -> LegacyDocument {
    let mut doc = empty_legacy_document("a1");
    doc.ora_number = "42".to_string();
    doc.character_name = "Nyx".to_string();
    doc.image = "ipfs://nyx.png".to_string();
    doc.personality.primary_traits = vec!["bold".to_string()];
    doc.personality.alignment = Some(Alignment::ChaoticGood);
    doc.personality.temperament = "fierce".to_string();
    doc.backstory.origin = "born of void".to_string();
    doc.abilities.strengths = vec!["speed".to_string()];
    doc.behavior.social_style = "Introverted".to_string();
    doc.goals = Some(Goals::default());
    doc.tags = vec!["demo".to_string()];
    doc
}

/// A richly populated legacy document
pub fn rich_legacy_document(id: &str) -> LegacyDocument {
    let mut doc = empty_legacy_document(id);
    doc.ora_number = "1337".to_string();
    doc.character_name = "Vesper".to_string();
    doc.nickname = Some("Ves".to_string());
    doc.image = "ipfs://vesper.png".to_string();
    doc.collection = Some("Sugartown Oras".to_string());
    doc.personality = Personality {
        primary_traits: strings(&["curious", "loyal", "stubborn", "witty"]),
        secondary_traits: strings(&["impatient"]),
        alignment: Some(Alignment::NeutralGood),
        temperament: "warm".to_string(),
        motivations: strings(&["find her sister"]),
        fears: strings(&["deep water"]),
        quirks: strings(&["hums when nervous"]),
    };
    doc.backstory = Backstory {
        origin: "the lantern district".to_string(),
        childhood: "raised by clockmakers".to_string(),
        formative_events: strings(&["the great fire", "the flood"]),
        ..Backstory::default()
    };
    doc.abilities = Abilities {
        strengths: strings(&["agility", "tinkering"]),
        special_powers: strings(&["time-slip"]),
        ..Abilities::default()
    };
    doc.behavior = Behavior {
        speech_patterns: "short, clipped sentences".to_string(),
        social_style: "Ambivert".to_string(),
        ..Behavior::default()
    };
    doc.appearance = Appearance {
        height: Some("5'4\"".to_string()),
        build: Some("wiry".to_string()),
        distinctive_features: strings(&["brass goggles", "scar on chin"]),
        ..Appearance::default()
    };
    doc.goals = Some(Goals {
        short_term: strings(&["repair the tower clock"]),
        current_quest: Some("the missing gear".to_string()),
        ..Goals::default()
    });
    doc.tags = strings(&["steampunk", "hero"]);
    doc.notes = "fan favourite".to_string();
    doc.version = "7".to_string();
    doc
}

/// A legacy document as an untyped stored value
pub fn legacy_value(doc: &LegacyDocument) -> Value {
    serde_json::to_value(doc).unwrap()
}

/// A stored value with one top-level field removed
pub fn legacy_value_without(doc: &LegacyDocument, field: &str) -> Value {
    let mut value = legacy_value(doc);
    value.as_object_mut().unwrap().remove(field);
    value
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
