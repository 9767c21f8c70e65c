//! Lore composition
//!
//! Folds the legacy narrative fields into the single `persona.lore` string.
//! Paragraph order and labels are a stable format: consumers parse them.

use crate::extract::{join_present, LIST_SEPARATOR};
use aim_schema::LegacyDocument;

/// Separator between paragraphs
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Paragraph labels, in emission order
pub mod labels {
    pub const ORIGIN: &str = "Origin";
    pub const CHILDHOOD: &str = "Childhood";
    pub const KEY_EVENTS: &str = "Key Events";
    pub const SPEECH: &str = "Speech";
    pub const APPEARANCE: &str = "Appearance";
}

/// Compose the lore paragraph block
///
/// Emits, in order, only the non-empty among origin, childhood, formative
/// events, speech patterns and distinctive features. Returns an empty string
/// when all are empty.
#[must_use]
pub fn compose_lore(doc: &LegacyDocument) -> String {
    let paragraphs = [
        (labels::ORIGIN, doc.backstory.origin.clone()),
        (labels::CHILDHOOD, doc.backstory.childhood.clone()),
        (
            labels::KEY_EVENTS,
            join_present(&doc.backstory.formative_events, LIST_SEPARATOR),
        ),
        (labels::SPEECH, doc.behavior.speech_patterns.clone()),
        (
            labels::APPEARANCE,
            join_present(&doc.appearance.distinctive_features, LIST_SEPARATOR),
        ),
    ];

    paragraphs
        .iter()
        .filter(|(_, body)| !body.is_empty())
        .map(|(label, body)| format!("{label}: {body}"))
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aim_test_utils::{empty_legacy_document, rich_legacy_document, strings};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_has_no_lore() {
        assert_eq!(compose_lore(&empty_legacy_document("x")), "");
    }

    #[test]
    fn skips_missing_paragraphs() {
        let mut doc = empty_legacy_document("x");
        doc.backstory.origin = "X".into();
        doc.behavior.speech_patterns = "Y".into();
        assert_eq!(compose_lore(&doc), "Origin: X\n\nSpeech: Y");
    }

    #[test]
    fn lists_are_comma_joined() {
        let mut doc = empty_legacy_document("x");
        doc.backstory.formative_events = strings(&["fire", "flood"]);
        doc.appearance.distinctive_features = strings(&["goggles"]);
        assert_eq!(
            compose_lore(&doc),
            "Key Events: fire, flood\n\nAppearance: goggles"
        );
    }

    #[test]
    fn blank_list_items_never_leave_bare_separators() {
        let mut doc = empty_legacy_document("x");
        doc.backstory.formative_events = strings(&["", ""]);
        doc.appearance.distinctive_features = strings(&["", "goggles", ""]);
        assert_eq!(compose_lore(&doc), "Appearance: goggles");
    }

    #[test]
    fn full_document_keeps_fixed_order() {
        let lore = compose_lore(&rich_legacy_document("x"));
        let labels: Vec<&str> = lore
            .split(PARAGRAPH_SEPARATOR)
            .map(|p| p.split(':').next().unwrap())
            .collect();
        assert_eq!(
            labels,
            vec!["Origin", "Childhood", "Key Events", "Speech", "Appearance"]
        );
    }
}
