//! Reading and writing document files

use anyhow::{bail, Context};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Read a JSON file holding an array of documents or a single document
pub fn read_documents(path: &Path) -> anyhow::Result<Vec<Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_documents(&text).with_context(|| format!("invalid input {}", path.display()))
}

/// Parse an array of documents or a single document
pub fn parse_documents(text: &str) -> anyhow::Result<Vec<Value>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => Ok(items),
        object @ Value::Object(_) => Ok(vec![object]),
        other => bail!("expected a JSON array or object, found {}", kind(&other)),
    }
}

/// Write `items` as a pretty-printed JSON array
pub fn write_documents<T: Serialize>(path: &Path, items: &[T]) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(items).context("failed to serialize output")?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_object_becomes_one_document() {
        let docs = parse_documents(r#"{"id": "a1"}"#).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["id"], "a1");
    }

    #[test]
    fn array_is_taken_as_is() {
        let docs = parse_documents(r#"[{"id": "a1"}, 3]"#).unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn scalars_are_rejected() {
        let err = parse_documents("42").unwrap_err();
        assert!(err.to_string().contains("a number"));
    }
}
