use serde_json::{json, Value};

use super::{parse, NAME_FIELD, SCORE_FIELD};
use crate::error::DecodeError;
use crate::model::HighscoreEntry;

pub(super) fn entry_to_value(entry: &HighscoreEntry) -> Value {
    json!({
        NAME_FIELD: entry.name(),
        SCORE_FIELD: entry.score(),
    })
}

/// Reads an entry out of an already parsed value. Errors are plain reasons; the
/// caller attaches the raw input.
pub(super) fn entry_from_value(value: &Value) -> Result<HighscoreEntry, String> {
    let object = value
        .as_object()
        .ok_or_else(|| format!("expected an entry object, found {}", value))?;

    let name = match object.get(NAME_FIELD) {
        Some(Value::String(name)) => name.clone(),
        Some(other) => return Err(format!("field `{}` must be a string, found {}", NAME_FIELD, other)),
        None => return Err(format!("missing field `{}`", NAME_FIELD)),
    };

    let score = match object.get(SCORE_FIELD) {
        Some(score) => score.as_u64().ok_or_else(|| {
            format!(
                "field `{}` must be a non-negative integer, found {}",
                SCORE_FIELD, score
            )
        })?,
        None => return Err(format!("missing field `{}`", SCORE_FIELD)),
    };

    Ok(HighscoreEntry::new(name, score))
}

pub fn encode_entry(entry: &HighscoreEntry) -> String {
    entry_to_value(entry).to_string()
}

pub fn decode_entry(input: &str) -> Result<HighscoreEntry, DecodeError> {
    let value = parse(input)?;
    entry_from_value(&value).map_err(|reason| DecodeError::new(input, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_entry_shape() {
        let encoded = encode_entry(&HighscoreEntry::new("Ada", 42));
        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value, json!({"name": "Ada", "score": 42}));
    }

    #[test]
    fn test_round_trip() {
        for entry in [
            HighscoreEntry::new("Ada", 42),
            HighscoreEntry::new("", 0),
            HighscoreEntry::new("Zoë \"quoted\"", u64::MAX),
        ] {
            assert_eq!(decode_entry(&encode_entry(&entry)).unwrap(), entry);
        }
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let entry = decode_entry(r#"{"name":"Bo","score":10,"date":"2024-01-01"}"#).unwrap();
        assert_eq!(entry, HighscoreEntry::new("Bo", 10));
    }

    #[test]
    fn test_missing_field_fails() {
        let input = r#"{"name":"Bo"}"#;
        let err = decode_entry(input).unwrap_err();
        assert_eq!(err.input, input);
        assert!(err.reason.contains("score"), "{}", err.reason);
    }

    #[test]
    fn test_wrong_types_fail() {
        assert!(decode_entry(r#"{"name":7,"score":10}"#).is_err());
        assert!(decode_entry(r#"{"name":"Bo","score":"10"}"#).is_err());
        assert!(decode_entry(r#"{"name":"Bo","score":-1}"#).is_err());
        assert!(decode_entry(r#"{"name":"Bo","score":1.5}"#).is_err());
        assert!(decode_entry(r#"["Bo",10]"#).is_err());
    }

    #[test]
    fn test_malformed_json_fails_with_input() {
        let err = decode_entry("not json").unwrap_err();
        assert_eq!(err.input, "not json");
    }
}
