use serde_json::{json, Value};

use super::entry_codec::{entry_from_value, entry_to_value};
use super::{parse, ENTRIES_FIELD};
use crate::error::DecodeError;
use crate::model::HighscoreList;

pub fn encode_list(list: &HighscoreList) -> String {
    let entries = list.entries().iter().map(entry_to_value).collect::<Vec<_>>();
    json!({ ENTRIES_FIELD: entries }).to_string()
}

pub fn decode_list(input: &str) -> Result<HighscoreList, DecodeError> {
    let value = parse(input)?;
    let fail = |reason: String| DecodeError::new(input, reason);

    let entries = match value.get(ENTRIES_FIELD) {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(fail(format!(
                "field `{}` must be an array, found {}",
                ENTRIES_FIELD, other
            )))
        }
        None if value.is_object() => return Err(fail(format!("missing field `{}`", ENTRIES_FIELD))),
        None => return Err(fail(format!("expected a list object, found {}", value))),
    };

    let entries = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry_from_value(entry).map_err(|reason| fail(format!("entry {}: {}", index, reason)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HighscoreList::from_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HighscoreEntry;

    #[test]
    fn test_empty_list_shape() {
        assert_eq!(encode_list(&HighscoreList::new()), r#"{"entries":[]}"#);
    }

    #[test]
    fn test_round_trip_preserves_order() {
        // Deliberately unsorted: decoding must not rank.
        let list = HighscoreList::from_entries(vec![
            HighscoreEntry::new("c", 90),
            HighscoreEntry::new("a", 10),
            HighscoreEntry::new("b", 10),
        ]);
        assert_eq!(decode_list(&encode_list(&list)).unwrap(), list);
    }

    #[test]
    fn test_decode_scenario_payload() {
        let list = decode_list(r#"{"entries":[{"name":"Bo","score":10}]}"#).unwrap();
        assert_eq!(list.entries(), &[HighscoreEntry::new("Bo", 10)]);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let list =
            decode_list(r#"{"version":2,"entries":[{"name":"Bo","score":10,"x":true}]}"#).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_invalid_lists_fail() {
        assert!(decode_list("").is_err());
        assert!(decode_list("{}").is_err());
        assert!(decode_list("[]").is_err());
        assert!(decode_list(r#"{"entries":{}}"#).is_err());
        assert!(decode_list(r#"{"entries":[{"name":"Bo"}]}"#).is_err());
    }

    #[test]
    fn test_bad_entry_reports_index() {
        let input = r#"{"entries":[{"name":"Bo","score":1},{"score":2}]}"#;
        let err = decode_list(input).unwrap_err();
        assert_eq!(err.input, input);
        assert!(err.reason.starts_with("entry 1:"), "{}", err.reason);
    }
}
