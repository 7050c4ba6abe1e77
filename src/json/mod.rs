//! The on-disk and on-the-wire JSON shape of highscores.
//!
//! Entries are `{"name": <string>, "score": <integer>}` and lists are
//! `{"entries": [<entry>, ...]}`. The shape is spelled out field by field here
//! instead of being derived, so the local files and the server payloads stay
//! interchangeable no matter how the in-memory types evolve. Unknown fields are
//! ignored on decode.

mod entry_codec;
mod list_codec;

use serde_json::Value;

use crate::error::DecodeError;

pub use entry_codec::{decode_entry, encode_entry};
pub use list_codec::{decode_list, encode_list};

const NAME_FIELD: &str = "name";
const SCORE_FIELD: &str = "score";
const ENTRIES_FIELD: &str = "entries";

fn parse(input: &str) -> Result<Value, DecodeError> {
    serde_json::from_str(input).map_err(|e| DecodeError::new(input, e.to_string()))
}
