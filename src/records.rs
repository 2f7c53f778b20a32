//! Record hygiene
//!
//! Light cleaning of raw player records before they reach the encoders.
//! Scraped data arrives with stray whitespace and inconsistent position
//! casing; cleaning normalizes those without touching stat values.

use serde_json::{Map, Value};

use crate::Position;

/// The nested stat mappings every player record is expected to carry
pub const SUB_MAPPINGS: [&str; 4] = ["combine", "college", "nfl_career", "seasonal"];

/// Clean a raw player record
///
/// Trims the name, uppercases and trims the position, and ensures the nested
/// stat mappings exist as (possibly empty) objects. Non-object input is
/// returned unchanged; the encoder owns that structural-failure path.
pub fn clean_player_record(record: Value) -> Value {
    let mut map = match record {
        Value::Object(map) => map,
        other => return other,
    };

    if let Some(Value::String(name)) = map.get_mut("name") {
        *name = name.trim().to_string();
    }

    if let Some(Value::String(position)) = map.get_mut("position") {
        *position = position.trim().to_uppercase();
    }

    for key in SUB_MAPPINGS {
        if !map.contains_key(key) {
            map.insert(key.to_string(), Value::Object(Map::new()));
        }
    }

    Value::Object(map)
}

/// Whether a position string names one of the ten valid positions
pub fn is_valid_position(position: &str) -> bool {
    Position::parse(position).is_some()
}
