//! Game context encoding
//!
//! Game metadata (weather, records, timing) becomes a fixed 50-wide vector.

use log::warn;
use serde_json::Value;

use crate::encoding::coerce::{coerce_flag, coerce_float, coerce_text, value_kind};
use crate::GridironError;

/// Game context vector width
pub const CONTEXT_DIM: usize = 50;

/// Weather keywords matched as binary flags, in slot order
const WEATHER_KEYWORDS: [&str; 5] = ["clear", "cloudy", "rain", "snow", "fog"];

/// Surface keywords matched as binary flags, in slot order
const SURFACE_KEYWORDS: [&str; 2] = ["grass", "turf"];

/// Encode game context into a 50-wide feature vector
///
/// Slots 0-9: temperature, dome flag, wind, week, season, home wins/losses,
/// away wins/losses, playoff flag. Slots 10-14: weather keyword flags,
/// case-insensitive substring over the free-text description - not mutually
/// exclusive and not exhaustive; zero or several may be set. Slots 15-16:
/// surface keyword flags, same policy. Slot 17: kickoff hour. Slots 18-49
/// are reserved (zero), open for extension.
///
/// Never fails: non-object input degrades to the zero vector, logged.
pub fn encode_context(context: &Value) -> Vec<f32> {
    let mut out = vec![0.0f32; CONTEXT_DIM];

    let info = match context {
        Value::Object(map) => map,
        other => {
            warn!(
                "{}",
                GridironError::MalformedRecord {
                    what: "game context",
                    found: value_kind(other),
                }
            );
            return out;
        }
    };

    // Basic game info (5)
    out[0] = coerce_float(info.get("temperature"), 70.0);
    out[1] = coerce_flag(info.get("dome"));
    out[2] = coerce_float(info.get("wind_speed"), 0.0);
    out[3] = coerce_float(info.get("week"), 0.0);
    out[4] = coerce_float(info.get("season"), 2024.0);

    // Team records (4)
    out[5] = coerce_float(info.get("home_wins"), 0.0);
    out[6] = coerce_float(info.get("home_losses"), 0.0);
    out[7] = coerce_float(info.get("away_wins"), 0.0);
    out[8] = coerce_float(info.get("away_losses"), 0.0);

    out[9] = coerce_flag(info.get("playoff"));

    // Weather keyword flags (5)
    let weather = coerce_text(info.get("weather"), "").to_lowercase();
    for (i, keyword) in WEATHER_KEYWORDS.iter().enumerate() {
        if weather.contains(keyword) {
            out[10 + i] = 1.0;
        }
    }

    // Surface keyword flags (2)
    let surface = coerce_text(info.get("surface"), "").to_lowercase();
    for (i, keyword) in SURFACE_KEYWORDS.iter().enumerate() {
        if surface.contains(keyword) {
            out[15 + i] = 1.0;
        }
    }

    out[17] = coerce_float(info.get("start_time_hour"), 13.0);

    out
}
