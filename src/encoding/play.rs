//! Play situation encoding
//!
//! An in-game situational snapshot becomes a fixed 20-wide vector.
//!
//! Yard line convention: 0-100 measured toward the defense's goal line, so
//! values >= 80 put the home offense in scoring range and values <= 20 do
//! the same for the away offense. The possession-relative signed yard line
//! used for goal-to-go is `yard_line` when the home team has the ball and
//! `100 - yard_line` otherwise.

use log::warn;
use serde_json::Value;

use crate::encoding::coerce::{coerce_flag, coerce_float, value_kind};
use crate::GridironError;

/// Play state vector width
pub const PLAY_STATE_DIM: usize = 20;

/// Encode a play situation into a 20-wide feature vector
///
/// Slots 0-7: quarter, clock, down, distance, yard line, home score, away
/// score, possession flag (0=away, 1=home). Slots 8-13 are derived: red-zone
/// flag, goal-to-go flag, score differential, two-minute-warning
/// pass-through, timeouts remaining per side. Slots 14-19 are reserved.
///
/// Never fails: non-object input degrades to the zero vector, logged.
pub fn encode_play_state(play_state: &Value) -> Vec<f32> {
    let mut out = vec![0.0f32; PLAY_STATE_DIM];

    let state = match play_state {
        Value::Object(map) => map,
        other => {
            warn!(
                "{}",
                GridironError::MalformedRecord {
                    what: "play state",
                    found: value_kind(other),
                }
            );
            return out;
        }
    };

    let yard_line = coerce_float(state.get("yard_line"), 50.0);
    let distance = coerce_float(state.get("yards_to_go"), 10.0);
    let possession = coerce_float(state.get("possession"), 0.0);
    let home_score = coerce_float(state.get("home_score"), 0.0);
    let away_score = coerce_float(state.get("away_score"), 0.0);

    out[0] = coerce_float(state.get("quarter"), 1.0);
    out[1] = coerce_float(state.get("time_remaining"), 900.0);
    out[2] = coerce_float(state.get("down"), 1.0);
    out[3] = distance;
    out[4] = yard_line;
    out[5] = home_score;
    out[6] = away_score;
    out[7] = possession;

    // Red zone: within 20 yards of either end zone
    out[8] = if yard_line <= 20.0 || yard_line >= 80.0 {
        1.0
    } else {
        0.0
    };

    // Goal to go: the distance reaches the possessing team's end zone
    let signed_yard_line = if possession == 1.0 {
        yard_line
    } else {
        100.0 - yard_line
    };
    out[9] = if distance >= signed_yard_line { 1.0 } else { 0.0 };

    out[10] = home_score - away_score;
    out[11] = coerce_flag(state.get("two_minute_warning"));
    out[12] = coerce_float(state.get("timeouts_home"), 3.0);
    out[13] = coerce_float(state.get("timeouts_away"), 3.0);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_play_state_shape_and_defaults() {
        let out = encode_play_state(&json!({}));

        assert_eq!(out.len(), PLAY_STATE_DIM);
        assert_eq!(out[0], 1.0); // quarter
        assert_eq!(out[1], 900.0); // clock
        assert_eq!(out[2], 1.0); // down
        assert_eq!(out[3], 10.0); // distance
        assert_eq!(out[4], 50.0); // yard line
        assert_eq!(out[12], 3.0); // home timeouts
        assert_eq!(out[13], 3.0); // away timeouts
    }

    #[test]
    fn test_situation_values() {
        let out = encode_play_state(&json!({
            "quarter": 3,
            "time_remaining": 300,
            "down": 2,
            "yards_to_go": 5,
            "yard_line": 85,
            "home_score": 14,
            "away_score": 10,
            "possession": 1
        }));

        assert_eq!(out[0], 3.0);
        assert_eq!(out[1], 300.0);
        assert_eq!(out[2], 2.0);
        assert_eq!(out[8], 1.0); // 85 >= 80: red zone
        assert_eq!(out[9], 0.0); // 5 >= 85 is false: not goal to go
        assert_eq!(out[10], 4.0); // score differential
    }

    #[test]
    fn test_red_zone_boundaries() {
        for (yard_line, expected) in [(20, 1.0), (21, 0.0), (79, 0.0), (80, 1.0), (0, 1.0)] {
            let out = encode_play_state(&json!({"yard_line": yard_line}));
            assert_eq!(out[8], expected, "yard line {}", yard_line);
        }
    }

    #[test]
    fn test_goal_to_go_follows_possession() {
        // Home possession: signed yard line is the raw yard line
        let home = encode_play_state(&json!({
            "yard_line": 95, "yards_to_go": 95, "possession": 1
        }));
        assert_eq!(home[9], 1.0);

        let home_short = encode_play_state(&json!({
            "yard_line": 95, "yards_to_go": 10, "possession": 1
        }));
        assert_eq!(home_short[9], 0.0);

        let away = encode_play_state(&json!({
            "yard_line": 95, "yards_to_go": 5, "possession": 0
        }));
        // Signed yard line = 100 - 95 = 5, and 5 >= 5
        assert_eq!(away[9], 1.0);
    }

    #[test]
    fn test_two_minute_warning_pass_through() {
        let out = encode_play_state(&json!({"two_minute_warning": true}));
        assert_eq!(out[11], 1.0);

        let out = encode_play_state(&json!({"two_minute_warning": false}));
        assert_eq!(out[11], 0.0);
    }

    #[test]
    fn test_reserved_tail_is_zero() {
        let out = encode_play_state(&json!({"quarter": 4, "home_score": 35}));
        for i in 14..PLAY_STATE_DIM {
            assert_eq!(out[i], 0.0);
        }
    }

    #[test]
    fn test_non_object_degrades_to_zeros() {
        let out = encode_play_state(&json!("third and long"));
        assert_eq!(out.len(), PLAY_STATE_DIM);
        assert!(out.iter().all(|&v| v == 0.0));
    }
}
