//! Tensor composition
//!
//! Game and play tensors are pure concatenations of fixed-width parts, never
//! interleaved, truncated, or reordered. A wrong constituent length is a
//! caller defect and fails loudly, unlike the missing-data tolerance inside
//! the encoders.
//!
//! Offsets within a game tensor: home roster `[0, 42880)`, away roster
//! `[42880, 85760)`, context `[85760, 85810)`. A play tensor appends the
//! 20-wide play state for a total of 85,830.

use serde_json::Value;

use crate::encoding::context::{encode_context, CONTEXT_DIM};
use crate::encoding::play::{encode_play_state, PLAY_STATE_DIM};
use crate::encoding::roster::{encode_roster, ROSTER_DIM};
use crate::{GridironError, Result};

/// Game tensor width (two rosters plus context)
pub const GAME_DIM: usize = 2 * ROSTER_DIM + CONTEXT_DIM;

/// Play tensor width (game tensor plus play state)
pub const PLAY_DIM: usize = GAME_DIM + PLAY_STATE_DIM;

/// Concatenate two encoded rosters and a context vector into a game tensor
///
/// Order is fixed: home, away, context. Errors if any constituent has the
/// wrong length.
pub fn compose_game(home: &[f32], away: &[f32], context: &[f32]) -> Result<Vec<f32>> {
    check_shape("home roster vector", home, ROSTER_DIM)?;
    check_shape("away roster vector", away, ROSTER_DIM)?;
    check_shape("context vector", context, CONTEXT_DIM)?;

    let mut out = Vec::with_capacity(GAME_DIM);
    out.extend_from_slice(home);
    out.extend_from_slice(away);
    out.extend_from_slice(context);
    Ok(out)
}

/// Concatenate an encoded game tensor and a play state vector
pub fn compose_play(game: &[f32], play_state: &[f32]) -> Result<Vec<f32>> {
    check_shape("game vector", game, GAME_DIM)?;
    check_shape("play state vector", play_state, PLAY_STATE_DIM)?;

    let mut out = Vec::with_capacity(PLAY_DIM);
    out.extend_from_slice(game);
    out.extend_from_slice(play_state);
    Ok(out)
}

/// Encode a full game from raw records
///
/// Shapes are correct by construction, so this surface is infallible.
pub fn encode_game(home: &[Value], away: &[Value], context: &Value) -> Vec<f32> {
    let mut out = Vec::with_capacity(GAME_DIM);
    out.extend(encode_roster(home));
    out.extend(encode_roster(away));
    out.extend(encode_context(context));
    out
}

/// Encode a full play from raw records
pub fn encode_play(home: &[Value], away: &[Value], context: &Value, play_state: &Value) -> Vec<f32> {
    let mut out = encode_game(home, away, context);
    out.extend(encode_play_state(play_state));
    out
}

fn check_shape(what: &'static str, vector: &[f32], expected: usize) -> Result<()> {
    if vector.len() != expected {
        return Err(GridironError::ShapeMismatch {
            what,
            expected,
            actual: vector.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::player::PLAYER_DIM;
    use serde_json::json;

    #[test]
    fn test_game_dimensions() {
        assert_eq!(ROSTER_DIM, 42_880);
        assert_eq!(GAME_DIM, 85_810);
        assert_eq!(PLAY_DIM, 85_830);
    }

    #[test]
    fn test_compose_game_segment_provenance() {
        // Marker values prove each segment comes solely from its source
        let home = vec![1.0f32; ROSTER_DIM];
        let away = vec![2.0f32; ROSTER_DIM];
        let context = vec![3.0f32; CONTEXT_DIM];

        let game = compose_game(&home, &away, &context).unwrap();

        assert_eq!(game.len(), GAME_DIM);
        assert!(game[..ROSTER_DIM].iter().all(|&v| v == 1.0));
        assert!(game[ROSTER_DIM..2 * ROSTER_DIM].iter().all(|&v| v == 2.0));
        assert!(game[2 * ROSTER_DIM..].iter().all(|&v| v == 3.0));
    }

    #[test]
    fn test_compose_shape_mismatch_is_fatal() {
        let good = vec![0.0f32; ROSTER_DIM];
        let short = vec![0.0f32; ROSTER_DIM - 1];
        let context = vec![0.0f32; CONTEXT_DIM];

        assert!(compose_game(&short, &good, &context).is_err());
        assert!(compose_game(&good, &short, &context).is_err());
        assert!(compose_game(&good, &good, &good).is_err());

        let game = vec![0.0f32; GAME_DIM];
        assert!(compose_play(&game, &context).is_err());
        assert!(compose_play(&context, &vec![0.0f32; PLAY_STATE_DIM]).is_err());
    }

    #[test]
    fn test_encode_game_from_records() {
        let home = vec![json!({"identity": "home000", "position": "QB"})];
        let away = vec![json!({"identity": "away000", "position": "QB"})];
        let context = json!({"temperature": 72, "dome": true, "week": 1, "season": 2024});

        let game = encode_game(&home, &away, &context);
        assert_eq!(game.len(), GAME_DIM);

        // Context segment sits at the tail
        assert_eq!(game[2 * ROSTER_DIM], 72.0);
        assert_eq!(game[2 * ROSTER_DIM + 1], 1.0);

        // Home and away segments match standalone roster encodings
        assert_eq!(&game[..ROSTER_DIM], encode_roster(&home).as_slice());
        assert_eq!(
            &game[ROSTER_DIM..2 * ROSTER_DIM],
            encode_roster(&away).as_slice()
        );
    }

    #[test]
    fn test_encode_play_appends_state() {
        let context = json!({});
        let play_state = json!({"quarter": 4, "down": 3});

        let play = encode_play(&[], &[], &context, &play_state);
        assert_eq!(play.len(), PLAY_DIM);
        assert_eq!(play[GAME_DIM], 4.0); // quarter
        assert_eq!(play[GAME_DIM + 2], 3.0); // down

        // Empty rosters encode as null players
        assert!(play[..PLAYER_DIM].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_composition_preserves_constituents() {
        let home: Vec<f32> = (0..ROSTER_DIM).map(|i| i as f32).collect();
        let away = vec![0.5f32; ROSTER_DIM];
        let context = vec![7.0f32; CONTEXT_DIM];

        let game = compose_game(&home, &away, &context).unwrap();
        let play_state = vec![9.0f32; PLAY_STATE_DIM];
        let play = compose_play(&game, &play_state).unwrap();

        assert_eq!(&play[..GAME_DIM], game.as_slice());
        assert_eq!(&play[GAME_DIM..], play_state.as_slice());
    }
}
