//! Roster grid encoding
//!
//! An ordered sequence of player records becomes a fixed 64x670 grid,
//! flattened row-major. Unfilled rows are null players (all zeros).

use log::debug;
use serde_json::Value;

use crate::encoding::player::{encode_player, PLAYER_DIM};

/// Number of roster slots per team
pub const ROSTER_SIZE: usize = 64;

/// Flattened roster vector width (64 x 670)
pub const ROSTER_DIM: usize = ROSTER_SIZE * PLAYER_DIM;

/// Encode an ordered roster into a flattened 64x670 grid
///
/// Row `i` holds the encoding of `players[i]` for `i < min(len, 64)`; every
/// later row is a null player. Input beyond the 64th record is ignored, not
/// an error. Row order is exactly the input order; callers own any desired
/// ordering (e.g. depth-chart order).
pub fn encode_roster(players: &[Value]) -> Vec<f32> {
    let mut grid = vec![0.0f32; ROSTER_DIM];

    for (row, record) in players.iter().take(ROSTER_SIZE).enumerate() {
        let start = row * PLAYER_DIM;
        grid[start..start + PLAYER_DIM].copy_from_slice(&encode_player(record));
    }

    let count = players.len().min(ROSTER_SIZE);
    if players.len() > ROSTER_SIZE {
        debug!(
            "Roster input has {} records; slots beyond {} ignored",
            players.len(),
            ROSTER_SIZE
        );
    }
    debug!("Built roster grid with {} players", count);

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_player(i: usize) -> Value {
        json!({
            "identity": format!("player{:03}", i),
            "name": format!("Player {}", i),
            "position": if i == 0 { "QB" } else { "RB" },
        })
    }

    fn make_roster(n: usize) -> Vec<Value> {
        (0..n).map(make_player).collect()
    }

    #[test]
    fn test_roster_shape_across_input_sizes() {
        for k in [0, 1, 5, 64, 100, 1000] {
            let grid = encode_roster(&make_roster(k));
            assert_eq!(grid.len(), ROSTER_DIM, "input size {}", k);
        }
    }

    #[test]
    fn test_rows_match_player_encoding() {
        let players = make_roster(5);
        let grid = encode_roster(&players);

        for (i, player) in players.iter().enumerate() {
            let expected = encode_player(player);
            let row = &grid[i * PLAYER_DIM..(i + 1) * PLAYER_DIM];
            assert_eq!(row, expected.as_slice(), "row {}", i);
        }
    }

    #[test]
    fn test_unfilled_rows_are_null_players() {
        let grid = encode_roster(&make_roster(5));

        for row in 5..ROSTER_SIZE {
            let block = &grid[row * PLAYER_DIM..(row + 1) * PLAYER_DIM];
            assert!(block.iter().all(|&v| v == 0.0), "row {} not null", row);
        }
    }

    #[test]
    fn test_input_beyond_64_is_truncated() {
        let players = make_roster(100);
        let grid = encode_roster(&players);

        assert_eq!(grid.len(), ROSTER_DIM);

        // The 64th row holds player 63; players 64..99 never appear
        let last_row = &grid[(ROSTER_SIZE - 1) * PLAYER_DIM..ROSTER_SIZE * PLAYER_DIM];
        assert_eq!(last_row, encode_player(&make_player(63)).as_slice());
    }

    #[test]
    fn test_row_order_is_input_order() {
        let mut players = make_roster(3);
        players.reverse();
        let grid = encode_roster(&players);

        let first_row = &grid[0..PLAYER_DIM];
        assert_eq!(first_row, encode_player(&make_player(2)).as_slice());
    }
}
