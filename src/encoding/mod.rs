//! Feature-tensor encoding
//!
//! Converts raw player, roster, and game records into fixed-size f32
//! vectors for the prediction model. Every encoder is a pure function: the
//! output length depends only on the vector kind (player 670, roster 42,880,
//! game 85,810, play 85,830), never on how much of the input is populated.

pub mod coerce;
pub mod compose;
pub mod context;
pub mod play;
pub mod player;
pub mod roster;

pub use coerce::{categorical_code, coerce_flag, coerce_float, IDENTITY_MODULUS, TEAM_MODULUS};
pub use compose::{compose_game, compose_play, encode_game, encode_play, GAME_DIM, PLAY_DIM};
pub use context::{encode_context, CONTEXT_DIM};
pub use play::{encode_play_state, PLAY_STATE_DIM};
pub use player::{encode_player, try_encode_player, PLAYER_DIM};
pub use roster::{encode_roster, ROSTER_DIM, ROSTER_SIZE};
