//! Model inference for predictions

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::encoding::coerce::coerce_text;
use crate::encoding::roster::ROSTER_SIZE;
use crate::encoding::{encode_game, encode_player};
use crate::{ConfidenceLevel, Position, Prediction};

/// Predicted stat line for a single player
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStatPrediction {
    pub name: String,
    pub position: String,
    pub projected: BTreeMap<String, f32>,
}

/// Engine for generating predictions
///
/// The trained model is an external collaborator. Until it is wired in, the
/// engine encodes the full input tensor and returns fixed placeholder
/// predictions, so callers and storage see the final output shape.
pub struct PredictionEngine {
    min_full: usize,
    min_partial: usize,
}

impl Default for PredictionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionEngine {
    pub fn new() -> Self {
        PredictionEngine {
            min_full: ROSTER_SIZE * 3 / 4,
            min_partial: ROSTER_SIZE / 2,
        }
    }

    /// Predict the outcome of a game
    pub fn predict_game(&self, home: &[Value], away: &[Value], context: &Value) -> Prediction {
        let tensor = encode_game(home, away, context);
        debug!("Encoded game tensor with {} features", tensor.len());

        let confidence = self.compute_confidence(home.len(), away.len());

        // TODO: run the trained model over the tensor once training lands
        Prediction {
            home_win_prob: 0.72,
            predicted_home_score: 24.0,
            predicted_away_score: 21.0,
            confidence,
        }
    }

    /// Predict a player's stat line for a game
    pub fn predict_player(&self, record: &Value) -> PlayerStatPrediction {
        let tensor = encode_player(record);
        debug!("Encoded player tensor with {} features", tensor.len());

        let fields = record.as_object();
        let name = coerce_text(fields.and_then(|m| m.get("name")), "Unknown");
        let position_text = coerce_text(fields.and_then(|m| m.get("position")), "");
        let position = Position::parse(&position_text);

        PlayerStatPrediction {
            name,
            position: position.map(|p| p.to_string()).unwrap_or(position_text),
            projected: placeholder_stat_line(position),
        }
    }

    /// Confidence based on how much of each roster is populated
    fn compute_confidence(&self, home_count: usize, away_count: usize) -> ConfidenceLevel {
        let home = home_count.min(ROSTER_SIZE);
        let away = away_count.min(ROSTER_SIZE);

        if home >= self.min_full && away >= self.min_full {
            ConfidenceLevel::High
        } else if home >= self.min_partial || away >= self.min_partial {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Placeholder stat line per position until the trained model is available
fn placeholder_stat_line(position: Option<Position>) -> BTreeMap<String, f32> {
    let stats: &[(&str, f32)] = match position {
        Some(Position::QB) => &[
            ("passing_yards", 275.0),
            ("passing_tds", 2.0),
            ("interceptions", 1.0),
            ("completions", 22.0),
            ("attempts", 35.0),
        ],
        Some(Position::RB) => &[
            ("rushing_yards", 85.0),
            ("rushing_tds", 1.0),
            ("receptions", 4.0),
            ("receiving_yards", 32.0),
        ],
        Some(Position::WR) => &[
            ("receptions", 6.0),
            ("receiving_yards", 82.0),
            ("receiving_tds", 1.0),
            ("targets", 9.0),
        ],
        _ => &[],
    };

    stats
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

/// Format a game prediction for display
pub fn format_prediction(pred: &Prediction, home_name: &str, away_name: &str) -> String {
    let winner = if pred.home_win() { home_name } else { away_name };
    let win_prob = if pred.home_win() {
        pred.home_win_prob
    } else {
        1.0 - pred.home_win_prob
    };

    format!(
        r#"
┌─────────────────────────────────────────────────┐
│  {} vs {}
├─────────────────────────────────────────────────┤
│  Win probability:  {} {:.1}%
│  Predicted score:  {} {:.0} - {} {:.0}
│  Confidence:       {}
└─────────────────────────────────────────────────┘
"#,
        home_name,
        away_name,
        winner,
        win_prob * 100.0,
        home_name,
        pred.predicted_home_score,
        away_name,
        pred.predicted_away_score,
        pred.confidence
    )
}
