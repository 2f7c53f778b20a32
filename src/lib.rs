//! NFL game prediction
//!
//! Deterministic feature-tensor encoding for player, roster, and game data,
//! feeding a downstream statistical model.

pub mod encoding;
pub mod predict;
pub mod records;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Player position on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    OL,
    DL,
    LB,
    DB,
    K,
    P,
}

impl Position {
    /// Numeric code used inside feature vectors (unknown positions encode as 0)
    pub fn code(&self) -> f32 {
        match self {
            Position::QB => 1.0,
            Position::RB => 2.0,
            Position::WR => 3.0,
            Position::TE => 4.0,
            Position::OL => 5.0,
            Position::DL => 6.0,
            Position::LB => 7.0,
            Position::DB => 8.0,
            Position::K => 9.0,
            Position::P => 10.0,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::QB),
            "RB" => Some(Position::RB),
            "WR" => Some(Position::WR),
            "TE" => Some(Position::TE),
            "OL" => Some(Position::OL),
            "DL" => Some(Position::DL),
            "LB" => Some(Position::LB),
            "DB" => Some(Position::DB),
            "K" => Some(Position::K),
            "P" => Some(Position::P),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::OL => "OL",
            Position::DL => "DL",
            Position::LB => "LB",
            Position::DB => "DB",
            Position::K => "K",
            Position::P => "P",
        };
        write!(f, "{}", s)
    }
}

/// Model prediction output for a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub home_win_prob: f32,
    pub predicted_home_score: f32,
    pub predicted_away_score: f32,
    pub confidence: ConfidenceLevel,
}

impl Prediction {
    /// True when the home team is the predicted winner (>=50% win probability)
    pub fn home_win(&self) -> bool {
        self.home_win_prob >= 0.5
    }

    /// Predicted margin (positive = home win)
    pub fn predicted_margin(&self) -> f32 {
        self.predicted_home_score - self.predicted_away_score
    }
}

/// Confidence level based on how much of each roster is populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,   // Both rosters substantially filled
    Medium, // One roster thin
    Low,    // Both rosters thin
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceLevel::High => write!(f, "High"),
            ConfidenceLevel::Medium => write!(f, "Medium"),
            ConfidenceLevel::Low => write!(f, "Low"),
        }
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum GridironError {
    #[error("Malformed {what}: expected a JSON object, got {found}")]
    MalformedRecord {
        what: &'static str,
        found: &'static str,
    },

    #[error("Shape mismatch for {what}: expected {expected} features, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, GridironError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            model: ModelConfig {
                path: "model/gridiron_model".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GridironError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| GridironError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GridironError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate each configuration section and report per-section status
    pub fn validate(&self) -> ValidationReport {
        let mut sections = Vec::new();

        if Path::new(&self.model.path).exists() {
            sections.push(SectionReport {
                name: "model",
                status: ValidationStatus::Valid,
                message: format!("Model found at {}", self.model.path),
            });
        } else {
            sections.push(SectionReport {
                name: "model",
                status: ValidationStatus::Warning,
                message: format!("No trained model found at {}", self.model.path),
            });
        }

        let known_levels = ["error", "warn", "info", "debug", "trace"];
        if known_levels.contains(&self.logging.level.as_str()) {
            sections.push(SectionReport {
                name: "logging",
                status: ValidationStatus::Valid,
                message: "Logging configured".to_string(),
            });
        } else {
            sections.push(SectionReport {
                name: "logging",
                status: ValidationStatus::Error,
                message: format!("Unknown log level: {}", self.logging.level),
            });
        }

        let overall = sections
            .iter()
            .map(|s| s.status)
            .max()
            .unwrap_or(ValidationStatus::Valid);

        ValidationReport { sections, overall }
    }
}

/// Severity of a configuration finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValidationStatus {
    Valid,
    Warning,
    Error,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationStatus::Valid => write!(f, "valid"),
            ValidationStatus::Warning => write!(f, "warning"),
            ValidationStatus::Error => write!(f, "error"),
        }
    }
}

/// Validation result for one configuration section
#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    pub name: &'static str,
    pub status: ValidationStatus,
    pub message: String,
}

/// Validation results for the whole configuration
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub sections: Vec<SectionReport>,
    pub overall: ValidationStatus,
}
