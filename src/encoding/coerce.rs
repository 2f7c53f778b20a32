//! Scalar coercion and categorical hashing
//!
//! Raw records arrive as partially-populated JSON; every scalar read goes
//! through these helpers so that missing or unconvertible values degrade to
//! defaults instead of failing the encoding.

use std::hash::Hasher;

use fxhash::FxHasher;
use serde_json::Value;

/// Modulus for player identity codes
pub const IDENTITY_MODULUS: u64 = 1_000_000;

/// Modulus for team name codes
pub const TEAM_MODULUS: u64 = 100;

/// Safely convert a JSON value to a float, falling back to `default`
///
/// Accepts numbers, numeric strings, and booleans (1.0/0.0). Absent, null,
/// and unconvertible values all yield the default. Never panics.
pub fn coerce_float(value: Option<&Value>, default: f32) -> f32 {
    match value {
        Some(Value::Number(n)) => n.as_f64().map(|f| f as f32).unwrap_or(default),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(|f| f as f32).unwrap_or(default),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => default,
    }
}

/// Truthiness of a JSON value as a binary feature (1.0 or 0.0)
///
/// Booleans as-is, numbers by non-zero, strings by non-emptiness. Absent and
/// null values are false.
pub fn coerce_flag(value: Option<&Value>) -> f32 {
    let truthy = match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        _ => false,
    };
    if truthy {
        1.0
    } else {
        0.0
    }
}

/// Render a scalar JSON value as text, falling back to `default`
///
/// Used for fields that feed the categorical hash; numbers and booleans are
/// rendered the way the ingestion layer stringifies them.
pub fn coerce_text(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

/// Map an arbitrary string to an integer in `[0, modulus)`
///
/// The mapping must be identical across processes and runs: categorical codes
/// are persisted inside stored feature vectors and decoded later via a side
/// lookup table. FxHasher is unsalted and version-stable, so the same string
/// always yields the same code.
pub fn categorical_code(text: &str, modulus: u64) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(text.as_bytes());
    hasher.finish() % modulus
}

/// Human-readable JSON type name, for structural-failure diagnostics
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
