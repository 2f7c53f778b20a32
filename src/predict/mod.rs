//! Prediction and inference
//!
//! Generate game and player predictions from encoded tensors.

pub mod inference;

pub use inference::PredictionEngine;
