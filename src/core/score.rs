//! Input validation for scores arriving from outside the engine.
//!
//! The engines accept any finite float. This check is applied where scores
//! enter the program (the CLI), not inside [`DecayModel::record`] or
//! [`HistoryTracker::add`].
//!
//! [`DecayModel::record`]: crate::core::DecayModel::record
//! [`HistoryTracker::add`]: crate::core::HistoryTracker::add

use thiserror::Error;

/// A score rejected at the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScoreError {
    #[error("score {0} is outside [0, 1]")]
    OutOfRange(f64),
    #[error("score is not a finite number")]
    NotFinite,
}

/// Accept `score` if it is finite and within `[0, 1]`.
pub fn validate_score(score: f64) -> Result<f64, ScoreError> {
    if !score.is_finite() {
        return Err(ScoreError::NotFinite);
    }
    if !(0.0..=1.0).contains(&score) {
        return Err(ScoreError::OutOfRange(score));
    }
    Ok(score)
}
