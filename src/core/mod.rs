//! Temporal dynamics engine.
//!
//! This module contains:
//! - An injectable clock shared by both engines
//! - Decay of a relationship score toward the biological floor
//! - History tracking with velocity, acceleration and trend classification
//! - Session composition of the two engines

pub mod clock;
pub mod constants;
pub mod decay;
pub mod history;
pub mod score;
pub mod session;
pub mod trend;

// Re-export commonly used types
pub use clock::{create_frozen_clock, create_shared_clock, elapsed_hours, Clock, SharedClock};
pub use constants::{BIOLOGICAL_FLOOR, NATURAL_DECAY_RATE};
pub use decay::{DecayModel, DecayState, DecaySummary};
pub use history::{HistoryEntry, HistorySummary, HistoryTracker, ScoreStatistics};
pub use score::{validate_score, ScoreError};
pub use session::{ResonanceSession, SessionReport};
pub use trend::{PodBand, Trend};
