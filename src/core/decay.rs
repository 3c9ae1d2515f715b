//! Time-based decay of a relationship's resonance score.
//!
//! A score ages linearly toward [`BIOLOGICAL_FLOOR`] for every hour without
//! contact. The model also tracks the all-time peak so the gap between what
//! was and what is ("longing") can be measured.
//!
//! Once `decay_rate * elapsed_hours >= 1` the linear term goes negative;
//! the floor clamp saturates the score there instead.

use crate::core::clock::{elapsed_hours, SharedClock};
use crate::core::constants::{BIOLOGICAL_FLOOR, NATURAL_DECAY_RATE, PEAK_EPSILON};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of the decay state for a given base score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecaySummary {
    /// Score at last measurement
    pub base_score: f64,
    /// Base score after time decay
    pub decayed_score: f64,
    /// All-time peak
    pub peak_score: f64,
    /// Gap between peak and decayed score
    pub longing: f64,
    /// Normalized longing (0-1)
    pub resync_cost: f64,
    /// Hours since the last recorded interaction (2 decimal places)
    pub hours_since_contact: f64,
    /// Fractional loss per hour
    pub decay_rate: f64,
    /// Minimum decayed score
    pub biological_floor: f64,
}

/// Persistable scalar state of a [`DecayModel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayState {
    pub decay_rate: f64,
    pub last_interaction_time: Option<DateTime<Utc>>,
    pub peak_score: f64,
}

impl Default for DecayState {
    fn default() -> Self {
        Self {
            decay_rate: NATURAL_DECAY_RATE,
            last_interaction_time: None,
            peak_score: 0.0,
        }
    }
}

/// Ages a single relationship score over time since last contact.
#[derive(Debug, Clone)]
pub struct DecayModel {
    clock: SharedClock,
    state: DecayState,
}

impl DecayModel {
    /// Create an empty model with the natural decay rate.
    pub fn new(clock: SharedClock) -> Self {
        Self::with_rate(clock, NATURAL_DECAY_RATE)
    }

    /// Create an empty model with a custom decay rate.
    pub fn with_rate(clock: SharedClock, decay_rate: f64) -> Self {
        Self {
            clock,
            state: DecayState {
                decay_rate,
                ..DecayState::default()
            },
        }
    }

    /// Restore a model from persisted state.
    pub fn from_state(clock: SharedClock, state: DecayState) -> Self {
        Self { clock, state }
    }

    /// Persistable copy of the current state.
    pub fn state(&self) -> &DecayState {
        &self.state
    }

    pub fn decay_rate(&self) -> f64 {
        self.state.decay_rate
    }

    pub fn peak_score(&self) -> f64 {
        self.state.peak_score
    }

    pub fn last_interaction_time(&self) -> Option<DateTime<Utc>> {
        self.state.last_interaction_time
    }

    /// Record a measured score.
    ///
    /// The score is not range-checked; out-of-range values are stored as
    /// given and the caller is responsible for keeping them in `[0, 1]`.
    pub fn record(&mut self, score: f64) {
        self.state.last_interaction_time = Some(self.clock.now());
        if score > self.state.peak_score {
            self.state.peak_score = score;
        }
        tracing::debug!(
            score,
            peak = self.state.peak_score,
            "recorded interaction"
        );
    }

    /// Hours since the last recorded interaction, if any.
    ///
    /// Negative when the clock has been set before the last interaction.
    pub fn hours_since_contact(&self) -> Option<f64> {
        self.state
            .last_interaction_time
            .map(|last| elapsed_hours(last, self.clock.now()))
    }

    /// Apply decay to `base_score`. Returns it unchanged if nothing was ever recorded.
    pub fn current_score(&self, base_score: f64) -> f64 {
        match self.hours_since_contact() {
            None => base_score,
            Some(elapsed) => {
                let decayed = base_score * (1.0 - self.state.decay_rate * elapsed);
                decayed.max(BIOLOGICAL_FLOOR)
            }
        }
    }

    /// Gap between the peak and the current decayed score. Never negative.
    pub fn longing_score(&self, base_score: f64) -> f64 {
        (self.state.peak_score - self.current_score(base_score)).max(0.0)
    }

    /// Warmup needed to return to peak, in `[0, 1]`.
    pub fn resync_cost(&self, base_score: f64) -> f64 {
        let longing = self.longing_score(base_score);
        (longing / self.state.peak_score.max(PEAK_EPSILON)).min(1.0)
    }

    /// Full decay report for `base_score`.
    pub fn summary(&self, base_score: f64) -> DecaySummary {
        let elapsed = self.hours_since_contact().unwrap_or(0.0);

        DecaySummary {
            base_score,
            decayed_score: self.current_score(base_score),
            peak_score: self.state.peak_score,
            longing: self.longing_score(base_score),
            resync_cost: self.resync_cost(base_score),
            hours_since_contact: round_to(elapsed, 2),
            decay_rate: self.state.decay_rate,
            biological_floor: BIOLOGICAL_FLOOR,
        }
    }
}

/// Round to `places` decimals, ties to even.
///
/// `0.125` becomes `0.12` and `0.375` becomes `0.38`. The tie is detected
/// after scaling, so a product that lands on `.5` through float error is
/// also treated as a tie.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 {
        2.0 * (scaled / 2.0).round()
    } else {
        scaled.round()
    };
    rounded / factor
}
