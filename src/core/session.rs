//! One tracked relationship: a decay model and a history tracker driven by
//! the same clock.

use crate::core::clock::SharedClock;
use crate::core::decay::{DecayModel, DecaySummary};
use crate::core::history::{HistorySummary, HistoryTracker};
use serde::{Deserialize, Serialize};

/// Combined report of both engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub decay: DecaySummary,
    pub history: HistorySummary,
}

/// Caller-side composition of [`DecayModel`] and [`HistoryTracker`].
///
/// The engines never reference each other; this type only forwards each
/// measurement to both.
#[derive(Debug, Clone)]
pub struct ResonanceSession {
    clock: SharedClock,
    decay: DecayModel,
    history: HistoryTracker,
}

impl ResonanceSession {
    /// Create an empty session with the given decay rate.
    pub fn new(clock: SharedClock, decay_rate: f64) -> Self {
        Self {
            decay: DecayModel::with_rate(clock.clone(), decay_rate),
            history: HistoryTracker::new(clock.clone()),
            clock,
        }
    }

    /// Assemble a session from already-built engines.
    ///
    /// Both engines should hold `clock`; otherwise a frozen override only
    /// reaches one of them.
    pub fn from_parts(clock: SharedClock, decay: DecayModel, history: HistoryTracker) -> Self {
        Self {
            clock,
            decay,
            history,
        }
    }

    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    pub fn decay(&self) -> &DecayModel {
        &self.decay
    }

    pub fn history(&self) -> &HistoryTracker {
        &self.history
    }

    /// Feed one measurement to both engines.
    pub fn observe(&mut self, score: f64, label: impl Into<String>) {
        self.decay.record(score);
        self.history.add(score, label);
    }

    /// Latest recorded score, used as the default decay base.
    pub fn last_score(&self) -> Option<f64> {
        self.history.latest().map(|e| e.score)
    }

    /// Report both engines. `base` defaults to the latest score, or 0.0
    /// when nothing has been observed.
    pub fn report(&self, base: Option<f64>) -> SessionReport {
        let base = base.or_else(|| self.last_score()).unwrap_or(0.0);

        SessionReport {
            decay: self.decay.summary(base),
            history: self.history.summary(),
        }
    }
}
