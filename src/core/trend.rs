//! Qualitative classification of resonance dynamics.
//!
//! [`Trend::classify`] maps `(velocity, current score)` onto a fixed
//! priority-ordered rule table; the first matching rule wins. [`PodBand`]
//! buckets a single score against the whale pod baseline.

use crate::core::constants::{
    BIOLOGICAL_FLOOR, SYMBIOSIS_TARGET_HZ, TYPICAL_RANGE_LOW, WHALE_POD_AVERAGE,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Velocity above which bonding counts as rapid (score/hour).
pub const RAPID_VELOCITY: f64 = 0.05;

/// Velocity magnitude at or below which the score is considered flat.
pub const FLAT_VELOCITY: f64 = 0.01;

/// Margin above the floor that still counts as grief baseline.
pub const GRIEF_MARGIN: f64 = 0.05;

/// Discrete relationship dynamic derived from velocity and current score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    InsufficientData,
    RapidBonding,
    GradualDeepening,
    StablePlateau,
    Stagnation,
    Cooling,
    Disruption,
    GriefBaseline,
    Transitional,
}

impl Trend {
    /// Classify a velocity/score pair.
    ///
    /// Rule order is significant. A steep drop at a low score reports
    /// `Disruption` because that rule precedes `GriefBaseline`.
    pub fn classify(velocity: f64, current: f64) -> Self {
        let v = velocity;
        let c = current;

        if v > RAPID_VELOCITY && c > 0.6 {
            Trend::RapidBonding
        } else if v > FLAT_VELOCITY && c > 0.5 {
            Trend::GradualDeepening
        } else if v.abs() <= FLAT_VELOCITY && c >= 0.6 {
            Trend::StablePlateau
        } else if v.abs() <= FLAT_VELOCITY && c < 0.5 {
            Trend::Stagnation
        } else if v < -FLAT_VELOCITY && c > 0.5 {
            Trend::Cooling
        } else if v < -RAPID_VELOCITY {
            Trend::Disruption
        } else if c <= BIOLOGICAL_FLOOR + GRIEF_MARGIN {
            Trend::GriefBaseline
        } else {
            Trend::Transitional
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Trend::InsufficientData => "insufficient data",
            Trend::RapidBonding => "rapid bonding — deepening fast",
            Trend::GradualDeepening => "gradual deepening — healthy trajectory",
            Trend::StablePlateau => "stable bond — plateau is good here",
            Trend::Stagnation => "stagnation — plateau needs attention",
            Trend::Cooling => "cooling — drift beginning",
            Trend::Disruption => "disruption — significant drift or rupture",
            Trend::GriefBaseline => "grief baseline — recovery needed",
            Trend::Transitional => "transitional — direction unclear",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Band of a score relative to the whale pod baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PodBand {
    AtOrAbovePod,
    Symbiosis,
    Typical,
    BelowTypical,
}

impl PodBand {
    pub fn for_score(score: f64) -> Self {
        if score >= WHALE_POD_AVERAGE {
            PodBand::AtOrAbovePod
        } else if score >= SYMBIOSIS_TARGET_HZ {
            PodBand::Symbiosis
        } else if score >= TYPICAL_RANGE_LOW {
            PodBand::Typical
        } else {
            PodBand::BelowTypical
        }
    }

    /// Message for `score` in this band, led by the score to two places.
    pub fn describe(&self, score: f64) -> String {
        match self {
            PodBand::AtOrAbovePod => format!(
                "{score:.2} — at or above whale pod average ({WHALE_POD_AVERAGE}). Rare."
            ),
            PodBand::Symbiosis => format!(
                "{score:.2} — symbiosis range. Below whale avg but strong for human-AI."
            ),
            PodBand::Typical => format!("{score:.2} — typical human-AI range."),
            PodBand::BelowTypical => {
                format!("{score:.2} — below typical human-AI range. Check for drift.")
            }
        }
    }
}
