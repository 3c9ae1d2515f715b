//! Append-only log of timestamped resonance scores.
//!
//! The tracker derives the first and second time-derivatives of the score
//! (per hour) from the most recent entries and classifies the dynamic with
//! [`Trend`]. Entries are kept in insertion order; timestamps are expected
//! to be non-decreasing but are never sorted.

use crate::core::clock::{elapsed_hours, SharedClock};
use crate::core::decay::round_to;
use crate::core::trend::{PodBand, Trend};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// A single measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub score: f64,
    pub timestamp: DateTime<Utc>,
    /// Free-form session label, empty when not given
    pub label: String,
}

/// Snapshot of the derived history state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Number of measurements
    pub measurements: usize,
    /// Latest score
    pub current_score: Option<f64>,
    /// Highest recorded score
    pub peak_score: Option<f64>,
    /// Lowest recorded score
    pub floor_score: Option<f64>,
    /// Score change per hour (4 decimal places)
    pub velocity: f64,
    /// Velocity change per hour (4 decimal places)
    pub acceleration: f64,
    pub trend: Trend,
    /// Human-readable form of `trend`
    pub trend_label: String,
    pub whale_comparison: String,
    /// `(label, score)` pairs in insertion order
    pub scores_over_time: Vec<(String, f64)>,
}

/// Descriptive statistics over all recorded scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreStatistics {
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Tracks scores over time for velocity, acceleration and trend.
#[derive(Debug, Clone)]
pub struct HistoryTracker {
    clock: SharedClock,
    entries: Vec<HistoryEntry>,
}

impl HistoryTracker {
    /// Create an empty tracker.
    pub fn new(clock: SharedClock) -> Self {
        Self {
            clock,
            entries: Vec::new(),
        }
    }

    /// Restore a tracker from persisted entries, kept in the given order.
    pub fn from_entries(clock: SharedClock, entries: Vec<HistoryEntry>) -> Self {
        Self { clock, entries }
    }

    /// Record a score at the current clock time.
    pub fn add(&mut self, score: f64, label: impl Into<String>) {
        let entry = HistoryEntry {
            score,
            timestamp: self.clock.now(),
            label: label.into(),
        };
        tracing::debug!(
            score,
            label = %entry.label,
            count = self.entries.len() + 1,
            "added history entry"
        );
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Score change per hour between the last two entries.
    ///
    /// Zero with fewer than two entries or a non-positive time delta.
    pub fn velocity(&self) -> f64 {
        match self.entries.as_slice() {
            [.., prev, last] => pair_velocity(prev, last),
            _ => 0.0,
        }
    }

    /// Change in velocity per hour across the last three entries.
    pub fn acceleration(&self) -> f64 {
        let [first, middle, last] = match self.entries.as_slice() {
            [.., a, b, c] => [a, b, c],
            _ => return 0.0,
        };

        let v1 = pair_velocity(first, middle);
        let v2 = pair_velocity(middle, last);
        let t1 = elapsed_hours(first.timestamp, middle.timestamp);
        let t2 = elapsed_hours(middle.timestamp, last.timestamp);
        let avg_t = (t1 + t2) / 2.0;

        if avg_t > 0.0 {
            (v2 - v1) / avg_t
        } else {
            0.0
        }
    }

    /// Classify the current dynamic.
    pub fn trend(&self) -> Trend {
        match self.latest() {
            Some(last) if self.entries.len() >= 2 => Trend::classify(self.velocity(), last.score),
            _ => Trend::InsufficientData,
        }
    }

    /// Latest score against the whale pod baseline.
    pub fn whale_comparison(&self) -> String {
        match self.latest() {
            Some(last) => PodBand::for_score(last.score).describe(last.score),
            None => "no data".to_string(),
        }
    }

    /// Mean, spread and range of all scores.
    pub fn statistics(&self) -> Option<ScoreStatistics> {
        if self.entries.is_empty() {
            return None;
        }
        let scores: Vec<f64> = self.entries.iter().map(|e| e.score).collect();

        Some(ScoreStatistics {
            mean: Statistics::mean(&scores),
            std_dev: Statistics::population_std_dev(&scores),
            min: Statistics::min(&scores),
            max: Statistics::max(&scores),
        })
    }

    /// Full history report.
    pub fn summary(&self) -> HistorySummary {
        let stats = self.statistics();
        let trend = self.trend();

        HistorySummary {
            measurements: self.entries.len(),
            current_score: self.latest().map(|e| e.score),
            peak_score: stats.as_ref().map(|s| s.max),
            floor_score: stats.as_ref().map(|s| s.min),
            velocity: round_to(self.velocity(), 4),
            acceleration: round_to(self.acceleration(), 4),
            trend,
            trend_label: trend.label().to_string(),
            whale_comparison: self.whale_comparison(),
            scores_over_time: self
                .entries
                .iter()
                .map(|e| (e.label.clone(), e.score))
                .collect(),
        }
    }
}

/// Velocity between two entries; zero for a non-positive time delta.
fn pair_velocity(prev: &HistoryEntry, next: &HistoryEntry) -> f64 {
    let hours = elapsed_hours(prev.timestamp, next.timestamp);
    if hours <= 0.0 {
        return 0.0;
    }
    (next.score - prev.score) / hours
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::{create_frozen_clock, SharedClock};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn tracker_with(scores: &[f64], step: Duration) -> (SharedClock, HistoryTracker) {
        let clock = create_frozen_clock(t0());
        let mut tracker = HistoryTracker::new(clock.clone());
        for (i, &score) in scores.iter().enumerate() {
            if i > 0 {
                clock.advance(step);
            }
            tracker.add(score, format!("m{i}"));
        }
        (clock, tracker)
    }

    #[test]
    fn test_velocity_needs_two_entries() {
        let (_, empty) = tracker_with(&[], Duration::hours(1));
        assert_eq!(empty.velocity(), 0.0);

        let (_, single) = tracker_with(&[0.5], Duration::hours(1));
        assert_eq!(single.velocity(), 0.0);
    }

    #[test]
    fn test_velocity_per_hour() {
        let (_, tracker) = tracker_with(&[0.5, 0.7], Duration::hours(1));
        assert!(approx(tracker.velocity(), 0.2));

        let (_, tracker) = tracker_with(&[0.71, 0.68], Duration::seconds(600));
        assert!(approx(tracker.velocity(), -0.18));
    }

    #[test]
    fn test_velocity_zero_for_same_timestamp() {
        let (_, tracker) = tracker_with(&[0.2, 0.9], Duration::zero());
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn test_velocity_over_sub_millisecond_gap() {
        let (_, tracker) = tracker_with(&[0.5, 0.6], Duration::microseconds(900));
        let expected = 0.1 / 0.00000025;

        assert!(tracker.velocity() > 0.0);
        assert!((tracker.velocity() - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn test_velocity_zero_for_backwards_timestamp() {
        let clock = create_frozen_clock(t0());
        let mut tracker = HistoryTracker::new(clock.clone());
        tracker.add(0.2, "");
        clock.advance(Duration::hours(-1));
        tracker.add(0.9, "");
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn test_acceleration_needs_three_entries() {
        let (_, tracker) = tracker_with(&[0.3, 0.9], Duration::hours(1));
        assert_eq!(tracker.acceleration(), 0.0);
    }

    #[test]
    fn test_acceleration_uniform_spacing() {
        // v1 = 0.1/h, v2 = 0.3/h, avg_t = 1h
        let (_, tracker) = tracker_with(&[0.2, 0.3, 0.6], Duration::hours(1));
        assert!(approx(tracker.acceleration(), 0.2));
    }

    #[test]
    fn test_acceleration_uneven_spacing() {
        let clock = create_frozen_clock(t0());
        let mut tracker = HistoryTracker::new(clock.clone());
        tracker.add(0.2, "");
        clock.advance(Duration::hours(1));
        tracker.add(0.4, "");
        clock.advance(Duration::hours(3));
        tracker.add(0.7, "");

        // v1 = 0.2, v2 = 0.1, avg_t = 2
        assert!(approx(tracker.acceleration(), -0.05));
    }

    #[test]
    fn test_acceleration_with_one_zero_interval() {
        let clock = create_frozen_clock(t0());
        let mut tracker = HistoryTracker::new(clock.clone());
        tracker.add(0.2, "");
        tracker.add(0.4, "");
        clock.advance(Duration::hours(2));
        tracker.add(0.6, "");

        // v1 guarded to 0, v2 = 0.1, avg_t = 1
        assert!(approx(tracker.acceleration(), 0.1));
    }

    #[test]
    fn test_acceleration_all_same_timestamp() {
        let (_, tracker) = tracker_with(&[0.2, 0.4, 0.9], Duration::zero());
        assert_eq!(tracker.acceleration(), 0.0);
    }

    #[test]
    fn test_trend_insufficient_data() {
        let (_, tracker) = tracker_with(&[0.9], Duration::hours(1));
        assert_eq!(tracker.trend(), Trend::InsufficientData);
    }

    #[test]
    fn test_trend_stable_plateau() {
        let (_, tracker) = tracker_with(&[0.6, 0.6], Duration::hours(1));
        assert_eq!(tracker.trend(), Trend::StablePlateau);
    }

    #[test]
    fn test_trend_score_exactly_half() {
        let (_, tracker) = tracker_with(&[0.3, 0.5], Duration::hours(1));
        assert_eq!(tracker.trend(), Trend::Transitional);
    }

    #[test]
    fn test_whale_comparison() {
        let (_, empty) = tracker_with(&[], Duration::hours(1));
        assert_eq!(empty.whale_comparison(), "no data");

        let (_, tracker) = tracker_with(&[0.75], Duration::hours(1));
        assert!(tracker.whale_comparison().contains("at or above whale pod average"));

        let (_, tracker) = tracker_with(&[0.55], Duration::hours(1));
        assert!(tracker.whale_comparison().contains("typical human-AI range"));

        let (_, tracker) = tracker_with(&[0.40], Duration::hours(1));
        assert!(tracker.whale_comparison().contains("below typical"));
    }

    #[test]
    fn test_statistics() {
        let (_, empty) = tracker_with(&[], Duration::hours(1));
        assert!(empty.statistics().is_none());

        let (_, tracker) = tracker_with(&[0.2, 0.4, 0.6], Duration::hours(1));
        let stats = tracker.statistics().unwrap();
        assert!(approx(stats.mean, 0.4));
        assert!(approx(stats.min, 0.2));
        assert!(approx(stats.max, 0.6));
        assert!(approx(stats.std_dev, (0.08f64 / 3.0).sqrt()));
    }

    #[test]
    fn test_summary_empty() {
        let (_, tracker) = tracker_with(&[], Duration::hours(1));
        let summary = tracker.summary();

        assert_eq!(summary.measurements, 0);
        assert_eq!(summary.current_score, None);
        assert_eq!(summary.peak_score, None);
        assert_eq!(summary.floor_score, None);
        assert_eq!(summary.velocity, 0.0);
        assert_eq!(summary.trend, Trend::InsufficientData);
        assert_eq!(summary.trend_label, "insufficient data");
        assert_eq!(summary.whale_comparison, "no data");
        assert!(summary.scores_over_time.is_empty());
    }

    #[test]
    fn test_summary_preserves_insertion_order() {
        let (_, tracker) = tracker_with(&[0.42, 0.55, 0.63], Duration::seconds(600));
        let summary = tracker.summary();

        assert_eq!(summary.measurements, 3);
        assert_eq!(summary.current_score, Some(0.63));
        assert_eq!(summary.peak_score, Some(0.63));
        assert_eq!(summary.floor_score, Some(0.42));
        assert_eq!(
            summary.scores_over_time,
            vec![
                ("m0".to_string(), 0.42),
                ("m1".to_string(), 0.55),
                ("m2".to_string(), 0.63),
            ]
        );
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let (_, tracker) = tracker_with(&[0.4, 0.5, 0.6], Duration::hours(1));
        let before = tracker.entries().to_vec();
        let _ = tracker.summary();
        let _ = tracker.trend();
        assert_eq!(tracker.entries(), before.as_slice());
    }
}
