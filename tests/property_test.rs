//! Property tests for the decay and history invariants.

use chrono::{Duration, TimeZone, Utc};
use ocean_resonance::core::{
    create_frozen_clock, DecayModel, HistoryTracker, Trend, BIOLOGICAL_FLOOR,
};
use proptest::prelude::*;

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

proptest! {
    #[test]
    fn decayed_score_never_below_floor(
        scores in prop::collection::vec(0.0f64..=1.0, 1..10),
        base in 0.0f64..=1.0,
        gap_secs in 0i64..(3600 * 24 * 365 * 50),
    ) {
        let clock = create_frozen_clock(t0());
        let mut decay = DecayModel::new(clock.clone());
        for s in &scores {
            decay.record(*s);
        }
        clock.advance(Duration::seconds(gap_secs));

        prop_assert!(decay.current_score(base) >= BIOLOGICAL_FLOOR);
    }

    #[test]
    fn unrecorded_model_is_identity(base in -10.0f64..10.0, gap_secs in 0i64..1_000_000) {
        let clock = create_frozen_clock(t0());
        let decay = DecayModel::new(clock.clone());
        clock.advance(Duration::seconds(gap_secs));

        prop_assert_eq!(decay.current_score(base), base);
    }

    #[test]
    fn peak_is_maximum_of_recorded(scores in prop::collection::vec(0.0f64..=1.0, 1..20)) {
        let mut decay = DecayModel::new(create_frozen_clock(t0()));
        for s in &scores {
            decay.record(*s);
        }
        let max = scores.iter().cloned().fold(f64::MIN, f64::max);

        prop_assert_eq!(decay.peak_score(), max);
    }

    #[test]
    fn longing_and_resync_are_bounded(
        scores in prop::collection::vec(0.0f64..=1.0, 0..10),
        base in 0.0f64..=1.0,
        gap_secs in -7200i64..(3600 * 24 * 30),
    ) {
        let clock = create_frozen_clock(t0());
        let mut decay = DecayModel::new(clock.clone());
        for s in &scores {
            decay.record(*s);
        }
        clock.advance(Duration::seconds(gap_secs));

        let longing = decay.longing_score(base);
        let cost = decay.resync_cost(base);
        prop_assert!(longing >= 0.0);
        prop_assert!((0.0..=1.0).contains(&cost));
    }

    #[test]
    fn short_histories_have_zero_derivatives(scores in prop::collection::vec(0.0f64..=1.0, 0..2)) {
        let clock = create_frozen_clock(t0());
        let mut history = HistoryTracker::new(clock.clone());
        for s in &scores {
            clock.advance(Duration::minutes(5));
            history.add(*s, "");
        }

        prop_assert_eq!(history.velocity(), 0.0);
        prop_assert_eq!(history.acceleration(), 0.0);
        prop_assert_eq!(history.trend(), Trend::InsufficientData);
    }

    #[test]
    fn history_keeps_insertion_order(scores in prop::collection::vec(0.0f64..=1.0, 0..30)) {
        let clock = create_frozen_clock(t0());
        let mut history = HistoryTracker::new(clock.clone());
        for (i, s) in scores.iter().enumerate() {
            clock.advance(Duration::seconds(60));
            history.add(*s, i.to_string());
        }

        let summary = history.summary();
        prop_assert_eq!(summary.measurements, scores.len());
        let recorded: Vec<f64> = summary.scores_over_time.iter().map(|(_, s)| *s).collect();
        prop_assert_eq!(recorded, scores);
    }
}
