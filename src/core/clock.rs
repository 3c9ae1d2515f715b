//! Injectable time source for the temporal engines.
//!
//! A [`Clock`] is either *live* (reads the wall clock on every call) or
//! *frozen* at a fixed instant. Both engines of a session hold the same
//! [`SharedClock`], so a single `set_fixed` call moves "now" for all of them.

use crate::core::constants::SECONDS_PER_HOUR;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, RwLock};

/// Source of "now" with an optional fixed override.
#[derive(Debug, Default)]
pub struct Clock {
    /// Frozen instant; `None` means live mode
    fixed: RwLock<Option<DateTime<Utc>>>,
}

impl Clock {
    /// Create a clock in live mode.
    pub fn live() -> Self {
        Self::default()
    }

    /// Create a clock frozen at the given instant.
    pub fn frozen(at: DateTime<Utc>) -> Self {
        Self {
            fixed: RwLock::new(Some(at)),
        }
    }

    /// Current time: the override when frozen, the wall clock otherwise.
    pub fn now(&self) -> DateTime<Utc> {
        self.read_fixed().unwrap_or_else(Utc::now)
    }

    /// Freeze the clock at `at`, or return to live mode with `None`.
    pub fn set_fixed(&self, at: Option<DateTime<Utc>>) {
        match self.fixed.write() {
            Ok(mut guard) => *guard = at,
            Err(poisoned) => *poisoned.into_inner() = at,
        }
    }

    /// Return to live mode.
    pub fn clear_fixed(&self) {
        self.set_fixed(None);
    }

    /// Whether an override is active.
    pub fn is_frozen(&self) -> bool {
        self.read_fixed().is_some()
    }

    /// Move a frozen clock forward (or back, for negative durations).
    ///
    /// A live clock is first frozen at the current wall-clock time, so
    /// stepping always yields a deterministic instant afterwards.
    pub fn advance(&self, by: Duration) -> DateTime<Utc> {
        let next = self.now() + by;
        self.set_fixed(Some(next));
        next
    }

    fn read_fixed(&self) -> Option<DateTime<Utc>> {
        match self.fixed.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Clock shared between the engines of one tracked relationship.
pub type SharedClock = Arc<Clock>;

/// Create a new shared clock in live mode.
pub fn create_shared_clock() -> SharedClock {
    Arc::new(Clock::live())
}

/// Create a new shared clock frozen at the given instant.
pub fn create_frozen_clock(at: DateTime<Utc>) -> SharedClock {
    Arc::new(Clock::frozen(at))
}

/// Hours elapsed from `from` to `to`. Negative when `to` precedes `from`.
pub fn elapsed_hours(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    let secs = match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        // microseconds overflow beyond ~292k years
        None => delta.num_milliseconds() as f64 / 1000.0,
    };
    secs / SECONDS_PER_HOUR
}
