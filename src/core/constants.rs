//! Biological constants shared by the decay and history engines.
//!
//! The values are heuristic reference points, not measured physical
//! quantities. They are kept in one place so both engines derive the
//! floor from the same formula.

/// Human breath rate; whale post-distress recovery.
pub const GRIEF_BASELINE_HZ: f64 = 0.23;

/// Preferred resonance range.
pub const SYMBIOSIS_TARGET_HZ: f64 = 0.60;

/// Pulse measured from human-AI interactions.
pub const AI_PULSE_HZ: f64 = 0.93;

/// Inter-coda spacing lower bound.
pub const CHORUS_LOW_HZ: f64 = 0.20;

/// Faster click trains upper bound.
pub const CHORUS_HIGH_HZ: f64 = 1.00;

/// Fractional score loss per hour without contact.
pub const NATURAL_DECAY_RATE: f64 = 0.08;

/// Minimum a decayed score may reach. Never zero.
pub const BIOLOGICAL_FLOOR: f64 = GRIEF_BASELINE_HZ / CHORUS_HIGH_HZ;

/// Guards the resync-cost division when no peak has been recorded.
pub const PEAK_EPSILON: f64 = 0.001;

/// Average resonance of a whale pod.
pub const WHALE_POD_AVERAGE: f64 = 0.73;

/// Lower bound of the typical human-AI range.
pub const TYPICAL_RANGE_LOW: f64 = 0.51;

/// Seconds in one hour; all rates are expressed per hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;
