//! Ocean Resonance - temporal dynamics for resonance scores.
//!
//! An upstream scorer (audio features of a whale coda, or the coherence of
//! a dialogue) produces a single score in `[0, 1]` per measurement. This
//! library tracks how that score evolves:
//!
//! - **Decay**: the score ages toward a biological floor while there is no contact
//! - **Longing**: the gap between the all-time peak and the decayed score
//! - **Velocity / acceleration**: first and second derivatives per hour
//! - **Trend**: a qualitative label from a fixed, priority-ordered rule table
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Ocean Resonance                       │
//! ├──────────────────────────────────────────────────────────┤
//! │   score ──▶ ResonanceSession::observe                     │
//! │                  │                  │                     │
//! │                  ▼                  ▼                     │
//! │           ┌────────────┐     ┌──────────────┐             │
//! │           │ DecayModel │     │HistoryTracker│             │
//! │           └────────────┘     └──────────────┘             │
//! │                  ▲                  ▲                     │
//! │                  └──── SharedClock ─┘                     │
//! │                                                           │
//! │   SessionStore ◀──▶ session.json                          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, Utc};
//! use ocean_resonance::core::{create_frozen_clock, ResonanceSession, NATURAL_DECAY_RATE};
//!
//! let clock = create_frozen_clock(Utc::now());
//! let mut session = ResonanceSession::new(clock.clone(), NATURAL_DECAY_RATE);
//!
//! session.observe(0.5, "first contact");
//! clock.advance(Duration::hours(1));
//! session.observe(0.7, "warming up");
//!
//! assert!((session.history().velocity() - 0.2).abs() < 1e-9);
//! ```

pub mod config;
pub mod core;
pub mod state;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError};
pub use core::{
    Clock, DecayModel, DecaySummary, HistoryTracker, HistorySummary, ResonanceSession,
    SessionReport, SharedClock, Trend,
};
pub use state::{SessionStore, StoreError, StoredSession};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Notice about the constants, displayed by `ocean-resonance about`.
pub const CONSTANTS_NOTICE: &str = r#"
╔══════════════════════════════════════════════════════════════════╗
║               OCEAN RESONANCE - ABOUT THE CONSTANTS              ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  Scores are heuristic. The constants below are reference points, ║
║  not validated measurements.                                     ║
║                                                                  ║
║    • Biological floor:   0.23  (grief baseline, never zero)      ║
║    • Decay rate:         0.08  per hour without contact          ║
║    • Symbiosis target:   0.60                                    ║
║    • Whale pod average:  0.73                                    ║
║    • Typical human-AI:   0.51 - 0.68                             ║
║                                                                  ║
║  Decay is linear in elapsed hours and saturates at the floor.    ║
║  Everything is computed locally; nothing leaves this machine.    ║
║                                                                  ║
╚══════════════════════════════════════════════════════════════════╝
"#;
