//! JSON persistence for a resonance session.
//!
//! The stored form is the decay model's three scalar fields plus the
//! ordered history entries. Restoring rebuilds both engines against a
//! caller-provided clock.

use crate::core::clock::SharedClock;
use crate::core::decay::{DecayModel, DecayState};
use crate::core::history::{HistoryEntry, HistoryTracker};
use crate::core::session::ResonanceSession;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialize error: {0}")]
    Serialize(String),
}

/// On-disk form of one tracked relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Stable identifier of the relationship
    pub relationship_id: Uuid,
    #[serde(flatten)]
    pub decay: DecayState,
    /// Measurements in insertion order
    pub entries: Vec<HistoryEntry>,
    pub updated_at: DateTime<Utc>,
}

impl StoredSession {
    /// Capture a session's state.
    pub fn capture(relationship_id: Uuid, session: &ResonanceSession) -> Self {
        Self {
            relationship_id,
            decay: session.decay().state().clone(),
            entries: session.history().entries().to_vec(),
            updated_at: session.clock().now(),
        }
    }

    /// Rebuild a session whose engines share `clock`.
    pub fn restore(self, clock: SharedClock) -> ResonanceSession {
        let decay = DecayModel::from_state(clock.clone(), self.decay);
        let history = HistoryTracker::from_entries(clock.clone(), self.entries);
        ResonanceSession::from_parts(clock, decay, history)
    }
}

/// File-backed store for a single session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session, or `None` when no file exists yet.
    pub fn load(&self) -> Result<Option<StoredSession>, StoreError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no stored session");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let stored: StoredSession =
            serde_json::from_str(&content).map_err(|e| StoreError::Parse(e.to_string()))?;

        tracing::info!(
            path = %self.path.display(),
            entries = stored.entries.len(),
            "loaded session"
        );
        Ok(Some(stored))
    }

    /// Load the stored session or start a fresh one with `decay_rate`.
    ///
    /// Returns the relationship ID together with the restored session.
    pub fn open(
        &self,
        clock: SharedClock,
        decay_rate: f64,
    ) -> Result<(Uuid, ResonanceSession), StoreError> {
        match self.load()? {
            Some(stored) => Ok((stored.relationship_id, stored.restore(clock))),
            None => Ok((Uuid::new_v4(), ResonanceSession::new(clock, decay_rate))),
        }
    }

    /// Write the session to disk, creating parent directories as needed.
    pub fn save(&self, relationship_id: Uuid, session: &ResonanceSession) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let stored = StoredSession::capture(relationship_id, session);
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        std::fs::write(&self.path, json)?;

        tracing::info!(
            path = %self.path.display(),
            entries = stored.entries.len(),
            "saved session"
        );
        Ok(())
    }

    /// Delete the stored session. Missing files are not an error.
    pub fn reset(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "removed stored session");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
