//! Session persistence.
//!
//! This module stores the state of a tracked relationship between runs of
//! the CLI so decay can be measured across real gaps in contact.

pub mod store;

// Re-export commonly used types
pub use store::{SessionStore, StoreError, StoredSession};
