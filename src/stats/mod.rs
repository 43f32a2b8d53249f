//! Session statistics for FingerPoint.
//!
//! Tracks how many frames were classified and which gestures fired, with
//! optional persistence so `fingerpoint status` can report totals.

pub mod log;

// Re-export commonly used types
pub use log::{
    create_shared_log, create_shared_log_with_persistence, PersistedStats, SessionLog,
    SessionStats, SharedSessionLog,
};
