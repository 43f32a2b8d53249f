//! Session counters for classified frames and emitted gestures.
//!
//! Counters are atomic so a shared log can be read from another thread
//! while the frame loop records into it.

use crate::core::events::{GestureEvent, GestureKind};
use crate::landmarks::types::LandmarkFrame;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Statistics for the current session.
#[derive(Debug)]
pub struct SessionLog {
    /// Unique ID of this session
    session_id: Uuid,
    /// Frames delivered to the classifier
    frames: AtomicU64,
    /// Frames that carried a hand
    hand_frames: AtomicU64,
    /// Frames without a hand
    no_hand_frames: AtomicU64,
    moves: AtomicU64,
    clicks: AtomicU64,
    long_presses: AtomicU64,
    scrolls: AtomicU64,
    /// Session start time
    session_start: DateTime<Utc>,
    /// Path for persisting stats
    persist_path: Option<PathBuf>,
}

impl SessionLog {
    /// Create a new session log.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            frames: AtomicU64::new(0),
            hand_frames: AtomicU64::new(0),
            no_hand_frames: AtomicU64::new(0),
            moves: AtomicU64::new(0),
            clicks: AtomicU64::new(0),
            long_presses: AtomicU64::new(0),
            scrolls: AtomicU64::new(0),
            session_start: Utc::now(),
            persist_path: None,
        }
    }

    /// Create a session log that accumulates into a file across runs.
    pub fn with_persistence(path: PathBuf) -> Self {
        let mut log = Self::new();
        log.persist_path = Some(path);

        if let Err(e) = log.load() {
            tracing::warn!("Could not load previous session stats: {e}");
        }

        log
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Record a delivered frame.
    pub fn record_frame(&self, frame: &LandmarkFrame) {
        self.frames.fetch_add(1, Ordering::Relaxed);
        if frame.has_hand() {
            self.hand_frames.fetch_add(1, Ordering::Relaxed);
        } else {
            self.no_hand_frames.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record an emitted event. Hand loss is already counted per frame.
    pub fn record_event(&self, event: &GestureEvent) {
        let counter = match event.kind() {
            GestureKind::Move => &self.moves,
            GestureKind::Click => &self.clicks,
            GestureKind::LongPress => &self.long_presses,
            GestureKind::Scroll => &self.scrolls,
            GestureKind::NoHand => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current statistics.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            frames: self.frames.load(Ordering::Relaxed),
            hand_frames: self.hand_frames.load(Ordering::Relaxed),
            no_hand_frames: self.no_hand_frames.load(Ordering::Relaxed),
            moves: self.moves.load(Ordering::Relaxed),
            clicks: self.clicks.load(Ordering::Relaxed),
            long_presses: self.long_presses.load(Ordering::Relaxed),
            scrolls: self.scrolls.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Session Statistics:\n\
             - Frames processed: {} ({} with hand, {} without)\n\
             - Clicks: {}\n\
             - Long presses: {}\n\
             - Scroll steps: {}\n\
             - Cursor moves: {}\n\
             - Session duration: {} seconds",
            stats.frames,
            stats.hand_frames,
            stats.no_hand_frames,
            stats.clicks,
            stats.long_presses,
            stats.scrolls,
            stats.moves,
            stats.session_duration_secs
        )
    }

    /// Save stats to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let stats = self.stats();
            let persisted = PersistedStats {
                frames: stats.frames,
                hand_frames: stats.hand_frames,
                no_hand_frames: stats.no_hand_frames,
                moves: stats.moves,
                clicks: stats.clicks,
                long_presses: stats.long_presses,
                scrolls: stats.scrolls,
                last_session: Some(self.session_id),
                last_updated: Utc::now(),
            };

            let json = serde_json::to_string_pretty(&persisted).map_err(std::io::Error::other)?;

            std::fs::write(path, json)?;
        }
        Ok(())
    }

    /// Load stats from disk.
    fn load(&mut self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let persisted: PersistedStats =
                    serde_json::from_str(&content).map_err(std::io::Error::other)?;

                self.frames.store(persisted.frames, Ordering::Relaxed);
                self.hand_frames
                    .store(persisted.hand_frames, Ordering::Relaxed);
                self.no_hand_frames
                    .store(persisted.no_hand_frames, Ordering::Relaxed);
                self.moves.store(persisted.moves, Ordering::Relaxed);
                self.clicks.store(persisted.clicks, Ordering::Relaxed);
                self.long_presses
                    .store(persisted.long_presses, Ordering::Relaxed);
                self.scrolls.store(persisted.scrolls, Ordering::Relaxed);
            }
        }
        Ok(())
    }

    /// Reset all counters.
    pub fn reset(&self) {
        for counter in [
            &self.frames,
            &self.hand_frames,
            &self.no_hand_frames,
            &self.moves,
            &self.clicks,
            &self.long_presses,
            &self.scrolls,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of session statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub frames: u64,
    pub hand_frames: u64,
    pub no_hand_frames: u64,
    pub moves: u64,
    pub clicks: u64,
    pub long_presses: u64,
    pub scrolls: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

/// Stats format for persistence.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedStats {
    pub frames: u64,
    pub hand_frames: u64,
    pub no_hand_frames: u64,
    pub moves: u64,
    pub clicks: u64,
    pub long_presses: u64,
    pub scrolls: u64,
    #[serde(default)]
    pub last_session: Option<Uuid>,
    pub last_updated: DateTime<Utc>,
}

/// Thread-safe shared session log.
pub type SharedSessionLog = Arc<SessionLog>;

/// Create a new shared session log.
pub fn create_shared_log() -> SharedSessionLog {
    Arc::new(SessionLog::new())
}

/// Create a new shared session log with persistence.
pub fn create_shared_log_with_persistence(path: PathBuf) -> SharedSessionLog {
    Arc::new(SessionLog::with_persistence(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_log_counting() {
        let log = SessionLog::new();

        log.record_frame(&LandmarkFrame::NoHand);
        log.record_event(&GestureEvent::NoHand);
        log.record_event(&GestureEvent::Move { x: 0.1, y: 0.1 });
        log.record_event(&GestureEvent::Click { x: 0.1, y: 0.1 });
        log.record_event(&GestureEvent::Scroll { dy: 0.1 });

        let stats = log.stats();
        assert_eq!(stats.frames, 1);
        assert_eq!(stats.no_hand_frames, 1);
        assert_eq!(stats.hand_frames, 0);
        assert_eq!(stats.moves, 1);
        assert_eq!(stats.clicks, 1);
        assert_eq!(stats.scrolls, 1);
        assert_eq!(stats.long_presses, 0);
    }

    #[test]
    fn test_session_log_reset() {
        let log = SessionLog::new();
        log.record_event(&GestureEvent::LongPress { x: 0.5, y: 0.5 });
        log.reset();
        assert_eq!(log.stats().long_presses, 0);
    }

    #[test]
    fn test_persistence_accumulates() {
        let path = std::env::temp_dir()
            .join(format!("fingerpoint-stats-{}", Uuid::new_v4()))
            .join("stats.json");

        let log = SessionLog::with_persistence(path.clone());
        log.record_event(&GestureEvent::Click { x: 0.5, y: 0.5 });
        log.save().unwrap();

        let reloaded = SessionLog::with_persistence(path.clone());
        reloaded.record_event(&GestureEvent::Click { x: 0.5, y: 0.5 });
        assert_eq!(reloaded.stats().clicks, 2);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_summary_format() {
        let log = SessionLog::new();
        let summary = log.summary();

        assert!(summary.contains("Frames processed"));
        assert!(summary.contains("Clicks"));
        assert!(summary.contains("Long presses"));
    }
}
