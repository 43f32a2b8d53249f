//! Landmark input for the classifier.
//!
//! This module defines the frame snapshots the hand-tracking provider
//! delivers, the validation applied before classification, and a replay
//! feed that turns recorded provider output back into a frame stream.

pub mod recording;
pub mod replay;
pub mod types;

// Re-export commonly used types
pub use recording::{
    parse_recording, read_recording, write_recording, RecordedFrame, RecordingError,
};
pub use replay::{FeedError, FeedFrame, ReplayConfig, ReplayFeed};
pub use types::{Hand, LandmarkFrame, Point3D, Timestamp, LANDMARK_COUNT};
