//! Core functionality for FingerPoint.
//!
//! This module contains:
//! - Landmark geometry (pinch distance, finger straightness)
//! - The gesture event type emitted to sinks
//! - The temporal gesture classifier

pub mod classifier;
pub mod events;
pub mod geometry;

// Re-export commonly used types
pub use classifier::{
    ClassifierState, GestureClassifier, GestureThresholds, CLICK_COOLDOWN, LONG_PRESS_TIME,
    SCROLL_DELTA_THRESHOLD, STRAIGHT_RATIO, TOUCH_RADIUS,
};
pub use events::{CursorPosition, GestureEvent, GestureKind};
pub use geometry::{distance2, distance3, is_finger_straight};
