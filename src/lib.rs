//! FingerPoint - hand-landmark gesture control for a pointer.
//!
//! This library turns a stream of hand-landmark snapshots from an external
//! hand-tracking provider into discrete pointer events: cursor movement,
//! pinch clicks, long-presses, two-finger scrolling and hand loss.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         FingerPoint                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐         │
//! │  │  Landmark   │──▶│   Gesture   │──▶│    Event    │         │
//! │  │    Feed     │   │ Classifier  │   │    Sink     │         │
//! │  └─────────────┘   └─────────────┘   └─────────────┘         │
//! │                           │                 │                │
//! │                           ▼                 ▼                │
//! │                    ┌─────────────┐   ┌─────────────┐         │
//! │                    │   Session   │   │  Viewport   │         │
//! │                    │    Stats    │   │   Mapping   │         │
//! │                    └─────────────┘   └─────────────┘         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Frames are processed synchronously, one at a time, in arrival order.
//! The caller supplies the frame timestamp, so classification is
//! deterministic and testable without a camera.
//!
//! # Example
//!
//! ```
//! use fingerpoint::{GestureClassifier, GestureEvent, LandmarkFrame, Timestamp};
//!
//! let mut classifier = GestureClassifier::default();
//! let events = classifier.process_frame(&LandmarkFrame::NoHand, Timestamp::from_millis(0));
//! assert_eq!(events, vec![GestureEvent::NoHand]);
//! ```

pub mod config;
pub mod controller;
pub mod core;
pub mod landmarks;
pub mod pointer;
pub mod sink;
pub mod stats;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError};
pub use controller::GestureController;
pub use self::core::{
    ClassifierState, GestureClassifier, GestureEvent, GestureKind, GestureThresholds,
};
pub use landmarks::{Hand, LandmarkFrame, Point3D, RecordedFrame, ReplayFeed, Timestamp};
pub use pointer::{PointerAction, Viewport};
pub use sink::{ChannelSink, EventSink, RecordingSink};
pub use stats::{SessionLog, SessionStats, SharedSessionLog};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gesture reference that can be displayed to users.
pub const GESTURE_GUIDE: &str = r#"
╔══════════════════════════════════════════════════════════════════╗
║                   FINGERPOINT - GESTURE GUIDE                    ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  • Point with your index finger to move the cursor               ║
║  • Pinch thumb and index finger briefly to click                 ║
║  • Hold the pinch for 1.5 seconds to open the hold menu          ║
║  • Extend index and middle fingers and move your hand            ║
║    up or down to scroll                                          ║
║  • Move your hand out of view to hide the cursor                 ║
║                                                                  ║
╚══════════════════════════════════════════════════════════════════╝
"#;

