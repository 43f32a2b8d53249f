//! Gesture events emitted by the classifier.
//!
//! Events are output only; nothing in the crate stores them beyond the
//! frame that produced them.

use crate::landmarks::types::Point3D;
use serde::{Deserialize, Serialize};

/// A discrete interaction event.
///
/// Cursor coordinates are fractions of the viewport in `[0, 1]`, with x
/// mirrored so that moving the hand right moves the cursor right on a
/// front-facing camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GestureEvent {
    /// Index fingertip position, emitted on every hand frame
    Move { x: f64, y: f64 },
    /// Short pinch released outside the click cooldown
    Click { x: f64, y: f64 },
    /// Pinch held past the long-press time
    LongPress { x: f64, y: f64 },
    /// Vertical palm movement while two fingers are extended
    Scroll { dy: f64 },
    /// Hand left the camera view
    NoHand,
}

impl GestureEvent {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureEvent::Move { .. } => GestureKind::Move,
            GestureEvent::Click { .. } => GestureKind::Click,
            GestureEvent::LongPress { .. } => GestureKind::LongPress,
            GestureEvent::Scroll { .. } => GestureKind::Scroll,
            GestureEvent::NoHand => GestureKind::NoHand,
        }
    }

    /// Cursor position carried by the event, if any.
    pub fn position(&self) -> Option<CursorPosition> {
        match *self {
            GestureEvent::Move { x, y }
            | GestureEvent::Click { x, y }
            | GestureEvent::LongPress { x, y } => Some(CursorPosition { x, y }),
            GestureEvent::Scroll { .. } | GestureEvent::NoHand => None,
        }
    }
}

impl std::fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GestureEvent::Move { x, y } => write!(f, "move ({x:.3}, {y:.3})"),
            GestureEvent::Click { x, y } => write!(f, "click ({x:.3}, {y:.3})"),
            GestureEvent::LongPress { x, y } => write!(f, "long-press ({x:.3}, {y:.3})"),
            GestureEvent::Scroll { dy } => write!(f, "scroll dy={dy:+.3}"),
            GestureEvent::NoHand => write!(f, "no-hand"),
        }
    }
}

/// Event kind without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Move,
    Click,
    LongPress,
    Scroll,
    NoHand,
}

impl GestureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Click => "click",
            Self::LongPress => "long-press",
            Self::Scroll => "scroll",
            Self::NoHand => "no-hand",
        }
    }
}

/// Cursor position as viewport fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorPosition {
    pub x: f64,
    pub y: f64,
}

impl CursorPosition {
    /// Mirror the index fingertip into cursor space.
    pub fn from_index_tip(tip: Point3D) -> Self {
        Self {
            x: 1.0 - tip.x,
            y: tip.y,
        }
    }

    pub fn to_move(self) -> GestureEvent {
        GestureEvent::Move {
            x: self.x,
            y: self.y,
        }
    }

    pub fn to_click(self) -> GestureEvent {
        GestureEvent::Click {
            x: self.x,
            y: self.y,
        }
    }

    pub fn to_long_press(self) -> GestureEvent {
        GestureEvent::LongPress {
            x: self.x,
            y: self.y,
        }
    }
}
