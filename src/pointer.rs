//! Mapping from gesture events to host pointer actions.
//!
//! The host UI owns the actual cursor, click dispatch and scrolling. This
//! module only translates viewport-fraction events into pixel-space
//! actions for a viewport of known size.

use crate::core::events::GestureEvent;
use serde::{Deserialize, Serialize};

/// Default multiplier from palm movement to scrolled viewport heights.
pub const DEFAULT_SCROLL_GAIN: f64 = 2.0;

/// Pixel dimensions of the host viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Viewport heights scrolled per unit of palm movement
    pub scroll_gain: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            scroll_gain: DEFAULT_SCROLL_GAIN,
        }
    }
}

/// Host-side action for a single gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PointerAction {
    MoveCursor { px: f64, py: f64 },
    Click { px: f64, py: f64 },
    /// Long-press opens the hold menu at the cursor
    OpenMenu { px: f64, py: f64 },
    ScrollBy { dy_px: f64 },
    HideCursor,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Translate an event into a pixel-space action.
    pub fn map(&self, event: &GestureEvent) -> PointerAction {
        match *event {
            GestureEvent::Move { x, y } => {
                let (px, py) = self.to_pixels(x, y);
                PointerAction::MoveCursor { px, py }
            }
            GestureEvent::Click { x, y } => {
                let (px, py) = self.to_pixels(x, y);
                PointerAction::Click { px, py }
            }
            GestureEvent::LongPress { x, y } => {
                let (px, py) = self.to_pixels(x, y);
                PointerAction::OpenMenu { px, py }
            }
            GestureEvent::Scroll { dy } => PointerAction::ScrollBy {
                dy_px: dy * self.height * self.scroll_gain,
            },
            GestureEvent::NoHand => PointerAction::HideCursor,
        }
    }

    fn to_pixels(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.width, y * self.height)
    }
}

impl std::fmt::Display for PointerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointerAction::MoveCursor { px, py } => write!(f, "cursor -> ({px:.0}, {py:.0})"),
            PointerAction::Click { px, py } => write!(f, "click at ({px:.0}, {py:.0})"),
            PointerAction::OpenMenu { px, py } => write!(f, "hold menu at ({px:.0}, {py:.0})"),
            PointerAction::ScrollBy { dy_px } => write!(f, "scroll by {dy_px:+.0}px"),
            PointerAction::HideCursor => write!(f, "hide cursor"),
        }
    }
}
