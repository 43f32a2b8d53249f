//! Temporal gesture classification from landmark frames.
//!
//! The classifier turns noisy per-frame hand geometry into discrete events:
//!
//! 1. Every hand frame moves the cursor to the mirrored index fingertip
//! 2. A thumb/index pinch released quickly is a click (with a cooldown)
//! 3. A pinch held past the long-press time fires one long-press
//! 4. Index and middle fingers extended while not pinching scroll with
//!    the palm's vertical movement
//!
//! Time is supplied by the caller with every frame. Processing is
//! synchronous, never blocks, and has no failure modes.

use crate::core::events::{CursorPosition, GestureEvent};
use crate::core::geometry::{distance3, is_finger_straight};
use crate::landmarks::types::{Hand, LandmarkFrame, Timestamp};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default pinch contact distance (normalized units).
pub const TOUCH_RADIUS: f64 = 0.03;

/// Default minimum gap between two accepted clicks.
pub const CLICK_COOLDOWN: Duration = Duration::from_millis(800);

/// Default pinch hold time before a long-press fires.
pub const LONG_PRESS_TIME: Duration = Duration::from_millis(1500);

/// Default minimum palm movement per scroll event.
pub const SCROLL_DELTA_THRESHOLD: f64 = 0.01;

/// Default tip/knuckle distance ratio for an extended finger.
pub const STRAIGHT_RATIO: f64 = 1.2;

/// Tunable classification thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureThresholds {
    /// Thumb/index tip distance below which the hand is pinching
    pub touch_radius: f64,
    /// Minimum time between two accepted clicks
    #[serde(with = "crate::config::duration_ms_serde")]
    pub click_cooldown: Duration,
    /// Pinch hold time after which a long-press fires
    #[serde(with = "crate::config::duration_ms_serde")]
    pub long_press_time: Duration,
    /// Palm movement needed before a scroll event is emitted
    pub scroll_delta_threshold: f64,
    /// Tip-to-palm over knuckle-to-palm ratio for a straight finger
    pub straight_ratio: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            touch_radius: TOUCH_RADIUS,
            click_cooldown: CLICK_COOLDOWN,
            long_press_time: LONG_PRESS_TIME,
            scroll_delta_threshold: SCROLL_DELTA_THRESHOLD,
            straight_ratio: STRAIGHT_RATIO,
        }
    }
}

/// Temporal state carried between frames.
///
/// Invariants:
/// - `pinch_start` is set iff `pinching`
/// - `long_press_fired` implies `pinching`
/// - `last_palm_y` is set iff `scrolling`
/// - `scrolling` and `pinching` are never both true
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifierState {
    pinching: bool,
    pinch_start: Option<Timestamp>,
    long_press_fired: bool,
    last_click_time: Option<Timestamp>,
    scrolling: bool,
    last_palm_y: Option<f64>,
}

impl ClassifierState {
    pub fn is_pinching(&self) -> bool {
        self.pinching
    }

    pub fn pinch_start(&self) -> Option<Timestamp> {
        self.pinch_start
    }

    pub fn long_press_fired(&self) -> bool {
        self.long_press_fired
    }

    pub fn last_click_time(&self) -> Option<Timestamp> {
        self.last_click_time
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    pub fn last_palm_y(&self) -> Option<f64> {
        self.last_palm_y
    }

    /// Hand lost: drop pinch and scroll tracking. The click cooldown survives.
    fn reset_tracking(&mut self) {
        self.end_pinch();
        self.end_scroll();
    }

    fn end_pinch(&mut self) {
        self.pinching = false;
        self.pinch_start = None;
        self.long_press_fired = false;
    }

    fn end_scroll(&mut self) {
        self.scrolling = false;
        self.last_palm_y = None;
    }
}

/// Frame-by-frame gesture classifier.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    thresholds: GestureThresholds,
    state: ClassifierState,
}

impl GestureClassifier {
    /// Create a classifier at rest.
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            state: ClassifierState::default(),
        }
    }

    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    /// Return to rest, forgetting the click cooldown as well.
    pub fn reset(&mut self) {
        self.state = ClassifierState::default();
    }

    /// Classify one frame.
    ///
    /// Events come back in emission order: `Move` first on hand frames,
    /// then at most one of `Click`/`LongPress`, then at most one `Scroll`.
    /// `now` must not decrease between calls; if it does, elapsed time
    /// is treated as zero.
    pub fn process_frame(&mut self, frame: &LandmarkFrame, now: Timestamp) -> Vec<GestureEvent> {
        let hand = match frame {
            LandmarkFrame::NoHand => {
                if self.state.pinching || self.state.scrolling {
                    debug!("Hand lost, resetting pinch and scroll tracking");
                }
                self.state.reset_tracking();
                return vec![GestureEvent::NoHand];
            }
            LandmarkFrame::Hand(hand) => hand,
        };

        let mut events = Vec::with_capacity(2);
        let cursor = CursorPosition::from_index_tip(hand.index_tip());
        events.push(cursor.to_move());

        if let Some(event) = self.update_pinch(hand, cursor, now) {
            events.push(event);
        }

        if let Some(event) = self.update_scroll(hand) {
            events.push(event);
        }

        events
    }

    fn update_pinch(
        &mut self,
        hand: &Hand,
        cursor: CursorPosition,
        now: Timestamp,
    ) -> Option<GestureEvent> {
        let distance = distance3(hand.index_tip(), hand.thumb_tip());
        let state = &mut self.state;

        if distance < self.thresholds.touch_radius {
            let Some(start) = state.pinch_start else {
                debug!(distance, "Pinch started");
                state.pinching = true;
                state.pinch_start = Some(now);
                // Scroll is suppressed while pinching.
                state.end_scroll();
                return None;
            };

            if !state.long_press_fired && now.elapsed_since(start) > self.thresholds.long_press_time
            {
                debug!(held_ms = now.elapsed_since(start).as_millis() as u64, "Long press");
                state.long_press_fired = true;
                return Some(cursor.to_long_press());
            }
            return None;
        }

        if !state.pinching {
            return None;
        }

        let duration = state
            .pinch_start
            .map(|start| now.elapsed_since(start))
            .unwrap_or_default();
        let long_press_fired = state.long_press_fired;
        state.end_pinch();
        debug!(duration_ms = duration.as_millis() as u64, "Pinch released");

        // Only a pinch held strictly longer than the long-press time is
        // excluded from clicking.
        if long_press_fired || duration > self.thresholds.long_press_time {
            return None;
        }

        let cooled_down = match state.last_click_time {
            Some(last) => now.elapsed_since(last) > self.thresholds.click_cooldown,
            None => true,
        };
        if !cooled_down {
            debug!("Click suppressed by cooldown");
            return None;
        }

        state.last_click_time = Some(now);
        Some(cursor.to_click())
    }

    fn update_scroll(&mut self, hand: &Hand) -> Option<GestureEvent> {
        let ratio = self.thresholds.straight_ratio;
        let palm = hand.wrist();
        let index_straight = is_finger_straight(hand.index_tip(), hand.index_mcp(), palm, ratio);
        let middle_straight = is_finger_straight(hand.middle_tip(), hand.middle_mcp(), palm, ratio);
        let state = &mut self.state;

        if !(index_straight && middle_straight && !state.pinching) {
            if state.scrolling {
                debug!("Scroll disengaged");
            }
            state.end_scroll();
            return None;
        }

        let Some(last_y) = state.last_palm_y else {
            debug!(palm_y = palm.y, "Scroll engaged");
            state.scrolling = true;
            state.last_palm_y = Some(palm.y);
            return None;
        };

        // Sub-threshold deltas keep the old baseline, so they are compared
        // against it again on the next frame.
        let delta = palm.y - last_y;
        if delta.abs() > self.thresholds.scroll_delta_threshold {
            state.last_palm_y = Some(palm.y);
            Some(GestureEvent::Scroll { dy: delta })
        } else {
            None
        }
    }
}
