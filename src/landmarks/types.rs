//! Landmark frame types delivered by the hand-tracking provider.
//!
//! A frame is an immutable snapshot of at most one hand. Validation of
//! provider output happens here, before anything reaches the classifier:
//! anything that is not exactly one hand of 21 finite points becomes
//! [`LandmarkFrame::NoHand`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of landmarks in a tracked hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;

/// A single landmark in normalized camera coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    /// Depth-like coordinate, same normalization as x/y
    #[serde(default)]
    pub z: f64,
}

impl Point3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// One hand's full set of landmarks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hand {
    pub points: [Point3D; LANDMARK_COUNT],
}

impl Hand {
    pub fn new(points: [Point3D; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build a hand from provider output, rejecting partial or non-finite data.
    pub fn from_points(points: &[Point3D]) -> Option<Self> {
        let points: [Point3D; LANDMARK_COUNT] = points.try_into().ok()?;
        if points.iter().all(Point3D::is_finite) {
            Some(Self { points })
        } else {
            None
        }
    }

    pub fn wrist(&self) -> Point3D {
        self.points[WRIST]
    }

    pub fn thumb_tip(&self) -> Point3D {
        self.points[THUMB_TIP]
    }

    pub fn index_mcp(&self) -> Point3D {
        self.points[INDEX_MCP]
    }

    pub fn index_tip(&self) -> Point3D {
        self.points[INDEX_TIP]
    }

    pub fn middle_mcp(&self) -> Point3D {
        self.points[MIDDLE_MCP]
    }

    pub fn middle_tip(&self) -> Point3D {
        self.points[MIDDLE_TIP]
    }
}

/// Per-frame snapshot from the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LandmarkFrame {
    NoHand,
    Hand(Hand),
}

impl LandmarkFrame {
    /// Validate a single hand's points. Malformed input is treated as no hand.
    pub fn from_points(points: &[Point3D]) -> Self {
        match Hand::from_points(points) {
            Some(hand) => LandmarkFrame::Hand(hand),
            None => LandmarkFrame::NoHand,
        }
    }

    /// Validate multi-hand provider output. Only the first hand is used.
    pub fn from_hands<P: AsRef<[Point3D]>>(hands: &[P]) -> Self {
        match hands.first() {
            Some(points) => Self::from_points(points.as_ref()),
            None => LandmarkFrame::NoHand,
        }
    }

    pub fn hand(&self) -> Option<&Hand> {
        match self {
            LandmarkFrame::Hand(hand) => Some(hand),
            LandmarkFrame::NoHand => None,
        }
    }

    pub fn has_hand(&self) -> bool {
        matches!(self, LandmarkFrame::Hand(_))
    }
}

/// Caller-supplied frame instant in milliseconds.
///
/// Timestamps come from the frame loop rather than a clock read inside the
/// classifier, so tests can drive time explicitly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Time elapsed since `earlier`, clamped to zero if the clock went backwards.
    pub fn elapsed_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<Point3D> {
        (0..n)
            .map(|i| Point3D::new(i as f64 / 100.0, 0.5, 0.0))
            .collect()
    }

    #[test]
    fn test_hand_requires_exactly_21_points() {
        assert!(Hand::from_points(&points(21)).is_some());
        assert!(Hand::from_points(&points(20)).is_none());
        assert!(Hand::from_points(&points(22)).is_none());
        assert!(Hand::from_points(&[]).is_none());
    }

    #[test]
    fn test_non_finite_points_become_no_hand() {
        let mut pts = points(21);
        pts[8].x = f64::NAN;
        assert_eq!(LandmarkFrame::from_points(&pts), LandmarkFrame::NoHand);

        pts[8].x = f64::INFINITY;
        assert_eq!(LandmarkFrame::from_points(&pts), LandmarkFrame::NoHand);
    }

    #[test]
    fn test_multi_hand_truncated_to_first() {
        let mut second = points(21);
        second[INDEX_TIP] = Point3D::new(0.9, 0.9, 0.0);
        let frame = LandmarkFrame::from_hands(&[points(21), second]);

        let hand = frame.hand().unwrap();
        assert_eq!(hand.index_tip(), Point3D::new(0.08, 0.5, 0.0));

        let empty: Vec<Vec<Point3D>> = Vec::new();
        assert_eq!(LandmarkFrame::from_hands(&empty), LandmarkFrame::NoHand);
    }

    #[test]
    fn test_malformed_first_hand_is_no_hand() {
        let frame = LandmarkFrame::from_hands(&[points(5), points(21)]);
        assert!(!frame.has_hand());
    }

    #[test]
    fn test_elapsed_clamps_backwards_clock() {
        let early = Timestamp::from_millis(1_000);
        let late = Timestamp::from_millis(1_250);

        assert_eq!(late.elapsed_since(early), Duration::from_millis(250));
        assert_eq!(early.elapsed_since(late), Duration::ZERO);
    }

    #[test]
    fn test_point_z_defaults_when_missing() {
        let p: Point3D = serde_json::from_str(r#"{"x":0.1,"y":0.2}"#).unwrap();
        assert_eq!(p, Point3D::new(0.1, 0.2, 0.0));
    }
}
