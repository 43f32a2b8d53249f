//! JSON Lines recordings of provider output.
//!
//! Each line holds one frame: the millisecond timestamp and the raw
//! multi-hand landmark lists exactly as the provider reported them.
//!
//! ```text
//! {"t":0,"hands":[[{"x":0.5,"y":0.5,"z":0.0}, ...21 points]]}
//! {"t":33,"hands":[]}
//! ```

use crate::landmarks::types::{LandmarkFrame, Point3D, Timestamp};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One recorded provider callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Frame time in milliseconds
    pub t: u64,
    /// Landmarks for every detected hand
    #[serde(default)]
    pub hands: Vec<Vec<Point3D>>,
}

impl RecordedFrame {
    pub fn new(t: u64, hands: Vec<Vec<Point3D>>) -> Self {
        Self { t, hands }
    }

    pub fn timestamp(&self) -> Timestamp {
        Timestamp::from_millis(self.t)
    }

    /// Validate into a classifier frame.
    pub fn to_frame(&self) -> LandmarkFrame {
        LandmarkFrame::from_hands(&self.hands)
    }
}

/// Errors reading or writing a recording.
#[derive(Debug)]
pub enum RecordingError {
    IoError(String),
    ParseError { line: usize, message: String },
    SerializeError(String),
}

impl std::fmt::Display for RecordingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordingError::IoError(e) => write!(f, "IO error: {e}"),
            RecordingError::ParseError { line, message } => {
                write!(f, "Parse error on line {line}: {message}")
            }
            RecordingError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for RecordingError {}

/// Parse a recording from its text form. Blank lines are skipped.
pub fn parse_recording(content: &str) -> Result<Vec<RecordedFrame>, RecordingError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|e| RecordingError::ParseError {
                line: idx + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Read a recording from disk.
pub fn read_recording(path: &Path) -> Result<Vec<RecordedFrame>, RecordingError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| RecordingError::IoError(e.to_string()))?;
    parse_recording(&content)
}

/// Write frames to disk, one JSON object per line.
pub fn write_recording(path: &Path, frames: &[RecordedFrame]) -> Result<(), RecordingError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| RecordingError::IoError(e.to_string()))?;
    }

    let lines = frames
        .iter()
        .map(|f| {
            serde_json::to_string(f).map_err(|e| RecordingError::SerializeError(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    std::fs::write(path, lines.join("\n")).map_err(|e| RecordingError::IoError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blank_lines() {
        let content = "{\"t\":0,\"hands\":[]}\n\n{\"t\":33}\n";
        let frames = parse_recording(content).unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].t, 33);
        assert!(frames[1].hands.is_empty());
        assert_eq!(frames[1].to_frame(), LandmarkFrame::NoHand);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let content = "{\"t\":0,\"hands\":[]}\nnot json\n";
        match parse_recording(content) {
            Err(RecordingError::ParseError { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_hand_is_no_hand() {
        let frame = RecordedFrame::new(10, vec![vec![Point3D::new(0.5, 0.5, 0.0); 4]]);
        assert_eq!(frame.to_frame(), LandmarkFrame::NoHand);
        assert_eq!(frame.timestamp(), Timestamp::from_millis(10));
    }
}
