//! Hand-landmark provider port and subprocess adapter.
//!
//! The engine consumes observations from an external hand tracker.  The
//! subprocess adapter drives a helper process (typically a MediaPipe
//! script owning the camera) that prints one JSON object per frame on
//! stdout:
//!
//! `{"hands": [{"handedness": "Left", "landmarks": [{"x": 0.5, "y": 0.5}, ...]}]}`
//!
//! Each hand carries exactly 21 landmarks; hands with any other count are
//! dropped.  End of stream means the capture session is over; a read or
//! parse failure is fatal for the session.

use std::io::{BufRead, BufReader, Lines};
use std::process::{Child, ChildStdout, Command, Stdio};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::engine::landmarks::{FrameObservation, HandObservation, HandSide, Landmark};

/// Source of per-frame hand observations.
pub trait LandmarkProvider {
    /// The next frame's observations.
    ///
    /// `Ok(None)` means the stream ended; an error means frame acquisition
    /// failed and the session must end.
    fn next_frame(&mut self) -> Result<Option<FrameObservation>>;
}

// ── Wire format ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct FrameMessage {
    #[serde(default)]
    hands: Vec<HandMessage>,
}

#[derive(Debug, Deserialize)]
struct HandMessage {
    #[serde(default)]
    handedness: String,
    landmarks: Vec<PointMessage>,
}

#[derive(Debug, Deserialize)]
struct PointMessage {
    x: f32,
    y: f32,
}

/// Parse one frame line into observations.
fn parse_frame(line: &str) -> Result<FrameObservation> {
    let message: FrameMessage =
        serde_json::from_str(line).context("malformed frame message")?;

    let mut hands = Vec::new();
    for hand in &message.hands {
        let landmarks: Vec<Landmark> = hand
            .landmarks
            .iter()
            .map(|p| Landmark { x: p.x, y: p.y })
            .collect();
        let side = HandSide::from_label(&hand.handedness);
        if let Some(observation) = HandObservation::from_landmarks(side, &landmarks) {
            hands.push(observation);
        }
    }
    Ok(FrameObservation::from_hands(hands))
}

// ── Subprocess adapter ─────────────────────────────────────

/// Landmark provider backed by a helper process printing JSON lines.
pub struct SubprocessLandmarkProvider {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
}

impl SubprocessLandmarkProvider {
    /// Spawn the helper command (whitespace-split into program + args).
    pub fn spawn(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace();
        let program = parts.next().context("empty provider command")?;
        let mut child = Command::new(program)
            .args(parts)
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn landmark provider {:?}", command))?;
        let stdout = child
            .stdout
            .take()
            .context("landmark provider has no stdout")?;
        info!("landmark provider started: {}", command);
        Ok(Self {
            child,
            lines: BufReader::new(stdout).lines(),
        })
    }
}

impl LandmarkProvider for SubprocessLandmarkProvider {
    fn next_frame(&mut self) -> Result<Option<FrameObservation>> {
        for line in self.lines.by_ref() {
            let line = line.context("failed to read from landmark provider")?;
            if line.trim().is_empty() {
                continue;
            }
            return parse_frame(&line).map(Some);
        }
        Ok(None)
    }
}

impl Drop for SubprocessLandmarkProvider {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn landmark_array_json(x: f32, y: f32) -> String {
        let point = format!(r#"{{"x": {x}, "y": {y}}}"#);
        format!("[{}]", vec![point; 21].join(", "))
    }

    #[test]
    fn test_parse_two_hands() {
        let line = format!(
            r#"{{"hands": [
                {{"handedness": "Left", "landmarks": {}}},
                {{"handedness": "Right", "landmarks": {}}}
            ]}}"#,
            landmark_array_json(0.3, 0.5),
            landmark_array_json(0.7, 0.5),
        );
        let frame = parse_frame(&line).unwrap();
        assert!(frame.left.is_some());
        assert!(frame.right.is_some());
        assert!((frame.left.unwrap().landmarks[0].x - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_parse_no_hands() {
        let frame = parse_frame(r#"{"hands": []}"#).unwrap();
        assert!(frame.is_empty());

        // A missing hands field is an empty frame too.
        let frame = parse_frame("{}").unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_wrong_landmark_count_drops_hand() {
        let line = format!(
            r#"{{"hands": [
                {{"handedness": "Left", "landmarks": [{{"x": 0.1, "y": 0.2}}]}},
                {{"handedness": "Right", "landmarks": {}}}
            ]}}"#,
            landmark_array_json(0.7, 0.5),
        );
        let frame = parse_frame(&line).unwrap();
        assert!(frame.left.is_none());
        assert!(frame.right.is_some());
    }

    #[test]
    fn test_missing_handedness_is_unknown_side() {
        let line = format!(
            r#"{{"hands": [{{"landmarks": {}}}]}}"#,
            landmark_array_json(0.5, 0.5),
        );
        // Unknown-side hands take the right slot first.
        let frame = parse_frame(&line).unwrap();
        assert!(frame.right.is_some());
        assert!(frame.left.is_none());
    }

    #[test]
    fn test_malformed_line_is_fatal() {
        assert!(parse_frame("garbage").is_err());
        assert!(parse_frame(r#"{"hands": 3}"#).is_err());
    }
}
