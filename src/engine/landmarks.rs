//! Hand landmark data model.
//!
//! Models the 21 hand landmarks of the MediaPipe hand convention and the
//! per-frame observations the tracking provider emits.  Zero, one, or two
//! hands may be observed per frame; observations live for one frame only
//! and are never persisted.

use tracing::debug;

// ── Landmark ids ───────────────────────────────────────────

/// The 21 hand landmarks of the MediaPipe hand model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Total number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

impl HandLandmark {
    /// Convert landmark enum to array index (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Fingertip landmarks for convenience.
    pub fn fingertip_landmarks() -> [HandLandmark; 5] {
        [
            Self::ThumbTip,
            Self::IndexTip,
            Self::MiddleTip,
            Self::RingTip,
            Self::PinkyTip,
        ]
    }
}

// ── Hand side ──────────────────────────────────────────────

/// Side classification reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandSide {
    Left,
    Right,
    Unknown,
}

impl HandSide {
    /// Parse the provider's handedness label.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Left" => Self::Left,
            "Right" => Self::Right,
            _ => Self::Unknown,
        }
    }
}

// ── Landmark position ──────────────────────────────────────

/// Normalized 2-D position of a single landmark (frame-relative, [0, 1]).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    /// Euclidean distance to another landmark.
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ── Observations ───────────────────────────────────────────

/// One tracked hand for one frame: 21 ordered landmarks plus a side label.
#[derive(Debug, Clone)]
pub struct HandObservation {
    /// Side classification from the provider.
    pub side: HandSide,
    /// 21 landmark positions indexed by HandLandmark.
    pub landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandObservation {
    /// Build from a provider landmark list.
    ///
    /// Lists that do not contain exactly 21 entries are rejected.
    pub fn from_landmarks(side: HandSide, landmarks: &[Landmark]) -> Option<Self> {
        if landmarks.len() != LANDMARK_COUNT {
            debug!(
                "hand observation: expected {} landmarks, got {} for {:?}",
                LANDMARK_COUNT,
                landmarks.len(),
                side,
            );
            return None;
        }
        let mut array = [Landmark::default(); LANDMARK_COUNT];
        array.copy_from_slice(landmarks);
        Some(Self {
            side,
            landmarks: array,
        })
    }

    /// Position of a single landmark.
    pub fn landmark(&self, id: HandLandmark) -> &Landmark {
        &self.landmarks[id.index()]
    }
}

/// Everything the provider observed in a single frame, slotted by side.
#[derive(Debug, Clone, Default)]
pub struct FrameObservation {
    /// The left hand, when observed.
    pub left: Option<HandObservation>,
    /// The right hand, when observed.
    pub right: Option<HandObservation>,
}

impl FrameObservation {
    /// Slot observations by side label.
    ///
    /// The first observation seen for a slot is authoritative; a later
    /// duplicate of the same label is dropped.  An unknown-side hand fills
    /// the right slot first, then the left.
    pub fn from_hands(hands: Vec<HandObservation>) -> Self {
        let mut frame = Self::default();
        for hand in hands {
            match hand.side {
                HandSide::Left => {
                    if frame.left.is_none() {
                        frame.left = Some(hand);
                    } else {
                        debug!("frame observation: dropping duplicate left hand");
                    }
                }
                HandSide::Right => {
                    if frame.right.is_none() {
                        frame.right = Some(hand);
                    } else {
                        debug!("frame observation: dropping duplicate right hand");
                    }
                }
                HandSide::Unknown => {
                    if frame.right.is_none() {
                        frame.right = Some(hand);
                    } else if frame.left.is_none() {
                        frame.left = Some(hand);
                    } else {
                        debug!("frame observation: dropping extra unlabeled hand");
                    }
                }
            }
        }
        frame
    }

    /// Whether no hand at all was observed this frame.
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

// ── Test helpers ───────────────────────────────────────────

/// Create an observation with every landmark at the same position.
#[cfg(test)]
fn flat_hand(side: HandSide, x: f32, y: f32) -> HandObservation {
    let landmarks = [Landmark { x, y }; LANDMARK_COUNT];
    HandObservation::from_landmarks(side, &landmarks).unwrap()
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_indices() {
        assert_eq!(HandLandmark::Wrist.index(), 0);
        assert_eq!(HandLandmark::ThumbTip.index(), 4);
        assert_eq!(HandLandmark::IndexMcp.index(), 5);
        assert_eq!(HandLandmark::PinkyTip.index(), 20);
        assert_eq!(LANDMARK_COUNT, 21);
    }

    #[test]
    fn test_fingertip_landmarks() {
        let tips = HandLandmark::fingertip_landmarks();
        let indices: Vec<usize> = tips.iter().map(|t| t.index()).collect();
        assert_eq!(indices, vec![4, 8, 12, 16, 20]);
    }

    #[test]
    fn test_side_from_label() {
        assert_eq!(HandSide::from_label("Left"), HandSide::Left);
        assert_eq!(HandSide::from_label("Right"), HandSide::Right);
        assert_eq!(HandSide::from_label(""), HandSide::Unknown);
        assert_eq!(HandSide::from_label("left"), HandSide::Unknown);
    }

    #[test]
    fn test_landmark_distance() {
        let a = Landmark { x: 0.0, y: 0.0 };
        let b = Landmark { x: 0.3, y: 0.4 };
        assert!((a.distance(&b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_from_landmarks_wrong_count() {
        let landmarks = vec![Landmark::default(); 10];
        assert!(HandObservation::from_landmarks(HandSide::Left, &landmarks).is_none());
    }

    #[test]
    fn test_landmark_accessor() {
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        landmarks[HandLandmark::IndexMcp.index()] = Landmark { x: 0.7, y: 0.3 };
        let obs = HandObservation::from_landmarks(HandSide::Right, &landmarks).unwrap();
        let mcp = obs.landmark(HandLandmark::IndexMcp);
        assert!((mcp.x - 0.7).abs() < 1e-6);
        assert!((mcp.y - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_from_hands_slots_by_side() {
        let frame = FrameObservation::from_hands(vec![
            flat_hand(HandSide::Right, 0.6, 0.5),
            flat_hand(HandSide::Left, 0.4, 0.5),
        ]);
        assert!(frame.left.is_some());
        assert!(frame.right.is_some());
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_from_hands_first_seen_wins() {
        let frame = FrameObservation::from_hands(vec![
            flat_hand(HandSide::Left, 0.1, 0.5),
            flat_hand(HandSide::Left, 0.9, 0.5),
        ]);
        // First left hand is authoritative, duplicate dropped.
        assert!((frame.left.as_ref().unwrap().landmarks[0].x - 0.1).abs() < 1e-6);
        assert!(frame.right.is_none());
    }

    #[test]
    fn test_from_hands_unknown_fills_right_then_left() {
        let frame = FrameObservation::from_hands(vec![
            flat_hand(HandSide::Unknown, 0.6, 0.5),
            flat_hand(HandSide::Unknown, 0.4, 0.5),
        ]);
        assert!((frame.right.as_ref().unwrap().landmarks[0].x - 0.6).abs() < 1e-6);
        assert!((frame.left.as_ref().unwrap().landmarks[0].x - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_empty_frame() {
        let frame = FrameObservation::from_hands(Vec::new());
        assert!(frame.is_empty());
        assert!(frame.left.is_none());
        assert!(frame.right.is_none());
    }
}
