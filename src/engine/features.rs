//! Per-hand scalar feature extraction.
//!
//! Collapses a 21-landmark observation into a tilt angle, a wrist height,
//! and a fist-closure flag.  The tilt angle doubles as the steering signal.
//! Features are recomputed from scratch every frame; no temporal smoothing
//! is applied, so a single noisy frame can flip the closure flag.

use super::landmarks::{HandLandmark, HandObservation};

// ── Config ─────────────────────────────────────────────────

/// Configuration for feature-extraction thresholds.
#[derive(Debug, Clone)]
pub struct FeatureConfig {
    /// Mean fingertip-to-wrist distance (normalized units) below which a
    /// hand counts as closed.
    pub closed_distance: f32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            closed_distance: 0.08,
        }
    }
}

// ── Features ───────────────────────────────────────────────

/// Scalar features derived from one hand for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSet {
    /// Signed angle (degrees) of the wrist-to-index-base vector against
    /// the horizontal axis.  Serves both WASD left/right and steering.
    pub tilt_deg: f32,
    /// Wrist y in camera coordinates; smaller means physically higher.
    pub height: f32,
    /// Fist-closure flag (radial contraction of the five fingertips
    /// toward the wrist below the configured threshold).
    pub closed: bool,
}

impl FeatureSet {
    /// Extract features from a hand observation.
    pub fn extract(obs: &HandObservation, config: &FeatureConfig) -> Self {
        let wrist = obs.landmark(HandLandmark::Wrist);
        let index_mcp = obs.landmark(HandLandmark::IndexMcp);

        let tilt_deg = (index_mcp.y - wrist.y)
            .atan2(index_mcp.x - wrist.x)
            .to_degrees();

        let tips = HandLandmark::fingertip_landmarks();
        let total: f32 = tips.iter().map(|tip| obs.landmark(*tip).distance(wrist)).sum();
        let mean_tip_distance = total / tips.len() as f32;

        Self {
            tilt_deg,
            height: wrist.y,
            closed: mean_tip_distance < config.closed_distance,
        }
    }
}

// ── Test helpers ───────────────────────────────────────────

/// Build an observation with the wrist at (0.5, `height`), the index base
/// offset at `tilt_deg`, and every fingertip `tip_offset` away from the
/// wrist along x.
#[cfg(test)]
fn make_hand(tilt_deg: f32, height: f32, tip_offset: f32) -> HandObservation {
    use super::landmarks::{HandSide, Landmark, LANDMARK_COUNT};

    let wrist = Landmark { x: 0.5, y: height };
    let mut points = [wrist; LANDMARK_COUNT];

    let rad = tilt_deg.to_radians();
    points[HandLandmark::IndexMcp.index()] = Landmark {
        x: wrist.x + 0.2 * rad.cos(),
        y: wrist.y + 0.2 * rad.sin(),
    };
    for tip in HandLandmark::fingertip_landmarks() {
        points[tip.index()] = Landmark {
            x: wrist.x + tip_offset,
            y: wrist.y,
        };
    }
    HandObservation::from_landmarks(HandSide::Right, &points).unwrap()
}

// ── Tests ──────────────────────────────────────────────────
