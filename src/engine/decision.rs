//! Feature-to-intent decisions per control profile.
//!
//! Maps continuous features onto the discrete control set of the active
//! profile through a symmetric three-zone dead-band: a normalized signal
//! inside the band asserts nothing, outside it asserts exactly one
//! direction.  The same threshold applies entering and leaving the band,
//! so a signal hovering right at the boundary can still chatter; separate
//! enter/exit thresholds would change observable behavior and are not
//! used.

use super::calibration::CalibrationState;
use super::features::FeatureSet;
use super::input_state::{Control, CONTROL_COUNT};
use super::profile::ControlProfile;

// ── Config ─────────────────────────────────────────────────

/// Configuration for decision thresholds.
#[derive(Debug, Clone)]
pub struct DecisionConfig {
    /// Tilt angle (degrees) mapping to full steering deflection.
    pub full_tilt_deg: f32,
    /// Dead-band half-width on normalized tilt strength.
    pub tilt_deadband: f32,
    /// Dead-band half-width (normalized height units) on the offset
    /// against the calibration baseline.
    pub height_deadband: f32,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            full_tilt_deg: 45.0,
            tilt_deadband: 0.2,
            height_deadband: 0.03,
        }
    }
}

// ── Intent ─────────────────────────────────────────────────

/// Per-frame demand: which controls should be held right now.
///
/// Computed purely from the current frame's features; carries no memory of
/// prior frames.  Held-state memory lives in the input state machine only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    demanded: [bool; CONTROL_COUNT],
}

impl Intent {
    /// The fully-neutral intent (nothing held).
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Builder form: demand one more control.
    pub fn with(mut self, control: Control) -> Self {
        self.demanded[control.index()] = true;
        self
    }

    /// Demand a control.
    pub fn demand(&mut self, control: Control) {
        self.demanded[control.index()] = true;
    }

    /// Whether the intent demands a control.
    pub fn demands(&self, control: Control) -> bool {
        self.demanded[control.index()]
    }

    /// Whether nothing is demanded.
    pub fn is_neutral(&self) -> bool {
        !self.demanded.iter().any(|d| *d)
    }
}

// ── Dead-band ──────────────────────────────────────────────

/// Discrete outcome of a dead-banded axis signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisZone {
    Low,
    Neutral,
    High,
}

/// Classify a signal against a symmetric dead-band.
///
/// The boundary itself is neutral: only strictly-outside values assert a
/// direction.
fn classify_axis(signal: f32, deadband: f32) -> AxisZone {
    if signal < -deadband {
        AxisZone::Low
    } else if signal > deadband {
        AxisZone::High
    } else {
        AxisZone::Neutral
    }
}

/// Normalize a tilt angle to [-1, 1] steering strength.
fn tilt_strength(angle_deg: f32, config: &DecisionConfig) -> f32 {
    (angle_deg / config.full_tilt_deg).clamp(-1.0, 1.0)
}

// ── Decisions ──────────────────────────────────────────────

/// Decide the intent for one frame under the active profile.
///
/// `left`/`right` are the per-hand features (`None` when the hand was not
/// observed).  The calibration state is consulted, and fed, by FPS mode
/// only.  Zero observed hands always yields the fully-neutral intent.
pub fn decide(
    profile: ControlProfile,
    left: Option<&FeatureSet>,
    right: Option<&FeatureSet>,
    calibration: &mut CalibrationState,
    config: &DecisionConfig,
) -> Intent {
    match profile {
        ControlProfile::Default | ControlProfile::Mouse => decide_clicks(left, right),
        ControlProfile::Fps => decide_wasd(left, right, calibration, config),
        ControlProfile::Racing => decide_steering(left, right, config),
    }
}

/// Mouse/default: left fist holds left click, right fist holds right
/// click; an absent hand contributes nothing.  Tilt is ignored entirely.
fn decide_clicks(left: Option<&FeatureSet>, right: Option<&FeatureSet>) -> Intent {
    let mut intent = Intent::neutral();
    if left.is_some_and(|f| f.closed) {
        intent.demand(Control::LeftClick);
    }
    if right.is_some_and(|f| f.closed) {
        intent.demand(Control::RightClick);
    }
    intent
}

/// FPS: both hands required; tilt steers a/d, height offset against the
/// calibration baseline drives w/s.  Features are averaged as raw scalars,
/// never as landmark positions.
fn decide_wasd(
    left: Option<&FeatureSet>,
    right: Option<&FeatureSet>,
    calibration: &mut CalibrationState,
    config: &DecisionConfig,
) -> Intent {
    let (Some(l), Some(r)) = (left, right) else {
        return Intent::neutral();
    };
    let avg_tilt = (l.tilt_deg + r.tilt_deg) / 2.0;
    let avg_height = (l.height + r.height) / 2.0;

    // The reading that captures the baseline is neutral by construction.
    let Some(height_diff) = calibration.observe(avg_height) else {
        return Intent::neutral();
    };

    let mut intent = Intent::neutral();
    match classify_axis(tilt_strength(avg_tilt, config), config.tilt_deadband) {
        AxisZone::Low => intent.demand(Control::KeyA),
        AxisZone::High => intent.demand(Control::KeyD),
        AxisZone::Neutral => {}
    }
    // Smaller y = hands raised = forward.
    match classify_axis(height_diff, config.height_deadband) {
        AxisZone::Low => intent.demand(Control::KeyW),
        AxisZone::High => intent.demand(Control::KeyS),
        AxisZone::Neutral => {}
    }
    intent
}

/// Racing: single-hand steering, preferring the right hand when both are
/// present.
fn decide_steering(
    left: Option<&FeatureSet>,
    right: Option<&FeatureSet>,
    config: &DecisionConfig,
) -> Intent {
    let Some(hand) = right.or(left) else {
        return Intent::neutral();
    };
    let mut intent = Intent::neutral();
    match classify_axis(tilt_strength(hand.tilt_deg, config), config.tilt_deadband) {
        AxisZone::Low => intent.demand(Control::SteerLeft),
        AxisZone::High => intent.demand(Control::SteerRight),
        AxisZone::Neutral => {}
    }
    intent
}

// ── Test helpers ───────────────────────────────────────────

#[cfg(test)]
fn features(tilt_deg: f32, height: f32, closed: bool) -> FeatureSet {
    FeatureSet {
        tilt_deg,
        height,
        closed,
    }
}

// ── Tests ──────────────────────────────────────────────────
