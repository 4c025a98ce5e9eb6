//! Gesture-to-input control engine.
//!
//! Turns per-frame hand-landmark observations into stable held-down
//! keyboard and mouse controls:
//! - `landmarks`: the 21-landmark observation model
//! - `features`: per-hand scalar features (tilt, height, closure)
//! - `calibration`: the floating neutral-height baseline
//! - `decision`: dead-banded feature-to-intent mapping per profile
//! - `input_state`: held-control bookkeeping and press/release emission
//! - `profile`: the control profiles and the auto-switch selector
//!
//! The engine is pure state: it consumes observations and returns input
//! transitions, leaving all I/O (tracking, injection, window inspection)
//! to the session loop's capability ports.  That keeps every invariant
//! drivable by synthetic frames in tests.

pub mod calibration;
pub mod decision;
pub mod features;
pub mod input_state;
pub mod landmarks;
pub mod profile;

use calibration::CalibrationState;
use decision::DecisionConfig;
use features::{FeatureConfig, FeatureSet};
use input_state::InputStateMachine;
use landmarks::FrameObservation;
use profile::{ControlProfile, ProfileSelector};

pub use input_state::{Control, InputEvent};

// ── Engine ─────────────────────────────────────────────────

/// Central control-engine state: active profile, calibration epoch, and
/// held-input bookkeeping.  One instance is owned by the session loop and
/// stepped once per captured frame.
pub struct ControlEngine {
    /// Feature-extraction thresholds.
    pub features: FeatureConfig,
    /// Decision thresholds.
    pub decision: DecisionConfig,
    /// Profile ownership and auto-switch rate limiting.
    pub selector: ProfileSelector,
    calibration: CalibrationState,
    inputs: InputStateMachine,
}

impl ControlEngine {
    /// Create an engine in the given profile with nothing held.
    pub fn new(initial: ControlProfile) -> Self {
        Self {
            features: FeatureConfig::default(),
            decision: DecisionConfig::default(),
            selector: ProfileSelector::new(initial),
            calibration: CalibrationState::new(),
            inputs: InputStateMachine::new(),
        }
    }

    /// The active profile.
    pub fn profile(&self) -> ControlProfile {
        self.selector.current()
    }

    /// Whether a control is currently held.
    pub fn is_held(&self, control: Control) -> bool {
        self.inputs.is_held(control)
    }

    /// Process one frame of observations.
    ///
    /// Returns the input transitions to emit toward the injection port.
    /// A frame with zero hands yields the neutral intent, which releases
    /// everything held, and starts a new calibration epoch.
    pub fn step(&mut self, frame: &FrameObservation) -> Vec<InputEvent> {
        if frame.is_empty() {
            self.calibration.reset();
        }

        let left = frame
            .left
            .as_ref()
            .map(|hand| FeatureSet::extract(hand, &self.features));
        let right = frame
            .right
            .as_ref()
            .map(|hand| FeatureSet::extract(hand, &self.features));

        let profile = self.selector.current();
        let intent = decision::decide(
            profile,
            left.as_ref(),
            right.as_ref(),
            &mut self.calibration,
            &self.decision,
        );
        debug_assert!(
            input_state::ALL_CONTROLS
                .iter()
                .all(|c| !intent.demands(*c) || profile.control_set().contains(c)),
            "intent demands a control outside the {} profile",
            profile.as_str(),
        );
        self.inputs.apply(&intent)
    }

    /// Switch the active profile.
    ///
    /// On an actual change, releases everything held and clears the
    /// calibration baseline so FPS mode recalibrates on re-entry.
    /// Switching to the already-active profile emits nothing.
    pub fn set_profile(&mut self, profile: ControlProfile) -> Vec<InputEvent> {
        if !self.selector.set_profile(profile) {
            return Vec::new();
        }
        self.calibration.reset();
        self.inputs.reset()
    }

    /// Release every held control.  Must run before the process exits.
    pub fn shutdown(&mut self) -> Vec<InputEvent> {
        self.inputs.reset()
    }
}

// ── Test helpers ───────────────────────────────────────────

/// Build an observation with the wrist at (0.5, `height`), the index base
/// at `tilt_deg`, and fingertips either contracted (fist) or extended.
#[cfg(test)]
pub(crate) fn test_hand(
    side: landmarks::HandSide,
    tilt_deg: f32,
    height: f32,
    closed: bool,
) -> landmarks::HandObservation {
    use landmarks::{HandLandmark, HandObservation, Landmark, LANDMARK_COUNT};

    let wrist = Landmark { x: 0.5, y: height };
    let mut points = [wrist; LANDMARK_COUNT];

    let rad = tilt_deg.to_radians();
    points[HandLandmark::IndexMcp.index()] = Landmark {
        x: wrist.x + 0.2 * rad.cos(),
        y: wrist.y + 0.2 * rad.sin(),
    };
    let tip_offset = if closed { 0.03 } else { 0.2 };
    for tip in HandLandmark::fingertip_landmarks() {
        points[tip.index()] = Landmark {
            x: wrist.x + tip_offset,
            y: wrist.y,
        };
    }
    HandObservation::from_landmarks(side, &points).unwrap()
}

#[cfg(test)]
pub(crate) fn test_frame(
    hands: Vec<landmarks::HandObservation>,
) -> FrameObservation {
    FrameObservation::from_hands(hands)
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::landmarks::HandSide;
    use super::*;

    #[test]
    fn test_mouse_click_press_and_release() {
        let mut engine = ControlEngine::new(ControlProfile::Mouse);

        // Left fist, right hand absent: left click pressed once.
        let fist = test_frame(vec![test_hand(HandSide::Left, 0.0, 0.5, true)]);
        let events = engine.step(&fist);
        assert_eq!(events, vec![InputEvent::Press(Control::LeftClick)]);

        // Identical frame: nothing re-emitted.
        assert!(engine.step(&fist).is_empty());
        assert!(engine.is_held(Control::LeftClick));

        // Hand opens: released.
        let open = test_frame(vec![test_hand(HandSide::Left, 0.0, 0.5, false)]);
        let events = engine.step(&open);
        assert_eq!(events, vec![InputEvent::Release(Control::LeftClick)]);

        // The right click was never touched.
        assert!(!engine.is_held(Control::RightClick));
    }

    #[test]
    fn test_racing_steer_and_center() {
        let mut engine = ControlEngine::new(ControlProfile::Racing);

        // 30 degrees = strength 0.667: steer right.
        let steering = test_frame(vec![test_hand(HandSide::Right, 30.0, 0.5, false)]);
        let events = engine.step(&steering);
        assert_eq!(events, vec![InputEvent::Press(Control::SteerRight)]);

        // Back to center: released.
        let centered = test_frame(vec![test_hand(HandSide::Right, 0.0, 0.5, false)]);
        let events = engine.step(&centered);
        assert_eq!(events, vec![InputEvent::Release(Control::SteerRight)]);
    }

    #[test]
    fn test_release_on_tracking_loss() {
        let mut engine = ControlEngine::new(ControlProfile::Racing);
        engine.step(&test_frame(vec![test_hand(HandSide::Right, -30.0, 0.5, false)]));
        assert!(engine.is_held(Control::SteerLeft));

        // Zero hands for a frame: the held key must not stay stuck.
        let events = engine.step(&test_frame(Vec::new()));
        assert_eq!(events, vec![InputEvent::Release(Control::SteerLeft)]);
    }

    #[test]
    fn test_fps_calibration_gating() {
        let mut engine = ControlEngine::new(ControlProfile::Fps);

        // One hand only: no decision, no press, no calibration.
        let one_hand = test_frame(vec![test_hand(HandSide::Left, -40.0, 0.5, false)]);
        assert!(engine.step(&one_hand).is_empty());

        // First two-hand frame captures the baseline; still neutral even
        // with a strong tilt.
        let tilted = test_frame(vec![
            test_hand(HandSide::Left, -40.0, 0.5, false),
            test_hand(HandSide::Right, -40.0, 0.5, false),
        ]);
        assert!(engine.step(&tilted).is_empty());

        // Second frame acts on the tilt.
        let events = engine.step(&tilted);
        assert_eq!(events, vec![InputEvent::Press(Control::KeyA)]);
    }

    #[test]
    fn test_fps_height_movement_flips_exclusively() {
        let mut engine = ControlEngine::new(ControlProfile::Fps);
        let level = test_frame(vec![
            test_hand(HandSide::Left, 0.0, 0.5, false),
            test_hand(HandSide::Right, 0.0, 0.5, false),
        ]);
        engine.step(&level); // calibration frame

        let raised = test_frame(vec![
            test_hand(HandSide::Left, 0.0, 0.4, false),
            test_hand(HandSide::Right, 0.0, 0.4, false),
        ]);
        assert_eq!(engine.step(&raised), vec![InputEvent::Press(Control::KeyW)]);

        // Lowering past the baseline releases w before pressing s.
        let lowered = test_frame(vec![
            test_hand(HandSide::Left, 0.0, 0.6, false),
            test_hand(HandSide::Right, 0.0, 0.6, false),
        ]);
        assert_eq!(
            engine.step(&lowered),
            vec![
                InputEvent::Release(Control::KeyW),
                InputEvent::Press(Control::KeyS),
            ],
        );
    }

    #[test]
    fn test_tracking_loss_starts_new_calibration_epoch() {
        let mut engine = ControlEngine::new(ControlProfile::Fps);
        let level = test_frame(vec![
            test_hand(HandSide::Left, 0.0, 0.5, false),
            test_hand(HandSide::Right, 0.0, 0.5, false),
        ]);
        engine.step(&level);

        // Full tracking loss, then hands return much lower.  Against the
        // old baseline that would press s; instead the frame recalibrates.
        engine.step(&test_frame(Vec::new()));
        let lowered = test_frame(vec![
            test_hand(HandSide::Left, 0.0, 0.7, false),
            test_hand(HandSide::Right, 0.0, 0.7, false),
        ]);
        assert!(engine.step(&lowered).is_empty());
    }

    #[test]
    fn test_release_on_profile_switch() {
        let mut engine = ControlEngine::new(ControlProfile::Fps);
        let level = test_frame(vec![
            test_hand(HandSide::Left, 0.0, 0.5, false),
            test_hand(HandSide::Right, 0.0, 0.5, false),
        ]);
        engine.step(&level); // calibration frame

        // Tilted and raised: w and a both held.
        let moving = test_frame(vec![
            test_hand(HandSide::Left, -40.0, 0.4, false),
            test_hand(HandSide::Right, -40.0, 0.4, false),
        ]);
        engine.step(&moving);
        assert!(engine.is_held(Control::KeyW));
        assert!(engine.is_held(Control::KeyA));

        // Switching releases both before any racing-mode press can occur.
        let events = engine.set_profile(ControlProfile::Racing);
        assert!(events.contains(&InputEvent::Release(Control::KeyW)));
        assert!(events.contains(&InputEvent::Release(Control::KeyA)));
        assert!(events
            .iter()
            .all(|e| matches!(e, InputEvent::Release(_))));
        assert!(!engine.is_held(Control::KeyW));
        assert!(!engine.is_held(Control::KeyA));

        // FPS recalibrates when re-entered.
        engine.set_profile(ControlProfile::Fps);
        assert!(engine.step(&moving).is_empty());
    }

    #[test]
    fn test_set_profile_idempotent() {
        let mut engine = ControlEngine::new(ControlProfile::Racing);
        engine.step(&test_frame(vec![test_hand(HandSide::Right, 30.0, 0.5, false)]));
        assert!(engine.is_held(Control::SteerRight));

        // Same profile: nothing released, no events.
        assert!(engine.set_profile(ControlProfile::Racing).is_empty());
        assert!(engine.is_held(Control::SteerRight));
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let mut engine = ControlEngine::new(ControlProfile::Mouse);
        engine.step(&test_frame(vec![
            test_hand(HandSide::Left, 0.0, 0.5, true),
            test_hand(HandSide::Right, 0.0, 0.5, true),
        ]));
        assert!(engine.is_held(Control::LeftClick));
        assert!(engine.is_held(Control::RightClick));

        let events = engine.shutdown();
        assert_eq!(events.len(), 2);
        assert!(!engine.is_held(Control::LeftClick));
        assert!(!engine.is_held(Control::RightClick));
    }
}
