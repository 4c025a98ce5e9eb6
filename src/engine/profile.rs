//! Control profiles and the auto-switching selector.
//!
//! A profile selects which discrete controls exist and how features map
//! onto them.  The selector owns the single active profile and the rate
//! limit on foreground-window inspection; switching to the already-active
//! profile is a no-op and triggers no reset by itself.

use tracing::info;

use super::input_state::Control;

// ── Profiles ───────────────────────────────────────────────

/// Named control mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlProfile {
    /// Click controls, used when no configured application is focused.
    Default,
    /// Left/right fist holds left/right mouse button.
    Mouse,
    /// Two-hand WASD movement with height calibration.
    Fps,
    /// Single-hand two-way steering.
    Racing,
}

impl ControlProfile {
    /// String representation for logging and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Mouse => "mouse",
            Self::Fps => "fps",
            Self::Racing => "racing",
        }
    }

    /// Parse a profile from its lowercase name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "default" => Some(Self::Default),
            "mouse" => Some(Self::Mouse),
            "fps" => Some(Self::Fps),
            "racing" => Some(Self::Racing),
            _ => None,
        }
    }

    /// The discrete controls this profile can hold.
    pub fn control_set(&self) -> &'static [Control] {
        match self {
            Self::Default | Self::Mouse => &[Control::LeftClick, Control::RightClick],
            Self::Fps => &[
                Control::KeyW,
                Control::KeyA,
                Control::KeyS,
                Control::KeyD,
            ],
            Self::Racing => &[Control::SteerLeft, Control::SteerRight],
        }
    }
}

// ── Selector ───────────────────────────────────────────────

/// Process-wide current-profile state with a rate-limited window check.
#[derive(Debug, Clone)]
pub struct ProfileSelector {
    /// The active profile.
    current: ControlProfile,
    /// Interval between foreground-window inspections (milliseconds).
    pub check_interval_ms: f64,
    /// Time remaining until the next inspection is due.
    check_cooldown_ms: f64,
}

impl ProfileSelector {
    /// Create a selector; the first inspection is due immediately.
    pub fn new(initial: ControlProfile) -> Self {
        Self {
            current: initial,
            check_interval_ms: 1000.0,
            check_cooldown_ms: 0.0,
        }
    }

    /// The active profile.
    pub fn current(&self) -> ControlProfile {
        self.current
    }

    /// Tick the inspection cooldown.
    ///
    /// Returns true when a foreground-window check is due; the cooldown
    /// rearms when it fires.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        self.check_cooldown_ms -= dt_ms;
        if self.check_cooldown_ms <= 0.0 {
            self.check_cooldown_ms = self.check_interval_ms;
            return true;
        }
        false
    }

    /// Switch the active profile.
    ///
    /// Returns true if the profile actually changed; switching to the
    /// already-active profile is a no-op.
    pub fn set_profile(&mut self, profile: ControlProfile) -> bool {
        if self.current == profile {
            return false;
        }
        info!(
            "profile switched: {} -> {}",
            self.current.as_str(),
            profile.as_str(),
        );
        self.current = profile;
        true
    }
}

// ── Tests ──────────────────────────────────────────────────
