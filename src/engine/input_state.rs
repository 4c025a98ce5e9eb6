//! Held-input bookkeeping and press/release reconciliation.
//!
//! The state machine is the single owner of "which controls are currently
//! held".  Each frame it reconciles the desired intent against the held
//! set and emits the minimal press/release transitions; feeding it the
//! same intent twice emits nothing the second time.  Opposing controls on
//! one axis are never held together: all releases are ordered before all
//! presses within a reconciliation.

use tracing::debug;

use super::decision::Intent;

// ── Controls ───────────────────────────────────────────────

/// A discrete control the engine can hold down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    LeftClick,
    RightClick,
    SteerLeft,
    SteerRight,
}

/// Total number of distinct controls.
pub const CONTROL_COUNT: usize = 8;

/// All controls in index order.
pub const ALL_CONTROLS: [Control; CONTROL_COUNT] = [
    Control::KeyW,
    Control::KeyA,
    Control::KeyS,
    Control::KeyD,
    Control::LeftClick,
    Control::RightClick,
    Control::SteerLeft,
    Control::SteerRight,
];

impl Control {
    /// Convert control enum to array index (0-7).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// String representation for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeyW => "w",
            Self::KeyA => "a",
            Self::KeyS => "s",
            Self::KeyD => "d",
            Self::LeftClick => "left-click",
            Self::RightClick => "right-click",
            Self::SteerLeft => "steer-left",
            Self::SteerRight => "steer-right",
        }
    }

    /// The control on the other end of the same axis, if any.
    pub fn opposite(&self) -> Option<Control> {
        match self {
            Self::KeyW => Some(Self::KeyS),
            Self::KeyS => Some(Self::KeyW),
            Self::KeyA => Some(Self::KeyD),
            Self::KeyD => Some(Self::KeyA),
            Self::SteerLeft => Some(Self::SteerRight),
            Self::SteerRight => Some(Self::SteerLeft),
            Self::LeftClick | Self::RightClick => None,
        }
    }
}

// ── Events ─────────────────────────────────────────────────

/// Transitions emitted toward the injection port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The control went from released to held.
    Press(Control),
    /// The control went from held to released.
    Release(Control),
}

// ── State machine ──────────────────────────────────────────

/// Authoritative held-control bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct InputStateMachine {
    held: [bool; CONTROL_COUNT],
}

impl InputStateMachine {
    /// Create a state machine with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a control is currently held.
    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.index()]
    }

    /// Reconcile the held set against an intent.
    ///
    /// Emits the minimal press/release transitions to reach the intent
    /// exactly.  Releases precede presses so an axis never has both
    /// directions held between transitions.
    pub fn apply(&mut self, intent: &Intent) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for control in ALL_CONTROLS {
            if self.held[control.index()] && !intent.demands(control) {
                self.held[control.index()] = false;
                events.push(InputEvent::Release(control));
            }
        }
        for control in ALL_CONTROLS {
            if !self.held[control.index()] && intent.demands(control) {
                if let Some(opposite) = control.opposite() {
                    debug_assert!(
                        !self.held[opposite.index()],
                        "pressing {} while {} is still held",
                        control.as_str(),
                        opposite.as_str(),
                    );
                }
                self.held[control.index()] = true;
                events.push(InputEvent::Press(control));
            }
        }
        events
    }

    /// Unconditionally release every held control.
    pub fn reset(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for control in ALL_CONTROLS {
            if self.held[control.index()] {
                self.held[control.index()] = false;
                events.push(InputEvent::Release(control));
            }
        }
        if !events.is_empty() {
            debug!("input state reset: released {} control(s)", events.len());
        }
        events
    }
}

// ── Tests ──────────────────────────────────────────────────
