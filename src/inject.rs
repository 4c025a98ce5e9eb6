//! OS input injection port and adapters.
//!
//! Press/release primitives for the discrete controls.  Injection is
//! best-effort: a failed call is logged and the loop carries on; there is
//! no retry.  Steering controls land on the same keys the original WASD
//! axis uses, so racing-mode games need no extra binding.

use enigo::{Button, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use tracing::{debug, warn};

use crate::engine::input_state::Control;

/// Destination for press/release transitions.
pub trait InputSink {
    /// Hold a control down.
    fn press(&mut self, control: Control);
    /// Let a control go.
    fn release(&mut self, control: Control);
}

// ── Enigo adapter ──────────────────────────────────────────

/// Keyboard key a control maps to, when it is key-backed.
fn key_for(control: Control) -> Option<Key> {
    match control {
        Control::KeyW => Some(Key::Unicode('w')),
        Control::KeyA | Control::SteerLeft => Some(Key::Unicode('a')),
        Control::KeyS => Some(Key::Unicode('s')),
        Control::KeyD | Control::SteerRight => Some(Key::Unicode('d')),
        Control::LeftClick | Control::RightClick => None,
    }
}

/// Mouse button a control maps to, when it is button-backed.
fn button_for(control: Control) -> Option<Button> {
    match control {
        Control::LeftClick => Some(Button::Left),
        Control::RightClick => Some(Button::Right),
        _ => None,
    }
}

/// Sink that injects into the OS through enigo.
pub struct EnigoSink {
    enigo: Enigo,
}

impl EnigoSink {
    /// Connect to the OS input facility.
    pub fn new() -> anyhow::Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|err| anyhow::anyhow!("failed to initialize input injection: {err}"))?;
        Ok(Self { enigo })
    }

    fn apply(&mut self, control: Control, direction: Direction) {
        let result = if let Some(key) = key_for(control) {
            self.enigo.key(key, direction)
        } else if let Some(button) = button_for(control) {
            self.enigo.button(button, direction)
        } else {
            Ok(())
        };
        if let Err(err) = result {
            warn!("input injection failed for {}: {err}", control.as_str());
        }
    }
}

impl InputSink for EnigoSink {
    fn press(&mut self, control: Control) {
        debug!("press {}", control.as_str());
        self.apply(control, Direction::Press);
    }

    fn release(&mut self, control: Control) {
        debug!("release {}", control.as_str());
        self.apply(control, Direction::Release);
    }
}

// ── Null adapter ───────────────────────────────────────────

/// Sink that logs transitions without touching the OS (`--dry-run`).
#[derive(Debug, Default)]
pub struct NullSink;

impl InputSink for NullSink {
    fn press(&mut self, control: Control) {
        debug!("press {} (dry run)", control.as_str());
    }

    fn release(&mut self, control: Control) {
        debug!("release {} (dry run)", control.as_str());
    }
}

// ── Tests ──────────────────────────────────────────────────
