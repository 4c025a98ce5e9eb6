//! Foreground-window inspection port and adapters.
//!
//! Auto profile switching needs the title of the currently-focused
//! window.  The command adapter shells out to a title-printing tool
//! (xdotool by default); failure is non-fatal and simply keeps the
//! current profile until the next rate-limited check.

use std::process::Command;

use anyhow::{Context, Result};

/// Reports the foreground window title, when one exists.
pub trait WindowInspector {
    /// `Ok(None)` when no window is focused; errors are non-fatal and the
    /// caller keeps the previous profile.
    fn active_window_title(&self) -> Result<Option<String>>;
}

// ── Command adapter ────────────────────────────────────────

/// Inspector that runs a title-printing command per check.
pub struct CommandWindowInspector {
    command: String,
}

impl CommandWindowInspector {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for CommandWindowInspector {
    fn default() -> Self {
        Self::new("xdotool getactivewindow getwindowname")
    }
}

impl WindowInspector for CommandWindowInspector {
    fn active_window_title(&self) -> Result<Option<String>> {
        let mut parts = self.command.split_whitespace();
        let program = parts.next().context("empty window inspection command")?;
        let output = Command::new(program)
            .args(parts)
            .output()
            .with_context(|| format!("failed to run {:?}", self.command))?;

        // xdotool exits nonzero when nothing is focused.
        if !output.status.success() {
            return Ok(None);
        }
        let title = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if title.is_empty() {
            Ok(None)
        } else {
            Ok(Some(title))
        }
    }
}

// ── Null adapter ───────────────────────────────────────────

/// Inspector that never reports a window; auto-switching stays inert.
#[derive(Debug, Default)]
pub struct NullWindowInspector;

impl WindowInspector for NullWindowInspector {
    fn active_window_title(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

// ── Tests ──────────────────────────────────────────────────
