//! Neutral-height calibration baseline.
//!
//! FPS-mode forward/backward motion is measured against a neutral hand
//! height captured lazily: the first valid two-hand reading after a reset
//! becomes the baseline for the rest of the epoch.  An epoch ends on
//! profile switch, on full tracking loss, or on engine restart.

use tracing::debug;

/// Floating neutral baseline for height-relative decisions.
#[derive(Debug, Clone, Default)]
pub struct CalibrationState {
    baseline: Option<f32>,
}

impl CalibrationState {
    /// Create an uncalibrated state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a baseline has been captured this epoch.
    pub fn is_calibrated(&self) -> bool {
        self.baseline.is_some()
    }

    /// Feed one averaged height reading.
    ///
    /// Returns the offset against the baseline, or `None` on the reading
    /// that captures the baseline — that frame is neutral by construction.
    pub fn observe(&mut self, height: f32) -> Option<f32> {
        match self.baseline {
            Some(baseline) => Some(height - baseline),
            None => {
                debug!("calibration baseline captured at height {:.3}", height);
                self.baseline = Some(height);
                None
            }
        }
    }

    /// Start a new calibration epoch.
    pub fn reset(&mut self) {
        if self.baseline.take().is_some() {
            debug!("calibration baseline cleared");
        }
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_uncalibrated() {
        let state = CalibrationState::new();
        assert!(!state.is_calibrated());
    }

    #[test]
    fn test_first_observation_captures_baseline() {
        let mut state = CalibrationState::new();
        assert_eq!(state.observe(0.5), None);
        assert!(state.is_calibrated());
    }

    #[test]
    fn test_offsets_against_baseline() {
        let mut state = CalibrationState::new();
        state.observe(0.5);

        let raised = state.observe(0.4).unwrap();
        assert!((raised + 0.1).abs() < 1e-6);

        let lowered = state.observe(0.62).unwrap();
        assert!((lowered - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_reset_starts_new_epoch() {
        let mut state = CalibrationState::new();
        state.observe(0.5);
        state.reset();
        assert!(!state.is_calibrated());

        // The next reading recalibrates rather than producing an offset.
        assert_eq!(state.observe(0.8), None);
        assert!((state.observe(0.8).unwrap()).abs() < 1e-6);
    }
}
