//! Frame-synchronous session loop.
//!
//! One iteration = one captured frame: a rate-limited profile
//! auto-switch check, one engine step, and best-effort emission of the
//! resulting transitions.  The loop ends on a quit signal (SIGINT or
//! SIGTERM), on the exit timer, when the provider's frame stream ends, or
//! on a frame acquisition failure; every exit path releases all held
//! inputs before returning.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info};

use crate::config::ProfileMap;
use crate::engine::{ControlEngine, InputEvent};
use crate::inject::InputSink;
use crate::provider::LandmarkProvider;
use crate::window::WindowInspector;

/// Global flag set by SIGTERM/SIGINT handlers.
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Install signal handlers for graceful shutdown (SIGTERM, SIGINT).
fn install_signal_handlers() {
    unsafe {
        libc::signal(libc::SIGTERM, signal_handler as libc::sighandler_t);
        libc::signal(libc::SIGINT, signal_handler as libc::sighandler_t);
    }
}

extern "C" fn signal_handler(_sig: libc::c_int) {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
}

/// Session configuration.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Exit after N seconds (testing hook).
    pub exit_after: Option<u64>,
}

/// Forward transitions to the injection port.
fn emit(sink: &mut dyn InputSink, events: &[InputEvent]) {
    for event in events {
        match event {
            InputEvent::Press(control) => sink.press(*control),
            InputEvent::Release(control) => sink.release(*control),
        }
    }
}

/// Run the control session until quit, exit timer, or stream end.
pub fn run(
    engine: &mut ControlEngine,
    provider: &mut dyn LandmarkProvider,
    sink: &mut dyn InputSink,
    inspector: &dyn WindowInspector,
    profiles: &ProfileMap,
    config: &SessionConfig,
) -> Result<()> {
    install_signal_handlers();

    let start_time = Instant::now();
    let exit_duration = config.exit_after.map(Duration::from_secs);
    let mut last_tick = Instant::now();
    let mut last_status_log = Instant::now();
    let status_interval = Duration::from_secs(60);
    let mut frames: u64 = 0;

    let result = loop {
        // Check global shutdown flag (set by signal handler).
        if SHUTDOWN_REQUESTED.load(Ordering::SeqCst) {
            info!("shutdown signal received, exiting");
            break Ok(());
        }

        if let Some(duration) = exit_duration {
            if start_time.elapsed() >= duration {
                info!("exit timer fired after {}s", duration.as_secs());
                break Ok(());
            }
        }

        if last_status_log.elapsed() >= status_interval {
            info!(
                "session status: {} frame(s), profile {}",
                frames,
                engine.profile().as_str(),
            );
            last_status_log = Instant::now();
        }

        let now = Instant::now();
        let dt_ms = now.duration_since(last_tick).as_secs_f64() * 1000.0;
        last_tick = now;

        // Rate-limited auto-switch: only inspect the foreground window
        // when mappings exist and the selector's cooldown has elapsed.
        if !profiles.is_empty() && engine.selector.tick(dt_ms) {
            match inspector.active_window_title() {
                Ok(Some(title)) => {
                    let target = profiles.resolve(&title);
                    let events = engine.set_profile(target);
                    emit(sink, &events);
                }
                // No focused window or inspection failure: keep the
                // current profile, retry at the next check.
                Ok(None) => {}
                Err(err) => debug!("window inspection failed: {err:#}"),
            }
        }

        match provider.next_frame() {
            Ok(Some(frame)) => {
                let events = engine.step(&frame);
                emit(sink, &events);
                frames += 1;
            }
            Ok(None) => {
                info!("frame stream ended after {} frame(s)", frames);
                break Ok(());
            }
            Err(err) => break Err(err.context("frame acquisition failed")),
        }
    };

    // Release everything before the process exits, on every path.
    let events = engine.shutdown();
    emit(sink, &events);
    info!(
        "session ended: {} frame(s), profile {}",
        frames,
        engine.profile().as_str(),
    );

    result
}

// ── Test fakes ─────────────────────────────────────────────

#[cfg(test)]
struct FakeProvider {
    frames: std::collections::VecDeque<crate::engine::landmarks::FrameObservation>,
    fail_at_end: bool,
}

#[cfg(test)]
impl LandmarkProvider for FakeProvider {
    fn next_frame(&mut self) -> Result<Option<crate::engine::landmarks::FrameObservation>> {
        match self.frames.pop_front() {
            Some(frame) => Ok(Some(frame)),
            None if self.fail_at_end => Err(anyhow::anyhow!("camera unplugged")),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[derive(Default)]
struct RecordingSink {
    events: Vec<InputEvent>,
}

#[cfg(test)]
impl InputSink for RecordingSink {
    fn press(&mut self, control: crate::engine::Control) {
        self.events.push(InputEvent::Press(control));
    }

    fn release(&mut self, control: crate::engine::Control) {
        self.events.push(InputEvent::Release(control));
    }
}

#[cfg(test)]
struct FakeInspector {
    title: Option<String>,
}

#[cfg(test)]
impl WindowInspector for FakeInspector {
    fn active_window_title(&self) -> Result<Option<String>> {
        Ok(self.title.clone())
    }
}

// ── Tests ──────────────────────────────────────────────────
