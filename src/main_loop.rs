//! Outer render loop.
//!
//! Drives one engine tick per iteration and forwards produced frames to
//! the display sink. The caller owns the actual sleep primitive: `tick`
//! returns how long to wait, keeping the loop portable and testable with
//! synthetic instants.

use embassy_time::{Duration, Instant};
use log::warn;

use crate::engine::AnimationEngine;
use crate::{DisplaySink, NetworkAssociation, SettingsFetcher};

/// Fixed delay after a display fault before the loop continues.
pub const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Result of one loop iteration.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// Whether a frame was committed this iteration.
    pub rendered: bool,
    /// How long to wait before calling `tick` again.
    pub sleep_duration: Duration,
}

/// Failure-isolating wrapper around the engine and display sink.
///
/// Fetch failures are already handled inside the poller; this boundary
/// catches display faults. A fault is logged and answered with a fixed
/// back-off — the loop never terminates on a transient error.
///
/// # Usage
///
/// ```ignore
/// let mut main_loop = MainLoop::new(engine, sink);
///
/// loop {
///     let result = main_loop.tick(Instant::now());
///     sleep(result.sleep_duration);
/// }
/// ```
pub struct MainLoop<
    O,
    F,
    A,
    const PIXELS: usize,
    const MAX_SPARKLES: usize,
    const MAX_SLOTS: usize,
> {
    sink: O,
    engine: AnimationEngine<F, A, PIXELS, MAX_SPARKLES, MAX_SLOTS>,
}

impl<O, F, A, const PIXELS: usize, const MAX_SPARKLES: usize, const MAX_SLOTS: usize>
    MainLoop<O, F, A, PIXELS, MAX_SPARKLES, MAX_SLOTS>
where
    O: DisplaySink,
    F: SettingsFetcher,
    A: NetworkAssociation,
{
    pub fn new(engine: AnimationEngine<F, A, PIXELS, MAX_SPARKLES, MAX_SLOTS>, sink: O) -> Self {
        Self { sink, engine }
    }

    /// Run one iteration: tick the engine, commit any produced frame.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        let mut rendered = false;
        if let Some(frame) = self.engine.tick(now) {
            match self.sink.render(frame) {
                Ok(()) => rendered = true,
                Err(err) => {
                    warn!("display sink failed: {err:?}");
                    return TickResult {
                        rendered: false,
                        sleep_duration: RETRY_BACKOFF,
                    };
                }
            }
        }

        TickResult {
            rendered,
            sleep_duration: self.engine.time_until_frame(now),
        }
    }

    /// Get a reference to the engine.
    pub fn engine(&self) -> &AnimationEngine<F, A, PIXELS, MAX_SPARKLES, MAX_SLOTS> {
        &self.engine
    }

    /// Get a mutable reference to the engine.
    pub fn engine_mut(&mut self) -> &mut AnimationEngine<F, A, PIXELS, MAX_SPARKLES, MAX_SLOTS> {
        &mut self.engine
    }
}
