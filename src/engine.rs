use embassy_time::{Duration, Instant};
use log::warn;

use crate::bounds::MatrixBounds;
use crate::color::Rgb;
use crate::math8::progress8;
use crate::palette::Palette;
use crate::particle::ParticlePool;
use crate::poller::SettingsPoller;
use crate::rng::SparkleRng;
use crate::settings::Settings;
use crate::{NetworkAssociation, SettingsFetcher};

/// Animation engine - the main orchestrator
///
/// Owns the settings snapshot, particle pool, palette table, and frame
/// buffer; nothing else mutates them, so no locking is needed. One
/// `tick` first reconciles any freshly polled settings, then renders a
/// frame if one is due — a frame never observes a torn update.
pub struct AnimationEngine<
    F,
    A,
    const PIXELS: usize,
    const MAX_SPARKLES: usize,
    const MAX_SLOTS: usize,
> {
    // External dependencies
    poller: SettingsPoller<F, A>,

    // Internal state
    settings: Settings,
    bounds: MatrixBounds,
    pool: ParticlePool<MAX_SPARKLES>,
    palette: Palette<MAX_SLOTS>,
    rng: SparkleRng,
    frame_buffer: [Rgb; PIXELS],
    last_frame: Instant,
    cycle_start: Instant,
    progress: u8,
}

impl<F, A, const PIXELS: usize, const MAX_SPARKLES: usize, const MAX_SLOTS: usize>
    AnimationEngine<F, A, PIXELS, MAX_SPARKLES, MAX_SLOTS>
where
    F: SettingsFetcher,
    A: NetworkAssociation,
{
    /// Create a new engine with an initial (already validated) snapshot.
    ///
    /// `PIXELS` must cover `bounds.area()`.
    pub fn new(
        poller: SettingsPoller<F, A>,
        bounds: MatrixBounds,
        settings: Settings,
        seed: u64,
    ) -> Self {
        debug_assert!(bounds.area() <= PIXELS);
        debug_assert!(bounds.fits(settings.sparkle_size));

        let mut rng = SparkleRng::new(seed);
        let palette = Palette::from_settings(&settings, &mut rng);
        let pool = ParticlePool::new(
            usize::from(settings.num_sparkles),
            settings.sparkle_size,
            bounds,
            palette.len(),
            &mut rng,
        );

        Self {
            poller,
            settings,
            bounds,
            pool,
            palette,
            rng,
            frame_buffer: [Rgb::default(); PIXELS],
            last_frame: Instant::from_millis(0),
            cycle_start: Instant::from_millis(0),
            progress: 0,
        }
    }

    /// Process one tick
    ///
    /// Polls for settings (non-blocking), then renders a frame when one
    /// is due. Returns the frame to commit, or `None` when it is not
    /// time yet.
    pub fn tick(&mut self, now: Instant) -> Option<&[Rgb]> {
        if let Some(new) = self.poller.update(now) {
            self.reconcile(new);
        }

        if now.duration_since(self.last_frame) < self.settings.frame_interval {
            return None;
        }

        // Transition bookkeeping. The rollover swaps palette colors and
        // reassigns targets in the same step as the progress reset, so
        // the frame below always sees a consistent pair.
        let cycle_elapsed = now.duration_since(self.cycle_start);
        if cycle_elapsed >= self.settings.transition_time {
            self.palette.advance(&mut self.rng);
            self.pool
                .reassign_targets(self.bounds, self.palette.len(), &mut self.rng);
            self.cycle_start = now;
            self.progress = 0;
        } else {
            self.progress = progress8(cycle_elapsed, self.settings.transition_time);
        }

        self.palette.blend(self.progress);

        let area = self.bounds.area();
        let frame = &mut self.frame_buffer[..area];
        frame.fill(Rgb::default());
        self.pool.paint(frame, self.bounds, &self.palette, self.progress);

        self.last_frame = now;
        Some(&self.frame_buffer[..area])
    }

    /// How long until the next frame is due.
    pub fn time_until_frame(&self, now: Instant) -> Duration {
        let elapsed = now.duration_since(self.last_frame);
        if elapsed >= self.settings.frame_interval {
            Duration::from_millis(0)
        } else {
            self.settings.frame_interval - elapsed
        }
    }

    /// Apply a freshly fetched snapshot onto the live animation state.
    ///
    /// Scalar parameters take effect immediately. A sparkle size change
    /// invalidates all painted geometry and rebuilds the pool wholesale;
    /// a count change resizes it incrementally. An oversized sparkle is
    /// a configuration error: the whole snapshot is discarded and the
    /// previous one stays authoritative.
    fn reconcile(&mut self, new: Settings) {
        if !self.bounds.fits(new.sparkle_size) {
            warn!(
                "settings rejected: sparkle_size {} does not fit {}x{} matrix",
                new.sparkle_size, self.bounds.width, self.bounds.height
            );
            return;
        }

        let mut count = usize::from(new.num_sparkles);
        if count > MAX_SPARKLES {
            warn!("num_sparkles {count} clamped to pool capacity {MAX_SPARKLES}");
            count = MAX_SPARKLES;
        }

        self.palette.reconcile(&new, &mut self.rng);
        let slot_count = self.palette.len();

        if new.sparkle_size != self.pool.sparkle_size() {
            self.pool
                .rebuild(count, new.sparkle_size, self.bounds, slot_count, &mut self.rng);
        } else if count != self.pool.len() {
            self.pool.resize(count, self.bounds, slot_count, &mut self.rng);
        }
        self.pool.clamp_slots(slot_count, &mut self.rng);

        self.settings = new;
    }

    /// Active settings snapshot.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn bounds(&self) -> MatrixBounds {
        self.bounds
    }

    pub fn pool(&self) -> &ParticlePool<MAX_SPARKLES> {
        &self.pool
    }

    pub fn palette(&self) -> &Palette<MAX_SLOTS> {
        &self.palette
    }

    /// Current transition progress (0-255).
    pub fn transition_progress(&self) -> u8 {
        self.progress
    }
}
