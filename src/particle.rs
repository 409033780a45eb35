//! Particle pool.
//!
//! Owns every live sparkle. Growth appends freshly spawned particles and
//! shrinkage truncates from the end, so surviving particles keep their
//! identity and position across a resize. A sparkle-size change instead
//! rebuilds the whole pool, because every particle's painted geometry is
//! invalidated at once.

use heapless::Vec;

use crate::bounds::{MatrixBounds, Point};
use crate::color::Rgb;
use crate::palette::Palette;
use crate::rng::SparkleRng;

/// One independently animated point-light element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Particle {
    pub current: Point,
    pub target: Point,
    pub color_slot: u8,
}

impl Particle {
    fn spawn(
        bounds: MatrixBounds,
        size: u8,
        slot_count: usize,
        rng: &mut SparkleRng,
    ) -> Self {
        Self {
            current: bounds.random_point(size, rng),
            target: bounds.random_point(size, rng),
            color_slot: random_slot(slot_count, rng),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn random_slot(slot_count: usize, rng: &mut SparkleRng) -> u8 {
    if slot_count <= 1 {
        0
    } else {
        rng.below(slot_count as u32) as u8
    }
}

/// Dynamically resizable collection of particle state.
#[derive(Debug, Clone)]
pub struct ParticlePool<const MAX_SPARKLES: usize> {
    particles: Vec<Particle, MAX_SPARKLES>,
    sparkle_size: u8,
}

impl<const MAX_SPARKLES: usize> ParticlePool<MAX_SPARKLES> {
    pub fn new(
        count: usize,
        sparkle_size: u8,
        bounds: MatrixBounds,
        slot_count: usize,
        rng: &mut SparkleRng,
    ) -> Self {
        let mut pool = Self {
            particles: Vec::new(),
            sparkle_size,
        };
        pool.resize(count, bounds, slot_count, rng);
        pool
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub const fn sparkle_size(&self) -> u8 {
        self.sparkle_size
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Grow or shrink to `count`.
    ///
    /// Runs in time bounded by the delta; untouched particles are not
    /// reordered or respawned.
    pub fn resize(
        &mut self,
        count: usize,
        bounds: MatrixBounds,
        slot_count: usize,
        rng: &mut SparkleRng,
    ) {
        let count = count.min(MAX_SPARKLES);
        if count < self.particles.len() {
            self.particles.truncate(count);
            return;
        }
        while self.particles.len() < count {
            let particle = Particle::spawn(bounds, self.sparkle_size, slot_count, rng);
            // Count is clamped to MAX_SPARKLES above.
            let _ = self.particles.push(particle);
        }
    }

    /// Replace every particle for a new sparkle size.
    ///
    /// Unlike [`resize`](Self::resize) this touches the whole pool: old
    /// visual geometry is invalid, so nothing is reused.
    pub fn rebuild(
        &mut self,
        count: usize,
        sparkle_size: u8,
        bounds: MatrixBounds,
        slot_count: usize,
        rng: &mut SparkleRng,
    ) {
        self.sparkle_size = sparkle_size;
        self.particles.clear();
        self.resize(count, bounds, slot_count, rng);
    }

    /// Complete a transition cycle: each particle arrives at its target
    /// and a fresh random destination and color slot are drawn.
    pub fn reassign_targets(
        &mut self,
        bounds: MatrixBounds,
        slot_count: usize,
        rng: &mut SparkleRng,
    ) {
        for particle in &mut self.particles {
            particle.current = particle.target;
            particle.target = bounds.random_point(self.sparkle_size, rng);
            particle.color_slot = random_slot(slot_count, rng);
        }
    }

    /// Re-draw color slots that fell out of range after a palette shrink.
    pub fn clamp_slots(&mut self, slot_count: usize, rng: &mut SparkleRng) {
        for particle in &mut self.particles {
            if usize::from(particle.color_slot) >= slot_count {
                particle.color_slot = random_slot(slot_count, rng);
            }
        }
    }

    /// Paint every particle into the frame at the given progress.
    ///
    /// Positions are the lerp of current toward target; each particle
    /// fills a sparkle_size x sparkle_size block with its slot's
    /// rendered color. `frame` must cover `bounds.area()` pixels.
    #[allow(clippy::cast_sign_loss)]
    pub fn paint<const MAX_SLOTS: usize>(
        &self,
        frame: &mut [Rgb],
        bounds: MatrixBounds,
        palette: &Palette<MAX_SLOTS>,
        progress: u8,
    ) {
        let width = usize::from(bounds.width);
        let size = usize::from(self.sparkle_size);
        for particle in &self.particles {
            let pos = particle.current.lerp(particle.target, progress);
            let color = palette.rendered(particle.color_slot);
            let (x, y) = (pos.x as usize, pos.y as usize);
            for row in frame[y * width..]
                .chunks_mut(width)
                .take(size)
            {
                for pixel in &mut row[x..x + size] {
                    *pixel = color;
                }
            }
        }
    }
}
