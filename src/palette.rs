//! Shared color slot table.
//!
//! Each slot carries a `current`/`target` pair and the `rendered` blend
//! between them at the frame's transition progress. Particles reference
//! slots by index, so many sparkles can share one animated color.

use heapless::Vec;

use crate::color::{Rgb, blend_colors};
use crate::rng::SparkleRng;
use crate::settings::{MAX_COLORS, Settings};

/// One animated color pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteSlot {
    pub current: Rgb,
    pub target: Rgb,
    pub rendered: Rgb,
}

impl PaletteSlot {
    const fn fixed(color: Rgb) -> Self {
        Self {
            current: color,
            target: color,
            rendered: color,
        }
    }

    fn random(rng: &mut SparkleRng) -> Self {
        let current = rng.color();
        Self {
            current,
            target: rng.color(),
            rendered: current,
        }
    }
}

/// Palette table sized by the active settings snapshot.
///
/// Two modes: random (slots drift between random colors) and fixed
/// (slots rotate through an explicit color list from the server).
#[derive(Debug, Clone)]
pub struct Palette<const MAX_SLOTS: usize> {
    slots: Vec<PaletteSlot, MAX_SLOTS>,
    colors: Vec<Rgb, MAX_COLORS>,
    cursor: usize,
}

impl<const MAX_SLOTS: usize> Palette<MAX_SLOTS> {
    /// Build a palette for a settings snapshot.
    pub fn from_settings(settings: &Settings, rng: &mut SparkleRng) -> Self {
        let mut palette = Self {
            slots: Vec::new(),
            colors: settings.colors.clone(),
            cursor: 0,
        };
        palette.fill(settings.slot_count().min(MAX_SLOTS), rng);
        palette
    }

    /// Number of active slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[PaletteSlot] {
        &self.slots
    }

    /// Rendered color for a particle's slot index.
    ///
    /// Out-of-range indices fall back to the first slot; the pool keeps
    /// indices in range after every reconcile, so this is a guard only.
    pub fn rendered(&self, slot: u8) -> Rgb {
        self.slots
            .get(usize::from(slot))
            .or_else(|| self.slots.first())
            .map_or(Rgb::default(), |s| s.rendered)
    }

    /// Recompute every slot's rendered color at the given progress.
    pub fn blend(&mut self, progress: u8) {
        for slot in &mut self.slots {
            slot.rendered = blend_colors(slot.current, slot.target, progress);
        }
    }

    /// Complete a transition cycle: target becomes current, and a new
    /// target is drawn (random mode) or rotated in (fixed mode).
    pub fn advance(&mut self, rng: &mut SparkleRng) {
        self.cursor = self.cursor.wrapping_add(1);
        let fixed = !self.colors.is_empty();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.current = slot.target;
            slot.target = if fixed {
                self.colors[(i + self.cursor) % self.colors.len()]
            } else {
                rng.color()
            };
            slot.rendered = slot.current;
        }
    }

    /// Apply a new settings snapshot.
    ///
    /// A changed color list rebuilds every slot; otherwise the table
    /// grows or shrinks incrementally to the requested count.
    pub fn reconcile(&mut self, settings: &Settings, rng: &mut SparkleRng) {
        let count = settings.slot_count().min(MAX_SLOTS);
        if settings.colors != self.colors {
            self.colors = settings.colors.clone();
            self.cursor = 0;
            self.slots.clear();
            self.fill(count, rng);
            return;
        }

        if count < self.slots.len() {
            self.slots.truncate(count);
        } else {
            self.fill(count, rng);
        }
    }

    fn fill(&mut self, count: usize, rng: &mut SparkleRng) {
        while self.slots.len() < count {
            let slot = if self.colors.is_empty() {
                PaletteSlot::random(rng)
            } else {
                PaletteSlot::fixed(self.colors[self.slots.len() % self.colors.len()])
            };
            // Count is clamped to MAX_SLOTS above.
            let _ = self.slots.push(slot);
        }
    }
}
