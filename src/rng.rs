//! Deterministic random source for spawn positions and palette colors.
//!
//! SplitMix64-style mixing, no floats. Seedable so a whole animation run
//! can be reproduced in tests.

use crate::color::{Rgb, rgb_from_u32};

#[derive(Debug, Clone)]
pub struct SparkleRng {
    state: u64,
}

impl SparkleRng {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit draw.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        (z ^ (z >> 31)) as u32
    }

    /// Draw in `[0, bound)`. `bound` must be non-zero.
    #[inline]
    pub fn below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        self.next_u32() % bound
    }

    /// Random 24-bit color.
    pub fn color(&mut self) -> Rgb {
        rgb_from_u32(self.next_u32() & 0x00FF_FFFF)
    }
}
