use crate::math8::lerp_coord;
use crate::rng::SparkleRng;

/// Dimensions of the rendering area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixBounds {
    pub width: u16,
    pub height: u16,
}

/// A pixel coordinate on the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    /// Interpolate between two points by progress (0-255).
    pub const fn lerp(self, target: Point, amount: u8) -> Point {
        Point {
            x: lerp_coord(self.x, target.x, amount),
            y: lerp_coord(self.y, target.y, amount),
        }
    }
}

impl MatrixBounds {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Get the number of pixels in the rendering area
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check whether a sparkle of the given size has room to spawn.
    pub const fn fits(self, size: u8) -> bool {
        let min_dim = if self.width < self.height {
            self.width
        } else {
            self.height
        };
        size >= 1 && (size as u16) < min_dim
    }

    /// Draw a random spawn point for a sparkle of the given size.
    ///
    /// Coordinates land in `[0, width - size)` x `[0, height - size)`,
    /// so the full size x size block stays on the matrix.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn random_point(self, size: u8, rng: &mut SparkleRng) -> Point {
        debug_assert!(self.fits(size));
        let max_x = u32::from(self.width) - u32::from(size);
        let max_y = u32::from(self.height) - u32::from(size);
        Point {
            x: rng.below(max_x) as i16,
            y: rng.below(max_y) as i16,
        }
    }
}
