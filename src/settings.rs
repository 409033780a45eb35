//! Remote settings snapshot.
//!
//! The wire format is a flat JSON object served over HTTP. Unknown keys
//! are ignored and missing keys fall back to documented defaults, so the
//! server can publish a sparse document. A snapshot is validated once on
//! construction and then treated as immutable; reconciliation replaces it
//! wholesale.

use embassy_time::Duration;
use heapless::Vec;
use serde::Deserialize;

use crate::color::{Rgb, rgb_from_u32};

/// Capacity of the explicit palette color list.
pub const MAX_COLORS: usize = 16;

const DEFAULT_NUM_SPARKLES: i32 = 10;
const DEFAULT_SPARKLE_SIZE: i32 = 1;
const DEFAULT_NUM_PALETTES: i32 = 4;
const DEFAULT_SPEED_MS: i32 = 10;
const DEFAULT_TRANSITION_SECS: f32 = 2.0;

/// Why a proposed settings document was rejected.
///
/// `Malformed` is a parse failure; every other variant is a
/// configuration error (a recognized value out of its valid range).
/// Either way the previous snapshot stays authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    /// Response body was not valid JSON for the recognized schema.
    Malformed,
    /// `num_sparkles` zero, negative, or absurdly large.
    SparkleCountOutOfRange,
    /// `frame_rate` zero or negative.
    FrameRateOutOfRange,
    /// `speed` zero or negative.
    UpdateRateOutOfRange,
    /// `transition_time` zero, negative, or not finite.
    TransitionOutOfRange,
    /// `sparkle_size` zero, negative, or over 255 pixels.
    SparkleSizeOutOfRange,
    /// Neither a positive `num_palettes` nor a non-empty `colors` list.
    EmptyPalette,
}

/// Wire mirror of the settings document. Missing keys stay `None`.
#[derive(Debug, Deserialize)]
struct RawSettings {
    num_sparkles: Option<i32>,
    frame_rate: Option<f32>,
    transition_time: Option<f32>,
    sparkle_size: Option<i32>,
    num_palettes: Option<i32>,
    colors: Option<Vec<u32, MAX_COLORS>>,
    speed: Option<i32>,
}

/// Validated, immutable settings snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Particle count.
    pub num_sparkles: u16,
    /// Time between rendered frames.
    pub frame_interval: Duration,
    /// Length of one color transition cycle.
    pub transition_time: Duration,
    /// Edge length of one sparkle, in pixels.
    pub sparkle_size: u8,
    /// Palette slot count when no explicit color list is given.
    pub num_palettes: u8,
    /// Explicit palette colors; empty means random palette mode.
    pub colors: Vec<Rgb, MAX_COLORS>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            num_sparkles: DEFAULT_NUM_SPARKLES as u16,
            frame_interval: Duration::from_millis(DEFAULT_SPEED_MS as u64),
            transition_time: Duration::from_secs(2),
            sparkle_size: DEFAULT_SPARKLE_SIZE as u8,
            num_palettes: DEFAULT_NUM_PALETTES as u8,
            colors: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse and validate a settings document.
    pub fn from_json(body: &[u8]) -> Result<Self, SettingsError> {
        let (raw, _) = serde_json_core::from_slice::<RawSettings>(body)
            .map_err(|_| SettingsError::Malformed)?;
        Self::try_from_raw(&raw)
    }

    /// Number of palette slots this snapshot asks for.
    pub fn slot_count(&self) -> usize {
        if self.colors.is_empty() {
            usize::from(self.num_palettes)
        } else {
            self.colors.len()
        }
    }

    #[allow(
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss
    )]
    fn try_from_raw(raw: &RawSettings) -> Result<Self, SettingsError> {
        let num_sparkles = raw.num_sparkles.unwrap_or(DEFAULT_NUM_SPARKLES);
        if num_sparkles <= 0 || num_sparkles > i32::from(u16::MAX) {
            return Err(SettingsError::SparkleCountOutOfRange);
        }

        let frame_interval = match raw.frame_rate {
            Some(hz) => {
                if hz <= 0.0 || !hz.is_finite() {
                    return Err(SettingsError::FrameRateOutOfRange);
                }
                let millis = libm::roundf(1000.0 / hz) as u64;
                Duration::from_millis(millis.max(1))
            }
            None => {
                // Simpler-variant pacing: milliseconds between updates.
                let speed = raw.speed.unwrap_or(DEFAULT_SPEED_MS);
                if speed <= 0 {
                    return Err(SettingsError::UpdateRateOutOfRange);
                }
                Duration::from_millis(speed as u64)
            }
        };

        let transition_time = match raw.transition_time {
            Some(secs) => {
                if secs <= 0.0 || !secs.is_finite() {
                    return Err(SettingsError::TransitionOutOfRange);
                }
                Duration::from_millis(libm::roundf(secs * 1000.0) as u64)
            }
            None => Duration::from_millis(
                libm::roundf(DEFAULT_TRANSITION_SECS * 1000.0) as u64,
            ),
        };

        let sparkle_size = raw.sparkle_size.unwrap_or(DEFAULT_SPARKLE_SIZE);
        if sparkle_size <= 0 || sparkle_size > i32::from(u8::MAX) {
            return Err(SettingsError::SparkleSizeOutOfRange);
        }

        let mut colors: Vec<Rgb, MAX_COLORS> = Vec::new();
        if let Some(raw_colors) = &raw.colors {
            if raw_colors.is_empty() {
                return Err(SettingsError::EmptyPalette);
            }
            for &value in raw_colors {
                // Capacity matches MAX_COLORS on both sides.
                let _ = colors.push(rgb_from_u32(value & 0x00FF_FFFF));
            }
        }

        let num_palettes = raw.num_palettes.unwrap_or(DEFAULT_NUM_PALETTES);
        if colors.is_empty() && (num_palettes <= 0 || num_palettes > i32::from(u8::MAX)) {
            return Err(SettingsError::EmptyPalette);
        }

        Ok(Self {
            num_sparkles: num_sparkles as u16,
            frame_interval,
            transition_time,
            sparkle_size: sparkle_size as u8,
            num_palettes: num_palettes.clamp(0, i32::from(u8::MAX)) as u8,
            colors,
        })
    }
}
