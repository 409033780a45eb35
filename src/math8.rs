use embassy_time::Duration;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Linearly interpolate between two 8-bit values
///
/// `amount_of_b` is the interpolation progress (0 = all `a`, 255 = all `b`).
/// Truncating (floor) semantics: the result never overshoots either
/// endpoint and is exact at 0 and 255.
#[inline]
#[allow(
    clippy::cast_lossless,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
pub const fn lerp8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i32 - a as i32;
    (a as i32 + (delta * amount_of_b as i32) / 255) as u8
}

/// Linearly interpolate between two signed coordinates
///
/// Same contract as [`lerp8`], generalized for matrix positions.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn lerp_coord(a: i16, b: i16, amount_of_b: u8) -> i16 {
    let delta = b as i32 - a as i32;
    (a as i32 + (delta * amount_of_b as i32) / 255) as i16
}

/// Calculate progress (0-255) based on elapsed time and duration
#[allow(clippy::cast_possible_truncation)]
#[inline]
pub const fn progress8(elapsed: Duration, duration: Duration) -> u8 {
    if duration.as_millis() == 0 {
        return 0;
    }
    if elapsed.as_millis() >= duration.as_millis() {
        return 255;
    }

    ((elapsed.as_millis() * 255) / duration.as_millis()) as u8
}
