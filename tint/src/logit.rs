//! Logit-domain channel transform.
//!
//! A channel value `v` is shifted by one and scaled by 257 so the logit never
//! sees exactly 0 or 1, multiplied by the color weight, then pushed back
//! through the logistic function.

const SCALE: f64 = 257.0;

/// Output of every channel whose weight is 0: `floor(1 + 257 / 2)`.
pub const ZERO_WEIGHT_VALUE: u8 = 129;

/// Maps an 8-bit channel value into the logit domain.
pub fn normalize(v: u8) -> f64 {
    let p = (1.0 + v as f64) / SCALE;
    -(1.0 / p - 1.0).ln()
}

/// Maps a logit-domain value back to an 8-bit channel.
///
/// The raw result lies in `(1, 258)`; it is floored and then clamped to
/// `[0, 255]` instead of wrapping.
pub fn denormalize(x: f64) -> u8 {
    let raw = 1.0 + 1.0 / ((-x).exp() + 1.0) * SCALE;
    raw.floor().clamp(0.0, 255.0) as u8
}

pub fn transform_channel(v: u8, weight: f64) -> u8 {
    denormalize(normalize(v) * weight)
}
