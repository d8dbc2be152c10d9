//! Grayscale derivation into reusable buffers.

use image::{GrayImage, Pixel, RgbImage};

/// Writes the luminance of `src` into `dst`.
///
/// `dst` is reallocated only when its dimensions differ from `src`.
/// Returns true if a reallocation happened.
pub fn fill_gray(src: &RgbImage, dst: &mut GrayImage) -> bool {
    let resized = dst.dimensions() != src.dimensions();
    if resized {
        *dst = GrayImage::new(src.width(), src.height());
    }
    for (out, px) in dst.pixels_mut().zip(src.pixels()) {
        *out = px.to_luma();
    }
    resized
}

/// Mean intensity of a grayscale frame, 0.0 for an empty frame.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_luma(frame: &GrayImage) -> f32 {
    let count = frame.as_raw().len();
    if count == 0 {
        return 0.0;
    }
    let sum: u64 = frame.as_raw().iter().map(|&v| u64::from(v)).sum();
    (sum as f64 / count as f64) as f32
}
