//! Decoding into reusable RGB buffers.

use std::path::Path;

use anyhow::{Context, Result};
use image::{ColorType, DynamicImage, ImageDecoder, Rgb, RgbImage};

/// Decodes `path` into `buffer` as 8-bit RGB.
///
/// The buffer is reallocated only when the image dimensions differ from the
/// buffer's. 8-bit RGB sources are decoded straight into it. Gray, alpha and
/// 16-bit sources are decoded into `scratch` and expanded in place, so a
/// batch of same-size images allocates nothing after the first frame.
///
/// Returns true if the buffer was reallocated.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn decode_rgb_into(path: &Path, buffer: &mut RgbImage, scratch: &mut Vec<u8>) -> Result<bool> {
    let decoder = open_decoder(path)?;
    let (width, height) = decoder.dimensions();
    let color = decoder.color_type();

    if color == ColorType::Rgb8 {
        let resized = ensure_size(buffer, width, height);
        decoder
            .read_image(buffer)
            .with_context(|| format!("Failed to decode image: {}", path.display()))?;
        return Ok(resized);
    }

    if !expandable(color) {
        let rgb = DynamicImage::from_decoder(decoder)
            .with_context(|| format!("Failed to decode image: {}", path.display()))?
            .into_rgb8();
        if buffer.dimensions() == rgb.dimensions() {
            buffer.copy_from_slice(rgb.as_raw());
            return Ok(false);
        }
        *buffer = rgb;
        return Ok(true);
    }

    read_raw(decoder, scratch, path)?;
    let resized = ensure_size(buffer, width, height);
    expand(color, scratch, buffer);
    Ok(resized)
}

/// Fully decodes `path` in its native pixel format, discarding the pixels.
///
/// Returns the image dimensions.
///
/// # Errors
///
/// Returns an error if any part of the file cannot be decoded.
pub fn verify(path: &Path, scratch: &mut Vec<u8>) -> Result<(u32, u32)> {
    let decoder = open_decoder(path)?;
    let dimensions = decoder.dimensions();
    read_raw(decoder, scratch, path)?;
    Ok(dimensions)
}

fn open_decoder(path: &Path) -> Result<impl ImageDecoder> {
    image::ImageReader::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read image: {}", path.display()))?
        .into_decoder()
        .with_context(|| format!("Unsupported image: {}", path.display()))
}

/// Reads raw pixel bytes into `scratch`, growing it only when needed.
fn read_raw(decoder: impl ImageDecoder, scratch: &mut Vec<u8>, path: &Path) -> Result<()> {
    let len = usize::try_from(decoder.total_bytes())
        .with_context(|| format!("Image too large: {}", path.display()))?;
    scratch.resize(len, 0);
    decoder
        .read_image(scratch)
        .with_context(|| format!("Failed to decode image: {}", path.display()))
}

/// Integer color types that `expand` converts without an intermediate image.
fn expandable(color: ColorType) -> bool {
    matches!(
        color,
        ColorType::L8
            | ColorType::La8
            | ColorType::Rgba8
            | ColorType::L16
            | ColorType::La16
            | ColorType::Rgb16
            | ColorType::Rgba16
    )
}

/// Writes raw `color` pixels into `dst` as 8-bit RGB. Alpha is dropped and
/// gray is replicated across channels.
fn expand(color: ColorType, raw: &[u8], dst: &mut RgbImage) {
    let channels = usize::from(color.channel_count());
    let gray = channels < 3;

    if color.bytes_per_pixel() == color.channel_count() {
        for (px, c) in dst.pixels_mut().zip(raw.chunks_exact(channels)) {
            *px = if gray { Rgb([c[0]; 3]) } else { Rgb([c[0], c[1], c[2]]) };
        }
        return;
    }

    for (px, c) in dst.pixels_mut().zip(raw.chunks_exact(channels * 2)) {
        let ch = |i: usize| narrow(u16::from_ne_bytes([c[2 * i], c[2 * i + 1]]));
        *px = if gray {
            Rgb([ch(0); 3])
        } else {
            Rgb([ch(0), ch(1), ch(2)])
        };
    }
}

/// Scales a 16-bit sample to 8 bits with rounding.
fn narrow(v: u16) -> u8 {
    u8::try_from((u32::from(v) + 128) / 257).unwrap_or(u8::MAX)
}

/// Resizes `buffer` to `width` x `height` if needed. Returns true on reallocation.
fn ensure_size(buffer: &mut RgbImage, width: u32, height: u32) -> bool {
    if buffer.dimensions() == (width, height) {
        return false;
    }
    *buffer = RgbImage::new(width, height);
    true
}
