//! Synthetic image builders for testing.

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba, RgbaImage};

/// Builder for creating synthetic test images.
///
/// Every image is deterministic so tests can assert exact pixel values after
/// a lossless round trip through the filesystem.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    // === Color Images ===

    /// Creates a uniform RGB image.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([r, g, b])))
    }

    /// Creates an RGB image whose red channel encodes `tag` in every pixel.
    ///
    /// Useful for checking which file a frame was decoded from.
    #[must_use]
    pub fn tagged(width: u32, height: u32, tag: u8) -> DynamicImage {
        Self::rgb_uniform(width, height, tag, 0, 0)
    }

    /// Creates an RGB checkerboard alternating two colors.
    #[must_use]
    pub fn color_checkerboard(width: u32, height: u32, cell_size: u32) -> DynamicImage {
        let cell = cell_size.max(1);
        let img = RgbImage::from_fn(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                Rgb([255, 64, 0])
            } else {
                Rgb([0, 64, 255])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    /// Creates a smooth horizontal RGB gradient.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rgb_gradient(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let r = ((u32::from(u8::MAX) * x) / width.max(1)) as u8;
            let g = ((u32::from(u8::MAX) * y) / height.max(1)) as u8;
            Rgb([r, g, 128])
        });
        DynamicImage::ImageRgb8(img)
    }

    // === Other Color Types ===

    /// Creates a single-channel checkerboard.
    #[must_use]
    pub fn gray_checkerboard(width: u32, height: u32, cell_size: u32) -> DynamicImage {
        let cell = cell_size.max(1);
        let img = GrayImage::from_fn(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        DynamicImage::ImageLuma8(img)
    }

    /// Creates a uniform single-channel image.
    #[must_use]
    pub fn gray_uniform(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])))
    }

    /// Creates a uniform RGBA image.
    #[must_use]
    pub fn rgba_uniform(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    /// Creates a uniform 16-bit RGB image.
    #[must_use]
    pub fn rgb16_uniform(width: u32, height: u32, rgb: [u16; 3]) -> DynamicImage {
        let img: ImageBuffer<Rgb<u16>, Vec<u16>> = ImageBuffer::from_pixel(width, height, Rgb(rgb));
        DynamicImage::ImageRgb16(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    #[test]
    fn test_tagged_encodes_red_channel() {
        let img = SyntheticImageBuilder::tagged(4, 3, 7);
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.to_rgb8().get_pixel(2, 1), &Rgb([7, 0, 0]));
    }

    #[test]
    fn test_color_types() {
        assert!(matches!(
            SyntheticImageBuilder::gray_uniform(2, 2, 9),
            DynamicImage::ImageLuma8(_)
        ));
        assert!(matches!(
            SyntheticImageBuilder::rgba_uniform(2, 2, [1, 2, 3, 4]),
            DynamicImage::ImageRgba8(_)
        ));
        assert!(matches!(
            SyntheticImageBuilder::rgb16_uniform(2, 2, [0, 0, 0]),
            DynamicImage::ImageRgb16(_)
        ));
    }
}
