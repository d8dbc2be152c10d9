//! Integration tests for decoding the supported raster formats.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use frameseq_adapters::ImageSequence;
use frameseq_core::{FrameSource, Intrinsics};
use frameseq_test_support::{ImageDir, SyntheticImageBuilder};
use image::Rgb;

fn intrinsics() -> Intrinsics {
    Intrinsics::new(500.0, 500.0, 4.0, 4.0)
}

fn load_single(name: &str, image: &image::DynamicImage) -> (ImageDir, ImageSequence) {
    let dir = ImageDir::new().unwrap().with_image(name, image).unwrap();
    let seq = ImageSequence::open_files([dir.file(name)], intrinsics()).expect("should open");
    (dir, seq)
}

#[test]
fn test_load_png() {
    let (_dir, mut seq) = load_single("test.png", &SyntheticImageBuilder::tagged(8, 8, 42));
    let frame = seq.next_frame().expect("should decode PNG");
    assert_eq!(frame.dimensions(), (8, 8));
    assert_eq!(frame.get_pixel(3, 3), &Rgb([42, 0, 0]));
    assert_eq!(seq.name(), "test");
}

#[test]
fn test_load_jpeg() {
    let (_dir, mut seq) = load_single("test.jpg", &SyntheticImageBuilder::rgb_gradient(8, 8));
    let frame = seq.next_frame().expect("should decode JPEG");
    assert_eq!(frame.dimensions(), (8, 8));
}

#[test]
fn test_load_bmp() {
    let (_dir, mut seq) = load_single("test.bmp", &SyntheticImageBuilder::tagged(8, 6, 9));
    let frame = seq.next_frame().expect("should decode BMP");
    assert_eq!(frame.dimensions(), (8, 6));
    assert_eq!(frame.get_pixel(0, 0), &Rgb([9, 0, 0]));
}

#[test]
fn test_load_tiff() {
    let (_dir, mut seq) = load_single("test.tiff", &SyntheticImageBuilder::tagged(5, 7, 200));
    let frame = seq.next_frame().expect("should decode TIFF");
    assert_eq!(frame.dimensions(), (5, 7));
    assert_eq!(frame.get_pixel(4, 6), &Rgb([200, 0, 0]));
}

// === Color type conversion ===

#[test]
fn test_grayscale_source_becomes_three_channel() {
    let (_dir, mut seq) = load_single("gray.png", &SyntheticImageBuilder::gray_uniform(4, 4, 77));
    let frame = seq.next_frame().unwrap();
    assert_eq!(frame.as_raw().len(), 4 * 4 * 3);
    assert!(frame.pixels().all(|p| p == &Rgb([77, 77, 77])));
}

#[test]
fn test_alpha_channel_dropped() {
    let (_dir, mut seq) = load_single(
        "rgba.png",
        &SyntheticImageBuilder::rgba_uniform(3, 3, [10, 20, 30, 128]),
    );
    let frame = seq.next_frame().unwrap();
    assert_eq!(frame.as_raw().len(), 3 * 3 * 3);
    assert!(frame.pixels().all(|p| p == &Rgb([10, 20, 30])));
}

#[test]
fn test_sixteen_bit_scaled_to_eight() {
    let (_dir, mut seq) = load_single(
        "deep.png",
        &SyntheticImageBuilder::rgb16_uniform(2, 2, [65535, 0, 65535]),
    );
    let frame = seq.next_frame().unwrap();
    assert!(frame.pixels().all(|p| p == &Rgb([255, 0, 255])));
}

#[test]
fn test_converted_frames_reuse_buffer() {
    let dir = ImageDir::new()
        .unwrap()
        .with_image("a.png", &SyntheticImageBuilder::gray_uniform(6, 6, 1))
        .unwrap()
        .with_image("b.png", &SyntheticImageBuilder::gray_uniform(6, 6, 2))
        .unwrap();
    let mut seq = ImageSequence::open_directory(dir.path(), intrinsics()).unwrap();

    let first = seq.next_frame().unwrap().as_raw().as_ptr();
    let second = seq.next_frame().unwrap();
    assert_eq!(second.get_pixel(0, 0), &Rgb([2, 2, 2]));
    assert_eq!(second.as_raw().as_ptr(), first);
    assert_eq!(seq.reallocations(), 1);
}
