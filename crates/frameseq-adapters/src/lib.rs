//! frameseq adapters - filesystem-backed implementations of the core ports.
//!
//! This crate provides:
//! - Directory and file-list enumeration
//! - The `ImageSequence` frame source with in-place decoding
//! - Bounding-box sidecar loading
//! - PNG export of grayscale frames

pub mod bbox;
pub mod decode;
pub mod fs;
pub mod gray_png;
pub mod sequence;

pub use fs::{is_supported_image, list_directory, SourceInput, IMAGE_EXTENSIONS};
pub use gray_png::PngGraySink;
pub use sequence::{ImageSequence, SequenceOptions};
