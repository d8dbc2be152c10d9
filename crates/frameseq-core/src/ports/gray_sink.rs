//! Grayscale frame export port.

use image::GrayImage;

/// Port for persisting grayscale frames.
pub trait GraySink {
    /// Stores `frame`, the `index`-th frame of the sequence, named `name`,
    /// and returns where it went.
    ///
    /// Names are not unique across a file list; `index` is.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be stored.
    fn write_gray(&self, index: usize, name: &str, frame: &GrayImage) -> anyhow::Result<String>;
}
