//! Frame source port for pull-based sequential acquisition.

use image::{GrayImage, RgbImage};

use crate::domain::{BoundingBox, Intrinsics};

/// Port for a single-consumer, pull-based sequence of frames.
///
/// Frames are borrowed from scratch buffers owned by the source, so a
/// returned reference lives only until the next mutating call.
pub trait FrameSource {
    /// Decodes the next frame.
    ///
    /// Returns `None` once the sequence is exhausted or a frame fails to
    /// decode; the source is closed from then on.
    fn next_frame(&mut self) -> Option<&RgbImage>;

    /// Returns the most recently decoded color frame (empty if none).
    fn current_frame(&self) -> &RgbImage;

    /// Returns the grayscale version of the current frame without advancing.
    fn current_frame_gray(&mut self) -> &GrayImage;

    /// Fraction of the sequence consumed, in `[0, 1]`.
    fn progress(&self) -> f64;

    /// Identifier of the current (or most recent) item.
    fn name(&self) -> &str;

    /// Intrinsics supplied when the source was opened.
    fn intrinsics(&self) -> Intrinsics;

    /// Whether more frames may still be produced.
    fn is_open(&self) -> bool;

    /// Releases buffers and closes the source. Safe to call repeatedly.
    fn close(&mut self);

    /// Total number of items in the sequence.
    fn len(&self) -> usize;

    /// Number of items consumed so far.
    fn position(&self) -> usize;

    /// Returns true if the sequence has no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Path of the current item, if the source is file-backed.
    fn current_path(&self) -> Option<&std::path::Path> {
        None
    }

    /// Annotated regions for the current frame.
    fn bounding_boxes(&self) -> &[BoundingBox] {
        &[]
    }
}
