//! Per-frame records and region annotations.

use serde::{Deserialize, Serialize};

use super::Intrinsics;

/// Axis-aligned region in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl BoundingBox {
    /// Builds a box from its corner coordinates.
    #[must_use]
    pub fn from_corners(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }
}

/// Summary of one frame pulled from a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Zero-based position in the sequence.
    pub index: usize,
    /// Identifier of the source item (file stem).
    pub name: String,
    /// Source path, when the frame came from a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Fraction of the sequence consumed after this frame.
    pub progress: f64,
    /// Mean grayscale intensity (0-255).
    pub mean_luma: f32,
    /// Intrinsics of the capture session.
    pub intrinsics: Intrinsics,
    /// Annotated regions for this frame.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounding_boxes: Vec<BoundingBox>,
    /// Where the grayscale frame was written, if exported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gray_path: Option<String>,
}
