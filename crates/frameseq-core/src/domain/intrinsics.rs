//! Camera intrinsics attached to a capture session.

use serde::{Deserialize, Serialize};

/// Pinhole camera intrinsics (focal lengths and principal point, in pixels).
///
/// Values are carried verbatim from the caller; nothing here estimates them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intrinsics {
    /// Focal length along x.
    pub fx: f32,
    /// Focal length along y.
    pub fy: f32,
    /// Principal point x.
    pub cx: f32,
    /// Principal point y.
    pub cy: f32,
}

impl Intrinsics {
    /// Creates intrinsics from the four calibration parameters.
    #[must_use]
    pub const fn new(fx: f32, fy: f32, cx: f32, cy: f32) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Returns true if every parameter is finite and non-negative.
    #[must_use]
    pub fn is_plausible(&self) -> bool {
        [self.fx, self.fy, self.cx, self.cy]
            .into_iter()
            .all(Self::is_plausible_value)
    }

    /// Returns true if `v` is usable as a single parameter: finite and non-negative.
    #[must_use]
    pub fn is_plausible_value(v: f32) -> bool {
        v.is_finite() && v >= 0.0
    }
}
