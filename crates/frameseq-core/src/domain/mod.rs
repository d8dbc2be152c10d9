//! Core domain types for sequential image sources.

mod error;
mod intrinsics;
mod record;

pub use error::OpenError;
pub use intrinsics::Intrinsics;
pub use record::{BoundingBox, FrameRecord};
