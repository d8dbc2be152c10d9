//! Test support utilities for frameseq.
//!
//! Provides mocks, synthetic image builders, and temporary image directories
//! for testing image sequences and the scan pipeline.
//!
//! # Example
//!
//! ```
//! use frameseq_test_support::{ImageDir, MockFrameSource, SyntheticImageBuilder};
//!
//! // Write synthetic images to a temp directory
//! let dir = ImageDir::new()?
//!     .with_image("a.png", &SyntheticImageBuilder::tagged(8, 8, 1))?
//!     .with_image("b.png", &SyntheticImageBuilder::tagged(8, 8, 2))?;
//! assert!(dir.file("a.png").exists());
//!
//! // Or skip the filesystem entirely
//! let source = MockFrameSource::uniform(3, 16, 16);
//! # let _ = source;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod builders;
mod fixtures;
mod mocks;

pub use builders::SyntheticImageBuilder;
pub use fixtures::ImageDir;
pub use mocks::{MockFrameSource, MockGraySink, MockProgressSink, MockRecordOutput};
