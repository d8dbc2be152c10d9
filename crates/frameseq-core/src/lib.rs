//! frameseq core - domain types and ports for sequential image sources.
//!
//! This crate holds the intrinsics and error types, the `FrameSource` port
//! implemented by file-backed sequences, grayscale derivation, and the scan
//! driver that turns a source into per-frame records.

pub mod domain;
pub mod gray;
pub mod ports;
pub mod scan;

pub use domain::{BoundingBox, FrameRecord, Intrinsics, OpenError};
pub use ports::{
    FrameSource, GraySink, NoProgress, ProgressEvent, ProgressSink, RecordOutput,
};
pub use scan::{scan, ScanSummary};

// Frames are plain `image` buffers.
pub use image::{GrayImage, RgbImage};
