//! Errors raised while opening an image sequence.

use std::path::PathBuf;

/// Failure to open an image sequence.
///
/// Raised once at construction. A source that failed to open cannot be
/// retried; build a new one.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    /// The directory or file does not exist.
    #[error("failed to open a directory or an image: {} does not exist", .0.display())]
    NotFound(PathBuf),

    /// The directory contains no files with a supported image extension.
    #[error("failed to open a directory or an image: no image files in {}", .0.display())]
    EmptyDirectory(PathBuf),

    /// Image files were found but none of them could be read.
    #[error("failed to open a directory or an image: no readable images in {}", .0.display())]
    NoReadableImages(PathBuf),

    /// An explicit file list was given with no entries.
    #[error("failed to open a directory or an image: file list is empty")]
    EmptyFileList,

    /// An entry of an explicit file list cannot be read as an image.
    #[error("failed to open a directory or an image: cannot read {}: {reason}", .path.display())]
    Unreadable {
        /// Offending file.
        path: PathBuf,
        /// Decoder or I/O message.
        reason: String,
    },

    /// Directory enumeration failed.
    #[error("failed to open a directory or an image: cannot list {}", .path.display())]
    Io {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
