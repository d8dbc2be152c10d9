//! Filesystem enumeration of image sequences.

use std::path::{Path, PathBuf};

use frameseq_core::OpenError;
use tracing::{debug, warn};

use crate::decode::verify;

/// Supported image extensions (matched case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tif", "tiff", "webp", "gif"];

/// What an image sequence is opened from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceInput {
    /// Every supported image in a directory, in sorted order.
    Directory(PathBuf),
    /// An explicit list of files, in the given order.
    Files(Vec<PathBuf>),
}

impl SourceInput {
    /// Interprets command-line style paths.
    ///
    /// A single existing directory opens in directory mode; anything else is
    /// treated as an explicit file list.
    #[must_use]
    pub fn from_paths(mut paths: Vec<PathBuf>) -> Self {
        if paths.len() == 1 && paths[0].is_dir() {
            Self::Directory(paths.remove(0))
        } else {
            Self::Files(paths)
        }
    }
}

/// An existing directory opens in directory mode; any other path is a
/// one-entry file list.
impl From<PathBuf> for SourceInput {
    fn from(path: PathBuf) -> Self {
        Self::from_paths(vec![path])
    }
}

impl From<&Path> for SourceInput {
    fn from(path: &Path) -> Self {
        Self::from(path.to_path_buf())
    }
}

impl From<Vec<PathBuf>> for SourceInput {
    fn from(files: Vec<PathBuf>) -> Self {
        Self::Files(files)
    }
}

/// Resolves `input` into the ordered list of images to read.
///
/// Every candidate is fully decoded once, so an open source never holds a
/// file that is known to be unreadable. Directory entries that fail to decode
/// are dropped with a warning.
/// Every entry of an explicit list must be readable.
///
/// # Errors
///
/// Returns an [`OpenError`] if nothing readable remains.
pub fn resolve(input: &SourceInput, recursive: bool) -> Result<Vec<PathBuf>, OpenError> {
    match input {
        SourceInput::Directory(dir) => resolve_directory(dir, recursive),
        SourceInput::Files(files) => resolve_files(files),
    }
}

fn resolve_directory(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, OpenError> {
    if !dir.exists() {
        return Err(OpenError::NotFound(dir.to_path_buf()));
    }

    let candidates = list_directory(dir, recursive)?;
    if candidates.is_empty() {
        return Err(OpenError::EmptyDirectory(dir.to_path_buf()));
    }

    let total = candidates.len();
    let mut scratch = Vec::new();
    let readable: Vec<PathBuf> = candidates
        .into_iter()
        .filter(|path| match verify(path, &mut scratch) {
            Ok(_) => true,
            Err(e) => {
                warn!("Skipping unreadable image {}: {e:#}", path.display());
                false
            }
        })
        .collect();

    if readable.is_empty() {
        return Err(OpenError::NoReadableImages(dir.to_path_buf()));
    }
    debug!(
        "Found {} readable images ({} candidates) in {}",
        readable.len(),
        total,
        dir.display()
    );
    Ok(readable)
}

fn resolve_files(files: &[PathBuf]) -> Result<Vec<PathBuf>, OpenError> {
    if files.is_empty() {
        return Err(OpenError::EmptyFileList);
    }

    let mut scratch = Vec::new();
    for path in files {
        if !path.exists() {
            return Err(OpenError::NotFound(path.clone()));
        }
        if let Err(e) = verify(path, &mut scratch) {
            return Err(OpenError::Unreadable {
                path: path.clone(),
                reason: format!("{e:#}"),
            });
        }
    }
    Ok(files.to_vec())
}

/// Lists supported image files in `dir`, sorted lexicographically by path.
///
/// Contents are not inspected. With `recursive`, subdirectories are included
/// and the whole tree is sorted as one list.
///
/// # Errors
///
/// Returns [`OpenError::Io`] if `dir` itself cannot be read. Unreadable
/// subdirectories are skipped with a warning.
pub fn list_directory(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, OpenError> {
    let mut files = Vec::new();
    collect_from_dir(dir, recursive, &mut files).map_err(|source| OpenError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    files.sort();
    Ok(files)
}

fn collect_from_dir(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if path.is_file() && is_supported_image(&path) {
            files.push(path);
        } else if path.is_dir() && recursive {
            if let Err(e) = collect_from_dir(&path, recursive, files) {
                warn!("Failed to read directory {}: {e}", path.display());
            }
        }
    }
    Ok(())
}

/// Checks if a path has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

/// File stem used as the frame identifier.
#[must_use]
pub fn frame_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
