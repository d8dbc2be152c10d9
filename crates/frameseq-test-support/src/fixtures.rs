//! Temporary image directories.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::DynamicImage;
use tempfile::TempDir;

/// A temporary directory populated with image files.
///
/// The directory and everything in it is removed on drop.
pub struct ImageDir {
    dir: TempDir,
}

impl ImageDir {
    /// Creates an empty temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("Failed to create temp dir")?;
        Ok(Self { dir })
    }

    /// Saves `image` as `name`; the format follows the extension.
    ///
    /// Parent directories inside the fixture are created as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn with_image(self, name: &str, image: &DynamicImage) -> Result<Self> {
        let path = self.prepare(name)?;
        image
            .save(&path)
            .with_context(|| format!("Failed to save fixture {}", path.display()))?;
        Ok(self)
    }

    /// Writes raw bytes as `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn with_bytes(self, name: &str, bytes: &[u8]) -> Result<Self> {
        let path = self.prepare(name)?;
        fs::write(&path, bytes)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(self)
    }

    /// Root of the fixture directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a file inside the fixture.
    #[must_use]
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn prepare(&self, name: &str) -> Result<PathBuf> {
        let path = self.file(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        Ok(path)
    }
}
