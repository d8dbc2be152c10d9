//! PNG export of grayscale frames.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use frameseq_core::{GrayImage, GraySink};
use tracing::debug;

/// Writes grayscale frames as `<dir>/<index>_<name>.png`.
///
/// The zero-padded index keeps frames with the same file stem apart and makes
/// the directory list in sequence order.
#[derive(Debug, Clone)]
pub struct PngGraySink {
    dir: PathBuf,
}

impl PngGraySink {
    /// Creates the sink, creating `dir` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create gray output dir: {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl GraySink for PngGraySink {
    fn write_gray(&self, index: usize, name: &str, frame: &GrayImage) -> Result<String> {
        let path = self.dir.join(format!("{index:06}_{name}.png"));
        frame
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Wrote grayscale frame {}", path.display());
        Ok(path.display().to_string())
    }
}
