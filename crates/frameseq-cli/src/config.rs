//! Configuration file support for frameseq.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/frameseq/config.toml` (lowest priority)
//! - Project-local: `.frameseq.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use frameseq_core::Intrinsics;
use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Camera intrinsics attached to every sequence.
    pub intrinsics: IntrinsicsConfig,
    /// Source enumeration settings.
    pub source: SourceConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Camera intrinsics configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct IntrinsicsConfig {
    /// Focal length along x, in pixels.
    pub fx: Option<f32>,
    /// Focal length along y, in pixels.
    pub fy: Option<f32>,
    /// Principal point x, in pixels.
    pub cx: Option<f32>,
    /// Principal point y, in pixels.
    pub cy: Option<f32>,
}

/// Source configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory of bounding-box sidecar files.
    pub bbox_dir: Option<PathBuf>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
    /// Directory for grayscale frame export.
    pub gray_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/frameseq/config.toml`
    /// 2. Project-local: `.frameseq.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        let k = &self.intrinsics;
        for (key, value) in [("fx", k.fx), ("fy", k.fy), ("cx", k.cx), ("cy", k.cy)] {
            if let Some(v) = value {
                if !Intrinsics::is_plausible_value(v) {
                    return Err(format!("intrinsics.{key} must be non-negative, got {v}"));
                }
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        self.intrinsics.fx = other.intrinsics.fx.or(self.intrinsics.fx);
        self.intrinsics.fy = other.intrinsics.fy.or(self.intrinsics.fy);
        self.intrinsics.cx = other.intrinsics.cx.or(self.intrinsics.cx);
        self.intrinsics.cy = other.intrinsics.cy.or(self.intrinsics.cy);

        self.source.bbox_dir = other.source.bbox_dir.or_else(|| self.source.bbox_dir.take());

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
        self.output.gray_dir = other.output.gray_dir.or_else(|| self.output.gray_dir.take());
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("frameseq").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.frameseq.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".frameseq.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
