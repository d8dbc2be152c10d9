//! Scan command - read a sequence and emit one record per frame.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use frameseq_adapters::{ImageSequence, PngGraySink, SequenceOptions, SourceInput};
use frameseq_core::{GraySink, Intrinsics};
use tracing::{debug, info};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Output format for records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Hardcoded default intrinsics, for a 640x480 sensor.
mod defaults {
    pub const FX: f32 = 500.0;
    pub const FY: f32 = 500.0;
    pub const CX: f32 = 320.0;
    pub const CY: f32 = 240.0;
}

/// Parse and validate an intrinsic parameter (finite, non-negative).
fn parse_intrinsic(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if Intrinsics::is_plausible_value(value) {
        Ok(value)
    } else {
        Err(format!("{value} is not a non-negative number"))
    }
}

/// Shared arguments for reading a sequence.
#[derive(Args, Clone)]
pub struct ScanArgs {
    /// Directory, or image files in reading order
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Focal length along x, in pixels
    #[arg(long, value_parser = parse_intrinsic)]
    pub fx: Option<f32>,

    /// Focal length along y, in pixels
    #[arg(long, value_parser = parse_intrinsic)]
    pub fy: Option<f32>,

    /// Principal point x, in pixels
    #[arg(long, value_parser = parse_intrinsic)]
    pub cx: Option<f32>,

    /// Principal point y, in pixels
    #[arg(long, value_parser = parse_intrinsic)]
    pub cy: Option<f32>,

    /// Directory holding `<name>.txt` bounding-box sidecars
    #[arg(long, value_name = "DIR")]
    pub bbox_dir: Option<PathBuf>,

    /// Write each grayscale frame as `<DIR>/<name>.png`
    #[arg(long, value_name = "DIR")]
    pub gray_dir: Option<PathBuf>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,
}

impl ScanArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        args.fx = args.fx.or(config.intrinsics.fx);
        args.fy = args.fy.or(config.intrinsics.fy);
        args.cx = args.cx.or(config.intrinsics.cx);
        args.cy = args.cy.or(config.intrinsics.cy);

        if args.bbox_dir.is_none() {
            args.bbox_dir.clone_from(&config.source.bbox_dir);
        }
        if args.gray_dir.is_none() {
            args.gray_dir.clone_from(&config.output.gray_dir);
        }

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Intrinsics with per-field fallback to hardcoded defaults.
    fn intrinsics(&self) -> Intrinsics {
        Intrinsics::new(
            self.fx.unwrap_or(defaults::FX),
            self.fy.unwrap_or(defaults::FY),
            self.cx.unwrap_or(defaults::CX),
            self.cy.unwrap_or(defaults::CY),
        )
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }
}

/// Result of running the scan command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct ScanResult {
    /// Frames read.
    pub frames: usize,
    /// Frames in the sequence.
    pub total: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the scan command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &ScanArgs) -> Result<ScanResult> {
    info!("Running scan command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let intrinsics = args.intrinsics();
    debug!(
        "Intrinsics fx={} fy={} cx={} cy={}",
        intrinsics.fx, intrinsics.fy, intrinsics.cx, intrinsics.cy
    );

    let options = SequenceOptions {
        recursive: args.recursive,
        bbox_dir: args.bbox_dir.clone(),
    };
    let input = SourceInput::from_paths(args.paths.clone());
    let mut source = ImageSequence::open_with_options(input, intrinsics, &options)
        .context("Cannot open image sequence")?;

    let gray_sink = args.gray_dir.clone().map(PngGraySink::new).transpose()?;

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(args.quiet, show_progress);

    let output = match args.format() {
        OutputFormat::Jsonl => JsonOutput::stdout(),
        OutputFormat::Json => JsonOutput::stdout_array(args.pretty),
    };

    let summary = frameseq_core::scan(
        &mut source,
        &output,
        &progress_bar,
        gray_sink.as_ref().map(|sink| sink as &dyn GraySink),
    )?;

    let exit_code = if summary.is_complete() {
        ExitCode::Success
    } else {
        ExitCode::Incomplete
    };

    Ok(ScanResult {
        frames: summary.frames,
        total: summary.total,
        exit_code,
    })
}
