//! List command - print the ordered images a sequence would read.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use frameseq_adapters::{fs, SourceInput};
use tracing::info;

use crate::config::AppConfig;

/// Arguments for the list command.
#[derive(Args, Clone)]
pub struct ListArgs {
    /// Directory, or image files in reading order
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,
}

/// Run the list command.
///
/// Unreadable directory entries are dropped exactly as when scanning, so the
/// printed list is the frame order a scan would produce.
pub fn run(args: &ListArgs, config: &AppConfig) -> Result<()> {
    let recursive = args.recursive || config.general.recursive.unwrap_or(false);
    let input = SourceInput::from_paths(args.paths.clone());

    let paths = fs::resolve(&input, recursive).context("Cannot list image sequence")?;
    info!("Listing {} images", paths.len());

    let mut stdout = io::stdout().lock();
    for path in &paths {
        writeln!(stdout, "{}", path.display())?;
    }
    stdout.flush()?;

    Ok(())
}
