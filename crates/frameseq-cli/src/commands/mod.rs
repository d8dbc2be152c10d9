//! CLI command definitions and handlers.

pub mod list;
pub mod scan;

use clap::{Parser, Subcommand};

/// frameseq - Sequential image reader for camera pipelines
#[derive(Parser)]
#[command(name = "frameseq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared scan arguments (paths, intrinsics, flags).
    #[command(flatten)]
    pub scan: scan::ScanArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Read every frame and emit one record per frame
    Scan(scan::ScanArgs),
    /// Print the images a sequence would read, in order
    List(list::ListArgs),
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every frame was read.
    Success = 0,
    /// Iteration stopped before the end of the sequence.
    Incomplete = 1,
    /// The source could not be opened, or another error occurred.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
