//! Progress bar adapter using indicatif.

use frameseq_core::{ProgressEvent, ProgressSink};
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress bar adapter for CLI output.
pub struct ProgressBar {
    bar: Option<IndicatifBar>,
    quiet: bool,
}

impl ProgressBar {
    /// Creates a new progress bar.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, suppress all output
    /// * `show_bar` - If true, show progress bar; otherwise only report early stops
    #[must_use]
    pub fn new(quiet: bool, show_bar: bool) -> Self {
        if quiet {
            return Self {
                bar: None,
                quiet: true,
            };
        }

        let bar = if show_bar {
            let bar = IndicatifBar::new(0);

            if let Ok(style) = ProgressStyle::default_bar().template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            ) {
                bar.set_style(style.progress_chars("#>-"));
            }

            Some(bar)
        } else {
            None
        };

        Self { bar, quiet }
    }
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        if self.quiet {
            return;
        }

        match event {
            ProgressEvent::Opened { total } => {
                if let Some(bar) = &self.bar {
                    bar.set_length(total as u64);
                }
            }
            ProgressEvent::Frame { name, index, .. } => {
                if let Some(bar) = &self.bar {
                    bar.set_position(index as u64 + 1);
                    bar.set_message(name);
                }
            }
            ProgressEvent::Stopped { frames, total } => {
                if let Some(bar) = &self.bar {
                    bar.abandon();
                }
                eprintln!("WARN: Stopped after {frames} of {total} frames");
            }
            ProgressEvent::Finished { frames } => {
                if let Some(bar) = &self.bar {
                    bar.finish_with_message(format!("Done: {frames} frames"));
                }
            }
        }
    }
}
