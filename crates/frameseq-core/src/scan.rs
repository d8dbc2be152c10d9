//! Drains a frame source into records.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::domain::FrameRecord;
use crate::gray::mean_luma;
use crate::ports::{FrameSource, GraySink, ProgressEvent, ProgressSink, RecordOutput};

/// Outcome of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Frames successfully read.
    pub frames: usize,
    /// Items in the sequence.
    pub total: usize,
}

impl ScanSummary {
    /// True if every item in the sequence produced a frame.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.frames == self.total
    }
}

/// Pulls every frame from `source`, writing one record per frame.
///
/// Grayscale frames are derived for every record and handed to `gray_sink`
/// when one is given. The output is flushed before returning.
///
/// # Errors
///
/// Returns an error if writing a record or a grayscale frame fails. Decode
/// failures inside the source end the scan early instead.
pub fn scan<S>(
    source: &mut S,
    output: &dyn RecordOutput,
    progress: &dyn ProgressSink,
    gray_sink: Option<&dyn GraySink>,
) -> Result<ScanSummary>
where
    S: FrameSource + ?Sized,
{
    let total = source.len();
    progress.on_event(ProgressEvent::Opened { total });

    let mut frames = 0usize;
    while let Some((width, height)) = source.next_frame().map(|f| f.dimensions()) {
        let index = frames;
        let name = source.name().to_owned();
        let path = source.current_path().map(|p| p.display().to_string());
        let bounding_boxes = source.bounding_boxes().to_vec();
        let intrinsics = source.intrinsics();
        let fraction = source.progress();

        let gray = source.current_frame_gray();
        let mean = mean_luma(gray);
        let gray_path = match gray_sink {
            Some(sink) => Some(
                sink.write_gray(index, &name, gray)
                    .with_context(|| format!("Failed to export grayscale frame {name}"))?,
            ),
            None => None,
        };

        let record = FrameRecord {
            index,
            name: name.clone(),
            path,
            width,
            height,
            progress: fraction,
            mean_luma: mean,
            intrinsics,
            bounding_boxes,
            gray_path,
        };
        output.write(&record)?;
        debug!("Frame {index} ({name}): {width}x{height}");

        progress.on_event(ProgressEvent::Frame {
            name,
            index,
            progress: fraction,
        });
        frames += 1;
    }

    output.flush()?;

    let summary = ScanSummary { frames, total };
    if summary.is_complete() {
        info!("Read {frames} frames");
        progress.on_event(ProgressEvent::Finished { frames });
    } else {
        warn!("Stopped after {frames} of {total} frames");
        progress.on_event(ProgressEvent::Stopped { frames, total });
    }

    Ok(summary)
}
