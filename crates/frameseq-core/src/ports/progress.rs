//! Progress reporting port for UI integration.

/// Events emitted while a sequence is being read.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// The source was opened.
    Opened {
        /// Number of items in the sequence.
        total: usize,
    },
    /// A frame was decoded.
    Frame {
        /// Item identifier.
        name: String,
        /// Index in the sequence (0-based).
        index: usize,
        /// Fraction consumed after this frame.
        progress: f64,
    },
    /// Reading stopped before the end of the sequence.
    Stopped {
        /// Frames read before stopping.
        frames: usize,
        /// Items in the sequence.
        total: usize,
    },
    /// The source has been drained.
    Finished {
        /// Frames read.
        frames: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_event(&self, _event: ProgressEvent) {}
}
