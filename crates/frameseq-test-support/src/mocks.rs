//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use frameseq_core::gray::fill_gray;
use frameseq_core::ports::{
    FrameSource, GraySink, ProgressEvent, ProgressSink, RecordOutput,
};
use frameseq_core::{FrameRecord, Intrinsics};
use image::{GrayImage, RgbImage};

/// Mock implementation of `FrameSource` for testing.
///
/// Yields pre-built frames in order and can simulate a decode failure at a
/// given position.
pub struct MockFrameSource {
    frames: Vec<(String, RgbImage)>,
    intrinsics: Intrinsics,
    position: usize,
    open: bool,
    fail_at: Option<usize>,
    name: String,
    current: RgbImage,
    gray: GrayImage,
    gray_stale: bool,
    gray_derivations: usize,
    close_count: usize,
}

impl MockFrameSource {
    /// Creates a new mock source with named frames.
    #[must_use]
    pub fn new(frames: Vec<(String, RgbImage)>, intrinsics: Intrinsics) -> Self {
        Self {
            frames,
            intrinsics,
            position: 0,
            open: true,
            fail_at: None,
            name: String::new(),
            current: RgbImage::new(0, 0),
            gray: GrayImage::new(0, 0),
            gray_stale: false,
            gray_derivations: 0,
            close_count: 0,
        }
    }

    /// Creates a source of `count` uniform frames named `frame_000`, `frame_001`, ...
    #[must_use]
    pub fn uniform(count: usize, width: u32, height: u32) -> Self {
        let frames = (0..count)
            .map(|i| (format!("frame_{i:03}"), RgbImage::new(width, height)))
            .collect();
        Self::new(frames, Intrinsics::new(500.0, 500.0, 320.0, 240.0))
    }

    /// Makes the frame at `index` fail to decode.
    #[must_use]
    pub const fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Number of times the grayscale frame was actually recomputed.
    #[must_use]
    pub const fn gray_derivations(&self) -> usize {
        self.gray_derivations
    }

    /// Number of `close()` calls.
    #[must_use]
    pub const fn close_count(&self) -> usize {
        self.close_count
    }

    fn release(&mut self) {
        self.open = false;
        self.current = RgbImage::new(0, 0);
        self.gray = GrayImage::new(0, 0);
        self.gray_stale = false;
    }
}

impl FrameSource for MockFrameSource {
    fn next_frame(&mut self) -> Option<&RgbImage> {
        if !self.open {
            return None;
        }
        if self.position >= self.frames.len() || self.fail_at == Some(self.position) {
            self.position = (self.position + 1).min(self.frames.len());
            self.release();
            return None;
        }

        let (name, frame) = &self.frames[self.position];
        self.name.clone_from(name);
        self.current.clone_from(frame);
        self.position += 1;
        self.gray_stale = true;
        Some(&self.current)
    }

    fn current_frame(&self) -> &RgbImage {
        &self.current
    }

    fn current_frame_gray(&mut self) -> &GrayImage {
        if self.gray_stale {
            fill_gray(&self.current, &mut self.gray);
            self.gray_stale = false;
            self.gray_derivations += 1;
        }
        &self.gray
    }

    #[allow(clippy::cast_precision_loss)]
    fn progress(&self) -> f64 {
        if self.frames.is_empty() {
            return 0.0;
        }
        self.position as f64 / self.frames.len() as f64
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn intrinsics(&self) -> Intrinsics {
        self.intrinsics
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.close_count += 1;
        self.release();
    }

    fn len(&self) -> usize {
        self.frames.len()
    }

    fn position(&self) -> usize {
        self.position
    }
}

/// Mock implementation of `RecordOutput` for testing.
///
/// Captures records for later assertions.
pub struct MockRecordOutput {
    records: Arc<Mutex<Vec<FrameRecord>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockRecordOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured records.
    #[must_use]
    pub fn records(&self) -> Vec<FrameRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockRecordOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordOutput for MockRecordOutput {
    fn write(&self, record: &FrameRecord) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Frame` events.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Frame { .. }))
            .count()
    }

    /// Returns the last event received, if any.
    #[must_use]
    pub fn last(&self) -> Option<ProgressEvent> {
        self.events().last().cloned()
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Mock implementation of `GraySink` for testing.
///
/// Keeps a copy of every frame it receives.
pub struct MockGraySink {
    frames: Arc<Mutex<Vec<(String, GrayImage)>>>,
}

impl MockGraySink {
    /// Creates a new mock gray sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns every `(name, frame)` written so far.
    #[must_use]
    pub fn frames(&self) -> Vec<(String, GrayImage)> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockGraySink {
    fn default() -> Self {
        Self::new()
    }
}

impl GraySink for MockGraySink {
    fn write_gray(&self, index: usize, name: &str, frame: &GrayImage) -> anyhow::Result<String> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((name.to_owned(), frame.clone()));
        Ok(format!("mock://gray/{index}/{name}"))
    }
}
