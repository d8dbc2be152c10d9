//! File-backed image sequence.

use std::path::{Path, PathBuf};

use frameseq_core::gray::fill_gray;
use frameseq_core::{BoundingBox, FrameSource, GrayImage, Intrinsics, OpenError, RgbImage};
use tracing::{debug, info, warn};

use crate::bbox::read_boxes;
use crate::decode::decode_rgb_into;
use crate::fs::{frame_name, resolve, SourceInput};

/// Options controlling how a sequence is enumerated.
#[derive(Debug, Clone, Default)]
pub struct SequenceOptions {
    /// Descend into subdirectories in directory mode.
    pub recursive: bool,
    /// Directory of `<stem>.txt` bounding-box sidecars.
    pub bbox_dir: Option<PathBuf>,
}

/// Sequential image source over a directory or an explicit file list.
///
/// Frames are decoded one at a time into buffers owned by the sequence.
/// Consecutive frames of the same size reuse the same allocation.
///
/// ```no_run
/// use frameseq_adapters::ImageSequence;
/// use frameseq_core::{FrameSource, Intrinsics};
///
/// let mut seq = ImageSequence::open_directory("frames", Intrinsics::new(500.0, 500.0, 320.0, 240.0))?;
/// while let Some(frame) = seq.next_frame() {
///     println!("{}x{}", frame.width(), frame.height());
/// }
/// # Ok::<(), frameseq_core::OpenError>(())
/// ```
#[derive(Debug)]
pub struct ImageSequence {
    paths: Vec<PathBuf>,
    position: usize,
    intrinsics: Intrinsics,
    open: bool,
    color: RgbImage,
    gray: GrayImage,
    gray_stale: bool,
    name: String,
    bbox_dir: Option<PathBuf>,
    boxes: Vec<BoundingBox>,
    scratch: Vec<u8>,
    reallocations: usize,
}

impl ImageSequence {
    /// Opens a directory or file list with default options.
    ///
    /// # Errors
    ///
    /// Returns an [`OpenError`] if no frame can be read.
    pub fn open(input: impl Into<SourceInput>, intrinsics: Intrinsics) -> Result<Self, OpenError> {
        Self::open_with_options(input, intrinsics, &SequenceOptions::default())
    }

    /// Opens every supported image in `dir`, in lexicographic path order.
    ///
    /// # Errors
    ///
    /// Returns an [`OpenError`] if the directory is missing, empty, or holds
    /// no readable images.
    pub fn open_directory(dir: impl AsRef<Path>, intrinsics: Intrinsics) -> Result<Self, OpenError> {
        Self::open(SourceInput::Directory(dir.as_ref().to_path_buf()), intrinsics)
    }

    /// Opens an explicit, ordered list of image files.
    ///
    /// # Errors
    ///
    /// Returns an [`OpenError`] if the list is empty or any entry cannot be
    /// read as an image.
    pub fn open_files<I, P>(files: I, intrinsics: Intrinsics) -> Result<Self, OpenError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let files = files.into_iter().map(Into::into).collect();
        Self::open(SourceInput::Files(files), intrinsics)
    }

    /// Opens `input` with explicit options.
    ///
    /// # Errors
    ///
    /// Returns an [`OpenError`] if no frame can be read.
    pub fn open_with_options(
        input: impl Into<SourceInput>,
        intrinsics: Intrinsics,
        options: &SequenceOptions,
    ) -> Result<Self, OpenError> {
        let input = input.into();
        let paths = resolve(&input, options.recursive)?;
        info!("Opened image sequence with {} frames", paths.len());

        Ok(Self {
            paths,
            position: 0,
            intrinsics,
            open: true,
            color: RgbImage::new(0, 0),
            gray: GrayImage::new(0, 0),
            gray_stale: false,
            name: String::new(),
            bbox_dir: options.bbox_dir.clone(),
            boxes: Vec::new(),
            scratch: Vec::new(),
            reallocations: 0,
        })
    }

    /// Focal length along x.
    #[must_use]
    pub const fn fx(&self) -> f32 {
        self.intrinsics.fx
    }

    /// Focal length along y.
    #[must_use]
    pub const fn fy(&self) -> f32 {
        self.intrinsics.fy
    }

    /// Principal point x.
    #[must_use]
    pub const fn cx(&self) -> f32 {
        self.intrinsics.cx
    }

    /// Principal point y.
    #[must_use]
    pub const fn cy(&self) -> f32 {
        self.intrinsics.cy
    }

    /// The ordered paths this sequence reads.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Width and height of the current frame.
    #[must_use]
    pub fn frame_dimensions(&self) -> (u32, u32) {
        self.color.dimensions()
    }

    /// How many times the color buffer had to be reallocated.
    #[must_use]
    pub const fn reallocations(&self) -> usize {
        self.reallocations
    }

    fn release(&mut self) {
        self.open = false;
        self.color = RgbImage::new(0, 0);
        self.gray = GrayImage::new(0, 0);
        self.gray_stale = false;
        self.boxes = Vec::new();
        self.scratch = Vec::new();
    }
}

impl FrameSource for ImageSequence {
    fn next_frame(&mut self) -> Option<&RgbImage> {
        if !self.open {
            return None;
        }
        let Some(path) = self.paths.get(self.position) else {
            debug!("Image sequence exhausted after {} frames", self.position);
            self.release();
            return None;
        };

        self.position += 1;
        match decode_rgb_into(path, &mut self.color, &mut self.scratch) {
            Ok(resized) => {
                if resized {
                    self.reallocations += 1;
                }
            }
            Err(e) => {
                warn!("Could not read frame {}: {e:#}", path.display());
                self.release();
                return None;
            }
        }

        self.name = frame_name(path);
        if let Some(dir) = &self.bbox_dir {
            self.boxes = read_boxes(dir, &self.name);
        }
        self.gray_stale = true;
        Some(&self.color)
    }

    fn current_frame(&self) -> &RgbImage {
        &self.color
    }

    fn current_frame_gray(&mut self) -> &GrayImage {
        if self.gray_stale {
            fill_gray(&self.color, &mut self.gray);
            self.gray_stale = false;
        }
        &self.gray
    }

    #[allow(clippy::cast_precision_loss)]
    fn progress(&self) -> f64 {
        if self.paths.is_empty() {
            return 0.0;
        }
        self.position as f64 / self.paths.len() as f64
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
        if self.open {
            debug!("Closing image sequence at frame {}", self.position);
        }
        self.release();
    }

    fn len(&self) -> usize {
        self.paths.len()
    }

    fn position(&self) -> usize {
        self.position
    }

    fn current_path(&self) -> Option<&Path> {
        self.position
            .checked_sub(1)
            .and_then(|i| self.paths.get(i))
            .map(PathBuf::as_path)
    }

    fn bounding_boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }
}

impl Drop for ImageSequence {
    fn drop(&mut self) {
        self.close();
    }
}
