//! Bounding-box sidecar files.
//!
//! A sidecar lives next to the frames in a separate directory and shares the
//! image's file stem: `<dir>/<stem>.txt`. Each line holds one box as
//! `min_x min_y max_x max_y`.

use std::path::Path;

use frameseq_core::BoundingBox;
use tracing::{debug, warn};

/// Reads the boxes for the frame named `stem` from `dir`.
///
/// A missing sidecar means no boxes.
#[must_use]
pub fn read_boxes(dir: &Path, stem: &str) -> Vec<BoundingBox> {
    let path = dir.join(format!("{stem}.txt"));
    match std::fs::read_to_string(&path) {
        Ok(text) => parse_boxes(&text, &path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No bounding boxes for {stem}");
            Vec::new()
        }
        Err(e) => {
            warn!("Failed to read bounding boxes {}: {e}", path.display());
            Vec::new()
        }
    }
}

fn parse_boxes(text: &str, origin: &Path) -> Vec<BoundingBox> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(n, line)| {
            let parsed = parse_line(line);
            if parsed.is_none() {
                warn!("Malformed bounding box at {}:{}", origin.display(), n + 1);
            }
            parsed
        })
        .collect()
}

fn parse_line(line: &str) -> Option<BoundingBox> {
    let values: Vec<f32> = line
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match values.as_slice() {
        &[min_x, min_y, max_x, max_y] => Some(BoundingBox::from_corners(min_x, min_y, max_x, max_y)),
        _ => None,
    }
}
