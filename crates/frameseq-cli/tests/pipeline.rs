//! End-to-end tests for reading sequences through the CLI.

#![allow(clippy::unwrap_used, clippy::float_cmp)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::Path;

use assert_cmd::Command;
use frameseq_test_support::{ImageDir, SyntheticImageBuilder};
use predicates::prelude::*;
use serde_json::Value;

fn frameseq(scratch: &Path) -> Command {
    let mut cmd = Command::cargo_bin("frameseq").unwrap();
    cmd.env("XDG_CONFIG_HOME", scratch.join("xdg"));
    cmd
}

/// Runs the command and parses every stdout line as a JSON record.
fn records(cmd: &mut Command) -> (Option<i32>, Vec<Value>) {
    let output = cmd.output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let records = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (output.status.code(), records)
}

/// PNG whose header is intact but whose pixel data is cut short.
fn truncated_png() -> Vec<u8> {
    let mut bytes = Vec::new();
    SyntheticImageBuilder::rgb_gradient(32, 32)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    let idat = bytes.windows(4).position(|w| w == b"IDAT").unwrap();
    bytes.truncate(idat + 8);
    bytes
}

#[test]
fn test_directory_emits_one_record_per_frame() {
    let dir = ImageDir::new()
        .unwrap()
        .with_image("frame_2.png", &SyntheticImageBuilder::tagged(8, 6, 2))
        .unwrap()
        .with_image("frame_0.png", &SyntheticImageBuilder::tagged(8, 6, 0))
        .unwrap()
        .with_image("frame_1.png", &SyntheticImageBuilder::tagged(8, 6, 1))
        .unwrap();

    let (code, records) = records(frameseq(dir.path()).arg(dir.path()));

    assert_eq!(code, Some(0));
    assert_eq!(records.len(), 3);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record["index"], i);
        assert_eq!(record["name"], format!("frame_{i}"));
        assert_eq!(record["width"], 8);
        assert_eq!(record["height"], 6);
    }
    assert_eq!(records[2]["progress"].as_f64().unwrap(), 1.0);
}

#[test]
fn test_progress_steps_by_one_over_total() {
    let mut dir = ImageDir::new().unwrap();
    for i in 0..4 {
        dir = dir
            .with_image(&format!("{i}.png"), &SyntheticImageBuilder::tagged(4, 4, i))
            .unwrap();
    }

    let (_, records) = records(frameseq(dir.path()).arg(dir.path()));
    let progress: Vec<f64> = records
        .iter()
        .map(|r| r["progress"].as_f64().unwrap())
        .collect();
    assert_eq!(progress, vec![0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn test_file_list_keeps_argument_order() {
    let dir = ImageDir::new()
        .unwrap()
        .with_image("a.png", &SyntheticImageBuilder::tagged(4, 4, 1))
        .unwrap()
        .with_image("b.jpg", &SyntheticImageBuilder::rgb_gradient(4, 4))
        .unwrap();

    let (code, records) = records(
        frameseq(dir.path())
            .arg(dir.file("b.jpg"))
            .arg(dir.file("a.png")),
    );

    assert_eq!(code, Some(0));
    let names: Vec<&str> = records.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["b", "a"]);
}

#[test]
fn test_intrinsics_flags_reach_records() {
    let dir = ImageDir::new()
        .unwrap()
        .with_image("a.png", &SyntheticImageBuilder::tagged(4, 4, 1))
        .unwrap();

    let (_, records) = records(
        frameseq(dir.path())
            .args(["--fx", "612.5", "--fy", "611", "--cx", "319.5"])
            .arg(dir.path()),
    );

    let k = &records[0]["intrinsics"];
    assert_eq!(k["fx"].as_f64().unwrap(), 612.5);
    assert_eq!(k["fy"].as_f64().unwrap(), 611.0);
    assert_eq!(k["cx"].as_f64().unwrap(), 319.5);
    assert_eq!(k["cy"].as_f64().unwrap(), 240.0);
}

#[test]
fn test_corrupt_directory_entry_is_skipped() {
    let dir = ImageDir::new()
        .unwrap()
        .with_image("a.png", &SyntheticImageBuilder::tagged(4, 4, 1))
        .unwrap()
        .with_bytes("b.png", b"definitely not a png")
        .unwrap()
        .with_image("c.png", &SyntheticImageBuilder::tagged(4, 4, 3))
        .unwrap();

    let (code, records) = records(frameseq(dir.path()).arg(dir.path()));

    assert_eq!(code, Some(0));
    let names: Vec<&str> = records.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["a", "c"]);
}

#[test]
fn test_truncated_directory_entry_is_dropped_at_open() {
    let dir = ImageDir::new()
        .unwrap()
        .with_image("a.png", &SyntheticImageBuilder::tagged(32, 32, 1))
        .unwrap()
        .with_bytes("b.png", &truncated_png())
        .unwrap()
        .with_image("c.png", &SyntheticImageBuilder::tagged(32, 32, 3))
        .unwrap();

    let (code, records) = records(frameseq(dir.path()).arg(dir.path()));

    assert_eq!(code, Some(0));
    let names: Vec<&str> = records.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["a", "c"]);
    let progress: Vec<f64> = records
        .iter()
        .map(|r| r["progress"].as_f64().unwrap())
        .collect();
    assert_eq!(progress, vec![0.5, 1.0]);
}

#[test]
fn test_truncated_file_list_entry_fails_open() {
    let dir = ImageDir::new()
        .unwrap()
        .with_image("a.png", &SyntheticImageBuilder::tagged(32, 32, 1))
        .unwrap()
        .with_bytes("b.png", &truncated_png())
        .unwrap();

    frameseq(dir.path())
        .arg(dir.file("a.png"))
        .arg(dir.file("b.png"))
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("b.png"));
}

#[test]
fn test_recursive_flag() {
    let dir = ImageDir::new()
        .unwrap()
        .with_image("top.png", &SyntheticImageBuilder::tagged(4, 4, 1))
        .unwrap()
        .with_image("sub/inner.png", &SyntheticImageBuilder::tagged(4, 4, 2))
        .unwrap();

    let (_, flat) = records(frameseq(dir.path()).arg(dir.path()));
    assert_eq!(flat.len(), 1);

    let (_, deep) = records(frameseq(dir.path()).arg("-r").arg(dir.path()));
    let names: Vec<&str> = deep.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["inner", "top"]);
}

#[test]
fn test_gray_dir_exports_frames() {
    let dir = ImageDir::new()
        .unwrap()
        .with_image("a.png", &SyntheticImageBuilder::rgb_uniform(6, 4, 90, 90, 90))
        .unwrap();
    let out = tempfile::tempdir().unwrap();
    let gray_dir = out.path().join("gray");

    let (code, records) = records(
        frameseq(dir.path())
            .arg("--gray-dir")
            .arg(&gray_dir)
            .arg(dir.path()),
    );

    assert_eq!(code, Some(0));
    let exported = gray_dir.join("000000_a.png");
    assert_eq!(records[0]["gray_path"], exported.display().to_string());

    let gray = image::open(&exported).unwrap().into_luma8();
    assert_eq!(gray.dimensions(), (6, 4));
    assert!(gray.pixels().all(|p| p.0[0] == 90));
}

#[test]
fn test_bbox_dir_attaches_boxes() {
    let dir = ImageDir::new()
        .unwrap()
        .with_image("a.png", &SyntheticImageBuilder::tagged(16, 16, 1))
        .unwrap()
        .with_image("b.png", &SyntheticImageBuilder::tagged(16, 16, 2))
        .unwrap();
    let boxes = ImageDir::new()
        .unwrap()
        .with_bytes("a.txt", b"1 2 11 7\n")
        .unwrap();

    let (_, records) = records(
        frameseq(dir.path())
            .arg("--bbox-dir")
            .arg(boxes.path())
            .arg(dir.path()),
    );

    let a_boxes = records[0]["bounding_boxes"].as_array().unwrap();
    assert_eq!(a_boxes.len(), 1);
    assert_eq!(a_boxes[0]["width"].as_f64().unwrap(), 10.0);
    assert_eq!(a_boxes[0]["height"].as_f64().unwrap(), 5.0);
    assert!(records[1].get("bounding_boxes").is_none());
}

#[test]
fn test_gray_dir_keeps_same_stem_frames_apart() {
    let dir = ImageDir::new()
        .unwrap()
        .with_image("day/frame.png", &SyntheticImageBuilder::rgb_uniform(4, 4, 40, 40, 40))
        .unwrap()
        .with_image("night/frame.png", &SyntheticImageBuilder::rgb_uniform(4, 4, 200, 200, 200))
        .unwrap();
    let out = tempfile::tempdir().unwrap();
    let gray_dir = out.path().join("gray");

    let (code, records) = records(
        frameseq(dir.path())
            .arg("--gray-dir")
            .arg(&gray_dir)
            .arg(dir.file("day/frame.png"))
            .arg(dir.file("night/frame.png")),
    );

    assert_eq!(code, Some(0));
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], records[1]["name"]);
    assert_ne!(records[0]["gray_path"], records[1]["gray_path"]);

    let day = image::open(gray_dir.join("000000_frame.png")).unwrap().into_luma8();
    let night = image::open(gray_dir.join("000001_frame.png")).unwrap().into_luma8();
    assert!(day.pixels().all(|p| p.0[0] == 40));
    assert!(night.pixels().all(|p| p.0[0] == 200));
}
