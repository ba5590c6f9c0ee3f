use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use image::{GrayImage, Luma};
use tempfile::tempdir;

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xyrom"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("spawn xyrom")
}

/// 2x2 white image with black pixels on the main diagonal.
fn write_diagonal_png(path: &Path) {
    let img = GrayImage::from_fn(2, 2, |x, y| if x == y { Luma([0]) } else { Luma([255]) });
    img.save(path).expect("save png");
}

#[test]
fn convert_writes_decimated_mem_pair() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("diag.png");
    let prefix = dir.path().join("diag");
    let meta = dir.path().join("meta.json");
    write_diagonal_png(&input);

    let out = run_cli(&[
        "convert",
        "--input",
        input.to_str().expect("utf-8 path"),
        "--prefix",
        prefix.to_str().expect("utf-8 path"),
        "--meta",
        meta.to_str().expect("utf-8 path"),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8(out.stdout).expect("utf-8 stdout");
    assert!(stdout.contains("Done. Samples: 2"), "{stdout}");
    assert!(stdout.contains("diagx.mem"), "{stdout}");

    let x = fs::read_to_string(dir.path().join("diagx.mem")).expect("x mem");
    let y = fs::read_to_string(dir.path().join("diagy.mem")).expect("y mem");
    assert_eq!(x, "020\n1AD\n");
    assert_eq!(y, "1DF\n052\n");

    let summary: serde_json::Value =
        serde_json::from_slice(&fs::read(&meta).expect("meta json")).expect("valid json");
    assert_eq!(summary["components"], 2);
    assert_eq!(summary["samples"], 10);
    assert_eq!(summary["decimated"], 2);
    assert_eq!(summary["hex_width"], 3);
}

#[test]
fn flags_override_config_file() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("diag.png");
    let prefix = dir.path().join("out");
    let config = dir.path().join("cfg.json");
    write_diagonal_png(&input);
    fs::write(&config, r#"{ "bits": 8, "margin": 0, "stride": 4 }"#).expect("write config");

    let out = run_cli(&[
        "convert",
        "--input",
        input.to_str().expect("utf-8 path"),
        "--prefix",
        prefix.to_str().expect("utf-8 path"),
        "--config",
        config.to_str().expect("utf-8 path"),
        "--stride",
        "1",
        "--no-flip-y",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    // 8 bits, no margin, unflipped: (0,0) -> (0,0), (1,1) -> (255,255),
    // 8 bridge points in between, nothing dropped.
    let x = fs::read_to_string(dir.path().join("outx.mem")).expect("x mem");
    let lines: Vec<&str> = x.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "00");
    assert_eq!(lines[9], "FF");
    let y = fs::read_to_string(dir.path().join("outy.mem")).expect("y mem");
    assert_eq!(y.lines().next(), Some("00"));
}

#[test]
fn raster_order_uses_full_code_range() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("diag.png");
    let prefix = dir.path().join("scan");
    write_diagonal_png(&input);

    let out = run_cli(&[
        "convert",
        "--input",
        input.to_str().expect("utf-8 path"),
        "--prefix",
        prefix.to_str().expect("utf-8 path"),
        "--order",
        "raster",
        "--bits",
        "8",
        "--stride",
        "1",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    // No margin inset and no bridge points between the two pixels.
    let x = fs::read_to_string(dir.path().join("scanx.mem")).expect("x mem");
    let y = fs::read_to_string(dir.path().join("scany.mem")).expect("y mem");
    assert_eq!(x, "00\nFF\n");
    assert_eq!(y, "FF\n00\n");
}

#[test]
fn blank_image_writes_empty_files() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("blank.png");
    let prefix = dir.path().join("blank");
    GrayImage::from_pixel(4, 3, Luma([255]))
        .save(&input)
        .expect("save png");

    let out = run_cli(&[
        "convert",
        "--input",
        input.to_str().expect("utf-8 path"),
        "--prefix",
        prefix.to_str().expect("utf-8 path"),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Done. Samples: 0"));

    for name in ["blankx.mem", "blanky.mem"] {
        let len = fs::metadata(dir.path().join(name)).expect("mem exists").len();
        assert_eq!(len, 0, "{name}");
    }
}

#[test]
fn zero_stride_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("diag.png");
    let prefix = dir.path().join("bad");
    write_diagonal_png(&input);

    let out = run_cli(&[
        "convert",
        "--input",
        input.to_str().expect("utf-8 path"),
        "--prefix",
        prefix.to_str().expect("utf-8 path"),
        "--stride",
        "0",
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("stride"));
    assert!(!dir.path().join("badx.mem").exists());
}

#[test]
fn preview_writes_three_pngs() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("diag.png");
    let out_dir = dir.path().join("preview");
    write_diagonal_png(&input);

    let out = run_cli(&[
        "preview",
        "--input",
        input.to_str().expect("utf-8 path"),
        "--out",
        out_dir.to_str().expect("utf-8 path"),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let mask = image::open(out_dir.join("mask.png")).expect("mask png").to_luma8();
    assert_eq!(mask.dimensions(), (2, 2));
    assert_eq!(mask.get_pixel(0, 0), &Luma([0]));
    assert_eq!(mask.get_pixel(1, 0), &Luma([255]));

    for name in ["samples.png", "samples_decimated.png"] {
        let plot = image::open(out_dir.join(name)).expect("plot png");
        assert_eq!((plot.width(), plot.height()), (512, 512), "{name}");
    }
}
