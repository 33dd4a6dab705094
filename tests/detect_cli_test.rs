use image::{Rgb, RgbImage};
use std::path::Path;
use std::process::{Command, Output};

fn run_detect(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_detect_flat_area"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run detect_flat_area")
}

fn write_case(path: &Path) {
    let mut image = RgbImage::from_pixel(250, 500, Rgb([255, 255, 255]));
    for y in 200..240 {
        for x in 100..140 {
            image.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }
    image.save(path).expect("failed to write test image");
}

#[test]
fn test_headless_run_prints_nothing_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("phone_case.png");
    write_case(&image);

    let output = run_detect(&[image.to_str().unwrap(), "--headless"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_save_dir_writes_four_renders() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("phone_case.png");
    let out = dir.path().join("renders");
    write_case(&image);

    let output = run_detect(&[
        image.to_str().unwrap(),
        "--headless",
        "--save-dir",
        out.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(0));
    for name in ["original.png", "edges.png", "mask.png", "result.png"] {
        assert!(out.join(name).is_file(), "missing {}", name);
    }
}

#[test]
fn test_missing_image_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no_such_case.jpg");

    let output = run_detect(&[missing.to_str().unwrap(), "--headless"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_inverted_thresholds_exit_one() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("phone_case.png");
    let config = dir.path().join("detector.toml");
    write_case(&image);
    std::fs::write(&config, "canny_low = 200.0\ncanny_high = 100.0\n").unwrap();

    let output = run_detect(&[
        image.to_str().unwrap(),
        "--headless",
        "--config",
        config.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
}
