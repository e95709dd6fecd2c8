#![cfg(feature = "cli")]

use assert_cmd::Command;
use otsu_threshold::io::{BinarizeConfig, BinarizeReport};
use otsu_threshold::{files, synthetic, ThresholdMode};
use predicates::prelude::*;

fn bin() -> Command {
    Command::cargo_bin("otsu-threshold").expect("binary built")
}

#[test]
fn demo_then_run_writes_binary_image_and_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let scene = dir.path().join("scene.png");
    let out = dir.path().join("scene_bw.png");
    let report = dir.path().join("report.json");

    bin()
        .args(["demo", "--width", "300", "--height", "200"])
        .arg(&scene)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote"));

    bin()
        .arg("run")
        .arg(&scene)
        .arg("-o")
        .arg(&out)
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold: "));

    let binary = image::open(&out).expect("binary output").to_luma8();
    assert_eq!(binary.dimensions(), (300, 200));
    assert!(binary.pixels().all(|p| p[0] == 0 || p[0] == 255));

    let report = BinarizeReport::load_json(&report).expect("report");
    assert_eq!(report.histogram.total(), 300 * 200);
    assert_eq!(report.stats.total(), 300 * 200);
    assert!(report.otsu.is_some());
    assert!(report.threshold >= 169 && report.threshold < 211);
}

#[test]
fn two_level_image_thresholds_at_lower_level() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("split.png");
    files::save_gray(&input, &synthetic::split_gray(120, 80, 50, 200)).expect("save input");

    bin()
        .arg("run")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold: 50"))
        .stdout(predicate::str::contains("white: 4800 (50.0%)"));

    let out = image::open(dir.path().join("split_binary.png"))
        .expect("default output path")
        .to_luma8();
    assert_eq!(out.get_pixel(0, 0)[0], 0);
    assert_eq!(out.get_pixel(119, 79)[0], 255);
}

#[test]
fn flags_override_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("split.png");
    files::save_gray(&input, &synthetic::split_gray(10, 10, 50, 200)).expect("save input");

    let mut cfg = BinarizeConfig::new(input.to_string_lossy());
    cfg.output_path = Some(dir.path().join("cfg_out.png").to_string_lossy().into_owned());
    cfg.params.threshold = ThresholdMode::Fixed(10);
    let cfg_path = dir.path().join("cfg.json");
    cfg.write_json(&cfg_path).expect("write config");

    bin()
        .arg("run")
        .arg("--config")
        .arg(&cfg_path)
        .args(["--threshold", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold: 200"))
        .stdout(predicate::str::contains("white: 0 "));

    assert!(dir.path().join("cfg_out.png").exists());
}

#[test]
fn run_without_input_fails() {
    bin()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input image"));
}

#[test]
fn missing_input_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    bin()
        .arg("run")
        .arg(dir.path().join("nope.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
