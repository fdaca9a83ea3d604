use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tempfile::tempdir;

fn write_manifest(path: &Path, yaml: &str) {
    fs::write(path, yaml).expect("manifest should write");
}

fn run_pulsegrid(cwd: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_pulsegrid"))
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("pulsegrid command should run")
}

const WEEK_MANIFEST: &str = r#"
canvas: { width: 280, height: 280 }
chart:
  shape: circle
  style: { mode: alpha }
  pulse_padding: 0.0
  values: [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7]
"#;

#[test]
fn check_reports_a_summary_line() {
    let dir = tempdir().expect("tempdir should create");
    let manifest = dir.path().join("chart.yaml");
    write_manifest(&manifest, WEEK_MANIFEST);

    let output = run_pulsegrid(dir.path(), &["check", "chart.yaml"]);
    assert!(output.status.success(), "check should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("OK: chart.yaml"));
    assert!(stdout.contains("7 pulses"));
    assert!(stdout.contains("1 columns"));
}

#[test]
fn check_json_reports_the_grid_geometry() {
    let dir = tempdir().expect("tempdir should create");
    let manifest = dir.path().join("chart.yaml");
    write_manifest(&manifest, WEEK_MANIFEST);

    let output = run_pulsegrid(dir.path(), &["check", "chart.yaml", "--json"]);
    assert!(output.status.success(), "check --json should succeed");
    let report: Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be a json report");
    assert_eq!(report["status"], "ok");
    assert_eq!(report["pulses"], 7);
    assert_eq!(report["columns"], 1);
    assert_eq!(report["pulse_side"], 40.0);
}

#[test]
fn check_rejects_row_start_beyond_row_count() {
    let dir = tempdir().expect("tempdir should create");
    let manifest = dir.path().join("chart.yaml");
    write_manifest(
        &manifest,
        r#"
canvas: { width: 280, height: 280 }
chart:
  row_count: 7
  row_start: 7
  values: [0.5]
"#,
    );

    let output = run_pulsegrid(dir.path(), &["check", "chart.yaml"]);
    assert!(!output.status.success(), "invalid row_start must fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("row_start"));
}

#[test]
fn check_json_failure_reports_the_error() {
    let dir = tempdir().expect("tempdir should create");
    let manifest = dir.path().join("chart.yaml");
    write_manifest(
        &manifest,
        r#"
canvas: { width: 0, height: 280 }
chart:
  values: [0.5]
"#,
    );

    let output = run_pulsegrid(dir.path(), &["check", "chart.yaml", "--json"]);
    assert!(!output.status.success());
    let report: Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be a json report");
    assert_eq!(report["status"], "error");
    assert!(report["message"]
        .as_str()
        .expect("message should be a string")
        .contains("canvas"));
}

#[test]
fn render_writes_a_png() {
    let dir = tempdir().expect("tempdir should create");
    let manifest = dir.path().join("chart.yaml");
    write_manifest(&manifest, WEEK_MANIFEST);

    let output = run_pulsegrid(dir.path(), &["render", "chart.yaml", "-o", "chart.png"]);
    assert!(output.status.success(), "render should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote chart.png"));

    let png = fs::read(dir.path().join("chart.png")).expect("png should exist");
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn trace_prints_one_command_per_value() {
    let dir = tempdir().expect("tempdir should create");
    let manifest = dir.path().join("chart.yaml");
    write_manifest(&manifest, WEEK_MANIFEST);

    let output = run_pulsegrid(dir.path(), &["trace", "chart.yaml"]);
    assert!(output.status.success(), "trace should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines.iter().all(|line| line.starts_with("fill_circle")));
    assert!(lines[0].contains("alpha=0.100"));
    assert!(lines[6].contains("alpha=0.700"));
}

#[test]
fn demo_is_reproducible_for_a_fixed_seed() {
    let dir = tempdir().expect("tempdir should create");

    let first = run_pulsegrid(dir.path(), &["demo", "-o", "a.png", "--seed", "7", "--days", "30"]);
    assert!(first.status.success(), "demo should succeed");
    let second = run_pulsegrid(dir.path(), &["demo", "-o", "b.png", "--seed", "7", "--days", "30"]);
    assert!(second.status.success(), "demo should succeed");

    let a = fs::read(dir.path().join("a.png")).expect("png should exist");
    let b = fs::read(dir.path().join("b.png")).expect("png should exist");
    assert_eq!(a, b, "same seed must produce byte-identical output");
}
