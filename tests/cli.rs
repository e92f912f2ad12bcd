use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("lazyplot").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("lazyplot"))
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn config_prints_defaults() {
    let mut cmd = Command::cargo_bin("lazyplot").unwrap();
    cmd.arg("config");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"columns\": 1"))
        .stdout(predicate::str::contains("\"layout_mode\": \"constrained\""));
}

#[test]
fn config_applies_overrides() {
    let mut cmd = Command::cargo_bin("lazyplot").unwrap();
    cmd.args([
        "config",
        "--json",
        r#"{"columns": 2, "layout": "tight"}"#,
        "--set",
        "columns=3",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"columns\": 3"))
        .stdout(predicate::str::contains("\"layout_mode\": \"tight\""));
}

#[test]
fn config_rejects_invalid_values() {
    let mut cmd = Command::cargo_bin("lazyplot").unwrap();
    cmd.args(["config", "--set", "columns=0"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("columns"));

    let mut cmd = Command::cargo_bin("lazyplot").unwrap();
    cmd.args(["config", "--set", "colour=red"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown configuration key"));
}

#[test]
fn demo_rejects_unknown_kind() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("lazyplot").unwrap();
    cmd.args(["demo", "--kind", "volcano", "--out"])
        .arg(dir.path().join("x.svg"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown plot kind"));
}

#[test]
fn demo_writes_file() {
    if !lazyplot::backend::font_available() {
        eprintln!("skipping: no font found");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("demo.svg");
    let mut cmd = Command::cargo_bin("lazyplot").unwrap();
    cmd.args(["demo", "--items", "3", "--series", "2", "--set", "columns=2", "--out"])
        .arg(&out);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("2x2 grid"));
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}
