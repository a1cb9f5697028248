extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn probe() -> Command {
    Command::cargo_bin("probe").unwrap()
}

#[test]
fn point_prints_the_sequence() {
    probe()
        .args(&["point", "--c=1,0", "--iterations=10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Behavior: diverges (escaped at step 3)"))
        .stdout(predicate::str::contains("z_3  =    5.000 +    0.000i"));
}

#[test]
fn point_accepts_negative_coordinates() {
    probe()
        .args(&["point", "--c", "-1,0", "--z0", "0,0", "--iterations", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Behavior: converges"))
        .stdout(predicate::str::contains("z_4"));
}

#[test]
fn point_rejects_negative_budget() {
    probe()
        .args(&["point", "--c=0,0", "--iterations=-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("iteration budget"));
}

#[test]
fn point_requires_a_parameter() {
    probe().args(&["point"]).assert().failure();
}

#[test]
fn grid_prints_every_point_and_a_summary() {
    probe()
        .args(&["grid", "--center=0,0", "--extent=1,1", "--points=3", "--iterations=50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-1 -1 diverges"))
        .stdout(predicate::str::contains("0 0 converges"))
        .stdout(predicate::str::contains("9 points: 5 diverge, 4 converge"));
}

#[test]
fn grid_defaults_to_eleven_per_side() {
    probe()
        .args(&["grid", "--center=-0.5,0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("121 points:"));
}

#[test]
fn grid_rejects_zero_points() {
    probe()
        .args(&["grid", "--center=0,0", "--points=0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one point"));
}

#[test]
fn grid_writes_a_pixmap() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grid.ppm");
    probe()
        .args(&["grid", "--center=0,0", "--extent=1,1", "--points=3", "--iterations=50"])
        .arg(format!("--output={}", path.display()))
        .assert()
        .success();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"P6"));
    // Header, then 3x3 RGB triples.
    let body = &bytes[bytes.len() - 27..];
    // Top-left pixel is c = -1 + i, which escapes.
    assert_eq!(&body[0..3], &[0xBF, 0x61, 0x6A]);
    // Top-middle pixel is c = i, which cycles.
    assert_eq!(&body[3..6], &[0x88, 0xC0, 0xD0]);
}
