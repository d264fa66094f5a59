//! End-to-end CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn slabvec() -> Command {
    Command::cargo_bin("slabvec").expect("binary not found")
}

#[test]
fn help_flag() {
    slabvec()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scenario to run"));
}

#[test]
fn version_flag() {
    slabvec()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("slabvec"));
}

#[test]
fn pipeline_scenario_golden_sum() {
    slabvec()
        .args(["--scenario", "pipeline", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pipeline sum: 831666"));
}

#[test]
fn primes_scenario_small_limit() {
    slabvec()
        .args(["--scenario", "primes", "-n", "15", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 3 5 7 11 13)"));
}

#[test]
fn crossthread_scenario_reports_a_foreign_return() {
    slabvec()
        .args(["--scenario", "crossthread", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("foreign returns: 1"));
}

#[test]
fn all_scenarios_run() {
    slabvec()
        .args(["--prewarm", "4"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("== pipeline ==")
                .and(predicate::str::contains("== primes =="))
                .and(predicate::str::contains("== crossthread ==")),
        );
}

#[test]
fn json_report_parses() {
    let output = slabvec()
        .args(["--scenario", "pipeline", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["scenario"], "pipeline");
    assert!(parsed[0]["pools"].as_array().is_some());
}

#[test]
fn output_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");
    slabvec()
        .args(["--scenario", "primes", "-n", "30", "-o"])
        .arg(&path)
        .assert()
        .success();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("(2 3 5 7 11 13 17 19 23 29)"));
}

#[test]
fn rejects_limit_below_two() {
    slabvec()
        .args(["-n", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit"));
}

#[test]
fn verbose_prints_pool_counters() {
    slabvec()
        .args(["--scenario", "pipeline", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hits="));
}
