//! End-to-end CLI tests against the fixtures in `tests/fixtures/`.
//!
//! Check fixtures hold a `policy.yaml`, an inventory, and an `expected.report.json` whose
//! version and timestamps use the normalization placeholders.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tagguard_test_util::normalize_nondeterministic;
use tempfile::TempDir;

#[allow(deprecated)]
fn tagguard_cmd() -> Command {
    Command::cargo_bin("tagguard").expect("tagguard binary not found - run `cargo build` first")
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tagguard-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
}

fn fixture(name: &str, file: &str) -> PathBuf {
    fixtures_dir().join(name).join(file)
}

fn read_json(path: &Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read json file");
    serde_json::from_str(&text).expect("parse json file")
}

/// Run `check` on a fixture, writing the report to a temp file. Returns exit code and report.
fn run_check_on_fixture(name: &str, inventory: &str) -> (i32, Value) {
    let tmp = TempDir::new().expect("temp dir");
    let report_path = tmp.path().join("report.json");

    let output = tagguard_cmd()
        .arg("check")
        .arg("--policy")
        .arg(fixture(name, "policy.yaml"))
        .arg("--inventory")
        .arg(fixture(name, inventory))
        .arg("--out")
        .arg(&report_path)
        .output()
        .expect("run tagguard");

    (output.status.code().unwrap_or(-1), read_json(&report_path))
}

fn assert_matches_golden(actual: Value, name: &str) {
    let expected = read_json(&fixture(name, "expected.report.json"));
    let actual = normalize_nondeterministic(actual);
    assert_eq!(
        actual,
        expected,
        "report mismatch for fixture '{name}'.\n\nActual:\n{}",
        serde_json::to_string_pretty(&actual).unwrap()
    );
}

#[test]
fn mixed_inventory_fails_and_matches_golden() {
    let (code, report) = run_check_on_fixture("mixed", "inventory.json");
    assert_eq!(code, 2, "non-compliant resources exit with 2");
    assert_matches_golden(report, "mixed");
}

#[test]
fn compliant_yaml_inventory_passes_and_matches_golden() {
    let (code, report) = run_check_on_fixture("compliant", "inventory.yaml");
    assert_eq!(code, 0);
    assert_matches_golden(report, "compliant");
}

#[test]
fn check_prints_report_to_stdout_without_out() {
    let output = tagguard_cmd()
        .arg("check")
        .arg("--policy")
        .arg(fixture("compliant", "policy.yaml"))
        .arg("--inventory")
        .arg(fixture("compliant", "inventory.yaml"))
        .output()
        .expect("run tagguard");

    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("stdout is json");
    assert_eq!(report["schema"], "tagguard.report.v1");
}

#[test]
fn check_yaml_format() {
    tagguard_cmd()
        .arg("check")
        .arg("--policy")
        .arg(fixture("compliant", "policy.yaml"))
        .arg("--inventory")
        .arg(fixture("compliant", "inventory.yaml"))
        .args(["--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("schema: tagguard.report.v1"))
        .stdout(predicate::str::contains("verdict: pass"));
}

#[test]
fn check_table_and_markdown_outputs() {
    let tmp = TempDir::new().expect("temp dir");
    let md_path = tmp.path().join("summary/comment.md");

    tagguard_cmd()
        .arg("check")
        .arg("--policy")
        .arg(fixture("mixed", "policy.yaml"))
        .arg("--inventory")
        .arg(fixture("mixed", "inventory.json"))
        .arg("--markdown-out")
        .arg(&md_path)
        .arg("--table")
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("RESOURCE"))
        .stdout(predicate::str::contains("i-0b2"))
        .stdout(predicate::str::contains(
            "4 evaluated, 2 compliant, 2 non-compliant, 1 excluded, 1 skipped",
        ));

    let md = std::fs::read_to_string(&md_path).expect("markdown written");
    assert!(md.contains("Verdict: **FAIL**"));
    assert!(md.contains("### `db-main` (rds, level `high`)"));
    assert!(md.contains("- `aws-logs-123` (s3): Service-managed log buckets"));
}

#[test]
fn validate_accepts_good_policy() {
    tagguard_cmd()
        .arg("validate")
        .arg("--policy")
        .arg(fixture("mixed", "policy.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("policy 1.0 is valid"));
}

#[test]
fn validate_rejects_empty_version() {
    tagguard_cmd()
        .arg("validate")
        .arg("--policy")
        .arg(fixture("invalid_version", "policy.yaml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported policy version"));
}

#[test]
fn validate_rejects_unknown_compliance_level_name() {
    tagguard_cmd()
        .arg("validate")
        .arg("--policy")
        .arg(fixture("extreme_level", "policy.yaml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("compliance level name 'extreme'"));
}

#[test]
fn check_with_invalid_policy_exits_1_without_report() {
    let tmp = TempDir::new().expect("temp dir");
    let report_path = tmp.path().join("report.json");

    tagguard_cmd()
        .arg("check")
        .arg("--policy")
        .arg(fixture("invalid_version", "policy.yaml"))
        .arg("--inventory")
        .arg(fixture("mixed", "inventory.json"))
        .arg("--out")
        .arg(&report_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("load policy"));

    assert!(!report_path.exists());
}

#[test]
fn missing_inventory_is_an_error() {
    tagguard_cmd()
        .arg("check")
        .arg("--policy")
        .arg(fixture("mixed", "policy.yaml"))
        .arg("--inventory")
        .arg(fixture("mixed", "does-not-exist.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("read inventory"));
}

#[test]
fn init_writes_policy_that_validates() {
    let tmp = TempDir::new().expect("temp dir");
    let policy = tmp.path().join("tagguard.yaml");

    tagguard_cmd()
        .arg("init")
        .arg("--out")
        .arg(&policy)
        .assert()
        .success();

    tagguard_cmd()
        .arg("validate")
        .arg("--policy")
        .arg(&policy)
        .assert()
        .success();

    tagguard_cmd()
        .arg("init")
        .arg("--out")
        .arg(&policy)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    tagguard_cmd()
        .arg("init")
        .arg("--out")
        .arg(&policy)
        .arg("--force")
        .assert()
        .success();
}

#[test]
fn explain_known_and_unknown_kinds() {
    tagguard_cmd()
        .args(["explain", "missing_required_tag"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing Required Tag"))
        .stdout(predicate::str::contains("Remediation"));

    tagguard_cmd()
        .args(["explain", "not_a_kind"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown violation kind: not_a_kind"))
        .stderr(predicate::str::contains("case_mismatch"));
}

#[test]
fn md_renders_saved_report() {
    let tmp = TempDir::new().expect("temp dir");
    let report_path = tmp.path().join("report.json");

    tagguard_cmd()
        .arg("check")
        .arg("--policy")
        .arg(fixture("mixed", "policy.yaml"))
        .arg("--inventory")
        .arg(fixture("mixed", "inventory.json"))
        .arg("--out")
        .arg(&report_path)
        .assert()
        .code(2);

    tagguard_cmd()
        .arg("md")
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Tagguard report"))
        .stdout(predicate::str::contains("## Non-compliant resources"));
}

#[test]
fn json_logs_go_to_stderr() {
    tagguard_cmd()
        .args(["--log-level", "info", "--log-json", "validate", "--policy"])
        .arg(fixture("mixed", "policy.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"))
        .stderr(predicate::str::contains("\"policy validated\""));
}
