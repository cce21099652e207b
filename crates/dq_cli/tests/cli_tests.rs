use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

/// Helper to create a Command for the silver-dq binary
#[allow(deprecated)]
fn silver_dq() -> Command {
    Command::cargo_bin("silver-dq").expect("Failed to find silver-dq binary")
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is a JSON report")
}

// ============================================================================
// validate command tests
// ============================================================================

#[test]
fn test_validate_sample_passes() {
    silver_dq()
        .arg("validate")
        .arg(fixture_path("passing.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"))
        .stdout(predicate::str::contains("Rows examined:  1"));
}

#[test]
fn test_validate_incomplete_day_exits_one() {
    silver_dq()
        .arg("validate")
        .arg(fixture_path("incomplete.yml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Validation FAILED"))
        .stdout(predicate::str::contains("completeness"))
        .stdout(predicate::str::contains("(2025-07-15, 52.52, 13.405)"));
}

#[test]
fn test_validate_json_report() {
    let output = silver_dq()
        .arg("validate")
        .arg(fixture_path("incomplete.yml"))
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report = json_stdout(&output);
    assert_eq!(report["overall"], "fail");
    assert_eq!(report["rows_examined"], 2);

    let violations = report["rule_results"]["completeness"]["violations"]
        .as_array()
        .unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0]["date"], "2025-07-15");
    assert_eq!(
        report["rule_results"]["flag_consistency"]["violations"],
        serde_json::json!([])
    );
}

#[test]
fn test_validate_toml_flagged_row() {
    let output = silver_dq()
        .args(["validate", &fixture_path("flagged.toml"), "--format", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report = json_stdout(&output);
    assert_eq!(
        report["rule_results"]["flag_consistency"]["violations"]
            .as_array()
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        report["rule_results"]["completeness"]["violations"],
        serde_json::json!([])
    );
}

#[test]
fn test_current_date_flag_overrides_config() {
    // On 2025-07-15 the incomplete day is still open.
    silver_dq()
        .args([
            "validate",
            &fixture_path("incomplete.yml"),
            "--current-date",
            "2025-07-15",
        ])
        .assert()
        .success();
}

#[test]
fn test_invalid_current_date_rejected() {
    silver_dq()
        .args([
            "validate",
            &fixture_path("passing.yml"),
            "--current-date",
            "16/07/2025",
        ])
        .assert()
        .failure();
}

#[test]
fn test_validate_defaults_to_today() {
    // The sample row is dated 2025-07-15, a closed complete day from any later date.
    silver_dq()
        .arg("validate")
        .arg(fixture_path("no_current_date.yml"))
        .assert()
        .success();
}

#[test]
fn test_validate_live_csv() {
    let output = silver_dq()
        .args(["validate", &fixture_path("live_csv.yml"), "--format", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let report = json_stdout(&output);
    assert_eq!(report["overall"], "pass");
    assert_eq!(report["rows_examined"], 4);
    assert!(report["rule_results"]["key_uniqueness"].is_object());
    assert!(report["rule_results"]["range:min_humidity_pct"].is_object());
}

#[test]
fn test_validate_schema_error_exits_two() {
    let output = silver_dq()
        .args([
            "validate",
            &fixture_path("missing_column.yml"),
            "--format",
            "json",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let report = json_stdout(&output);
    assert_eq!(report["overall"], "fail");
    assert_eq!(report["rule_results"], serde_json::json!({}));
    assert_eq!(report["errors"]["schema"]["kind"], "schema_error");
    assert!(
        report["errors"]["schema"]["message"]
            .as_str()
            .unwrap()
            .contains("row_count")
    );
}

#[test]
fn test_validate_missing_file() {
    silver_dq()
        .arg("validate")
        .arg("nonexistent.yml")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error"));
}

// ============================================================================
// check command tests
// ============================================================================

#[test]
fn test_check_lists_rules() {
    silver_dq()
        .arg("check")
        .arg(fixture_path("live_csv.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("silver_daily_live"))
        .stdout(predicate::str::contains("completeness"))
        .stdout(predicate::str::contains("flag_consistency"))
        .stdout(predicate::str::contains("key_uniqueness"))
        .stdout(predicate::str::contains("range:min_humidity_pct"));
}

#[test]
fn test_check_json_summary() {
    let output = silver_dq()
        .args(["check", &fixture_path("passing.yml"), "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let summary = json_stdout(&output);
    assert_eq!(summary["name"], "silver_daily_smoke");
    assert_eq!(
        summary["rules"],
        serde_json::json!(["completeness", "flag_consistency"])
    );
}

#[test]
fn test_check_does_not_read_data() {
    // missing_column.yml points at a table that fails validation; check never loads it.
    silver_dq()
        .arg("check")
        .arg(fixture_path("missing_column.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn test_check_invalid_range() {
    silver_dq()
        .arg("check")
        .arg(fixture_path("invalid_range.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("min_humidity_pct"));
}

#[test]
fn test_check_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");
    fs::write(&path, "{}").unwrap();

    silver_dq()
        .arg("check")
        .arg(path.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

// ============================================================================
// init command tests
// ============================================================================

#[test]
fn test_init_to_stdout() {
    silver_dq()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("type: fixture"))
        .stdout(predicate::str::contains("expected_row_count: 24"))
        .stdout(predicate::str::contains("column: min_humidity_pct"))
        .stdout(predicate::str::contains("column: max_wind_kmh"));
}

#[test]
fn test_init_yaml_file_validates() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("silver.yml");
    let path = path.to_str().unwrap();

    silver_dq()
        .args(["init", "--output", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config written to"));

    silver_dq()
        .args(["validate", path, "--current-date", "2025-07-16"])
        .assert()
        .success();
}

#[test]
fn test_init_toml_file_checks() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("silver.toml");
    let path = path.to_str().unwrap();

    silver_dq()
        .args(["init", "--format", "toml", "--output", path])
        .assert()
        .success();

    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains("[source]"));

    silver_dq()
        .args(["check", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("fixture (1 rows)"))
        .stdout(predicate::str::contains("range:max_wind_kmh"));
}
