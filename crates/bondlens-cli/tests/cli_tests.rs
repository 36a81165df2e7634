//! End-to-end tests of the `bondlens` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

// =============================================================================
// HELPERS
// =============================================================================

fn bondlens() -> Command {
    let mut cmd = Command::cargo_bin("bondlens").unwrap();
    cmd.env_remove("BONDLENS_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn sample_csv() -> String {
    let output = bondlens().arg("sample").output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

fn temp_file(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const MIXED: &str = "\
Fund_ID,Bond_Name,Face_Value,Coupon_Rate,Years_To_Maturity,Market_Price,Quantity
F1,Good,1000,5,5,1000,10
F1,Broken,-100,5,5,100,1
F2,Other,1000,4,3,990,5
";

// =============================================================================
// SAMPLE
// =============================================================================

#[test]
fn sample_writes_csv_header() {
    bondlens()
        .arg("sample")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Fund_ID,Bond_Name,Face_Value,Coupon_Rate,Years_To_Maturity,Market_Price,Quantity,Frequency",
        ))
        .stdout(predicate::str::contains("Treasury 5Y"));
}

// =============================================================================
// ANALYZE
// =============================================================================

#[test]
fn analyze_sample_table() {
    let file = temp_file(&sample_csv(), ".csv");

    bondlens()
        .arg("analyze")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Executive Summary"))
        .stdout(predicate::str::contains("Yield Shift Scenarios"))
        .stdout(predicate::str::contains("$75,374.20"));
}

#[test]
fn analyze_sample_json() {
    let file = temp_file(&sample_csv(), ".csv");

    let output = bondlens()
        .args(["--format", "json", "analyze"])
        .arg(file.path())
        .args(["--start", "-100", "--end", "100", "--step", "50"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["bonds"].as_array().unwrap().len(), 8);
    assert_eq!(json["funds"].as_array().unwrap().len(), 3);
    assert_eq!(json["scenarios"].as_array().unwrap().len(), 5);
    assert_eq!(json["summary"]["duration_risk"], "Moderate");

    let total = json["portfolio"]["total_value"].as_f64().unwrap();
    assert!((total - 75_374.2).abs() < 1e-6);
}

#[test]
fn analyze_single_fund() {
    let file = temp_file(&sample_csv(), ".csv");

    let output = bondlens()
        .args(["-f", "json", "analyze"])
        .arg(file.path())
        .args(["--fund", "Fund_C"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["fund"], "Fund_C");
    assert_eq!(json["bonds"].as_array().unwrap().len(), 2);
}

#[test]
fn analyze_unknown_fund_fails() {
    let file = temp_file(&sample_csv(), ".csv");

    bondlens()
        .arg("analyze")
        .arg(file.path())
        .args(["--fund", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Fund 'Nope' not found"));
}

#[test]
fn analyze_aborts_on_invalid_rows() {
    let file = temp_file(MIXED, ".csv");

    bondlens()
        .arg("analyze")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Broken: Face Value must be positive"))
        .stderr(predicate::str::contains("--allow-invalid"));
}

#[test]
fn analyze_skips_invalid_rows_when_allowed() {
    let file = temp_file(MIXED, ".csv");

    let output = bondlens()
        .args(["--format", "json", "analyze", "--allow-invalid"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["bonds"].as_array().unwrap().len(), 2);
    assert_eq!(json["skipped"].as_array().unwrap().len(), 1);
}

#[test]
fn analyze_csv_lists_bonds() {
    let file = temp_file(&sample_csv(), ".csv");

    let output = bondlens()
        .args(["--format", "csv", "analyze"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.starts_with("name,fund,quantity,face_value,coupon_pct"));
    assert_eq!(text.lines().count(), 9);
}

#[test]
fn analyze_uses_settings_file() {
    let data = temp_file(&sample_csv(), ".csv");
    let settings = temp_file("[scenarios]\nstart_bps = -50\nend_bps = 50\nstep_bps = 50\n", ".toml");

    let output = bondlens()
        .args(["--format", "json", "--config"])
        .arg(settings.path())
        .arg("analyze")
        .arg(data.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let shifts: Vec<i64> = json["scenarios"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["shift_bps"].as_i64().unwrap())
        .collect();
    assert_eq!(shifts, vec![-50, 0, 50]);
}

#[test]
fn analyze_rejects_shift_past_minus_one_hundred_percent() {
    let file = temp_file(&sample_csv(), ".csv");

    bondlens()
        .arg("analyze")
        .arg(file.path())
        .args(["--start", "-10500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid shift grid"));
}

#[test]
fn analyze_missing_file_fails() {
    bondlens()
        .args(["analyze", "/nonexistent/bonds.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read"));
}

// =============================================================================
// VALIDATE / FUNDS
// =============================================================================

#[test]
fn validate_clean_file() {
    let file = temp_file(&sample_csv(), ".csv");

    bondlens()
        .arg("validate")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("8 bond(s) passed validation"));
}

#[test]
fn validate_reports_errors_with_failing_exit() {
    let file = temp_file(MIXED, ".csv");

    bondlens()
        .args(["--format", "json", "validate"])
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"is_valid\": false"))
        .stdout(predicate::str::contains("Broken: Face Value must be positive"));
}

#[test]
fn validate_missing_columns() {
    let file = temp_file("Bond_Name,Face_Value\nA,1000\n", ".csv");

    bondlens()
        .arg("validate")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Missing required columns"));
}

#[test]
fn funds_lists_keys() {
    let file = temp_file(&sample_csv(), ".csv");

    bondlens()
        .args(["--format", "csv", "funds"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("fund,bonds,total_quantity,total_value"))
        .stdout(predicate::str::contains("Fund_A,3,23"))
        .stdout(predicate::str::contains("Fund_B,3,33"))
        .stdout(predicate::str::contains("Fund_C,2,18"));
}
