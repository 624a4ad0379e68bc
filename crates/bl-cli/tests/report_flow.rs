//! End-to-end tests for the seed → report/dashboard/timeline flow.
//!
//! Each test runs the real binary against a temporary store, selected through
//! the `BL_DATA_PATH` environment variable.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn bl_binary() -> String {
    env!("CARGO_BIN_EXE_bl").to_string()
}

fn run_bl(data_path: &Path, args: &[&str]) -> std::process::Output {
    Command::new(bl_binary())
        .env("BL_DATA_PATH", data_path)
        .args(args)
        .output()
        .expect("failed to run bl")
}

fn seed(data_path: &Path, days: &str) {
    let output = run_bl(data_path, &["seed", "--days", days]);
    assert!(
        output.status.success(),
        "bl seed should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn seed_writes_a_jsonl_log() {
    let temp = TempDir::new().unwrap();
    let data_path = temp.path().join("events.jsonl");

    seed(&data_path, "3");

    let content = std::fs::read_to_string(&data_path).unwrap();
    assert!(content.lines().count() >= 3 * 14);
    for line in content.lines() {
        let parsed: serde_json::Value = serde_json::from_str(line).expect("line should be JSON");
        assert!(parsed.get("category").is_some());
        assert!(parsed.get("startTime").is_some());
    }
}

#[test]
fn report_json_reflects_seeded_data() {
    let temp = TempDir::new().unwrap();
    let data_path = temp.path().join("events.jsonl");
    seed(&data_path, "14");

    let output = run_bl(&data_path, &["report", "--json"]);
    assert!(
        output.status.success(),
        "bl report should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["today"]["bottle_count"], 5);
    assert_eq!(report["today"]["solid_count"], 1);
    assert_eq!(report["today"]["nap_count"], 3);
    assert_eq!(report["yesterday"]["wet_count"], 4);
    assert_eq!(report["week_average"]["bottle_count"], 5);
    assert!(report["health_log"].as_array().is_some());
}

#[test]
fn human_report_has_the_expected_sections() {
    let temp = TempDir::new().unwrap();
    let data_path = temp.path().join("events.jsonl");
    seed(&data_path, "7");

    let output = run_bl(&data_path, &["report"]);
    assert!(output.status.success());

    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.starts_with("DAILY REPORT:"));
    for section in ["FEEDS", "SLEEP", "DIAPERS", "WELLNESS", "HEALTH LOG"] {
        assert!(text.contains(section), "missing section {section}");
    }
}

#[test]
fn log_then_events_round_trips() {
    let temp = TempDir::new().unwrap();
    let data_path = temp.path().join("events.jsonl");

    let output = run_bl(
        &data_path,
        &[
            "log",
            "feed",
            "--method",
            "bottle",
            "--amount-ml",
            "120",
            "--at",
            "07:30",
        ],
    );
    assert!(
        output.status.success(),
        "bl log should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Bottle feed (120 ml)"));

    let output = run_bl(&data_path, &["events", "--json"]);
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["category"], "feed");
    assert_eq!(rows[0]["label"], "Bottle feed (120 ml)");
}

#[test]
fn subject_filter_separates_logs() {
    let temp = TempDir::new().unwrap();
    let data_path = temp.path().join("events.jsonl");

    for subject in ["ada", "ben"] {
        let output = run_bl(
            &data_path,
            &["--subject", subject, "log", "diaper", "--status", "wet"],
        );
        assert!(output.status.success());
    }

    let output = run_bl(&data_path, &["--subject", "ada", "events", "--json"]);
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["subject"], "ada");
}

#[test]
fn timeline_json_places_the_day() {
    let temp = TempDir::new().unwrap();
    let data_path = temp.path().join("events.jsonl");
    seed(&data_path, "2");

    let output = run_bl(&data_path, &["timeline", "--json", "--category", "sleep"]);
    assert!(output.status.success());

    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let placements = layout["placements"].as_array().unwrap();
    assert_eq!(placements.len(), 3);
    for placement in placements {
        assert_eq!(placement["category"], "sleep");
        assert!(placement["offset_minutes"].as_u64().unwrap() < 1440);
    }
}

#[test]
fn malformed_lines_do_not_break_reads() {
    let temp = TempDir::new().unwrap();
    let data_path = temp.path().join("events.jsonl");
    seed(&data_path, "1");

    let mut content = std::fs::read_to_string(&data_path).unwrap();
    content.push_str("{broken\n");
    std::fs::write(&data_path, content).unwrap();

    let output = run_bl(&data_path, &["report", "--json"]);
    assert!(
        output.status.success(),
        "report should survive a malformed line: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
