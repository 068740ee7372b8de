//! Integration tests for the `recur` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the decode, encode,
//! massage and options subcommands through the actual binary.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn recur() -> Command {
    Command::cargo_bin("recur").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// decode
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn decode_stdin_to_stdout() {
    let output = recur()
        .args(["decode", "--dtstart", "2026-01-05T09:00:00"])
        .write_stdin("FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("stdout must be JSON");
    assert_eq!(json["frequency"], "WEEKLY");
    assert_eq!(json["interval"], 2);
    assert_eq!(json["end_condition"], "never");
    assert_eq!(json["weekdays"], serde_json::json!(["MO", "WE"]));
}

#[test]
fn decode_with_timezone() {
    recur()
        .args([
            "decode",
            "--dtstart",
            "2026-01-05T09:00:00",
            "--timezone",
            "Europe/Berlin",
        ])
        .write_stdin("RRULE:FREQ=MONTHLY;BYDAY=+1MO,-1FR")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"MONTHLY\""))
        .stdout(predicate::str::contains("-1"));
}

#[test]
fn decode_ended_rule_without_dtstart() {
    recur()
        .arg("decode")
        .write_stdin("RRULE:FREQ=DAILY;UNTIL=20200101T235959Z")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"until_date\": \"2020-01-01\""));
}

#[test]
fn decode_invalid_rule_fails() {
    recur()
        .args(["decode", "--dtstart", "2026-01-05"])
        .write_stdin("FREQ=WHENEVER")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode RRULE"));
}

#[test]
fn decode_invalid_timezone_fails() {
    recur()
        .args(["decode", "--dtstart", "2026-01-05", "--timezone", "Mars/Olympus"])
        .write_stdin("FREQ=DAILY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

// ─────────────────────────────────────────────────────────────────────────────
// encode
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn encode_file_to_stdout() {
    recur()
        .args(["encode", "-i", &fixture("weekly.json")])
        .assert()
        .success()
        .stdout("RRULE:FREQ=WEEKLY;INTERVAL=2;COUNT=6;BYDAY=MO,WE,FR\n");
}

#[test]
fn encode_file_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("rule.txt");
    let out_str = out.to_str().unwrap();

    recur()
        .args(["encode", "-i", &fixture("weekly.json"), "-o", out_str])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&out).expect("output file must exist");
    assert!(content.starts_with("RRULE:FREQ=WEEKLY"));
}

#[test]
fn encode_without_frequency_fails() {
    recur()
        .arg("encode")
        .write_stdin(r#"{"interval": 3}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no frequency"));
}

#[test]
fn encode_invalid_json_fails() {
    recur()
        .arg("encode")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse settings JSON"));
}

#[test]
fn encode_missing_file_fails() {
    recur()
        .args(["encode", "-i", "/nonexistent/settings.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// massage
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn massage_fills_rrules() {
    let output = recur()
        .args(["massage", "-i", &fixture("items.json")])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        json[0]["rrule"],
        "RRULE:FREQ=MONTHLY;INTERVAL=1;UNTIL=20270630T235959Z;BYDAY=+1TU,-1TU;BYMONTH=1,7"
    );
    assert_eq!(json[1]["rrule"], "RRULE:FREQ=DAILY;INTERVAL=1");
}

// ─────────────────────────────────────────────────────────────────────────────
// options
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn options_respect_config_and_current() {
    let output = recur()
        .args([
            "options",
            "--config",
            &fixture("widget.toml"),
            "--current",
            "daily",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let values: Vec<&str> = json["repeat"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["value"].as_str().unwrap())
        .collect();
    assert_eq!(values, vec!["MONTHLY", "WEEKLY", "DAILY"]);
    assert_eq!(json["interval_unit"], "Day(s)");
    assert_eq!(json["controls"]["weekdays"], false);
}

#[test]
fn options_unknown_frequency_fails() {
    recur()
        .args(["options", "--current", "FORTNIGHTLY"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --current"));
}

#[test]
fn no_subcommand_shows_usage() {
    recur()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
