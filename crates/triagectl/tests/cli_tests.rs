//! CLI integration tests for triagectl
//!
//! Tests the CLI surface:
//! - triagectl evaluate   one-shot text and JSON output
//! - triagectl session    scripted two-step form, history, export
//! - triagectl history    exported and legacy history files
//! - triagectl symptoms   choice listing with unmapped symptoms marked
//! - exit codes for bad input and bad config

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use triage_common::Session;
use triagectl::commands;
use triagectl::display::Display;
use triagectl::form::Prompter;

fn triagectl(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_triagectl"));
    // Keep the user's config and terminal out of the picture
    cmd.env("TRIAGE_CONFIG", dir.join("absent.toml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn triagectl");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait triagectl")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

// =============================================================================
// evaluate
// =============================================================================

#[test]
fn evaluate_high_fever_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = triagectl(dir.path())
        .args(["evaluate", "--symptom", "Fever", "--fever", "High", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["result"]["condition"], "Acute Febrile Illness");
    assert_eq!(json["result"]["prescription"], serde_json::json!(["Paracetamol", "ORS"]));
    assert_eq!(json["result"]["confidence"], 75);
    assert_eq!(json["intake"]["duration"], "1–2 days");
    assert_eq!(json["rule_matched"], true);
}

#[test]
fn evaluate_vestibular_headache_text() {
    let dir = tempfile::tempdir().unwrap();
    let output = triagectl(dir.path())
        .args([
            "evaluate",
            "--symptom",
            "headache",
            "--note",
            "room is Spinning",
            "--duration",
            "more than 5 days",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let out = stdout_of(&output);
    assert!(out.contains("[RESULT] Migraine or Vestibular Headache"));
    assert!(out.contains("Confidence Score: 95%"));
    assert!(out.contains("[ALERT] Doctor consultation is strongly advised."));
    assert!(!out.contains("\u{1b}["));
}

#[test]
fn evaluate_unmapped_symptom_warns() {
    let dir = tempfile::tempdir().unwrap();
    let output = triagectl(dir.path())
        .args(["evaluate", "--symptom", "Back Pain"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let out = stdout_of(&output);
    assert!(out.contains("[RESULT] General Observation"));
    assert!(out.contains("Confidence Score: 30%"));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("No rule for main symptom"));
}

#[test]
fn evaluate_unknown_symptom_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = triagectl(dir.path())
        .args(["evaluate", "--symptom", "Toothache"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Toothache"));
}

// =============================================================================
// config
// =============================================================================

#[test]
fn invalid_config_exits_with_config_code() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[output\n").unwrap();

    let output = triagectl(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("symptoms")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(78));
}

#[test]
fn config_can_default_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[output]\njson = true\n").unwrap();

    let output = triagectl(dir.path())
        .env("TRIAGE_CONFIG", &config)
        .args(["evaluate", "--symptom", "rash"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["result"]["condition"], "Skin Allergy / Infection");
}

// =============================================================================
// session + history
// =============================================================================

#[test]
fn session_records_and_exports_history() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("history.json");

    // Menu 1 (new), personal form, medical form (fever/high), menu 3
    // (history), menu 4 (quit)
    let script = "1\nAda\n30\n2\n1\n1\n4\n1\n1\n\n\n3\n4\n";
    let mut cmd = triagectl(dir.path());
    cmd.arg("session").arg("--export").arg(&export);
    let output = run_with_stdin(cmd, script);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let out = stdout_of(&output);
    assert!(out.contains("[RESULT] Acute Febrile Illness"));
    assert!(out.contains("Diagnosis History"));
    assert!(out.contains("Name: Ada"));
    assert!(out.contains("Confidence: 75%"));

    let exported: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&export).unwrap()).unwrap();
    let entries = exported.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["main_symptom"], "Fever");
    assert_eq!(entries[0]["confidence"], 75);
}

#[test]
fn history_file_with_legacy_entry() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("old.json");
    fs::write(
        &file,
        r#"[
            {"time": "2024-02-01 10:00", "name": "Old", "symptom": "Cough", "condition": "Upper Respiratory Infection"},
            {"timestamp": "2024-02-02 11:00", "name": "New", "main_symptom": "Rash", "condition": "Skin Allergy / Infection", "confidence": 70}
        ]"#,
    )
    .unwrap();

    let output = triagectl(dir.path()).arg("history").arg(&file).output().unwrap();
    assert!(output.status.success());

    let out = stdout_of(&output);
    assert!(out.contains("Confidence: 0%"));
    assert!(out.contains("Confidence: 70%"));
    assert!(out.find("Name: New").unwrap() < out.find("Name: Old").unwrap());
}

#[test]
fn history_file_missing_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = triagectl(dir.path())
        .arg("history")
        .arg(dir.path().join("nope.json"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(74));
}

#[test]
fn symptoms_marks_unmapped() {
    let dir = tempfile::tempdir().unwrap();
    let output = triagectl(dir.path()).arg("symptoms").output().unwrap();
    let out = stdout_of(&output);
    assert!(out.contains("Fatigue  (no rule"));
    assert!(out.contains("Shortness of Breath  (no rule"));
    assert!(out.contains("  Dizziness\n"));
    assert!(out.contains("Joint Pain"));
}

// =============================================================================
// library-level session flow
// =============================================================================

#[test]
fn analyze_again_reuses_person_until_new_diagnosis() {
    // new -> Kim, headache + behind eyes; analyze again -> cough + chest pain;
    // history; new -> cancelled at name; quit
    let script = "1\nKim\n51\n1\n3\n1\n1\n1\n1\n\nbehind the eyes\n\
                  2\n2\n2\n1\n1\n1\n4\n\n\
                  3\n\
                  1\ncancel\n\
                  3\n";
    let mut session = Session::new();
    let mut prompter = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), false);
    commands::run_session(&mut session, &mut prompter, &Display::plain(), 0).unwrap();

    let entries = session.history().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].condition, "Sinus-related Headache");
    assert_eq!(entries[0].confidence, Some(80));
    assert_eq!(entries[1].name, "Kim");
    assert_eq!(entries[1].condition, "Lower Respiratory Tract Infection");
    assert_eq!(entries[1].confidence, Some(80));
    assert!(!session.personal_done());

    let out = String::from_utf8(prompter.output().clone()).unwrap();
    assert!(out.contains("Analyze more symptoms (same person)"));
    assert!(out.find("Name: Kim\nMain Symptom: Cough").is_some());
}
