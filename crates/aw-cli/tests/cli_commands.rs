//! Integration tests for the `aw` binary.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn aw() -> Command {
    Command::cargo_bin("aw").unwrap()
}

/// Write a script file into a fresh temp dir.
fn script(lines: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("moves.txt");
    fs::write(&path, lines).unwrap();
    (dir, path)
}

const CELLAR_WIN: &str = "# grab the key and leave\ne\n\ntake iron key\ns\nlook\n";

// ---------------------------------------------------------------------------
// scenarios / show
// ---------------------------------------------------------------------------

#[test]
fn scenarios_lists_builtins() {
    aw().arg("scenarios")
        .assert()
        .success()
        .stdout(predicate::str::contains("library_escape"))
        .stdout(predicate::str::contains("bell_timer"))
        .stdout(predicate::str::contains("cellar_escape"))
        .stdout(predicate::str::contains("3 scenarios"));
}

#[test]
fn show_scenario_details() {
    aw().args(["show", "library_escape"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The Abandoned Library"))
        .stdout(predicate::str::contains("Optimal turns: 12"))
        .stdout(predicate::str::contains("Time limit:    300s"));
}

#[test]
fn show_unknown_scenario_fails() {
    aw().args(["show", "moon_base"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: scenario 'moon_base' not found"));
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_script_to_victory() {
    let (_dir, path) = script(CELLAR_WIN);
    aw().args(["run", "cellar_escape", "--script"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ You picked up the iron key."))
        .stdout(predicate::str::contains("You escaped!"))
        .stdout(predicate::str::contains("Congratulations! You won!"))
        .stdout(predicate::str::contains("Status: completed | Turn: 3 | Score: 1030"))
        // The script stops at the winning move.
        .stdout(predicate::str::contains("> look").not());
}

#[test]
fn run_script_json_lines() {
    let (_dir, path) = script(CELLAR_WIN);
    let output = aw()
        .args(["run", "cellar_escape", "--json", "--script"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0]["initial_message"].as_str().unwrap().contains("Foot of the Stairs"));
    assert_eq!(lines[1]["turn_count"], 1);
    assert_eq!(lines[1]["game_status"], "in_progress");
    assert_eq!(lines[3]["game_status"], "completed");
    assert_eq!(lines[4]["status"], "completed");
    assert_eq!(lines[4]["score"], 1030);
    assert_eq!(lines[4]["agent_id"], "script");
}

#[test]
fn run_script_unfinished() {
    let (_dir, path) = script("look\nfly\n");
    aw().args(["run", "library_escape", "--script"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ Unknown command: fly"))
        .stdout(predicate::str::contains("Status: in_progress | Turn: 2"))
        .stdout(predicate::str::contains("still in progress"));
}

#[test]
fn run_missing_script_fails() {
    aw().args(["run", "cellar_escape", "--script", "/no/such/file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: failed to read"));
}

#[test]
fn run_unknown_scenario_fails() {
    let (_dir, path) = script("look\n");
    aw().args(["run", "moon_base", "--script"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("scenario moon_base not found"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_session_to_victory() {
    aw().args(["play", "cellar_escape"])
        .write_stdin("help\nstatus\ne\ntake iron key\ns\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Foot of the Stairs"))
        .stdout(predicate::str::contains("Available Commands:"))
        .stdout(predicate::str::contains("Game Commands:"))
        .stdout(predicate::str::contains("Status: in_progress | Turn: 0"))
        .stdout(predicate::str::contains("Congratulations! You won!"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn play_rejects_commands_after_the_end() {
    aw().args(["play", "cellar_escape"])
        .write_stdin("e\ntake iron key\ns\nlook\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("has already ended with status: completed"));
}

#[test]
fn play_unknown_scenario_fails() {
    aw().args(["play", "moon_base"])
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ---------------------------------------------------------------------------
// --scenarios / --config
// ---------------------------------------------------------------------------

#[test]
fn extra_scenarios_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("closet.json"),
        r#"{
    "id": "closet", "name": "The Closet", "difficulty": "easy",
    "description": "One step to freedom.", "optimal_turns": 1,
    "kind": "escape_room", "starting_room": "closet",
    "rooms": [
        { "id": "closet", "name": "Closet", "description": "Coats.", "exits": ["east"], "position": { "x": 0, "y": 0 } },
        { "id": "hall", "name": "Hall", "description": "Free!", "exits": ["west"], "is_exit": true, "position": { "x": 1, "y": 0 } }
    ]
}"#,
    )
    .unwrap();

    aw().arg("scenarios")
        .arg("--scenarios")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("closet"))
        .stdout(predicate::str::contains("4 scenarios"));

    let (_script_dir, path) = script("east\n");
    aw().args(["run", "closet", "--script"])
        .arg(&path)
        .arg("--scenarios")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 1020"));
}

#[test]
fn invalid_scenario_definition_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    aw().arg("scenarios")
        .arg("--scenarios")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn duplicate_scenario_id_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("bell.json"),
        r#"{ "id": "bell_timer", "name": "Again", "difficulty": "easy",
             "description": "", "optimal_turns": 4, "kind": "bell_timer" }"#,
    )
    .unwrap();
    aw().arg("scenarios")
        .arg("--scenarios")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("bell_timer"));
}

#[test]
fn config_file_changes_scoring() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("aw.toml");
    fs::write(&config, "seed_score = 2000\n").unwrap();

    let (_script_dir, path) = script(CELLAR_WIN);
    aw().args(["run", "cellar_escape", "--script"])
        .arg(&path)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 2030"));
}

#[test]
fn bad_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("aw.toml");
    fs::write(&config, "seed_score = \"lots\"\n").unwrap();
    aw().arg("scenarios")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}
