//! Integration tests for the infoprox CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn infoprox() -> Command {
    Command::cargo_bin("infoprox").unwrap()
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_prints_banner_and_opening() {
    infoprox()
        .args(["play", "--seed", "42"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("INFOPROX: New game. A fantasy world of 10 rooms, seed 42.")
                .and(predicate::str::contains("You arrive in"))
                .and(predicate::str::contains("Score: 0 Turns: 1")),
        );
}

#[test]
fn play_ends_on_end_of_input() {
    infoprox()
        .args(["play", "-s", "3", "-t", "horror", "-r", "8"])
        .write_stdin("look\ninventory\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("A horror world of 8 rooms, seed 3.")
                .and(predicate::str::contains("You are carrying nothing.")),
        );
}

#[test]
fn play_answers_nonsense_politely() {
    infoprox()
        .args(["play", "--seed", "1"])
        .write_stdin("xyzzy\nscore\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("I don't understand that.")
                .and(predicate::str::contains("Score: 0 Turns: 2"))
                .and(predicate::str::contains("Score: 0 Turns: 3")),
        );
}

#[test]
fn play_clamps_room_count() {
    infoprox()
        .args(["play", "--seed", "5", "--rooms", "99"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("world of 15 rooms"));
}

#[test]
fn play_rejects_unknown_theme() {
    infoprox()
        .args(["play", "--theme", "western"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown theme"));
}

#[test]
fn map_command_draws_the_start() {
    infoprox()
        .args(["play", "--seed", "9"])
        .write_stdin("map\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Level 0:").and(predicate::str::contains("[@]")));
}

// ---------------------------------------------------------------------------
// save / load
// ---------------------------------------------------------------------------

#[test]
fn save_then_load_resumes_the_game() {
    let dir = TempDir::new().unwrap();
    let save = dir.path().join("slot.json");
    let save_arg = save.to_str().unwrap();

    infoprox()
        .args(["play", "--seed", "77", "--theme", "scifi"])
        .write_stdin(format!("look\nsave {save_arg}\nquit\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Game saved to {save_arg}.")));
    assert!(save.exists());

    infoprox()
        .args(["load", save_arg])
        .write_stdin("score\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("INFOPROX: Loaded game. A scifi world of 10 rooms, seed 77.")
                .and(predicate::str::contains("You are in"))
                .and(predicate::str::contains("Score: 0 Turns: 3")),
        );
}

#[test]
fn load_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    infoprox()
        .args(["load", dir.path().join("nope.json").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: cannot load"));
}

#[test]
fn load_malformed_file_fails() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{\"seed\": \"not a number\"}").unwrap();
    infoprox()
        .args(["load", bad.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed save"));
}

#[test]
fn in_game_load_error_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    infoprox()
        .args(["play", "--seed", "2"])
        .write_stdin(format!("load {}\nquit\n", missing.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("i/o error").and(predicate::str::contains("Score:")));
}

// ---------------------------------------------------------------------------
// inspect
// ---------------------------------------------------------------------------

#[test]
fn inspect_prints_rooms_and_verdict() {
    infoprox()
        .args(["inspect", "--seed", "42", "--rooms", "12"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("fantasy world, seed 42")
                .and(predicate::str::contains("12 rooms"))
                .and(predicate::str::contains("Role"))
                .and(predicate::str::contains("[goal]"))
                .and(predicate::str::contains("start"))
                .and(predicate::str::contains("verdict: solvable")),
        );
}

#[test]
fn inspect_is_deterministic() {
    let run = || {
        infoprox()
            .args(["inspect", "--seed", "314", "--theme", "horror"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn logging_goes_to_stderr() {
    infoprox()
        .env("INFOPROX_LOG", "debug")
        .args(["inspect", "--seed", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DEBUG").not())
        .stderr(predicate::str::contains("world generated"));
}
