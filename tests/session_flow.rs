//! End-to-end tests driving the trailbook binary over scripted stdin.
//!
//! Each test points the binary at a diary file inside a fresh temp
//! directory via `--data`, feeds a command script on stdin, and checks
//! the output and the persisted file.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn diary_path(dir: &TempDir) -> PathBuf {
    dir.path().join("data").join("travel_diary.trd")
}

fn session(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("trailbook").unwrap();
    cmd.current_dir(dir.path())
        .arg("--data")
        .arg(diary_path(dir))
        .arg("session");
    cmd
}

#[test]
fn create_select_add_photo_and_exit() {
    let dir = TempDir::new().unwrap();

    session(&dir)
        .write_stdin(
            "add_trip n=Japan d=Cherry blossoms l=Kyoto\n\
             select 1\n\
             add_photo f=img1.jpg n=Temple c=so; pretty l=Kyoto t=20240401120000\n\
             bye\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Added trip: Japan"))
        .stdout(predicate::str::contains("Selected trip: Japan"))
        .stdout(predicate::str::contains("Added photo: Temple"))
        .stdout(predicate::str::contains("Alvida"));

    // The persisted file carries escaped structural characters.
    let contents = std::fs::read_to_string(diary_path(&dir)).unwrap();
    assert!(contents.contains("T:Japan;Cherry blossoms;Kyoto"));
    assert!(contents.contains("so\\semicolon pretty"));
    assert!(contents.contains("20240401120000"));
}

#[test]
fn reload_preserves_caption_and_timestamp() {
    let dir = TempDir::new().unwrap();

    session(&dir)
        .write_stdin(
            "add_trip n=Japan d=Cherry blossoms l=Kyoto\n\
             select 1\n\
             add_photo f=img1.jpg n=Temple c=so; pretty l=Kyoto t=20240401120000\n\
             bye\n",
        )
        .assert()
        .success();

    // A second session reloads the same collection from disk;
    // selecting by name must find the persisted trip.
    session(&dir)
        .write_stdin("select Japan\nlist\nbye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected trip: Japan"))
        .stdout(predicate::str::contains("so; pretty"))
        .stdout(predicate::str::contains("[2024-04-01 12:00:00]"));
}

#[test]
fn photo_command_without_selection_reports_guidance() {
    let dir = TempDir::new().unwrap();

    session(&dir)
        .write_stdin("add_photo f=a.jpg n=A\nbye\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("select a trip first"));
}

#[test]
fn failed_command_does_not_end_the_session() {
    let dir = TempDir::new().unwrap();

    // Unknown command, then a missing parameter, then a valid command:
    // the valid one must still run.
    session(&dir)
        .write_stdin(
            "frobnicate\n\
             add_trip d=forgot the name\n\
             add_trip n=Norway\n\
             bye\n",
        )
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown command"))
        .stderr(predicate::str::contains("Missing compulsory parameter"))
        .stdout(predicate::str::contains("Added trip: Norway"));
}

#[test]
fn end_of_input_is_a_graceful_exit() {
    let dir = TempDir::new().unwrap();

    // No 'bye': the script just ends.
    session(&dir)
        .write_stdin("add_trip n=Japan\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alvida"));

    assert!(diary_path(&dir).exists());
}

#[test]
fn list_subcommand_prints_trips_one_shot() {
    let dir = TempDir::new().unwrap();

    session(&dir)
        .write_stdin("add_trip n=Japan d=Cherry blossoms\nbye\n")
        .assert()
        .success();

    Command::cargo_bin("trailbook")
        .unwrap()
        .current_dir(dir.path())
        .arg("--data")
        .arg(diary_path(&dir))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Japan"))
        .stdout(predicate::str::contains("Cherry blossoms"));
}

#[test]
fn list_subcommand_with_no_diary_file() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("trailbook")
        .unwrap()
        .current_dir(dir.path())
        .arg("--data")
        .arg(diary_path(&dir))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips recorded."));
}

#[test]
fn path_subcommand_prints_resolved_path() {
    let dir = TempDir::new().unwrap();
    let path = diary_path(&dir);

    Command::cargo_bin("trailbook")
        .unwrap()
        .arg("--data")
        .arg(&path)
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains(path.to_string_lossy().as_ref()));
}

#[test]
fn malformed_line_in_diary_is_tolerated() {
    let dir = TempDir::new().unwrap();
    let path = diary_path(&dir);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        "T:Japan;Cherry blossoms;Kyoto\n\
         this line is garbage\n\
         P:img1.jpg;Temple;so\\semicolon pretty;Kyoto;20240401120000\n",
    )
    .unwrap();

    session(&dir)
        .write_stdin("list\nbye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Japan"));
}
