//! Binary tests for input validation. None of these reach the network.

use assert_cmd::Command;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use predicates::prelude::*;
use tempfile::TempDir;

const INPUTS: &[&str] = &[
    "INPUT_FILENAME",
    "INPUT_NAME",
    "INPUT_FOLDERID",
    "INPUT_CREDENTIALS",
    "INPUT_OVERWRITE",
    "INPUT_MIMETYPE",
    "INPUT_USECOMPLETESOURCEFILENAMEASNAME",
    "INPUT_MIRRORDIRECTORYSTRUCTURE",
    "INPUT_NAMEPREFIX",
];

fn command() -> Command {
    let mut cmd = Command::cargo_bin("google-drive-upload").expect("binary exists");
    for input in INPUTS {
        cmd.env_remove(input);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

/// A working directory holding `a.txt`, so `*.txt` matches.
fn workdir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "a").unwrap();
    dir
}

fn encoded_key() -> String {
    STANDARD.encode(
        "{\"client_email\":\"ci@example.iam.gserviceaccount.com\",\"private_key\":\"not-a-key\"}\n",
    )
}

#[test]
fn missing_filename_fails_first() {
    command()
        .env("INPUT_FOLDERID", "folder")
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::").and(predicate::str::contains(
            "missing input 'filename'",
        )));
}

#[test]
fn missing_folder_id_fails() {
    let dir = workdir();

    command()
        .current_dir(dir.path())
        .env("INPUT_FILENAME", "*.txt")
        .env("INPUT_CREDENTIALS", encoded_key())
        .assert()
        .failure()
        .stdout(predicate::str::contains("missing input 'folderId'"));
}

#[test]
fn unmatched_pattern_reported_before_missing_folder_id() {
    let dir = tempfile::tempdir().unwrap();

    command()
        .current_dir(dir.path())
        .env("INPUT_FILENAME", "*.nothing")
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("No file found! pattern: *.nothing")
                .and(predicate::str::contains("folderId").not()),
        );
}

#[test]
fn empty_credentials_count_as_missing() {
    let dir = workdir();

    command()
        .current_dir(dir.path())
        .args(["--filename", "*.txt", "--folder-id", "folder"])
        .env("INPUT_CREDENTIALS", "")
        .assert()
        .failure()
        .stdout(predicate::str::contains("missing input 'credentials'"));
}

#[test]
fn invalid_boolean_input_fails() {
    let dir = workdir();

    command()
        .current_dir(dir.path())
        .env("INPUT_FILENAME", "*.txt")
        .env("INPUT_FOLDERID", "folder")
        .env("INPUT_CREDENTIALS", encoded_key())
        .env("INPUT_OVERWRITE", "maybe")
        .assert()
        .failure()
        .stdout(predicate::str::contains("invalid value for input 'overwrite'"));
}

#[test]
fn bad_base64_is_masked_then_rejected() {
    let dir = workdir();

    command()
        .current_dir(dir.path())
        .env("INPUT_FILENAME", "*.txt")
        .env("INPUT_FOLDERID", "folder")
        .env("INPUT_CREDENTIALS", "not base64!")
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("::add-mask::not base64!")
                .and(predicate::str::contains("base64 decoding of 'credentials' failed")),
        );
}

#[test]
fn unset_flags_announce_defaults() {
    let dir = workdir();

    command()
        .current_dir(dir.path())
        .env("INPUT_FILENAME", "*.txt")
        .env("INPUT_FOLDERID", "folder")
        .env("INPUT_CREDENTIALS", "not base64!")
        .assert()
        .failure()
        .stdout(predicate::str::contains("::warning::Overwrite is disabled."))
        .stderr(
            predicate::str::contains("useCompleteSourceFilenameAsName is disabled.")
                .and(predicate::str::contains("mirrorDirectoryStructure is disabled.")),
        );
}

#[test]
fn explicit_false_flags_stay_quiet() {
    let dir = workdir();

    command()
        .current_dir(dir.path())
        .env("INPUT_FILENAME", "*.txt")
        .env("INPUT_FOLDERID", "folder")
        .env("INPUT_CREDENTIALS", "not base64!")
        .env("INPUT_OVERWRITE", "false")
        .env("INPUT_USECOMPLETESOURCEFILENAMEASNAME", "false")
        .env("INPUT_MIRRORDIRECTORYSTRUCTURE", "0")
        .assert()
        .failure()
        .stdout(predicate::str::contains("::warning::").not())
        .stderr(predicate::str::contains("is disabled.").not());
}

#[test]
fn pretty_printed_key_masks_values_not_braces() {
    let dir = workdir();
    let document = "{\n  \"type\": \"service_account\",\n  \"private_key\": \"abc\"\n}\n";

    command()
        .current_dir(dir.path())
        .env("INPUT_FILENAME", "*.txt")
        .env("INPUT_FOLDERID", "folder")
        .env("INPUT_CREDENTIALS", STANDARD.encode(document))
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("::add-mask::\"private_key\": \"abc\"")
                .and(predicate::str::contains("::add-mask::{\n").not())
                .and(predicate::str::contains("::add-mask::}\n").not())
                .and(predicate::str::contains("fetching JWT credentials failed")),
        );
}

#[test]
fn unmatched_pattern_fails_before_credentials_are_read() {
    let dir = tempfile::tempdir().unwrap();

    command()
        .current_dir(dir.path())
        .env("INPUT_FILENAME", "*.nothing")
        .env("INPUT_FOLDERID", "folder")
        .env("INPUT_CREDENTIALS", encoded_key())
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("No file found! pattern: *.nothing")
                .and(predicate::str::contains("::add-mask::").not()),
        );
}

#[test]
fn single_line_key_is_masked_whole() {
    let dir = workdir();
    let document = "{\"client_email\":\"ci@example.iam.gserviceaccount.com\"}\n";
    let key = STANDARD.encode(document);

    command()
        .current_dir(dir.path())
        .env("INPUT_FILENAME", "*.txt")
        .env("INPUT_FOLDERID", "folder")
        .env("INPUT_CREDENTIALS", &key)
        .assert()
        .failure()
        .stdout(
            predicate::str::contains(format!("::add-mask::{}", key))
                .and(predicate::str::contains(
                    "::add-mask::{\"client_email\":\"ci@example.iam.gserviceaccount.com\"}",
                ))
                .and(predicate::str::contains("fetching JWT credentials failed")),
        );
}

#[test]
fn help_lists_inputs() {
    command()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--folder-id")
                .and(predicate::str::contains("--mirror-directory-structure"))
                .and(predicate::str::contains("INPUT_FILENAME")),
        );
}
