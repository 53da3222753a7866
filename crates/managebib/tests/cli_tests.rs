//! Integration tests for the managebib binary.
//!
//! These tests exercise the actual compiled binary using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const INPUT: &str = "\
% first comment
@article{zebra, title = {Z}}
% second comment
@book{Apple, title = {A}}
@misc{mango, year = 2020}
";

const SORTED: &str = "\
% first comment

@book{Apple,
    title = {A},
}

% second comment

@misc{mango,
    year = 2020,
}

@article{zebra,
    title = {Z},
}
";

/// Get a Command for the managebib binary
fn managebib_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("managebib"))
}

// ============================================================================
// Help and Usage
// ============================================================================

#[test]
fn test_no_command_prints_help_and_exits_2() {
    managebib_cmd()
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("format"));
}

#[test]
fn test_help_mentions_format() {
    managebib_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("BibTeX operations CLI"));
}

#[test]
fn test_out_and_in_place_conflict() {
    let dir = tempdir().unwrap();
    let bibfile = dir.path().join("refs.bib");
    fs::write(&bibfile, INPUT).unwrap();

    managebib_cmd()
        .arg("format")
        .arg(&bibfile)
        .args(["-o", "out.bib", "-i"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));

    assert_eq!(fs::read_to_string(&bibfile).unwrap(), INPUT);
}

#[test]
fn test_missing_bibfile_argument() {
    managebib_cmd()
        .arg("format")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<BIBFILE>"));
}

// ============================================================================
// Format
// ============================================================================

#[test]
fn test_format_to_stdout() {
    let dir = tempdir().unwrap();
    let bibfile = dir.path().join("refs.bib");
    fs::write(&bibfile, INPUT).unwrap();

    managebib_cmd()
        .arg("format")
        .arg(&bibfile)
        .assert()
        .success()
        .stdout(SORTED);

    assert_eq!(fs::read_to_string(&bibfile).unwrap(), INPUT);
}

#[test]
fn test_format_case_sensitive() {
    let dir = tempdir().unwrap();
    let bibfile = dir.path().join("refs.bib");
    fs::write(
        &bibfile,
        "@misc{apple, note = {a}}\n@misc{Banana, note = {b}}\n",
    )
    .unwrap();

    managebib_cmd()
        .arg("format")
        .arg(&bibfile)
        .assert()
        .success()
        .stdout("@misc{apple,\n    note = {a},\n}\n\n@misc{Banana,\n    note = {b},\n}\n");

    managebib_cmd()
        .arg("format")
        .arg(&bibfile)
        .arg("--case-sensitive")
        .assert()
        .success()
        .stdout("@misc{Banana,\n    note = {b},\n}\n\n@misc{apple,\n    note = {a},\n}\n");
}

#[test]
fn test_format_to_out_file() {
    let dir = tempdir().unwrap();
    let bibfile = dir.path().join("refs.bib");
    let out = dir.path().join("sorted.bib");
    fs::write(&bibfile, INPUT).unwrap();

    managebib_cmd()
        .arg("format")
        .arg(&bibfile)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(&out).unwrap(), SORTED);
    assert_eq!(fs::read_to_string(&bibfile).unwrap(), INPUT);
}

#[test]
fn test_format_in_place_twice_is_stable() {
    let dir = tempdir().unwrap();
    let bibfile = dir.path().join("refs.bib");
    fs::write(&bibfile, INPUT).unwrap();

    managebib_cmd()
        .arg("format")
        .arg("-i")
        .arg(&bibfile)
        .assert()
        .success();
    let first = fs::read_to_string(&bibfile).unwrap();
    assert_eq!(first, SORTED);

    managebib_cmd()
        .arg("format")
        .arg("--in-place")
        .arg(&bibfile)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&bibfile).unwrap(), first);
}

#[test]
fn test_malformed_block_warns_and_is_kept() {
    let dir = tempdir().unwrap();
    let bibfile = dir.path().join("refs.bib");
    fs::write(
        &bibfile,
        "@article{b, title = {B}}\n@article{broken, title = {x}\n@article{a, title = {A}}\n",
    )
    .unwrap();

    managebib_cmd()
        .arg("format")
        .arg(&bibfile)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "@article{a,\n    title = {A},\n}\n\n@article{broken, title = {x}\n\n@article{b,",
        ))
        .stderr(predicate::str::contains("could not parse block"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_input_file_fails() {
    let dir = tempdir().unwrap();

    managebib_cmd()
        .arg("format")
        .arg(dir.path().join("missing.bib"))
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("missing.bib"));
}

#[test]
fn test_unwritable_output_leaves_nothing_behind() {
    let dir = tempdir().unwrap();
    let bibfile = dir.path().join("refs.bib");
    let out = dir.path().join("no-such-dir").join("sorted.bib");
    fs::write(&bibfile, INPUT).unwrap();

    managebib_cmd()
        .arg("format")
        .arg(&bibfile)
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));

    assert!(!out.exists());
}
