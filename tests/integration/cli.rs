use assert_cmd::Command;
use predicates::prelude::*;

use crate::common::{DICT, Workspace};

fn word_count() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_word-count"));
    cmd.env_remove("WORD_COUNT_USE_MMAP_IO");
    cmd
}

#[test]
fn shows_help() {
    word_count()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--use-mmap-io"))
        .stdout(predicate::str::contains("DICT"));
}

#[test]
fn shows_version() {
    word_count()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("word-count "));
}

#[test]
fn dictionary_is_required() {
    word_count()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<DICT>"));
}

#[test]
fn rejects_unknown_mmap_spec() {
    let ws = Workspace::new();
    let dict = ws.file("dict.txt", DICT);
    word_count()
        .args(["--use-mmap-io", "sometimes", dict.as_str()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("sometimes"));
}

#[test]
fn rejects_oversized_table() {
    word_count()
        .args(["--table-size", "5000000000", "dict.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--table-size"));
}

#[test]
fn missing_dictionary_is_fatal() {
    let ws = Workspace::new();
    let missing = ws.path().join("absent.txt");
    word_count()
        .arg(&missing)
        .write_stdin("")
        .assert()
        .code(127)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with(
            "word-count: error: failed opening dictionary file",
        ));
}

#[test]
fn missing_text_is_fatal() {
    let ws = Workspace::new();
    let dict = ws.file("dict.txt", DICT);
    let missing = ws.path().join("absent.txt");
    word_count()
        .arg(&dict)
        .arg(&missing)
        .assert()
        .code(127)
        .stderr(predicate::str::contains("failed opening input file"));
}

#[test]
fn mapping_a_pipe_is_rejected() {
    let ws = Workspace::new();
    let dict = ws.file("dict.txt", DICT);
    word_count()
        .args(["-m", "text", dict.as_str()])
        .write_stdin("apple\n")
        .assert()
        .code(127)
        .stderr(predicate::str::contains("input file '<stdin>'"));
}

#[test]
fn warnings_name_the_line() {
    let ws = Workspace::new();
    let dict = ws.file("dict.txt", b"apple\nbanana\n# comment\n\nbanana\nki\0wi\n");
    word_count()
        .arg(&dict)
        .write_stdin("kiwi ki\n")
        .assert()
        .success()
        .stdout("1\tki\n2\ttotal\n")
        .stderr(predicate::str::contains(
            "word-count: warning: duplicated word in line #5: 'banana'",
        ))
        .stderr(predicate::str::contains(
            "word-count: warning: NUL char in line #6: truncating it from length 5 to 2",
        ));
}

#[test]
fn json_statistics_go_to_stderr() {
    let ws = Workspace::new();
    let dict = ws.file("dict.txt", b"apple\nbanana\n");
    let output = word_count()
        .args(["--print-stats=json", dict.as_str()])
        .write_stdin("apple fig\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout, b"1\tapple\n2\ttotal\n");

    let report: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(report["table"]["inserts"], 2);
    assert_eq!(report["table"]["lookups"], 2);
    assert_eq!(report["table"]["hits"], 1);
    assert_eq!(report["table"]["rehashes"], 0);
    assert_eq!(report["table"]["final_size"], 1031);
}

#[test]
fn text_statistics_follow_the_counts() {
    let ws = Workspace::new();
    let dict = ws.file("dict.txt", b"apple\n");
    word_count()
        .args(["--print-stats", dict.as_str()])
        .write_stdin("apple\n")
        .assert()
        .success()
        .stdout("1\tapple\n1\ttotal\n")
        .stderr(predicate::str::contains("table:"))
        .stderr(predicate::str::contains("time (ms):"));
}
