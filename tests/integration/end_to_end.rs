use assert_cmd::Command;

use crate::common::{DICT, TEXT, Workspace, counted};

fn word_count() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_word-count"));
    cmd.env_remove("WORD_COUNT_USE_MMAP_IO");
    cmd
}

fn expect_example(output: &std::process::Output) {
    assert!(output.status.success(), "{output:?}");
    assert_eq!(counted(&output.stdout), vec!["1\tbanana", "2\tapple"]);
    assert!(output.stdout.ends_with(b"4\ttotal\n"));
}

#[test]
fn counts_named_texts_in_every_mmap_mode() {
    let ws = Workspace::new();
    let dict = ws.file("dict.txt", DICT);
    let text = ws.file("text.txt", TEXT);

    for spec in ["none", "dict", "text", "all", "+", "-"] {
        let output = word_count()
            .args(["--use-mmap-io", spec, dict.as_str(), text.as_str()])
            .output()
            .unwrap();
        expect_example(&output);
    }
}

#[test]
fn counts_standard_input() {
    let ws = Workspace::new();
    let dict = ws.file("dict.txt", DICT);
    let output = word_count().arg(&dict).write_stdin(TEXT).output().unwrap();
    expect_example(&output);
}

#[test]
fn environment_selects_mmap_io() {
    let ws = Workspace::new();
    let dict = ws.file("dict.txt", DICT);
    let text = ws.file("text.txt", TEXT);

    for value in ["all", "dict", "nonsense"] {
        let output = word_count()
            .env("WORD_COUNT_USE_MMAP_IO", value)
            .args([&dict, &text])
            .output()
            .unwrap();
        expect_example(&output);
    }

    // stdin is a pipe here: text mapping from the environment must lose to
    // the command line
    let output = word_count()
        .env("WORD_COUNT_USE_MMAP_IO", "all")
        .args(["-m", "dict", dict.as_str()])
        .write_stdin(TEXT)
        .output()
        .unwrap();
    expect_example(&output);
}

#[test]
fn totals_span_all_texts() {
    let ws = Workspace::new();
    let dict = ws.file("dict.txt", DICT);
    let first = ws.file("first.txt", TEXT);
    let second = ws.file("second.txt", b"banana\n\n  \n");
    let empty = ws.file("empty.txt", b"");

    let output = word_count()
        .args([&dict, &first, &second, &empty])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(counted(&output.stdout), vec!["2\tapple", "2\tbanana"]);
    assert!(output.stdout.ends_with(b"5\ttotal\n"));
}

#[test]
fn tuning_options_do_not_change_results() {
    let ws = Workspace::new();
    let words: Vec<String> = (0..2000).map(|i| format!("word{i}")).collect();
    let dict = ws.file("dict.txt", words.join("\n").as_bytes());
    let text: String = words.iter().rev().map(|w| format!("{w}\n")).collect();
    let text = ws.file("text.txt", text.as_bytes());

    let baseline = word_count().args([&dict, &text]).output().unwrap();
    assert!(baseline.status.success());
    assert!(baseline.stdout.ends_with(b"2000\ttotal\n"));

    for extra in [
        vec!["--buffer-size", "8", "--buffer-growth", "linear"],
        vec!["--buffer-size", "3"],
        vec!["--table-size", "1", "--hash", "xxh32"],
        vec!["-m", "all", "--table-size", "0"],
    ] {
        let output = word_count()
            .args(&extra)
            .args([&dict, &text])
            .output()
            .unwrap();
        assert!(output.status.success(), "{extra:?}");
        assert_eq!(counted(&output.stdout), counted(&baseline.stdout), "{extra:?}");
        assert!(output.stdout.ends_with(b"2000\ttotal\n"));
    }
}
