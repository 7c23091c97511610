#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn zxml() -> Command {
    Command::cargo_bin("zxml").expect("binary built")
}

#[test]
fn prints_formatted_document() {
    zxml()
        .arg("tests/input/simple.xml")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<?xml\n  version=\"1.0\""))
        .stdout(predicate::str::contains("  <!-- reminder -->\n"))
        .stdout(predicate::str::ends_with("</note>\n"));
}

#[test]
fn missing_argument_is_a_usage_error() {
    zxml()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_file_fails() {
    zxml()
        .arg("does/not/exist.xml")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn parse_error_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bad.xml");
    fs::write(&path, "<a></b>").expect("write input");

    zxml()
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("mismatching start tag a and end tag b"));
}

#[test]
fn writes_output_file_with_options() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("in.xml");
    let output = dir.path().join("out.xml");
    fs::write(&input, "<a z=\"1\" b=\"2\"><c/></a>").expect("write input");

    zxml()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--indent", "4", "--sort-attributes"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(
        fs::read_to_string(&output).expect("read output"),
        "<a\n    b=\"2\"\n    z=\"1\"\n>\n    <c/>\n</a>\n"
    );
}

#[test]
fn max_depth_flag_limits_nesting() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("deep.xml");
    fs::write(&path, format!("{}{}", "<a>".repeat(40), "</a>".repeat(40))).expect("write input");

    zxml()
        .arg(&path)
        .args(["--max-depth", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Maximum nesting depth exceeded"));
}

#[test]
fn formats_long_flat_documents() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("flat.xml");
    fs::write(&path, format!("<a>{}</a>", "<b/>".repeat(3_000))).expect("write input");

    zxml()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<a>\n  <b/>\n  <b/>\n"))
        .stdout(predicate::str::ends_with("  <b/>\n</a>\n"));
}
