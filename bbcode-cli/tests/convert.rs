use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const DOCUMENT: &str = r#"{
  "children": [
    {
      "type": "element",
      "name": "paragraph",
      "children": [
        { "type": "text", "data": "Hello " },
        { "type": "text", "data": "world", "attributes": { "bold": true } }
      ]
    },
    {
      "type": "element",
      "name": "listItem",
      "attributes": { "listType": "numbered" },
      "children": [{ "type": "text", "data": "first" }]
    }
  ]
}"#;

#[test]
fn convert_prints_bbcode_to_stdout() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.json");
    fs::write(&input_path, DOCUMENT).unwrap();

    let mut cmd = cargo_bin_cmd!("bbcode");
    cmd.current_dir(dir.path())
        .arg("convert")
        .arg(input_path.as_os_str());

    cmd.assert()
        .success()
        .stdout("Hello [b]world[/b]\n\n[list=1][*]first\n[/list]\n");
}

#[test]
fn convert_is_the_default_command() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.json");
    fs::write(&input_path, DOCUMENT).unwrap();

    let mut cmd = cargo_bin_cmd!("bbcode");
    cmd.current_dir(dir.path()).arg(input_path.as_os_str());

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("Hello [b]world[/b]"));
}

#[test]
fn convert_writes_output_file() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.json");
    let output_path = dir.path().join("post.txt");
    fs::write(&input_path, DOCUMENT).unwrap();

    let mut cmd = cargo_bin_cmd!("bbcode");
    cmd.current_dir(dir.path())
        .arg("convert")
        .arg(input_path.as_os_str())
        .arg("-o")
        .arg(output_path.as_os_str());

    cmd.assert().success().stdout("");
    assert_eq!(
        fs::read_to_string(&output_path).unwrap(),
        "Hello [b]world[/b]\n\n[list=1][*]first\n[/list]"
    );
}

#[test]
fn convert_reads_stdin() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("bbcode");
    cmd.current_dir(dir.path())
        .arg("-")
        .write_stdin(r#"{"children": [{"type": "text", "data": "plain", "attributes": {"italic": true}}]}"#);

    cmd.assert().success().stdout("[i]plain[/i]\n");
}

#[test]
fn convert_empty_document() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("bbcode");
    cmd.current_dir(dir.path())
        .args(["convert", "-"])
        .write_stdin(r#"{"children": []}"#);

    cmd.assert().success().stdout("\n");
}

#[test]
fn convert_strict_accepts_rendered_documents() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.json");
    fs::write(&input_path, DOCUMENT).unwrap();

    let mut cmd = cargo_bin_cmd!("bbcode");
    cmd.current_dir(dir.path())
        .arg("convert")
        .arg(input_path.as_os_str())
        .arg("--strict");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[list=1][*]first"));
}

#[test]
fn convert_reports_missing_input() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("bbcode");
    cmd.current_dir(dir.path()).args(["convert", "missing.json"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file 'missing.json'"));
}

#[test]
fn convert_reports_invalid_documents() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("bbcode");
    cmd.current_dir(dir.path())
        .args(["convert", "-"])
        .write_stdin(r#"{"children": [{"type": "image"}]}"#);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid document"));
}
