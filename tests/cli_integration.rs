//! Integration tests for the Templately CLI
//!
//! These run the actual binary and verify exit codes, stderr diagnostics, and
//! the produced output bytes.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn templately_cmd() -> Command {
    Command::cargo_bin("templately").expect("Binary should build")
}

/// Write a template and one content file per binding into a fresh directory
fn workspace(template: &str, parts: &[(&str, &str)]) -> (TempDir, PathBuf, Vec<String>) {
    let dir = TempDir::new().expect("Should create temp dir");
    let template_path = dir.path().join("template.txt");
    fs::write(&template_path, template).expect("Should write template");

    let bindings = parts
        .iter()
        .map(|(name, content)| {
            let path = dir.path().join(format!("{name}.txt"));
            fs::write(&path, content).expect("Should write part");
            format!("{name}={}", path.display())
        })
        .collect();

    (dir, template_path, bindings)
}

#[test]
fn test_help_flag() {
    templately_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Inject file contents into a template's named placeholders",
        ));
}

#[test]
fn test_version_flag() {
    templately_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("templately"));
}

#[test]
fn test_successful_injection() {
    let (dir, template_path, bindings) = workspace(
        "this {{ ty.a }} is a {{ ty.b }} test\n",
        &[("a", "X\n"), ("b", "Y\n")],
    );
    let output = dir.path().join("out.txt");

    templately_cmd()
        .arg(&template_path)
        .arg(&output)
        .args(&bindings)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).expect("Should read"),
        "this X\n is a Y\n test\n"
    );
}

#[test]
fn test_missing_template_exits_1() {
    let dir = TempDir::new().expect("Should create temp dir");
    let output = dir.path().join("out.txt");

    templately_cmd()
        .arg(dir.path().join("no-such-template.txt"))
        .arg(&output)
        .arg("a=whatever.txt")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Template file not found"));
}

#[test]
fn test_template_must_be_a_regular_file() {
    let dir = TempDir::new().expect("Should create temp dir");
    let output = dir.path().join("out.txt");

    templately_cmd()
        .arg(dir.path()) // a directory, not a file
        .arg(&output)
        .arg("a=whatever.txt")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Template file not found"));
}

#[test]
fn test_missing_output_directory_exits_3() {
    let (dir, template_path, bindings) = workspace("{{ ty.a }}\n", &[("a", "X")]);
    let output = dir.path().join("no").join("such").join("dir").join("out.txt");

    templately_cmd()
        .arg(&template_path)
        .arg(&output)
        .args(&bindings)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("output directory does not exist"));
}

#[test]
fn test_validation_failure_exits_2_and_reports_everything() {
    let (dir, template_path, _) = workspace("{{ ty.a }} {{ ty.b }}\n", &[]);
    let output = dir.path().join("out.txt");

    templately_cmd()
        .arg(&template_path)
        .arg(&output)
        .arg("broken")
        .arg("a=missing.file")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("malformed binding"))
        .stderr(predicate::str::contains("file to inject does not exist"))
        .stderr(predicate::str::contains(
            "bindings do not match template placeholders",
        ));

    assert!(!output.exists(), "no partial output on validation failure");
}

#[test]
fn test_quiet_flag_suppresses_diagnostics() {
    let (dir, template_path, _) = workspace("{{ ty.a }}\n", &[]);
    let output = dir.path().join("out.txt");

    templately_cmd()
        .arg("--quiet")
        .arg(&template_path)
        .arg(&output)
        .arg("a=missing.file")
        .assert()
        .code(2)
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_custom_delimiters_via_flags() {
    let (dir, template_path, bindings) =
        workspace("a %% template.one $$ b\n", &[("one", "X")]);
    let output = dir.path().join("out.txt");

    templately_cmd()
        .args(["--ot", "%%", "--po", "template.", "--ct", "$$"])
        .arg(&template_path)
        .arg(&output)
        .args(&bindings)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).expect("Should read"), "a X b\n");
}

#[test]
fn test_custom_delimiters_via_syntax_file() {
    let (dir, template_path, bindings) = workspace("<< x.one >>\n", &[("one", "X")]);
    let output = dir.path().join("out.txt");
    let syntax_path = dir.path().join("syntax.toml");
    fs::write(
        &syntax_path,
        "[delimiters]\nopening-tag = \"<<\"\nname-prefix = \"x.\"\nclosing-tag = \">>\"\n",
    )
    .expect("Should write syntax file");

    templately_cmd()
        .arg("--syntax")
        .arg(&syntax_path)
        .arg(&template_path)
        .arg(&output)
        .args(&bindings)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).expect("Should read"), "X\n");
}

#[test]
fn test_flags_override_syntax_file() {
    let (dir, template_path, bindings) = workspace("%% x.one >>\n", &[("one", "X")]);
    let output = dir.path().join("out.txt");
    let syntax_path = dir.path().join("syntax.toml");
    fs::write(
        &syntax_path,
        "[delimiters]\nopening-tag = \"<<\"\nname-prefix = \"x.\"\nclosing-tag = \">>\"\n",
    )
    .expect("Should write syntax file");

    templately_cmd()
        .arg("--syntax")
        .arg(&syntax_path)
        .args(["--ot", "%%"])
        .arg(&template_path)
        .arg(&output)
        .args(&bindings)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).expect("Should read"), "X\n");
}

#[test]
fn test_output_is_fully_overwritten() {
    let (dir, template_path, bindings) = workspace("{{ ty.a }}\n", &[("a", "new")]);
    let output = dir.path().join("out.txt");
    fs::write(&output, "previous output that was much longer than the new one")
        .expect("Should write");

    templately_cmd()
        .arg(&template_path)
        .arg(&output)
        .args(&bindings)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).expect("Should read"), "new\n");
}
