//! Integration tests for the `parse2docs` binary.
//!
//! Each test runs the compiled binary against a fixture script and checks the
//! Markdown on stdout or the error on stderr.

mod common;

use common::{fixture, run_parse2docs};

#[test]
fn documents_module_scope_parser() {
    let result = run_parse2docs(&fixture("demo_parser_in_module.toml"));
    assert!(result.success, "stderr: {}", result.stderr);

    let expected = "\
# Usage Documentation

## Description

A simple file copy script.

## Overall Usage Example

`demo_parser_in_module.toml -s <source_path> -d <dest_path> [-v]`

## Table of Contents

- [source](#source)
- [destination](#destination)
- [verbose](#verbose)

## Options

### source

Source file path

**Flags**: `-s, --source`

**Type**: `str`

**Required**: Yes

#### Example Usage

`-s <source_path>`

### destination

Destination file path

**Flags**: `-d, --destination`

**Type**: `str`

**Required**: Yes

#### Example Usage

`-d <dest_path>`

### verbose

Enable verbose mode

**Flags**: `-v, --verbose`

**Required**: No


";
    assert_eq!(result.stdout, expected);
}

#[test]
fn documents_parser_returned_by_function() {
    let result = run_parse2docs(&fixture("demo_parser_in_function.toml"));
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(result.stdout.contains(
        "`demo_parser_in_function.toml -s <value> -d <value> [-v]`"
    ));
    assert!(result
        .stdout
        .contains("Source file path. Example: -s '/path/to/source'"));
    assert!(!result.stdout.contains("#### Example Usage"));
}

#[test]
fn documents_json_script_with_positional() {
    let result = run_parse2docs(&fixture("positional.json"));
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(result.stdout.contains("`positional.json <template> [-o <value>]`"));
    assert!(result.stdout.contains("**Type**: `file`"));
    assert!(result.stdout.contains("**Type**: `Path`"));
    assert!(result.stdout.contains("#### Example Usage\n\n`TEMPLATE`\n"));
}

#[test]
fn missing_file_exits_non_zero_without_output() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let result = run_parse2docs(&dir.path().join("nope.toml"));
    assert!(!result.success);
    assert!(result.stdout.is_empty());
    assert!(result.stderr.contains("does not exist"), "stderr: {}", result.stderr);
}

#[test]
fn script_without_parser_exits_non_zero() {
    let result = run_parse2docs(&fixture("no_parser.toml"));
    assert!(!result.success);
    assert!(result.stdout.is_empty());
    assert!(
        result.stderr.contains("no argument definition found"),
        "stderr: {}",
        result.stderr
    );
    assert!(result.stderr.contains("no_parser.toml"));
}

#[test]
fn malformed_script_reports_load_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[parser\nkind = \"parser\"\n").expect("write script");
    let result = run_parse2docs(&path);
    assert!(!result.success);
    assert!(result.stdout.is_empty());
    assert!(result.stderr.contains("parse TOML script"), "stderr: {}", result.stderr);
}

#[test]
fn misspelled_kind_reports_load_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("typo.toml");
    std::fs::write(&path, "[parser]\nkind = \"Parser\"\n").expect("write script");
    let result = run_parse2docs(&path);
    assert!(!result.success);
    assert!(result.stdout.is_empty());
    assert!(result.stderr.contains("unknown kind \"Parser\""), "stderr: {}", result.stderr);
    assert!(!result.stderr.contains("no argument definition found"));
}

#[test]
fn missing_argument_prints_usage_error() {
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_parse2docs"))
        .output()
        .expect("run parse2docs");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("<FILE_PATH>"));
}
