//! Integration tests for reader CLI

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

fn run_reader(args: &[&str]) -> (String, String, bool) {
    let mut cmd_args = vec!["run", "-q", "-p", "reader", "--"];
    cmd_args.extend(args);

    let output = Command::new("cargo")
        .args(&cmd_args)
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

fn create_test_files(dir: &Path) {
    fs::write(dir.join("a.txt"), "hello world\n// comment\n\nbye!\n").unwrap();
    fs::write(dir.join("b.txt"), "second\n").unwrap();
    fs::write(dir.join("c.md"), "# title\n").unwrap();
    fs::create_dir_all(dir.join("sub")).unwrap();
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_reader(&["--help"]);

    assert!(success);
    assert!(stdout.contains("reader"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("transform"));
    assert!(stdout.contains("inspect"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_reader(&["--version"]);

    assert!(success);
    assert!(stdout.contains("reader"));
}

#[test]
fn test_list_filtered() {
    let temp = tempdir().unwrap();
    create_test_files(temp.path());
    let dir = temp.path().to_str().unwrap();

    let (stdout, _, success) = run_reader(&["list", dir, "-x", ".txt", "--name", "docs"]);

    assert!(success);
    assert!(stdout.contains("List of .txt files in"));
    assert!(stdout.contains("docs"));
    assert!(stdout.contains("2 files"));
    assert!(stdout.contains("a.txt"));
    assert!(stdout.contains("b.txt"));
    assert!(!stdout.contains("c.md"));
}

#[test]
fn test_list_wildcard_with_binary_file() {
    let temp = tempdir().unwrap();
    create_test_files(temp.path());
    fs::write(
        temp.path().join("logo.png"),
        [0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe, 0x0a],
    )
    .unwrap();
    let dir = temp.path().to_str().unwrap();

    let (stdout, _, success) = run_reader(&["list", dir]);

    assert!(success);
    assert!(stdout.contains("4 files"));
    assert!(stdout.contains("logo.png"));
}

#[test]
fn test_list_json() {
    let temp = tempdir().unwrap();
    create_test_files(temp.path());
    let dir = temp.path().to_str().unwrap();

    let (stdout, _, success) = run_reader(&["list", dir, "--output", "json"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    let members = parsed["members"].as_array().unwrap();
    assert_eq!(members.len(), 3);
    assert_eq!(members[0]["full_name"], "a.txt");
    assert_eq!(parsed["filters"][0], "*");
}

#[test]
fn test_transform_protected_write() {
    let temp = tempdir().unwrap();
    create_test_files(temp.path());
    let file = temp.path().join("a.txt");

    let (stdout, _, success) = run_reader(&[
        "transform",
        file.to_str().unwrap(),
        "--strip-comments",
        "--strip-blank",
        "--force",
    ]);

    assert!(success);
    assert!(stdout.contains("a.txt.otf"));
    assert_eq!(
        fs::read_to_string(temp.path().join("a.txt.otf")).unwrap(),
        "hello world\nbye!\n"
    );
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "hello world\n// comment\n\nbye!\n"
    );
}

#[test]
fn test_transform_dry_run_tokens() {
    let temp = tempdir().unwrap();
    create_test_files(temp.path());
    let file = temp.path().join("a.txt");

    let (stdout, _, success) = run_reader(&[
        "transform",
        file.to_str().unwrap(),
        "--strip-comments",
        "--split",
        "punct",
        "--dry-run",
    ]);

    assert!(success);
    assert_eq!(stdout, "hello\nworld\nbye\n!");
    assert!(!temp.path().join("a.txt.otf").exists());
}

#[test]
fn test_transform_overwrite_unprotected() {
    let temp = tempdir().unwrap();
    create_test_files(temp.path());
    let file = temp.path().join("a.txt");

    let (_, _, success) = run_reader(&[
        "transform",
        file.to_str().unwrap(),
        "--strip-blank",
        "--unprotect",
        "--force",
    ]);

    assert!(success);
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "hello world\n// comment\nbye!\n"
    );
}

#[test]
fn test_transform_missing_file() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("missing.txt");

    let (_, stderr, success) = run_reader(&["transform", file.to_str().unwrap()]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_list_invalid_path() {
    let (_, stderr, success) = run_reader(&["list", "/nonexistent/path"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_inspect_directory() {
    let temp = tempdir().unwrap();
    create_test_files(temp.path());

    let (stdout, _, success) = run_reader(&["inspect", temp.path().to_str().unwrap()]);

    assert!(success);
    assert!(stdout.contains("type:        directory"));
    assert!(stdout.contains("entries:     4"));
    assert!(stdout.contains("c.md"));
}

#[test]
fn test_inspect_json() {
    let temp = tempdir().unwrap();
    create_test_files(temp.path());
    let file = temp.path().join("b.txt");

    let (stdout, _, success) = run_reader(&["inspect", file.to_str().unwrap(), "-o", "json"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["kind"], "file");
    assert_eq!(parsed["file"]["size_bytes"], 7);
}
