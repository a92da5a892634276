//! End-to-end tests for the `entigen` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn write_schema(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

const COMMENT_SCHEMA: &str = r#"{
    "name": "Comment",
    "fields": {
        "body": { "type": "text", "required": true },
        "postId": {
            "type": "string",
            "required": true,
            "relation": {
                "entity": "Post",
                "type": "many-to-one",
                "cascade": ["insert", "update"],
                "onDelete": "CASCADE"
            }
        }
    }
}"#;

#[test]
fn test_check_valid_schema() {
    let dir = TempDir::new().unwrap();
    write_schema(dir.path(), "comment.json", COMMENT_SCHEMA);

    Command::cargo_bin("entigen")
        .unwrap()
        .args(["check", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Comment"));
}

#[test]
fn test_check_invalid_schema_fails() {
    let dir = TempDir::new().unwrap();
    write_schema(dir.path(), "bad.json", r#"{ "fields": {} }"#);

    Command::cargo_bin("entigen")
        .unwrap()
        .args(["check", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("failed"));
}

#[test]
fn test_compile_writes_base_and_extension() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_schema(dir.path(), "comment.json", COMMENT_SCHEMA);

    Command::cargo_bin("entigen")
        .unwrap()
        .args([
            "compile",
            dir.path().to_str().unwrap(),
            "--out",
            out.path().to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(out.path().join("comment.base.json").exists());
    assert!(out.path().join("comment.json").exists());

    let base = std::fs::read_to_string(out.path().join("comment.base.json")).unwrap();
    assert!(base.contains("\"postId\""));
    assert!(base.contains("CASCADE") || base.contains("cascade"));
}

#[test]
fn test_compile_preserves_extension_without_force() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_schema(dir.path(), "comment.json", COMMENT_SCHEMA);

    let run = |extra: &[&str]| {
        let mut args = vec![
            "compile",
            dir.path().to_str().unwrap(),
            "--out",
            out.path().to_str().unwrap(),
        ];
        args.extend_from_slice(extra);
        Command::cargo_bin("entigen")
            .unwrap()
            .args(&args)
            .assert()
            .success();
    };

    run(&[]);
    std::fs::write(out.path().join("comment.json"), "user content").unwrap();

    // Re-run: extension preserved.
    run(&[]);
    let content = std::fs::read_to_string(out.path().join("comment.json")).unwrap();
    assert_eq!(content, "user content");

    // Forced re-run: extension overwritten.
    run(&["--force"]);
    let content = std::fs::read_to_string(out.path().join("comment.json")).unwrap();
    assert_ne!(content, "user content");
}

#[test]
fn test_compile_partial_failure_keeps_siblings() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_schema(dir.path(), "comment.json", COMMENT_SCHEMA);
    write_schema(dir.path(), "broken.json", "{ not json");

    Command::cargo_bin("entigen")
        .unwrap()
        .args([
            "compile",
            dir.path().to_str().unwrap(),
            "--out",
            out.path().to_str().unwrap(),
        ])
        .assert()
        .failure();

    // The healthy entity still produced its files.
    assert!(out.path().join("comment.base.json").exists());
}

#[test]
fn test_missing_path_errors() {
    Command::cargo_bin("entigen")
        .unwrap()
        .args(["check", "/nonexistent/schemas"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
