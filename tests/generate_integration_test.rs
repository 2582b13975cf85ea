//! Integration tests for the generate/check commands, driving the
//! compiled binary the way a user would.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn get_binary_path() -> String {
    std::env::var("CARGO_BIN_EXE_platform-erd")
        .unwrap_or_else(|_| "target/debug/platform-erd".to_string())
}

#[test]
fn test_generate_dot_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("schema.dot");

    let status = Command::new(get_binary_path())
        .args(["generate", "-o", output.to_str().unwrap()])
        .status()
        .unwrap();

    assert!(status.success());
    assert!(output.exists());

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("digraph ERD"));
    assert!(content.contains("Community:ownerId -> User:id"));
    assert!(content.contains("PostLike:postId -> Post:id"));
    assert!(content.contains(">PK<"));
}

#[test]
fn test_generate_creates_output_directory() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("docs").join("erd.dot");

    let status = Command::new(get_binary_path())
        .args(["generate", "-o", output.to_str().unwrap()])
        .status()
        .unwrap();

    assert!(status.success());
    assert!(output.exists());
}

#[test]
fn test_generate_mermaid_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("schema.mmd");

    let status = Command::new(get_binary_path())
        .args(["generate", "-o", output.to_str().unwrap()])
        .status()
        .unwrap();

    assert!(status.success());

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("erDiagram"));
    assert!(content.contains("String id PK"));
    assert!(content.contains("String moduleId FK"));
    assert!(content.contains("Lesson }o--|| Module : \"moduleId\""));
}

#[test]
fn test_generate_json_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("schema.json");

    let status = Command::new(get_binary_path())
        .args(["generate", "-o", output.to_str().unwrap()])
        .status()
        .unwrap();

    assert!(status.success());

    let content = fs::read_to_string(&output).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["stats"]["table_count"], 8);
    assert_eq!(parsed["stats"]["relationship_count"], 11);
    assert_eq!(parsed["tables"][0]["name"], "User");
}

#[test]
fn test_generate_explicit_format_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("schema.txt");

    let status = Command::new(get_binary_path())
        .args([
            "generate",
            "-o",
            output.to_str().unwrap(),
            "--format",
            "mermaid",
        ])
        .status()
        .unwrap();

    assert!(status.success());
    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("erDiagram"));
}

#[test]
fn test_generate_table_filters() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("courses.dot");

    let status = Command::new(get_binary_path())
        .args([
            "generate",
            "-o",
            output.to_str().unwrap(),
            "--tables",
            "Course,Module,Lesson",
        ])
        .status()
        .unwrap();

    assert!(status.success());

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("<B>COURSE</B>"));
    assert!(content.contains("Module:courseId -> Course:id"));
    assert!(!content.contains("<B>USER</B>"));
    // Edges into excluded tables are dropped with them
    assert!(!content.contains("-> User:id"));
}

#[test]
fn test_generate_exclude_filter() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("no-junction.dot");

    let status = Command::new(get_binary_path())
        .args([
            "generate",
            "-o",
            output.to_str().unwrap(),
            "--exclude",
            "PostLike",
        ])
        .status()
        .unwrap();

    assert!(status.success());

    let content = fs::read_to_string(&output).unwrap();
    assert!(!content.contains("POSTLIKE"));
    assert!(content.contains("Comment:postId -> Post:id"));
}

#[test]
fn test_generate_filter_to_nothing_fails() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("empty.dot");

    let status = Command::new(get_binary_path())
        .args([
            "generate",
            "-o",
            output.to_str().unwrap(),
            "--tables",
            "NoSuchTable",
        ])
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(!output.exists());
}

#[test]
fn test_generate_fails_when_parent_path_is_a_file() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("docs");
    fs::write(&blocker, "not a directory").unwrap();
    let output = blocker.join("erd.dot");

    // Creating the output directory fails even as root: the parent
    // component already exists as a regular file
    let result = Command::new(get_binary_path())
        .args(["generate", "-o", output.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("failed to create output directory"));
}

#[test]
fn test_generate_fails_when_output_path_is_a_directory() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("erd.dot");
    fs::create_dir(&output).unwrap();

    let result = Command::new(get_binary_path())
        .args(["generate", "-o", output.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("failed to create output file"));
}

#[test]
fn test_generate_layout_flag() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("vertical.dot");

    let status = Command::new(get_binary_path())
        .args([
            "generate",
            "-o",
            output.to_str().unwrap(),
            "--layout",
            "tb",
        ])
        .status()
        .unwrap();

    assert!(status.success());
    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("rankdir=TB"));
}

#[test]
fn test_generate_no_render_emits_dot_source() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("erd.png");

    let status = Command::new(get_binary_path())
        .args(["generate", "-o", output.to_str().unwrap(), "--no-render"])
        .status()
        .unwrap();

    assert!(status.success());
    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("digraph ERD"));
}

#[test]
fn test_generate_runs_are_identical() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.dot");
    let second = dir.path().join("second.dot");

    for output in [&first, &second] {
        let status = Command::new(get_binary_path())
            .args(["generate", "-o", output.to_str().unwrap()])
            .status()
            .unwrap();
        assert!(status.success());
    }

    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn test_check_reports_consistent_catalog() {
    let output = Command::new(get_binary_path()).arg("check").output().unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Schema OK"));
    assert!(stderr.contains("8 tables"));
    assert!(stderr.contains("11 relationships"));
}

#[test]
fn test_completions_generate() {
    let output = Command::new(get_binary_path())
        .args(["completions", "bash"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("platform-erd"));
}
