//! Command-line tests for the codeecho binary

mod harness;

use assert_cmd::Command;
use harness::{TestRepo, run_codeecho};
use predicates::prelude::*;

fn codeecho(repo: &TestRepo) -> Command {
    let mut cmd = Command::cargo_bin("codeecho").unwrap();
    cmd.current_dir(repo.path())
        .env_remove("CODEECHO_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_default_xml_to_stdout() {
    let repo = TestRepo::sample();
    codeecho(&repo)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<?xml"))
        .stdout(predicate::str::contains(r#"<file path="src/main.go" language="go""#))
        .stdout(predicate::str::contains("node_modules").not())
        .stdout(predicate::str::contains("</codeecho>"))
        .stderr(predicate::str::contains("Scan Summary"));
}

#[test]
fn test_json_output_parses() {
    let repo = TestRepo::sample();
    let (stdout, _stderr, success) = run_codeecho(repo.path(), &["--format", "json", "--quiet"]);
    assert!(success);

    let doc: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let files = doc["files"].as_array().unwrap();
    let paths: Vec<&str> = files
        .iter()
        .map(|f| f["relative_path"].as_str().unwrap())
        .collect();
    assert_eq!(
        paths,
        vec!["README.md", "config.json", "src/main.go", "src/util/strings.go", "web/app.js"]
    );
    assert_eq!(doc["statistics"]["total_files"], 5);
}

#[test]
fn test_markdown_alias_and_case() {
    let repo = TestRepo::sample();
    codeecho(&repo)
        .args(["-f", "MD", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# CodeEcho Repository Scan"))
        .stdout(predicate::str::contains("## Statistics"));
}

#[test]
fn test_unknown_format_is_rejected() {
    let repo = TestRepo::new();
    codeecho(&repo)
        .args(["--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("yaml"));
}

#[test]
fn test_missing_path_fails() {
    let repo = TestRepo::new();
    codeecho(&repo)
        .arg("does-not-exist")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("codeecho: path does not exist"));
}

#[test]
fn test_output_file() {
    let repo = TestRepo::sample();
    let out_dir = tempfile::TempDir::new().unwrap();
    let out = out_dir.path().join("packed.json");
    codeecho(&repo)
        .args(["--format", "json", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Output written to"));

    let text = std::fs::read_to_string(&out).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["processed_by"], "CodeEcho CLI");
}

#[test]
fn test_no_content_and_no_tree() {
    let repo = TestRepo::sample();
    let (stdout, _stderr, success) = run_codeecho(
        repo.path(),
        &["--format", "json", "--no-content", "--no-tree", "--quiet"],
    );
    assert!(success);

    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(doc.get("directory_tree").is_none());
    for file in doc["files"].as_array().unwrap() {
        assert!(file.get("content").is_none());
    }
}

#[test]
fn test_all_files_includes_binary() {
    let repo = TestRepo::sample();
    codeecho(&repo)
        .args(["--all-files", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<file path="assets/data.bin""#))
        .stdout(predicate::str::contains("Binary file - content not included"));
}

#[test]
fn test_include_and_exclude_lists() {
    let repo = TestRepo::sample();
    let (stdout, _stderr, success) = run_codeecho(
        repo.path(),
        &[
            "--format",
            "json",
            "--include-exts",
            ".go,.js",
            "--exclude-dirs",
            "util",
            "--quiet",
        ],
    );
    assert!(success);

    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let paths: Vec<&str> = doc["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["relative_path"].as_str().unwrap())
        .collect();
    // Replacing the exclusion list drops node_modules from it.
    assert_eq!(paths, vec!["node_modules/big.js", "src/main.go", "web/app.js"]);
}

#[test]
fn test_batch_mode_matches_streaming_files() {
    let repo = TestRepo::sample();
    let files_of = |args: &[&str]| {
        let (stdout, _stderr, success) = run_codeecho(repo.path(), args);
        assert!(success);
        let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        doc["files"].clone()
    };

    let streamed = files_of(&["--format", "json", "--quiet"]);
    let batch = files_of(&["--format", "json", "--quiet", "--batch"]);
    assert_eq!(streamed, batch);
}

#[test]
fn test_remove_comments_flag() {
    let repo = TestRepo::new();
    repo.add_file("main.go", "x := 1 // set x\n/* block */\ny := 2");
    codeecho(&repo)
        .args(["--format", "json", "--remove-comments", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""content": "x := 1 \n\ny := 2""#));
}

#[test]
fn test_output_file_inside_repo_is_not_scanned() {
    let repo = TestRepo::sample();
    codeecho(&repo)
        .args(["--quiet", "-o", "out.xml"])
        .assert()
        .success();

    let text = std::fs::read_to_string(repo.path().join("out.xml")).unwrap();
    assert!(!text.contains(r#"<file path="out.xml""#));
    assert!(!text.contains("── out.xml"));
    assert!(text.contains(r#"<file path="src/main.go""#));

    // A second run must not pick up the first run's output either.
    let (stdout, _stderr, success) = run_codeecho(
        repo.path(),
        &["--format", "json", "--batch", "--quiet", "-o", "out.json"],
    );
    assert!(success);
    assert!(stdout.is_empty());
    let text = std::fs::read_to_string(repo.path().join("out.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    let paths: Vec<&str> = doc["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["relative_path"].as_str().unwrap())
        .collect();
    assert!(!paths.contains(&"out.json"));
    assert!(paths.contains(&"out.xml"));
}
