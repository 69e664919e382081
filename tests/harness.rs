//! Test harness for codeecho integration tests

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

pub use codeecho::test_utils::TestRepo;

pub fn run_codeecho(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = env!("CARGO_BIN_EXE_codeecho");
    let output = Command::new(binary)
        .args(args)
        .current_dir(dir)
        .env_remove("CODEECHO_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to run codeecho");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_temp_dir() {
        let repo = TestRepo::new();
        assert!(repo.path().exists());
    }

    #[test]
    fn test_harness_add_file() {
        let repo = TestRepo::new();
        let file_path = repo.add_file("nested/test.go", "package test");
        assert!(file_path.exists());
    }

    #[test]
    fn test_harness_sample_repo() {
        let repo = TestRepo::sample();
        assert!(repo.path().join("node_modules/big.js").exists());
        assert!(repo.path().join("assets/data.bin").exists());
    }
}
