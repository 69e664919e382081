//! Test utilities for building temporary repositories.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree for scanning.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a text file. Creates parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        self.add_bytes(path, content.as_bytes())
    }

    /// Add a file with arbitrary bytes. Creates parent directories as needed.
    pub fn add_bytes(&self, path: &str, content: &[u8]) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Populate a small mixed repository: sources, docs, an excluded
    /// dependency directory and a binary blob.
    pub fn sample() -> Self {
        let repo = Self::new();
        repo.add_file(
            "src/main.go",
            "package main\n\n// entry point\nfunc main() {\n\tprintln(\"hi\")\n}\n",
        );
        repo.add_file("src/util/strings.go", "package util\n\n/* helpers */\nfunc Trim() {}\n");
        repo.add_file("web/app.js", "const  x =  1;   // counter\n\n\nexport default x;\n");
        repo.add_file("config.json", "{\n  \"debug\": false,\n  \"name\": \"sample\"\n}\n");
        repo.add_file("README.md", "# Sample\n\nA sample repository.\n");
        repo.add_file("node_modules/big.js", "module.exports = {};\n");
        let mut blob = b"0123456789".to_vec();
        blob.push(0);
        blob.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        repo.add_bytes("assets/data.bin", &blob);
        repo
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
