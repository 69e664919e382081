//! Per-file records and the pipeline that builds them

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ScanIssue;
use crate::language::Language;
use crate::transform::count_lines;

use super::Scanner;
use super::utils::{dotted_extension, format_size, human_time, rfc3339};
use super::walker::Candidate;

/// One scanned file.
///
/// `content` is only set for text files whose content was read and is non-empty
/// after transformation; `line_count` is set exactly when `content` is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    #[serde(rename = "path")]
    pub absolute_path: PathBuf,
    pub relative_path: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
    #[serde(rename = "size_formatted")]
    pub size_human: String,
    #[serde(rename = "mod_time")]
    pub modified: String,
    #[serde(rename = "mod_time_formatted")]
    pub modified_human: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_count: Option<usize>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub extension: String,
    pub is_text: bool,
}

impl FileRecord {
    /// Language tag, or an empty string when undetermined.
    pub fn language_tag(&self) -> &'static str {
        self.language.map(|l| l.tag()).unwrap_or("")
    }

    #[cfg(test)]
    pub(crate) fn for_test(relative_path: &str, size_bytes: u64, is_text: bool) -> Self {
        Self {
            absolute_path: PathBuf::from("/repo").join(relative_path),
            relative_path: relative_path.to_string(),
            size_bytes,
            size_human: format_size(size_bytes),
            modified: String::new(),
            modified_human: String::new(),
            content: None,
            language: None,
            line_count: None,
            extension: dotted_extension(Path::new(relative_path)),
            is_text,
        }
    }
}

impl Scanner<'_> {
    /// Build the record for one walker candidate.
    ///
    /// Returns `None` when the file's metadata cannot be read. Read failures
    /// keep the record without content. Both are pushed onto `issues`.
    pub(crate) fn build_record(
        &self,
        candidate: Candidate,
        issues: &mut Vec<ScanIssue>,
    ) -> Option<FileRecord> {
        let Candidate {
            path,
            relative_path,
        } = candidate;

        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot stat file, skipping");
                issues.push(ScanIssue::metadata(&path, &err));
                return None;
            }
        };

        let modified: DateTime<Local> = metadata.modified().unwrap_or(UNIX_EPOCH).into();
        let extension = dotted_extension(&path);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let classification = self.classifier.classify_name(&file_name, &extension);

        let mut record = FileRecord {
            relative_path,
            size_bytes: metadata.len(),
            size_human: format_size(metadata.len()),
            modified: rfc3339(modified),
            modified_human: human_time(modified),
            content: None,
            language: classification.language,
            line_count: None,
            extension,
            is_text: classification.is_text,
            absolute_path: path,
        };

        if !self.config.include_content {
            debug!(path = %record.relative_path, "recorded without content");
            return Some(record);
        }

        let bytes = match self.read_text(&record.absolute_path, classification.is_text) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                record.is_text = false;
                debug!(path = %record.relative_path, "sniffed as binary");
                return Some(record);
            }
            Err(err) => {
                warn!(path = %record.absolute_path.display(), error = %err, "cannot read file");
                issues.push(ScanIssue::read(&record.absolute_path, &err));
                return Some(record);
            }
        };

        record.is_text = true;
        if record.language.is_none() {
            record.language = self.classifier.language_from_content(&bytes);
        }

        let text = String::from_utf8_lossy(&bytes);
        let processed = if self.transformer.is_identity() {
            text.into_owned()
        } else {
            self.transformer.apply(&text, record.language)
        };
        if !processed.is_empty() {
            record.line_count = Some(count_lines(&processed));
            record.content = Some(processed);
        }

        debug!(
            path = %record.relative_path,
            size = record.size_bytes,
            language = record.language_tag(),
            "processed file"
        );
        Some(record)
    }

    /// Open `path` once and return its bytes when it is text.
    ///
    /// Files not already known to be text are sniffed from their leading sample
    /// first; `Ok(None)` means the sample classified as binary and the rest of
    /// the file was never read.
    fn read_text(&self, path: &Path, known_text: bool) -> io::Result<Option<Vec<u8>>> {
        let mut file = File::open(path)?;
        let mut bytes = Vec::new();

        if !known_text {
            let sample_size = self.classifier.thresholds().sample_size as u64;
            file.by_ref().take(sample_size).read_to_end(&mut bytes)?;
            if !self.classifier.is_text_content(&bytes) {
                return Ok(None);
            }
        }

        file.read_to_end(&mut bytes)?;
        Ok(Some(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use tempfile::TempDir;

    fn build(dir: &TempDir, name: &str, config: &ScanConfig) -> (Option<FileRecord>, Vec<ScanIssue>) {
        let scanner = Scanner::new(dir.path(), config);
        let path = dir.path().join(name);
        let candidate = Candidate {
            relative_path: name.to_string(),
            path,
        };
        let mut issues = Vec::new();
        let record = scanner.build_record(candidate, &mut issues);
        (record, issues)
    }

    #[test]
    fn test_text_file_record() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.go"), "package main\n\nfunc main() {}\n").unwrap();

        let (record, issues) = build(&dir, "main.go", &ScanConfig::default());
        let record = record.unwrap();
        assert!(issues.is_empty());
        assert!(record.is_text);
        assert_eq!(record.language, Some(Language::Go));
        assert_eq!(record.extension, ".go");
        assert_eq!(record.size_bytes, 29);
        assert_eq!(record.line_count, Some(3));
        assert!(record.content.as_deref().unwrap().starts_with("package main"));
    }

    #[test]
    fn test_nul_byte_file_is_binary_without_content() {
        let dir = TempDir::new().unwrap();
        let mut data = b"0123456789".to_vec();
        data.push(0);
        data.extend_from_slice(b"trailing bytes");
        fs::write(dir.path().join("data.bin"), &data).unwrap();

        let (record, _) = build(&dir, "data.bin", &ScanConfig::unfiltered());
        let record = record.unwrap();
        assert!(!record.is_text);
        assert_eq!(record.content, None);
        assert_eq!(record.line_count, None);
        assert_eq!(record.extension, ".bin");
    }

    #[test]
    fn test_unknown_file_without_content_defaults_to_non_text() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.xyz"), "plain words").unwrap();

        let config = ScanConfig::unfiltered().with_content(false);
        let (record, _) = build(&dir, "notes.xyz", &config);
        let record = record.unwrap();
        assert!(!record.is_text);
        assert_eq!(record.content, None);
    }

    #[test]
    fn test_sniffed_text_gets_content_and_shebang_language() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("deploy"), "#!/usr/bin/env python3\nprint('hi')\n").unwrap();

        let (record, _) = build(&dir, "deploy", &ScanConfig::unfiltered());
        let record = record.unwrap();
        assert!(record.is_text);
        assert_eq!(record.language, Some(Language::Python));
        assert_eq!(record.extension, "");
        assert_eq!(record.line_count, Some(2));
    }

    #[test]
    fn test_empty_file_has_no_content() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("empty.go"), "").unwrap();

        let (record, _) = build(&dir, "empty.go", &ScanConfig::default());
        let record = record.unwrap();
        assert!(record.is_text);
        assert_eq!(record.content, None);
        assert_eq!(record.line_count, None);
    }

    #[test]
    fn test_line_count_follows_processed_content() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.py"), "x = 1\n\n\n# note\ny = 2\n").unwrap();

        let config = ScanConfig::default()
            .with_remove_comments(true)
            .with_remove_empty_lines(true);
        let (record, _) = build(&dir, "a.py", &config);
        let record = record.unwrap();
        assert_eq!(record.content.as_deref(), Some("x = 1\ny = 2"));
        assert_eq!(record.line_count, Some(2));
    }

    #[test]
    fn test_missing_file_is_skipped_with_issue() {
        let dir = TempDir::new().unwrap();
        let (record, issues) = build(&dir, "gone.go", &ScanConfig::default());
        assert!(record.is_none());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].skipped);
    }

    #[test]
    fn test_serialized_keys() {
        let mut record = FileRecord::for_test("src/main.go", 10, true);
        record.language = Some(Language::Go);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["relative_path"], "src/main.go");
        assert_eq!(json["size"], 10);
        assert_eq!(json["language"], "go");
        assert_eq!(json["extension"], ".go");
        assert!(json.get("content").is_none());
        assert!(json.get("line_count").is_none());
    }
}
