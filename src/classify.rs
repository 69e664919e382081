//! Text/binary and language classification
//!
//! Classification runs in two tiers. The fast path looks only at the file name:
//! a known text extension or a conventional text file name (`README`, `Makefile`,
//! `.gitignore`, ...) settles `is_text` without touching the file. When content is
//! read anyway, a byte-level sniff decides the files the fast path could not.
//!
//! Language comes from the extension map first. For text content with no mapped
//! extension, the shebang line and a handful of distinctive signatures are tried.

use crate::config::SniffThresholds;
use crate::language::Language;

/// Extensions (lowercase, with leading dot) that are always text.
const TEXT_EXTENSIONS: &[&str] = &[
    ".txt", ".md", ".rst", ".asciidoc", ".go", ".py", ".js", ".ts", ".jsx", ".tsx", ".java", ".c",
    ".cpp", ".cc", ".cxx", ".h", ".hpp", ".cs", ".php", ".rb", ".rs", ".swift", ".kt", ".html",
    ".htm", ".xml", ".xhtml", ".css", ".scss", ".sass", ".less", ".json", ".yaml", ".yml",
    ".toml", ".ini", ".cfg", ".conf", ".sh", ".bash", ".zsh", ".fish", ".ps1", ".bat", ".cmd",
    ".sql", ".graphql", ".gql", ".dockerfile", ".gitignore", ".gitattributes", ".makefile",
    ".cmake", ".r", ".rmd", ".m", ".scala", ".clj", ".hs", ".vim", ".lua", ".pl", ".tcl", ".tex",
    ".bib", ".cls", ".sty", ".csv", ".tsv", ".log",
];

/// Lowercase file names that are text regardless of extension.
const TEXT_FILENAMES: &[&str] = &[
    "readme",
    "license",
    "changelog",
    "contributing",
    "authors",
    "contributors",
    "copying",
    "install",
    "news",
    "thanks",
    "todo",
    "version",
    "makefile",
    "dockerfile",
    "jenkinsfile",
    "gemfile",
    "rakefile",
    "guardfile",
    "procfile",
    ".gitignore",
    ".gitattributes",
    ".dockerignore",
    ".eslintrc",
    ".prettierrc",
    ".babelrc",
];

/// Interpreter substrings checked against a shebang line, in priority order.
/// `bash` is checked before `sh` because every bash path also contains `sh`.
const SHEBANG_INTERPRETERS: &[(&str, Language)] = &[
    ("python", Language::Python),
    ("node", Language::JavaScript),
    ("ruby", Language::Ruby),
    ("perl", Language::Perl),
    ("php", Language::Php),
    ("bash", Language::Bash),
    ("sh", Language::Shell),
];

/// Case-insensitive signatures searched for in the leading bytes of a file.
const CONTENT_SIGNATURES: &[(&str, Language)] = &[
    ("<?php", Language::Php),
    ("<?xml", Language::Xml),
    ("<!doctype html", Language::Html),
    ("<html", Language::Html),
    ("import react", Language::Jsx),
    ("from react", Language::Jsx),
    ("package main", Language::Go),
    ("#!/usr/bin/env python", Language::Python),
];

/// Result of classifying a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_text: bool,
    pub language: Option<Language>,
}

/// Check whether a lowercase extension (with leading dot) is a known text extension.
pub fn is_text_extension(ext: &str) -> bool {
    TEXT_EXTENSIONS.contains(&ext)
}

/// Check whether a file name is a conventional text file name (case-insensitive).
pub fn is_text_filename(name: &str) -> bool {
    let name = name.to_lowercase();
    TEXT_FILENAMES.contains(&name.as_str())
}

/// Classifier holding the sniffing thresholds for one scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    thresholds: SniffThresholds,
}

impl Classifier {
    pub fn new(thresholds: SniffThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &SniffThresholds {
        &self.thresholds
    }

    /// Fast-path text check from the file name and lowercase extension alone.
    ///
    /// `false` means "not known to be text", not "binary".
    pub fn fast_path(&self, file_name: &str, extension: &str) -> bool {
        is_text_extension(extension) || is_text_filename(file_name)
    }

    /// Classify from the file name only, without reading content.
    pub fn classify_name(&self, file_name: &str, extension: &str) -> Classification {
        Classification {
            is_text: self.fast_path(file_name, extension),
            language: Language::from_extension(extension),
        }
    }

    /// Content-sniffing fallback applied to the leading bytes of a file.
    ///
    /// NUL bytes mean binary. A sample that is not valid UTF-8 is binary when
    /// more than `max_invalid_ratio` of it fails to decode. Otherwise the
    /// sample is text when at least `min_printable_ratio` of its bytes are
    /// printable ASCII, `\r` or `\t`.
    pub fn is_text_content(&self, data: &[u8]) -> bool {
        if data.is_empty() {
            return true;
        }

        let sample = &data[..data.len().min(self.thresholds.sample_size)];
        if sample.is_empty() {
            return true;
        }

        if sample.contains(&0) {
            return false;
        }

        if std::str::from_utf8(sample).is_err() {
            let invalid: usize = sample
                .utf8_chunks()
                .map(|chunk| chunk.invalid().len())
                .sum();
            let invalid_ratio = invalid as f64 / sample.len() as f64;
            if invalid_ratio > self.thresholds.max_invalid_ratio {
                return false;
            }
        }

        let printable = sample
            .iter()
            .filter(|&&b| (0x20..=0x7e).contains(&b) || b == b'\r' || b == b'\t')
            .count();
        let printable_ratio = printable as f64 / sample.len() as f64;
        printable_ratio >= self.thresholds.min_printable_ratio
    }

    /// Detect a language from content: shebang first, then signatures.
    pub fn language_from_content(&self, content: &[u8]) -> Option<Language> {
        detect_from_shebang(content)
            .or_else(|| detect_from_signatures(content, self.thresholds.pattern_sample_size))
    }
}

/// Detect a language from a `#!` interpreter line.
pub fn detect_from_shebang(content: &[u8]) -> Option<Language> {
    if content.len() < 3 || !content.starts_with(b"#!") {
        return None;
    }

    let first_line = match content.iter().position(|&b| b == b'\n') {
        Some(end) => &content[..end],
        None => content,
    };
    let shebang = String::from_utf8_lossy(first_line).to_lowercase();

    SHEBANG_INTERPRETERS
        .iter()
        .find(|(needle, _)| shebang.contains(needle))
        .map(|&(_, lang)| lang)
}

/// Detect a language from distinctive signatures in the first `sample_size` bytes.
pub fn detect_from_signatures(content: &[u8], sample_size: usize) -> Option<Language> {
    let sample = &content[..content.len().min(sample_size)];
    let sample = String::from_utf8_lossy(sample).to_lowercase();

    CONTENT_SIGNATURES
        .iter()
        .find(|(needle, _)| sample.contains(needle))
        .map(|&(_, lang)| lang)
}
