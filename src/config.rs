//! Scan configuration
//!
//! A `ScanConfig` is built once per run and shared by reference with the walker,
//! classifier, transformer and scanner. Nothing reads configuration from globals.

use std::path::PathBuf;

/// Directories pruned by default.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "vendor",
    ".vscode",
    ".idea",
    "target",
    "build",
    "dist",
];

/// File suffixes included by default.
pub const DEFAULT_INCLUDED_EXTENSIONS: &[&str] = &[
    ".go", ".js", ".ts", ".jsx", ".tsx", ".json", ".md", ".html", ".css", ".py", ".java", ".cpp",
    ".c", ".h", ".rs", ".rb", ".php", ".yml", ".yaml", ".toml", ".xml",
];

/// Tuning constants for the content-sniffing fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SniffThresholds {
    /// Number of leading bytes inspected for text/binary classification.
    pub sample_size: usize,
    /// Above this fraction of invalid UTF-8 bytes the sample is binary.
    pub max_invalid_ratio: f64,
    /// At or above this fraction of printable bytes the sample is text.
    pub min_printable_ratio: f64,
    /// Number of leading bytes searched for language signatures.
    pub pattern_sample_size: usize,
}

impl Default for SniffThresholds {
    fn default() -> Self {
        Self {
            sample_size: 8192,
            max_invalid_ratio: 0.10,
            min_printable_ratio: 0.80,
            pattern_sample_size: 1024,
        }
    }
}

/// Configuration for one scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory basenames the walker never descends into (exact match).
    pub excluded_dirs: Vec<String>,
    /// Case-insensitive path suffixes to include; empty includes everything.
    pub included_extensions: Vec<String>,
    /// Canonical paths of files never yielded, such as the output file.
    pub skipped_files: Vec<PathBuf>,
    pub include_content: bool,
    pub remove_comments: bool,
    pub remove_empty_lines: bool,
    pub compress_whitespace: bool,
    // Presentation toggles, consumed by the output writers only.
    pub include_directory_tree: bool,
    pub include_summary: bool,
    pub show_line_numbers: bool,
    pub sniff: SniffThresholds,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            included_extensions: DEFAULT_INCLUDED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            skipped_files: Vec::new(),
            include_content: true,
            remove_comments: false,
            remove_empty_lines: false,
            compress_whitespace: false,
            include_directory_tree: true,
            include_summary: true,
            show_line_numbers: false,
            sniff: SniffThresholds::default(),
        }
    }
}

impl ScanConfig {
    /// A configuration with no exclusions and no extension allow-list.
    pub fn unfiltered() -> Self {
        Self {
            excluded_dirs: Vec::new(),
            included_extensions: Vec::new(),
            ..Default::default()
        }
    }

    pub fn with_excluded_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_included_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.included_extensions = exts.into_iter().map(Into::into).collect();
        self
    }

    /// Never yield the file at `path`, which must already be canonical.
    pub fn with_skipped_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.skipped_files.push(path.into());
        self
    }

    pub fn with_content(mut self, include: bool) -> Self {
        self.include_content = include;
        self
    }

    pub fn with_remove_comments(mut self, enabled: bool) -> Self {
        self.remove_comments = enabled;
        self
    }

    pub fn with_remove_empty_lines(mut self, enabled: bool) -> Self {
        self.remove_empty_lines = enabled;
        self
    }

    pub fn with_compress_whitespace(mut self, enabled: bool) -> Self {
        self.compress_whitespace = enabled;
        self
    }

    pub fn with_directory_tree(mut self, enabled: bool) -> Self {
        self.include_directory_tree = enabled;
        self
    }

    pub fn with_summary(mut self, enabled: bool) -> Self {
        self.include_summary = enabled;
        self
    }

    pub fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.show_line_numbers = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let config = ScanConfig::default();
        assert!(config.excluded_dirs.iter().any(|d| d == "node_modules"));
        assert!(config.included_extensions.iter().any(|e| e == ".rs"));
        assert!(config.include_content);
        assert!(config.include_directory_tree);
        assert!(config.include_summary);
        assert!(config.skipped_files.is_empty());
        assert!(crate::transform::Transformer::from_config(&config).is_identity());
    }

    #[test]
    fn test_unfiltered_clears_filters() {
        let config = ScanConfig::unfiltered();
        assert!(config.excluded_dirs.is_empty());
        assert!(config.included_extensions.is_empty());
        assert!(config.include_content);
    }

    #[test]
    fn test_builder_methods() {
        let config = ScanConfig::unfiltered()
            .with_excluded_dirs(["build"])
            .with_remove_comments(true)
            .with_content(false);
        assert_eq!(config.excluded_dirs, vec!["build".to_string()]);
        assert!(config.remove_comments);
        assert!(!config.include_content);
        assert!(!crate::transform::Transformer::from_config(&config).is_identity());
    }
}
