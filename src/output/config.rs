//! Output configuration types

use crate::config::ScanConfig;

/// Presentation options shared by all writers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputOptions {
    pub include_directory_tree: bool,
    pub include_summary: bool,
    pub show_line_numbers: bool,
    pub include_content: bool,
    // Echoed into headers so readers know the content was rewritten.
    pub remove_comments: bool,
    pub remove_empty_lines: bool,
    pub compress_whitespace: bool,
}

impl OutputOptions {
    /// Processing applied to file content, as short phrases.
    pub fn processing_notes(&self) -> Vec<&'static str> {
        let mut notes = Vec::new();
        if self.remove_comments {
            notes.push("comments removed");
        }
        if self.remove_empty_lines {
            notes.push("empty lines removed");
        }
        if self.compress_whitespace {
            notes.push("code compressed");
        }
        notes
    }

    /// `processing_notes` joined for display, or "no processing applied".
    pub fn processing_summary(&self) -> String {
        let notes = self.processing_notes();
        if notes.is_empty() {
            "no processing applied".to_string()
        } else {
            notes.join(", ")
        }
    }
}

impl From<&ScanConfig> for OutputOptions {
    fn from(config: &ScanConfig) -> Self {
        Self {
            include_directory_tree: config.include_directory_tree,
            include_summary: config.include_summary,
            show_line_numbers: config.show_line_numbers,
            include_content: config.include_content,
            remove_comments: config.remove_comments,
            remove_empty_lines: config.remove_empty_lines,
            compress_whitespace: config.compress_whitespace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_summary() {
        let options = OutputOptions::from(&ScanConfig::default());
        assert_eq!(options.processing_summary(), "no processing applied");

        let options = OutputOptions::from(
            &ScanConfig::default()
                .with_remove_comments(true)
                .with_compress_whitespace(true),
        );
        assert_eq!(options.processing_summary(), "comments removed, code compressed");
    }
}
