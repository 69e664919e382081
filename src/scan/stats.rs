//! Aggregate scan statistics

use std::collections::BTreeMap;

use serde::Serialize;

use super::record::FileRecord;
use super::utils::format_size;

/// Running totals for one scan, updated once per file in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStatistics {
    pub total_files: usize,
    #[serde(rename = "total_size")]
    pub total_size_bytes: u64,
    #[serde(rename = "text_files")]
    pub text_file_count: usize,
    #[serde(rename = "binary_files")]
    pub binary_file_count: usize,
    pub language_counts: BTreeMap<String, usize>,
    /// Counts keyed by language, else extension, else "no extension".
    #[serde(skip)]
    pub type_counts: BTreeMap<String, usize>,
}

impl ScanStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the totals.
    pub fn record(&mut self, file: &FileRecord) {
        self.total_files += 1;
        self.total_size_bytes += file.size_bytes;
        if file.is_text {
            self.text_file_count += 1;
        } else {
            self.binary_file_count += 1;
        }

        if let Some(lang) = file.language {
            *self.language_counts.entry(lang.tag().to_string()).or_insert(0) += 1;
        }

        let type_key = match (file.language, file.extension.as_str()) {
            (Some(lang), _) => lang.tag().to_string(),
            (None, "") => "no extension".to_string(),
            (None, ext) => ext.to_string(),
        };
        *self.type_counts.entry(type_key).or_insert(0) += 1;
    }

    pub fn total_size_human(&self) -> String {
        format_size(self.total_size_bytes)
    }

    /// The `n` most common file types, most frequent first, ties by name.
    pub fn top_types(&self, n: usize) -> Vec<(&str, usize)> {
        let mut types: Vec<(&str, usize)> = self
            .type_counts
            .iter()
            .map(|(name, &count)| (name.as_str(), count))
            .collect();
        types.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        types.truncate(n);
        types
    }

    /// `total_files == text_file_count + binary_file_count`.
    pub fn is_consistent(&self) -> bool {
        self.total_files == self.text_file_count + self.binary_file_count
    }
}
