//! Batch mode: materialize every record, then sort

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ScanError, ScanIssue};

use super::utils::now_rfc3339;
use super::{FileRecord, ScanStatistics, Scanner};

/// Value of the `processed_by` field in every output document.
pub const PROCESSED_BY: &str = "CodeEcho CLI";

/// A fully materialized scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub repo_path: String,
    pub scan_time: String,
    pub processed_by: String,
    pub files: Vec<FileRecord>,
    #[serde(rename = "statistics")]
    pub stats: ScanStatistics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ScanIssue>,
}

/// Progress reported after each file in batch mode.
#[derive(Debug, Clone, Copy)]
pub struct ScanProgress<'p> {
    /// Files processed so far, including the current one.
    pub processed: usize,
    /// Candidate count from the pre-pass, when one was run.
    pub total: Option<usize>,
    pub current: &'p str,
}

impl ScanProgress<'_> {
    /// Completion in `0.0..=1.0`, when the total is known.
    pub fn fraction(&self) -> Option<f64> {
        match self.total {
            Some(0) => Some(1.0),
            Some(total) => Some((self.processed as f64 / total as f64).min(1.0)),
            None => None,
        }
    }
}

impl Scanner<'_> {
    /// Count included files without reading any content.
    pub fn count_candidates(&self) -> Result<usize, ScanError> {
        self.check_root()?;
        Ok(self.walker().walk().filter(Result::is_ok).count())
    }

    /// Scan every file and return the records sorted by relative path.
    pub fn scan(&self) -> Result<ScanResult, ScanError> {
        self.check_root()?;
        Ok(self.collect(None, &mut |_: &ScanProgress<'_>| {}))
    }

    /// Like `scan`, preceded by a counting pass, reporting progress after each file.
    pub fn scan_with_progress<F>(&self, mut progress: F) -> Result<ScanResult, ScanError>
    where
        F: FnMut(&ScanProgress<'_>),
    {
        let total = self.count_candidates()?;
        Ok(self.collect(Some(total), &mut progress))
    }

    fn collect(
        &self,
        total: Option<usize>,
        progress: &mut dyn FnMut(&ScanProgress<'_>),
    ) -> ScanResult {
        let scan_time = now_rfc3339();
        info!(root = %self.root.display(), "starting batch scan");

        let mut files = Vec::new();
        let mut stats = ScanStatistics::new();
        let mut issues = Vec::new();

        for candidate in self.walker().walk() {
            let candidate = match candidate {
                Ok(c) => c,
                Err(issue) => {
                    warn!(%issue, "traversal error");
                    issues.push(issue);
                    continue;
                }
            };

            if let Some(record) = self.build_record(candidate, &mut issues) {
                stats.record(&record);
                progress(&ScanProgress {
                    processed: stats.total_files,
                    total,
                    current: &record.relative_path,
                });
                files.push(record);
            }
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        debug_assert!(stats.is_consistent());

        info!(
            files = stats.total_files,
            bytes = stats.total_size_bytes,
            issues = issues.len(),
            "batch scan finished"
        );

        ScanResult {
            repo_path: self.repo_path(),
            scan_time,
            processed_by: PROCESSED_BY.to_string(),
            files,
            stats,
            issues,
        }
    }
}
