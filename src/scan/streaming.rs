//! Streaming mode: hand each record to a sink as soon as it is built
//!
//! At most one record is alive at a time. When a directory tree is requested,
//! a first pass collects only the sorted relative paths; file content is read
//! in the second pass alone.

use std::io;

use tracing::{debug, info, warn};

use crate::error::{ScanError, ScanIssue, StreamingFailure};
use crate::output::StreamingWriter;

use super::utils::now_rfc3339;
use super::{FileRecord, ScanStatistics, Scanner};

/// What a successful streaming scan leaves behind.
#[derive(Debug, Clone, Default)]
pub struct StreamingOutcome {
    pub stats: ScanStatistics,
    pub issues: Vec<ScanIssue>,
}

impl Scanner<'_> {
    /// Pass 1: sorted relative paths of every included file. No content is read.
    pub fn collect_paths(&self) -> Result<Vec<String>, ScanError> {
        self.check_root()?;
        let mut paths: Vec<String> = self
            .walker()
            .walk()
            .filter_map(|candidate| match candidate {
                Ok(c) => Some(c.relative_path),
                Err(issue) => {
                    debug!(%issue, "traversal error while collecting paths");
                    None
                }
            })
            .collect();
        paths.sort();
        Ok(paths)
    }

    /// Build each record and pass it to `on_file`, in traversal order.
    ///
    /// An error from `on_file` stops the scan; the failure carries the offending
    /// path plus the statistics and issues gathered up to that point.
    pub fn stream_files<F>(&self, mut on_file: F) -> Result<StreamingOutcome, StreamingFailure>
    where
        F: FnMut(FileRecord) -> io::Result<()>,
    {
        self.check_root().map_err(StreamingFailure::before_scan)?;

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

            let Some(record) = self.build_record(candidate, &mut issues) else {
                continue;
            };
            stats.record(&record);

            let path = record.absolute_path.clone();
            if let Err(source) = on_file(record) {
                return Err(StreamingFailure {
                    error: ScanError::Sink { path, source },
                    stats,
                    issues,
                });
            }
        }

        Ok(StreamingOutcome { stats, issues })
    }

    /// Drive a writer through header, optional tree, files, footer and close.
    pub fn stream_to<W>(&self, writer: &mut W) -> Result<StreamingOutcome, StreamingFailure>
    where
        W: StreamingWriter + ?Sized,
    {
        self.check_root().map_err(StreamingFailure::before_scan)?;
        info!(root = %self.root.display(), "starting streaming scan");

        let output_failure = |err| StreamingFailure::before_scan(ScanError::output(err));

        writer
            .write_header(&self.repo_path(), &now_rfc3339())
            .map_err(output_failure)?;

        if self.config.include_directory_tree {
            let paths = self.collect_paths().map_err(StreamingFailure::before_scan)?;
            debug!(paths = paths.len(), "collected directory tree");
            writer.write_tree(&paths).map_err(output_failure)?;
        }

        let outcome = self.stream_files(|record| writer.write_file(&record))?;

        if let Err(err) = writer
            .write_footer(&outcome.stats)
            .and_then(|_| writer.close())
        {
            return Err(StreamingFailure {
                error: ScanError::output(err),
                stats: outcome.stats,
                issues: outcome.issues,
            });
        }

        info!(
            files = outcome.stats.total_files,
            bytes = outcome.stats.total_size_bytes,
            issues = outcome.issues.len(),
            "streaming scan finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use std::fs;
    use tempfile::TempDir;

    fn repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("b/two.go"), "package b\n").unwrap();
        fs::write(dir.path().join("a.go"), "package a\n").unwrap();
        fs::write(dir.path().join("c.md"), "# c\n").unwrap();
        dir
    }

    #[test]
    fn test_collect_paths_is_sorted() {
        let dir = repo();
        let config = ScanConfig::default();
        let paths = Scanner::new(dir.path(), &config).collect_paths().unwrap();
        assert_eq!(paths, vec!["a.go", "b/two.go", "c.md"]);
    }

    #[test]
    fn test_stream_files_delivers_every_record() {
        let dir = repo();
        let config = ScanConfig::default();
        let mut seen = Vec::new();
        let outcome = Scanner::new(dir.path(), &config)
            .stream_files(|record| {
                seen.push(record.relative_path);
                Ok(())
            })
            .unwrap();

        seen.sort();
        assert_eq!(seen, vec!["a.go", "b/two.go", "c.md"]);
        assert_eq!(outcome.stats.total_files, 3);
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn test_sink_failure_aborts_with_path() {
        let dir = repo();
        let config = ScanConfig::default();
        let mut calls = 0;
        let failure = Scanner::new(dir.path(), &config)
            .stream_files(|_| {
                calls += 1;
                if calls == 2 {
                    Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
                } else {
                    Ok(())
                }
            })
            .unwrap_err();

        assert_eq!(calls, 2);
        assert_eq!(failure.stats.total_files, 2);
        match failure.error {
            ScanError::Sink { path, .. } => assert!(path.starts_with(dir.path())),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_root_fails_before_any_callback() {
        let dir = TempDir::new().unwrap();
        let config = ScanConfig::default();
        let failure = Scanner::new(dir.path().join("nope"), &config)
            .stream_files(|_| panic!("callback must not run"))
            .unwrap_err();
        assert!(matches!(failure.error, ScanError::RootNotFound { .. }));
        assert_eq!(failure.stats.total_files, 0);
    }
}
