//! Error types for scanning.
//!
//! Fatal conditions are `ScanError`s and end the scan. Recoverable conditions are
//! collected as `ScanIssue`s and returned next to the normal result.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::scan::ScanStatistics;

/// Errors that abort a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root does not exist.
    #[error("path does not exist: {path}")]
    RootNotFound { path: PathBuf },

    /// The scan root exists but could not be inspected.
    #[error("cannot access {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The per-file callback or output writer failed for a file.
    #[error("error writing file {path}: {source}")]
    Sink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the header, tree, footer or flushing the output failed.
    #[error("failed to write output: {source}")]
    Output {
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Classify a failure to stat the scan root.
    pub fn root(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::RootNotFound { path },
            _ => Self::RootUnreadable { path, source },
        }
    }

    pub fn output(source: io::Error) -> Self {
        Self::Output { source }
    }
}

/// Stage of the pipeline where a recoverable issue happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuePhase {
    /// Reading a directory or an entry during traversal.
    Traverse,
    /// Reading file metadata.
    Metadata,
    /// Reading file content.
    Read,
}

impl fmt::Display for IssuePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssuePhase::Traverse => "traverse",
            IssuePhase::Metadata => "metadata",
            IssuePhase::Read => "read",
        };
        f.write_str(name)
    }
}

/// Non-fatal problem encountered during a scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanIssue {
    pub path: PathBuf,
    pub phase: IssuePhase,
    pub message: String,
    /// `true` when the entry was dropped, `false` when its record was still produced.
    pub skipped: bool,
}

impl ScanIssue {
    pub fn new(
        path: impl Into<PathBuf>,
        phase: IssuePhase,
        message: impl Into<String>,
        skipped: bool,
    ) -> Self {
        Self {
            path: path.into(),
            phase,
            message: message.into(),
            skipped,
        }
    }

    /// A traversal error; the entry is skipped.
    pub fn traverse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::new(path, IssuePhase::Traverse, message, true)
    }

    /// A metadata error; the entry is skipped.
    pub fn metadata(path: impl Into<PathBuf>, error: &io::Error) -> Self {
        Self::new(path, IssuePhase::Metadata, error.to_string(), true)
    }

    /// A read error; the record is kept without content.
    pub fn read(path: impl Into<PathBuf>, error: &io::Error) -> Self {
        Self::new(path, IssuePhase::Read, error.to_string(), false)
    }
}

impl fmt::Display for ScanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = if self.skipped { "skipped" } else { "kept" };
        write!(
            f,
            "{} ({} error, {}): {}",
            self.path.display(),
            self.phase,
            action,
            self.message
        )
    }
}

/// A fatal streaming error together with everything accumulated before it.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct StreamingFailure {
    #[source]
    pub error: ScanError,
    pub stats: ScanStatistics,
    pub issues: Vec<ScanIssue>,
}

impl StreamingFailure {
    /// A failure that happened before any file was processed.
    pub fn before_scan(error: ScanError) -> Self {
        Self {
            error,
            stats: ScanStatistics::default(),
            issues: Vec::new(),
        }
    }
}
