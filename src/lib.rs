//! CodeEcho - Pack a repository into a single XML, JSON or Markdown document

pub mod classify;
pub mod config;
pub mod error;
pub mod language;
pub mod output;
pub mod scan;
pub mod summary;
pub mod transform;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use classify::{Classification, Classifier};
pub use config::{ScanConfig, SniffThresholds};
pub use error::{IssuePhase, ScanError, ScanIssue, StreamingFailure};
pub use language::{CommentSyntax, Language};
pub use output::{
    EmissionState, OutputFormat, OutputOptions, StreamingWriter, create_writer, render_result,
};
pub use scan::{
    FileRecord, ScanProgress, ScanResult, ScanStatistics, Scanner, StreamingOutcome, Walker,
};
pub use summary::print_summary;
pub use transform::Transformer;
