//! Scan engine
//!
//! A `Scanner` drives the walker, classifier and transformer over one root.
//! It runs in batch mode (`scan`, every record materialized and sorted) or in
//! streaming mode (`stream_files`, `stream_to`, one record in memory at a time).

mod batch;
mod record;
mod stats;
mod streaming;
pub mod utils;
mod walker;

use std::fs;
use std::path::PathBuf;

use crate::classify::Classifier;
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::transform::Transformer;

pub use batch::{ScanProgress, ScanResult, PROCESSED_BY};
pub use record::FileRecord;
pub use stats::ScanStatistics;
pub use streaming::StreamingOutcome;
pub use walker::{Candidate, Walker};

/// Scans one root with one configuration.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    root: PathBuf,
    config: &'a ScanConfig,
    classifier: Classifier,
    transformer: Transformer,
}

impl<'a> Scanner<'a> {
    pub fn new(root: impl Into<PathBuf>, config: &'a ScanConfig) -> Self {
        Self {
            root: root.into(),
            config,
            classifier: Classifier::new(config.sniff),
            transformer: Transformer::from_config(config),
        }
    }

    pub fn config(&self) -> &'a ScanConfig {
        self.config
    }

    /// The root as written into output headers.
    pub fn repo_path(&self) -> String {
        self.root.display().to_string()
    }

    /// Fail unless the root exists and can be stat'ed.
    pub fn check_root(&self) -> Result<(), ScanError> {
        fs::metadata(&self.root)
            .map(|_| ())
            .map_err(|err| ScanError::root(&self.root, err))
    }

    pub fn walker(&self) -> Walker {
        Walker::new(&self.root, self.config)
    }
}
