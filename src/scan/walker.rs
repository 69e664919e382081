//! Directory walker
//!
//! Yields candidate files under a root, pruning excluded directories by
//! basename and keeping only files whose path matches the extension allow-list.
//! Traversal errors are yielded as issues and never stop the walk.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use crate::config::ScanConfig;
use crate::error::ScanIssue;

use super::utils::{matches_suffix, relative_path};

/// A file accepted by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub relative_path: String,
}

/// Depth-first walker over a scan root.
#[derive(Debug, Clone)]
pub struct Walker {
    root: PathBuf,
    excluded_dirs: Vec<String>,
    included_extensions: Vec<String>,
    skipped_files: Vec<PathBuf>,
}

impl Walker {
    pub fn new(root: impl Into<PathBuf>, config: &ScanConfig) -> Self {
        Self {
            root: root.into(),
            excluded_dirs: config.excluded_dirs.clone(),
            included_extensions: config
                .included_extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            skipped_files: config.skipped_files.clone(),
        }
    }

    /// Whether a file path passes the extension allow-list.
    pub fn is_included_file(&self, path: &Path) -> bool {
        matches_suffix(path, &self.included_extensions)
    }

    /// Whether `path` resolves to one of the skipped files.
    ///
    /// Only paths whose file name matches a skipped file are canonicalized.
    pub fn is_skipped_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        if !self
            .skipped_files
            .iter()
            .any(|skipped| skipped.file_name() == Some(name))
        {
            return false;
        }
        fs::canonicalize(path).is_ok_and(|canonical| self.skipped_files.contains(&canonical))
    }

    /// Walk the tree. Sibling entries are visited in file-name order so that
    /// repeated scans of an unchanged tree produce identical output.
    ///
    /// Ignore files and hidden-file rules are not honored: the only pruning is
    /// the exclusion list. Symlinks to regular files are yielded; symlinked
    /// directories are never entered, and dangling links become issues.
    pub fn walk(&self) -> impl Iterator<Item = Result<Candidate, ScanIssue>> + '_ {
        let excluded = self.excluded_dirs.clone();
        let walk = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                !(is_dir
                    && entry.depth() > 0
                    && excluded.iter().any(|d| entry.file_name() == OsStr::new(d)))
            })
            .build();

        walk.filter_map(move |result| {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    let path = error_path(&err).unwrap_or_else(|| self.root.clone());
                    return Some(Err(ScanIssue::traverse(path, err.to_string())));
                }
            };

            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                return None;
            }
            if file_type.is_symlink() {
                match fs::metadata(entry.path()) {
                    Ok(target) if target.is_file() => {}
                    Ok(_) => {
                        debug!(path = %entry.path().display(), "skipping symlink to directory");
                        return None;
                    }
                    Err(err) => {
                        debug!(path = %entry.path().display(), error = %err, "dangling symlink");
                        return Some(Err(ScanIssue::traverse(
                            entry.path(),
                            format!("broken symlink: {}", err),
                        )));
                    }
                }
            } else if !file_type.is_file() {
                return None;
            }

            if !self.is_included_file(entry.path()) {
                return None;
            }
            if !self.skipped_files.is_empty() && self.is_skipped_file(entry.path()) {
                debug!(path = %entry.path().display(), "skipping output file");
                return None;
            }

            let path = entry.into_path();
            let relative_path = relative_path(&self.root, &path);
            Some(Ok(Candidate {
                path,
                relative_path,
            }))
        })
    }
}

/// Best-effort path extraction from a walk error.
fn error_path(err: &ignore::Error) -> Option<PathBuf> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.clone()),
        _ => None,
    }
}
