//! Output writers
//!
//! Every format implements `StreamingWriter`, the incremental emission
//! contract used by both scan modes:
//!
//! `write_header` once, `write_tree` at most once, `write_file` any number of
//! times, `write_footer` once, then `close`. Each writer produces a complete,
//! valid document for that sequence even when no file is written.
//!
//! # Module Structure
//!
//! - `config` - Output options derived from the scan configuration
//! - `utils` - Escaping, line numbering, fences, buffering
//! - `tree` - Directory tree rendering from relative paths
//! - `xml` - Structured markup writer
//! - `json` - Record-oriented writer
//! - `markdown` - Prose and table writer

mod config;
mod json;
mod markdown;
mod tree;
mod utils;
mod xml;

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use thiserror::Error;

use crate::scan::{FileRecord, ScanResult, ScanStatistics};

pub use config::OutputOptions;
pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use tree::render_tree;
pub use utils::{escape_xml, fence_for, number_lines, root_label};
pub use xml::XmlWriter;

/// Incremental emission contract shared by all output formats.
pub trait StreamingWriter {
    fn write_header(&mut self, repo_path: &str, scan_time: &str) -> io::Result<()>;

    /// `paths` are relative, `/`-separated and sorted.
    fn write_tree(&mut self, paths: &[String]) -> io::Result<()>;

    fn write_file(&mut self, file: &FileRecord) -> io::Result<()>;

    fn write_footer(&mut self, stats: &ScanStatistics) -> io::Result<()>;

    /// Flush buffered output.
    fn close(&mut self) -> io::Result<()>;
}

/// Position in the emission sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmissionState {
    #[default]
    Start,
    Header,
    Tree,
    Files,
    Footer,
    Closed,
}

impl EmissionState {
    /// Move to `next`.
    ///
    /// # Panics
    ///
    /// Panics when `next` is not allowed after the current state. Writers call
    /// this first in every operation, so an out-of-order call never reaches
    /// the destination.
    pub fn advance(&mut self, next: EmissionState) {
        use EmissionState::*;

        let allowed = match next {
            Start => false,
            Header => *self == Start,
            Tree => *self == Header,
            Files | Footer => matches!(*self, Header | Tree | Files),
            Closed => *self == Footer,
        };
        assert!(allowed, "cannot emit {:?} after {:?}", next, self);
        *self = next;
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Xml,
    Json,
    Markdown,
}

#[derive(Debug, Clone, Error)]
#[error("unsupported format: {0} (supported: xml, json, markdown)")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(OutputFormat::Xml),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

/// Create the writer for `format` over `dest`.
pub fn create_writer<'a, W>(
    format: OutputFormat,
    dest: W,
    options: OutputOptions,
) -> Box<dyn StreamingWriter + 'a>
where
    W: Write + 'a,
{
    match format {
        OutputFormat::Xml => Box::new(XmlWriter::new(dest, options)),
        OutputFormat::Json => Box::new(JsonWriter::new(dest, options)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(dest, options)),
    }
}

/// Replay a batch result through a writer, producing the same document
/// structure as a streaming scan.
pub fn render_result<W>(result: &ScanResult, include_tree: bool, writer: &mut W) -> io::Result<()>
where
    W: StreamingWriter + ?Sized,
{
    writer.write_header(&result.repo_path, &result.scan_time)?;
    if include_tree {
        let paths: Vec<String> = result
            .files
            .iter()
            .map(|f| f.relative_path.clone())
            .collect();
        writer.write_tree(&paths)?;
    }
    for file in &result.files {
        writer.write_file(file)?;
    }
    writer.write_footer(&result.stats)?;
    writer.close()
}
