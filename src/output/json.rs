//! JSON output
//!
//! One top-level object written incrementally. Each section begins with its
//! own separating comma, so the document is valid whichever optional parts
//! are present.

use std::io::{self, BufWriter, Write};

use serde_json::json;

use crate::scan::{FileRecord, PROCESSED_BY, ScanStatistics};

use super::config::OutputOptions;
use super::tree::render_tree;
use super::utils::{buffered, number_lines, root_label};
use super::{EmissionState, StreamingWriter};

const RECORD_INDENT: &str = "    ";

pub struct JsonWriter<W: Write> {
    out: BufWriter<W>,
    options: OutputOptions,
    state: EmissionState,
    first_file: bool,
    root_name: String,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(dest: W, options: OutputOptions) -> Self {
        Self {
            out: buffered(dest),
            options,
            state: EmissionState::default(),
            first_file: true,
            root_name: String::new(),
        }
    }
}

fn json_string(s: &str) -> io::Result<String> {
    serde_json::to_string(s).map_err(io::Error::other)
}

/// Pretty-print `value`, indenting every continuation line by `indent`.
fn indented<T: serde::Serialize>(value: &T, indent: &str) -> io::Result<String> {
    let pretty = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    Ok(pretty.replace('\n', &format!("\n{}", indent)))
}

impl<W: Write> StreamingWriter for JsonWriter<W> {
    fn write_header(&mut self, repo_path: &str, scan_time: &str) -> io::Result<()> {
        self.state.advance(EmissionState::Header);
        self.root_name = root_label(repo_path);

        writeln!(self.out, "{{")?;
        writeln!(self.out, "  \"repo_path\": {},", json_string(repo_path)?)?;
        writeln!(self.out, "  \"scan_time\": {},", json_string(scan_time)?)?;
        write!(self.out, "  \"processed_by\": {}", json_string(PROCESSED_BY)?)
    }

    fn write_tree(&mut self, paths: &[String]) -> io::Result<()> {
        self.state.advance(EmissionState::Tree);
        let tree = render_tree(&self.root_name, paths);
        write!(self.out, ",\n  \"directory_tree\": {}", json_string(&tree)?)
    }

    fn write_file(&mut self, file: &FileRecord) -> io::Result<()> {
        self.state.advance(EmissionState::Files);

        if self.first_file {
            self.first_file = false;
            write!(self.out, ",\n  \"files\": [\n")?;
        } else {
            writeln!(self.out, ",")?;
        }

        let body = match (&file.content, self.options.show_line_numbers) {
            (Some(content), true) => {
                let mut numbered = file.clone();
                numbered.content = Some(number_lines(content));
                indented(&numbered, RECORD_INDENT)?
            }
            _ => indented(file, RECORD_INDENT)?,
        };
        write!(self.out, "{}{}", RECORD_INDENT, body)
    }

    fn write_footer(&mut self, stats: &ScanStatistics) -> io::Result<()> {
        self.state.advance(EmissionState::Footer);

        if self.first_file {
            write!(self.out, ",\n  \"files\": []")?;
        } else {
            write!(self.out, "\n  ]")?;
        }

        let statistics = json!({
            "total_files": stats.total_files,
            "total_size": stats.total_size_bytes,
            "total_size_human": stats.total_size_human(),
            "text_files": stats.text_file_count,
            "binary_files": stats.binary_file_count,
            "language_counts": stats.language_counts,
        });
        write!(
            self.out,
            ",\n  \"statistics\": {}\n}}\n",
            indented(&statistics, "  ")?
        )
    }

    fn close(&mut self) -> io::Result<()> {
        self.state.advance(EmissionState::Closed);
        self.out.flush()
    }
}
