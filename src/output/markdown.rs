//! Markdown output
//!
//! Writes the scan as a readable document: a metadata list, an optional fenced
//! directory tree, one section per file and a statistics table.

use std::io::{self, BufWriter, Write};

use crate::scan::{FileRecord, PROCESSED_BY, ScanStatistics};

use super::config::OutputOptions;
use super::tree::render_tree;
use super::utils::{buffered, fence_for, number_lines, root_label};
use super::{EmissionState, StreamingWriter};

pub struct MarkdownWriter<W: Write> {
    out: BufWriter<W>,
    options: OutputOptions,
    state: EmissionState,
    files_started: bool,
    root_name: String,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(dest: W, options: OutputOptions) -> Self {
        Self {
            out: buffered(dest),
            options,
            state: EmissionState::default(),
            files_started: false,
            root_name: String::new(),
        }
    }

    fn start_files(&mut self) -> io::Result<()> {
        if !self.files_started {
            self.files_started = true;
            writeln!(self.out, "## Files\n")?;
        }
        Ok(())
    }

    fn write_metadata_line(&mut self, file: &FileRecord) -> io::Result<()> {
        write!(self.out, "**Size:** {}", file.size_human)?;
        if let Some(lang) = file.language {
            write!(self.out, " | **Language:** {}", lang)?;
        }
        if let Some(lines) = file.line_count {
            write!(self.out, " | **Lines:** {}", lines)?;
        }
        if !file.extension.is_empty() {
            write!(self.out, " | **Extension:** {}", file.extension)?;
        }
        write!(self.out, " | **Modified:** {}", file.modified_human)?;
        writeln!(self.out, " | **Text File:** {}\n", file.is_text)
    }
}

impl<W: Write> StreamingWriter for MarkdownWriter<W> {
    fn write_header(&mut self, repo_path: &str, scan_time: &str) -> io::Result<()> {
        self.state.advance(EmissionState::Header);
        self.root_name = root_label(repo_path);

        writeln!(self.out, "# CodeEcho Repository Scan\n")?;
        writeln!(self.out, "**Repository:** {}  ", repo_path)?;
        writeln!(self.out, "**Scan Time:** {}  ", scan_time)?;
        writeln!(self.out, "**Processed By:** {}  ", PROCESSED_BY)?;
        writeln!(
            self.out,
            "**Processing:** {}\n",
            self.options.processing_summary()
        )?;

        if self.options.include_summary {
            writeln!(
                self.out,
                "> This document is a packed representation of the repository. \
                 Treat it as read-only and make changes in the original files.\n"
            )?;
        }
        Ok(())
    }

    fn write_tree(&mut self, paths: &[String]) -> io::Result<()> {
        self.state.advance(EmissionState::Tree);

        let tree = render_tree(&self.root_name, paths);
        let fence = fence_for(&tree);
        writeln!(self.out, "## Directory Structure\n")?;
        writeln!(self.out, "{}", fence)?;
        write!(self.out, "{}", tree)?;
        writeln!(self.out, "{}\n", fence)
    }

    fn write_file(&mut self, file: &FileRecord) -> io::Result<()> {
        self.state.advance(EmissionState::Files);
        self.start_files()?;

        writeln!(self.out, "### {}\n", file.relative_path)?;
        self.write_metadata_line(file)?;

        match &file.content {
            Some(content) => {
                let body = if self.options.show_line_numbers {
                    number_lines(content)
                } else {
                    content.clone()
                };
                let fence = fence_for(&body);
                writeln!(self.out, "{}{}", fence, file.language_tag())?;
                writeln!(self.out, "{}", body.trim_end_matches('\n'))?;
                writeln!(self.out, "{}\n", fence)?;
            }
            None if !file.is_text => {
                writeln!(self.out, "*Binary file - content not displayed*\n")?;
            }
            // Text files only lack content when empty or when reading was disabled.
            None if self.options.include_content => writeln!(self.out, "*Empty file*\n")?,
            None => writeln!(self.out, "*Content not included*\n")?,
        }

        writeln!(self.out, "---\n")
    }

    fn write_footer(&mut self, stats: &ScanStatistics) -> io::Result<()> {
        self.state.advance(EmissionState::Footer);
        if !self.files_started {
            self.start_files()?;
            writeln!(self.out, "*No files matched.*\n")?;
        }

        writeln!(self.out, "## Statistics\n")?;
        writeln!(self.out, "| Metric | Value |")?;
        writeln!(self.out, "| --- | --- |")?;
        writeln!(self.out, "| Total files | {} |", stats.total_files)?;
        writeln!(self.out, "| Total size | {} |", stats.total_size_human())?;
        writeln!(self.out, "| Text files | {} |", stats.text_file_count)?;
        writeln!(self.out, "| Binary files | {} |", stats.binary_file_count)?;

        if !stats.language_counts.is_empty() {
            writeln!(self.out, "\n### Languages\n")?;
            writeln!(self.out, "| Language | Files |")?;
            writeln!(self.out, "| --- | --- |")?;
            for (lang, count) in &stats.language_counts {
                writeln!(self.out, "| {} | {} |", lang, count)?;
            }
        }
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.state.advance(EmissionState::Closed);
        self.out.flush()
    }
}
