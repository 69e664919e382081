//! XML output
//!
//! Structured markup for machine consumers. The whole document sits under a
//! single `<codeecho>` element; `<files>` is opened lazily by the first file
//! (or by the footer when there are none) so the output stays well-formed at
//! every possible file count.

use std::io::{self, BufWriter, Write};

use crate::scan::{FileRecord, PROCESSED_BY, ScanStatistics};

use super::config::OutputOptions;
use super::tree::render_tree;
use super::utils::{buffered, escape_xml, number_lines, root_label};
use super::{EmissionState, StreamingWriter};

pub struct XmlWriter<W: Write> {
    out: BufWriter<W>,
    options: OutputOptions,
    state: EmissionState,
    files_open: bool,
    root_name: String,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(dest: W, options: OutputOptions) -> Self {
        Self {
            out: buffered(dest),
            options,
            state: EmissionState::default(),
            files_open: false,
            root_name: String::new(),
        }
    }

    fn open_files(&mut self) -> io::Result<()> {
        if !self.files_open {
            self.files_open = true;
            writeln!(self.out, "<files>")?;
            writeln!(
                self.out,
                "This section contains the contents of the repository's files.\n"
            )?;
        }
        Ok(())
    }

    fn write_file_summary(&mut self, scan_time: &str) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out, "<file_summary>")?;
        writeln!(out, "This section contains a summary of this file.\n")?;

        writeln!(out, "<purpose>")?;
        writeln!(
            out,
            "This file contains a packed representation of the repository's contents."
        )?;
        writeln!(
            out,
            "It is designed to be easily consumable by automated tools for analysis and review."
        )?;
        writeln!(out, "</purpose>\n")?;

        writeln!(out, "<file_format>")?;
        writeln!(out, "The content is organized as follows:")?;
        writeln!(out, "1. This summary section")?;
        writeln!(out, "2. Repository information")?;
        let mut item = 3;
        if self.options.include_directory_tree {
            writeln!(out, "{}. Directory structure", item)?;
            item += 1;
        }
        writeln!(out, "{}. Multiple file entries, each consisting of:", item)?;
        writeln!(out, "  - File path and metadata as attributes")?;
        writeln!(out, "  - Full contents of the file")?;
        writeln!(out, "{}. Statistics for the whole scan", item + 1)?;
        writeln!(out, "</file_format>\n")?;

        writeln!(out, "<usage_guidelines>")?;
        writeln!(
            out,
            "- This file should be treated as read-only. Any changes should be made to the"
        )?;
        writeln!(out, "  original repository files, not this packed version.")?;
        writeln!(
            out,
            "- Use the file path to distinguish between different files in the repository."
        )?;
        writeln!(
            out,
            "- This file may contain sensitive information. Handle it with the same level"
        )?;
        writeln!(out, "  of security as the original repository.")?;
        writeln!(out, "</usage_guidelines>\n")?;

        writeln!(out, "<notes>")?;
        writeln!(
            out,
            "- Directories on the exclusion list and files outside the extension allow-list are not included"
        )?;
        writeln!(out, "- Binary files are listed without content")?;
        if !self.options.processing_notes().is_empty() {
            writeln!(
                out,
                "- File processing has been applied - content may differ from original files"
            )?;
        }
        writeln!(out, "- Generated by {} on {}", PROCESSED_BY, escape_xml(scan_time))?;
        writeln!(out, "</notes>\n")?;

        writeln!(out, "</file_summary>\n")
    }
}

impl<W: Write> StreamingWriter for XmlWriter<W> {
    fn write_header(&mut self, repo_path: &str, scan_time: &str) -> io::Result<()> {
        self.state.advance(EmissionState::Header);
        self.root_name = root_label(repo_path);

        writeln!(self.out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            self.out,
            "<!-- This file is a merged representation of the codebase, combined into a single document by {}. -->",
            PROCESSED_BY
        )?;
        writeln!(
            self.out,
            "<!-- The content has been processed with the following options: {} -->",
            self.options.processing_summary()
        )?;
        writeln!(self.out, "<codeecho>\n")?;

        if self.options.include_summary {
            self.write_file_summary(scan_time)?;
        }

        writeln!(self.out, "<repository_info>")?;
        writeln!(self.out, "<repo_path>{}</repo_path>", escape_xml(repo_path))?;
        writeln!(self.out, "<scan_time>{}</scan_time>", escape_xml(scan_time))?;
        writeln!(self.out, "<processed_by>{}</processed_by>", PROCESSED_BY)?;
        writeln!(self.out, "</repository_info>\n")
    }

    fn write_tree(&mut self, paths: &[String]) -> io::Result<()> {
        self.state.advance(EmissionState::Tree);

        writeln!(self.out, "<directory_structure>")?;
        write!(self.out, "{}", escape_xml(&render_tree(&self.root_name, paths)))?;
        writeln!(self.out, "</directory_structure>\n")
    }

    fn write_file(&mut self, file: &FileRecord) -> io::Result<()> {
        self.state.advance(EmissionState::Files);
        self.open_files()?;

        write!(self.out, r#"<file path="{}""#, escape_xml(&file.relative_path))?;
        if let Some(lang) = file.language {
            write!(self.out, r#" language="{}""#, lang)?;
        }
        if let Some(lines) = file.line_count {
            write!(self.out, r#" lines="{}""#, lines)?;
        }
        write!(self.out, r#" size="{}""#, file.size_human)?;
        if !file.extension.is_empty() {
            write!(self.out, r#" extension="{}""#, escape_xml(&file.extension))?;
        }
        write!(self.out, r#" modified="{}""#, file.modified_human)?;
        writeln!(self.out, r#" is_text="{}">"#, file.is_text)?;

        match &file.content {
            Some(content) if self.options.show_line_numbers => {
                write!(self.out, "{}", escape_xml(&number_lines(content)))?
            }
            Some(content) => write!(self.out, "{}", escape_xml(content))?,
            None if !file.is_text => {
                write!(self.out, "<!-- Binary file - content not included -->")?
            }
            None if self.options.include_content => write!(self.out, "<!-- Empty file -->")?,
            None => write!(self.out, "<!-- Content not included -->")?,
        }

        writeln!(self.out, "\n</file>\n")
    }

    fn write_footer(&mut self, stats: &ScanStatistics) -> io::Result<()> {
        self.state.advance(EmissionState::Footer);
        self.open_files()?;
        writeln!(self.out, "</files>\n")?;

        writeln!(self.out, "<statistics>")?;
        writeln!(self.out, "<total_files>{}</total_files>", stats.total_files)?;
        writeln!(
            self.out,
            "<total_size>{}</total_size>",
            stats.total_size_human()
        )?;
        writeln!(self.out, "<text_files>{}</text_files>", stats.text_file_count)?;
        writeln!(
            self.out,
            "<binary_files>{}</binary_files>",
            stats.binary_file_count
        )?;
        if !stats.language_counts.is_empty() {
            writeln!(self.out, "<languages>")?;
            for (lang, count) in &stats.language_counts {
                writeln!(
                    self.out,
                    r#"<language name="{}" count="{}"/>"#,
                    escape_xml(lang),
                    count
                )?;
            }
            writeln!(self.out, "</languages>")?;
        }
        writeln!(self.out, "</statistics>")?;
        writeln!(self.out, "</codeecho>")
    }

    fn close(&mut self) -> io::Result<()> {
        self.state.advance(EmissionState::Closed);
        self.out.flush()
    }
}
