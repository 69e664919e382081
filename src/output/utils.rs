//! Shared helpers for the output writers

use std::io::{BufWriter, Write};
use std::path::Path;

/// Capacity of the buffer every writer wraps its destination in.
pub const OUTPUT_BUFFER_SIZE: usize = 64 * 1024;

pub fn buffered<W: Write>(dest: W) -> BufWriter<W> {
    BufWriter::with_capacity(OUTPUT_BUFFER_SIZE, dest)
}

/// Escape text for use in XML character data and attribute values.
///
/// Characters XML 1.0 cannot carry at all, even as references, become U+FFFD.
pub fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c if !is_xml_char(c) => escaped.push(char::REPLACEMENT_CHARACTER),
            c => escaped.push(c),
        }
    }
    escaped
}

/// The XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || (c >= '\u{20}' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// Prefix every line with a right-aligned, 1-based line number (`   1: `).
pub fn number_lines(content: &str) -> String {
    content
        .split('\n')
        .enumerate()
        .map(|(i, line)| format!("{:4}: {}", i + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A backtick fence longer than any backtick run inside `content`.
pub fn fence_for(content: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in content.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

/// Label for the tree root: the repository directory's name.
pub fn root_label(repo_path: &str) -> String {
    Path::new(repo_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| repo_path.to_string())
}
