//! End-of-run summary for the terminal

use std::io::{self, Write};
use std::time::Duration;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::error::ScanIssue;
use crate::scan::ScanStatistics;

/// Number of file types listed in the summary.
const TOP_TYPES: usize = 3;

/// Print the scan summary to stderr.
///
/// `destination` is the output file, or `None` when output went to stdout.
pub fn print_summary(
    stats: &ScanStatistics,
    issues: &[ScanIssue],
    elapsed: Duration,
    destination: Option<&str>,
    use_color: bool,
) -> io::Result<()> {
    let choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    write_summary(&mut stderr, stats, issues, elapsed, destination)
}

/// Write the scan summary to any color-capable writer.
pub fn write_summary<W: WriteColor>(
    out: &mut W,
    stats: &ScanStatistics,
    issues: &[ScanIssue],
    elapsed: Duration,
    destination: Option<&str>,
) -> io::Result<()> {
    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    let mut value = ColorSpec::new();
    value.set_fg(Some(Color::Cyan));

    if let Some(path) = destination {
        write!(out, "Output written to ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(out, "{}", path)?;
        out.reset()?;
    }

    writeln!(out)?;
    out.set_color(&bold)?;
    writeln!(out, "Scan Summary")?;
    out.reset()?;
    writeln!(out, "────────────")?;

    write!(out, "Files processed:  ")?;
    out.set_color(&value)?;
    writeln!(out, "{}", format_number(stats.total_files))?;
    out.reset()?;

    write!(out, "Total size:       ")?;
    out.set_color(&value)?;
    writeln!(out, "{}", stats.total_size_human())?;
    out.reset()?;

    writeln!(
        out,
        "Text / binary:    {} / {}",
        format_number(stats.text_file_count),
        format_number(stats.binary_file_count)
    )?;

    let top = stats.top_types(TOP_TYPES);
    if !top.is_empty() {
        let listed: Vec<String> = top
            .iter()
            .map(|(name, count)| format!("{} ({})", name, count))
            .collect();
        writeln!(out, "Top file types:   {}", listed.join(", "))?;
    }

    if !issues.is_empty() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        writeln!(out, "Warnings:         {}", issues.len())?;
        out.reset()?;
    }

    let elapsed = Duration::from_millis(elapsed.as_millis() as u64);
    writeln!(out, "Elapsed:          {}", humantime::format_duration(elapsed))?;
    Ok(())
}

/// Format a number with thousand separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::NoColor;

    fn render(stats: &ScanStatistics, issues: &[ScanIssue], destination: Option<&str>) -> String {
        let mut out = NoColor::new(Vec::new());
        write_summary(&mut out, stats, issues, Duration::from_millis(1250), destination).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_summary_lines() {
        let mut stats = ScanStatistics::new();
        stats.total_files = 1200;
        stats.total_size_bytes = 2048;
        stats.text_file_count = 1100;
        stats.binary_file_count = 100;
        stats.type_counts.insert("go".to_string(), 900);
        stats.type_counts.insert(".png".to_string(), 100);

        let output = render(&stats, &[], Some("out.xml"));
        assert!(output.starts_with("Output written to out.xml"));
        assert!(output.contains("Files processed:  1,200"));
        assert!(output.contains("Total size:       2.0 KB"));
        assert!(output.contains("Text / binary:    1,100 / 100"));
        assert!(output.contains("Top file types:   go (900), .png (100)"));
        assert!(output.contains("Elapsed:          1s 250ms"));
        assert!(!output.contains("Warnings"));
    }

    #[test]
    fn test_summary_reports_issue_count() {
        let issues = vec![ScanIssue::traverse("/repo/locked", "permission denied")];
        let output = render(&ScanStatistics::new(), &issues, None);
        assert!(output.contains("Warnings:         1"));
        assert!(!output.contains("Output written"));
    }
}
