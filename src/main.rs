//! CLI entry point for codeecho

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::{ArgAction, Parser, ValueEnum};
use codeecho::{
    OutputFormat, OutputOptions, ScanConfig, ScanError, Scanner, StreamingFailure,
    StreamingOutcome, create_writer, print_summary, render_result,
};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether the summary on stderr should be colored.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            io::stderr().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "codeecho")]
#[command(about = "Pack a repository into a single XML, JSON or Markdown document")]
#[command(version)]
struct Args {
    /// Repository directory (or single file) to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format: xml, json, markdown (or md)
    #[arg(short, long, value_name = "FORMAT", default_value = "xml")]
    format: OutputFormat,

    /// Write output to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Omit the directory tree
    #[arg(long = "no-tree")]
    no_tree: bool,

    /// Omit the explanatory summary section
    #[arg(long = "no-summary")]
    no_summary: bool,

    /// Prefix content lines with line numbers
    #[arg(long = "line-numbers")]
    line_numbers: bool,

    /// List files without reading their content
    #[arg(long = "no-content")]
    no_content: bool,

    /// Strip comments (best-effort, pattern based)
    #[arg(long = "remove-comments")]
    remove_comments: bool,

    /// Drop blank lines
    #[arg(long = "remove-empty-lines")]
    remove_empty_lines: bool,

    /// Compress whitespace; JSON is minified
    #[arg(long = "compress-code")]
    compress_code: bool,

    /// Directory names to skip, comma separated (replaces the defaults)
    #[arg(long = "exclude-dirs", value_name = "DIRS", value_delimiter = ',')]
    exclude_dirs: Option<Vec<String>>,

    /// File suffixes to include, comma separated (replaces the defaults)
    #[arg(
        long = "include-exts",
        value_name = "EXTS",
        value_delimiter = ',',
        conflicts_with = "all_files"
    )]
    include_exts: Option<Vec<String>>,

    /// Include every file regardless of extension
    #[arg(long = "all-files")]
    all_files: bool,

    /// Collect every record before rendering instead of streaming
    #[arg(long = "batch")]
    batch: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Do not print the summary after the scan
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn scan_config(&self) -> ScanConfig {
        let mut config = ScanConfig::default()
            .with_directory_tree(!self.no_tree)
            .with_summary(!self.no_summary)
            .with_line_numbers(self.line_numbers)
            .with_content(!self.no_content)
            .with_remove_comments(self.remove_comments)
            .with_remove_empty_lines(self.remove_empty_lines)
            .with_compress_whitespace(self.compress_code);

        if let Some(dirs) = &self.exclude_dirs {
            config = config.with_excluded_dirs(non_empty(dirs));
        }
        if self.all_files {
            config = config.with_included_extensions(Vec::<String>::new());
        } else if let Some(exts) = &self.include_exts {
            config = config.with_included_extensions(non_empty(exts));
        }
        config
    }
}

fn non_empty(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Install the stderr log subscriber.
///
/// `CODEECHO_LOG` takes the usual `EnvFilter` syntax; `-v` flags override it.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("CODEECHO_LOG")
            .unwrap_or_else(|_| EnvFilter::new("codeecho=warn")),
        1 => EnvFilter::new("codeecho=info"),
        _ => EnvFilter::new("codeecho=debug"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Scan `scanner`'s root and render it to `dest` in the given format.
fn run<W: Write>(
    scanner: &Scanner<'_>,
    format: OutputFormat,
    dest: W,
    batch: bool,
) -> Result<StreamingOutcome, StreamingFailure> {
    let config = scanner.config();
    let mut writer = create_writer(format, dest, OutputOptions::from(config));

    if !batch {
        return scanner.stream_to(writer.as_mut());
    }

    let result = scanner
        .scan_with_progress(|p| {
            debug!(
                processed = p.processed,
                total = ?p.total,
                fraction = ?p.fraction(),
                file = p.current,
                "scanned"
            );
        })
        .map_err(StreamingFailure::before_scan)?;

    if let Err(err) = render_result(&result, config.include_directory_tree, writer.as_mut()) {
        return Err(StreamingFailure {
            error: ScanError::output(err),
            stats: result.stats,
            issues: result.issues,
        });
    }
    Ok(StreamingOutcome {
        stats: result.stats,
        issues: result.issues,
    })
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = args.scan_config();
    let root = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(&args.path)
    };
    let root = normalize(&root);

    // Fail before creating the output file.
    if let Err(e) = Scanner::new(&root, &config).check_root() {
        eprintln!("codeecho: {}", e);
        process::exit(1);
    }

    let output = match &args.output {
        Some(path) => {
            let file = File::create(path).unwrap_or_else(|e| {
                eprintln!("codeecho: cannot create '{}': {}", path.display(), e);
                process::exit(1);
            });
            // The output file may sit inside the scanned tree.
            match std::fs::canonicalize(path) {
                Ok(canonical) => config = config.with_skipped_file(canonical),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "cannot canonicalize output path");
                }
            }
            Some(file)
        }
        None => None,
    };

    let scanner = Scanner::new(&root, &config);
    let started = Instant::now();
    let result = match output {
        Some(file) => run(&scanner, args.format, file, args.batch),
        None => run(&scanner, args.format, io::stdout().lock(), args.batch),
    };

    match result {
        Ok(outcome) => {
            if !args.quiet {
                let destination = args.output.as_ref().map(|p| p.display().to_string());
                if let Err(e) = print_summary(
                    &outcome.stats,
                    &outcome.issues,
                    started.elapsed(),
                    destination.as_deref(),
                    should_use_color(args.color),
                ) {
                    eprintln!("codeecho: error writing summary: {}", e);
                    process::exit(1);
                }
            }
        }
        Err(failure) => {
            eprintln!("codeecho: {}", failure);
            eprintln!(
                "codeecho: {} files processed before the error",
                failure.stats.total_files
            );
            process::exit(1);
        }
    }
}

/// Drop `.` components so `codeecho .` labels the tree with the directory name.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}
