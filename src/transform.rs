//! Content transformation
//!
//! Three optional stages rewrite file content before it is emitted, always in
//! this order: comment removal, empty-line removal, whitespace compression.
//! Comment removal is a lexical heuristic. It does not know about string
//! literals, so a `//` or `#` inside a string is stripped too.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ScanConfig;
use crate::language::{CommentSyntax, Language};

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//[^\r\n]*").expect("LINE_COMMENT regex is invalid"));

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("BLOCK_COMMENT regex is invalid"));

static HASH_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[^\r\n]*").expect("HASH_COMMENT regex is invalid"));

static MARKUP_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("MARKUP_COMMENT regex is invalid"));

static HORIZONTAL_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("HORIZONTAL_RUN regex is invalid"));

static TRAILING_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)[ \t]+(\r?)$").expect("TRAILING_WHITESPACE regex is invalid")
});

/// The set of enabled transform stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transformer {
    pub remove_comments: bool,
    pub remove_empty_lines: bool,
    pub compress_whitespace: bool,
}

impl Transformer {
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            remove_comments: config.remove_comments,
            remove_empty_lines: config.remove_empty_lines,
            compress_whitespace: config.compress_whitespace,
        }
    }

    /// Whether `apply` would change anything at all.
    pub fn is_identity(&self) -> bool {
        !(self.remove_comments || self.remove_empty_lines || self.compress_whitespace)
    }

    /// Run the enabled stages over `content`.
    pub fn apply(&self, content: &str, language: Option<Language>) -> String {
        let mut processed = content.to_string();

        if self.remove_comments {
            if let Some(lang) = language {
                processed = strip_comments(&processed, lang);
            }
        }
        if self.remove_empty_lines {
            processed = strip_empty_lines(&processed);
        }
        if self.compress_whitespace {
            processed = compress_whitespace(&processed, language);
        }

        processed
    }
}

/// Remove comments using the language's comment syntax.
///
/// Line comments are removed before block comments, so a `//` inside a block
/// comment truncates that line first.
pub fn strip_comments(content: &str, language: Language) -> String {
    match language.comment_syntax() {
        CommentSyntax::CFamily => {
            let without_lines = LINE_COMMENT.replace_all(content, "");
            BLOCK_COMMENT.replace_all(&without_lines, "").into_owned()
        }
        CommentSyntax::Hash => HASH_COMMENT.replace_all(content, "").into_owned(),
        CommentSyntax::Markup => MARKUP_COMMENT.replace_all(content, "").into_owned(),
        CommentSyntax::BlockOnly => BLOCK_COMMENT.replace_all(content, "").into_owned(),
        CommentSyntax::None => content.to_string(),
    }
}

/// Drop every line that is empty after trimming. Line numbers are not preserved.
pub fn strip_empty_lines(content: &str) -> String {
    content
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compress whitespace.
///
/// JSON is minified when it parses; otherwise it falls through to the generic
/// pass. JavaScript and CSS also get runs of spaces and tabs collapsed.
/// Trailing spaces and tabs are removed from every line in all cases.
pub fn compress_whitespace(content: &str, language: Option<Language>) -> String {
    match language {
        Some(Language::Json) => {
            if let Some(minified) = minify_json(content) {
                return minified;
            }
            trim_trailing(content)
        }
        Some(Language::JavaScript) | Some(Language::Css) => {
            let collapsed = HORIZONTAL_RUN.replace_all(content, " ");
            trim_trailing(&collapsed)
        }
        _ => trim_trailing(content),
    }
}

fn minify_json(content: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(content).ok()?;
    serde_json::to_string(&value).ok()
}

fn trim_trailing(content: &str) -> String {
    TRAILING_WHITESPACE.replace_all(content, "${1}").into_owned()
}

/// Count lines in processed content. A trailing newline does not start a new line.
pub fn count_lines(content: &str) -> usize {
    if content.is_empty() {
        return 0;
    }
    let newlines = content.bytes().filter(|&b| b == b'\n').count();
    if content.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}
