//! Language tags and per-language comment syntax
//!
//! This module provides a closed `Language` enum shared by the classifier and the
//! content transformer. Each variant carries its lowercase tag (the string written
//! into every output format) and the comment syntax used when stripping comments.

use std::fmt;

use serde::{Serialize, Serializer};

/// Language tags recognized by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    Go,
    JavaScript,
    TypeScript,
    Jsx,
    Tsx,
    Python,
    Java,
    Cpp,
    C,
    Rust,
    Ruby,
    Php,
    Css,
    Html,
    Json,
    Markdown,
    Yaml,
    Toml,
    Xml,
    Perl,
    Bash,
    Shell,
}

/// How comments are written in a language, as far as comment stripping cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSyntax {
    /// `// line` and `/* block */`
    CFamily,
    /// `# line`
    Hash,
    /// `<!-- block -->`
    Markup,
    /// `/* block */` only
    BlockOnly,
    /// Left untouched
    None,
}

impl Language {
    /// Detect language from a file extension, with or without the leading dot.
    ///
    /// # Examples
    ///
    /// ```
    /// use codeecho::language::Language;
    ///
    /// assert_eq!(Language::from_extension(".go"), Some(Language::Go));
    /// assert_eq!(Language::from_extension("PY"), Some(Language::Python));
    /// assert_eq!(Language::from_extension(".txt"), None);
    /// ```
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        match ext.to_lowercase().as_str() {
            "go" => Some(Language::Go),
            "js" => Some(Language::JavaScript),
            "ts" => Some(Language::TypeScript),
            "jsx" => Some(Language::Jsx),
            "tsx" => Some(Language::Tsx),
            "py" => Some(Language::Python),
            "java" => Some(Language::Java),
            "cpp" => Some(Language::Cpp),
            "c" | "h" => Some(Language::C),
            "rs" => Some(Language::Rust),
            "rb" => Some(Language::Ruby),
            "php" => Some(Language::Php),
            "css" => Some(Language::Css),
            "html" => Some(Language::Html),
            "json" => Some(Language::Json),
            "md" => Some(Language::Markdown),
            "yml" | "yaml" => Some(Language::Yaml),
            "toml" => Some(Language::Toml),
            "xml" => Some(Language::Xml),
            _ => None,
        }
    }

    /// The lowercase tag written to output (also used as the code fence info string).
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Jsx => "jsx",
            Language::Tsx => "tsx",
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Rust => "rust",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Css => "css",
            Language::Html => "html",
            Language::Json => "json",
            Language::Markdown => "markdown",
            Language::Yaml => "yaml",
            Language::Toml => "toml",
            Language::Xml => "xml",
            Language::Perl => "perl",
            Language::Bash => "bash",
            Language::Shell => "shell",
        }
    }

    /// Comment syntax used by the comment-removal stage.
    ///
    /// Only the languages listed here are rewritten; JSX/TSX, shell scripts and
    /// data formats are passed through unchanged.
    pub fn comment_syntax(&self) -> CommentSyntax {
        match self {
            Language::Go
            | Language::JavaScript
            | Language::TypeScript
            | Language::Java
            | Language::Cpp
            | Language::C
            | Language::Rust
            | Language::Php => CommentSyntax::CFamily,
            Language::Python | Language::Ruby => CommentSyntax::Hash,
            Language::Html | Language::Xml => CommentSyntax::Markup,
            Language::Css => CommentSyntax::BlockOnly,
            _ => CommentSyntax::None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}
