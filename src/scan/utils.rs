//! Shared helpers for the walker and the scanner

use std::path::Path;

use chrono::{DateTime, Local, SecondsFormat};

/// Relative path of `path` under `root`, with `/` separators.
///
/// When `path` is the root itself (a single-file scan), its file name is used.
pub fn relative_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        _ => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned()),
    }
}

/// Lowercased extension with its leading dot, or an empty string.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Case-insensitive suffix match of a full path against an allow-list.
///
/// `lowered_suffixes` must already be lowercase. An empty list matches everything.
pub fn matches_suffix(path: &Path, lowered_suffixes: &[String]) -> bool {
    if lowered_suffixes.is_empty() {
        return true;
    }
    let path = path.to_string_lossy().to_lowercase();
    lowered_suffixes.iter().any(|suffix| path.ends_with(suffix))
}

/// Format a size in bytes using 1024-based units ("512 B", "1.5 KB").
pub fn format_size(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    if bytes < UNIT {
        return format!("{} B", bytes);
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    format!("{:.1} {}B", bytes as f64 / div as f64, PREFIXES[exp])
}

/// RFC 3339 timestamp with second precision, in local time.
pub fn rfc3339(time: DateTime<Local>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Human-readable local timestamp (`2024-01-31 17:05:09`).
pub fn human_time(time: DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Current time as an RFC 3339 string, used as the scan timestamp.
pub fn now_rfc3339() -> String {
    rfc3339(Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let root = PathBuf::from("/repo");
        let path = root.join("src").join("main.go");
        assert_eq!(relative_path(&root, &path), "src/main.go");
    }

    #[test]
    fn test_relative_path_of_root_file() {
        let path = PathBuf::from("/repo/main.go");
        assert_eq!(relative_path(&path, &path), "main.go");
    }

    #[test]
    fn test_dotted_extension() {
        assert_eq!(dotted_extension(Path::new("a/B.GO")), ".go");
        assert_eq!(dotted_extension(Path::new("Makefile")), "");
        assert_eq!(dotted_extension(Path::new(".gitignore")), "");
        assert_eq!(dotted_extension(Path::new("archive.tar.gz")), ".gz");
    }

    #[test]
    fn test_matches_suffix() {
        let exts = vec![".go".to_string(), ".md".to_string()];
        assert!(matches_suffix(Path::new("/r/main.go"), &exts));
        assert!(matches_suffix(Path::new("/r/README.MD"), &exts));
        assert!(!matches_suffix(Path::new("/r/main.rs"), &exts));
        assert!(matches_suffix(Path::new("/r/anything"), &[]));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.0 GB");
    }

    #[test]
    fn test_time_renderings() {
        let time = Local.with_ymd_and_hms(2024, 1, 31, 17, 5, 9).unwrap();
        assert_eq!(human_time(time), "2024-01-31 17:05:09");
        assert!(rfc3339(time).starts_with("2024-01-31T17:05:09"));
    }
}
