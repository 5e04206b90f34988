//! Path cleaning helpers shared by every resolver.
//!
//! `AbsolutePath` values are never symlink-resolved; cleaning is purely
//! textual (backslash normalisation, `.`/`..` collapsing), matching the
//! data model's "no symlink resolution is performed" invariant.

use std::path::{Path, PathBuf};

/// Clean a path string: normalise separators to `/`, collapse `.` segments
/// and resolve `..` against preceding segments without touching the
/// filesystem. Leading `/` (absolute) is preserved.
pub fn clean(path: &str) -> String {
    let path = path.replace('\\', "/");
    let is_absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                if matches!(parts.last(), Some(&last) if last != "..") {
                    parts.pop();
                } else if !is_absolute {
                    parts.push("..");
                }
            }
            _ => parts.push(segment),
        }
    }

    let joined = parts.join("/");
    if is_absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Join a directory and a relative path, then clean the result.
pub fn join_clean(dir: &str, rel: &str) -> String {
    if dir.is_empty() {
        clean(rel)
    } else {
        clean(&format!("{dir}/{rel}"))
    }
}

/// The parent directory of a cleaned path, as a cleaned path. Never symlink
/// aware; purely lexical.
pub fn parent(path: &str) -> String {
    match Path::new(path).parent() {
        Some(p) => p.to_string_lossy().replace('\\', "/"),
        None => String::new(),
    }
}

/// Absolutize a possibly-relative filesystem path against the current
/// working directory and clean it. Used by the CLI when canonicalising the
/// caller's file list into `AbsolutePath`s; the core itself never calls this
/// — callers hand it already-absolute paths.
pub fn absolutize(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    PathBuf::from(clean(&joined.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_dot_segments() {
        assert_eq!(clean("/a/./b/../c"), "/a/c");
    }

    #[test]
    fn collapses_trailing_separator_noise() {
        assert_eq!(clean("/a/b/"), clean("/a/b"));
        assert_eq!(clean("/a//b"), "/a/b");
    }

    #[test]
    fn normalises_backslashes() {
        assert_eq!(clean(r"a\b\c"), "a/b/c");
    }

    #[test]
    fn leaves_relative_parent_escape_in_place() {
        assert_eq!(clean("../a"), "../a");
    }

    #[test]
    fn join_clean_handles_empty_dir() {
        assert_eq!(join_clean("", "a/b.rs"), "a/b.rs");
        assert_eq!(join_clean("src", "../lib.rs"), "lib.rs");
    }
}
