//! Shared "dotted package path to directory" resolution used by Java,
//! Kotlin, and C#.
//!
//! The package root isn't known without a build manifest, so this converts
//! the dotted path to a directory and matches by suffix across the whole
//! supplied set rather than anchoring to a single source root.

use crate::registry::SuppliedFileSet;

/// Resolve a dotted package path (`foo.bar.Baz`) against files with the
/// given extension, by suffix match. Excludes `source_file`.
pub fn resolve_by_suffix(
    dotted: &str,
    ext: &str,
    source_file: &str,
    supplied: &SuppliedFileSet,
) -> Vec<String> {
    let rel = dotted.replace('.', "/");
    let suffix = format!("{rel}.{ext}");

    let mut matches: Vec<String> = supplied
        .iter()
        .filter(|p| *p != source_file)
        .filter(|p| p.ends_with(&suffix) && is_path_boundary(p, &suffix))
        .map(|s| s.to_string())
        .collect();
    matches.sort();
    matches
}

/// True when `suffix` aligns on a `/` boundary within `path` (so matching
/// `bar.rs` doesn't accidentally match `foobar.rs`).
fn is_path_boundary(path: &str, suffix: &str) -> bool {
    path.len() == suffix.len()
        || path
            .as_bytes()
            .get(path.len() - suffix.len() - 1)
            .is_some_and(|&b| b == b'/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_trailing_directory_structure() {
        let supplied = SuppliedFileSet::new(vec![
            "/repo/src/com/acme/Widget.java".to_string(),
            "/repo/src/com/acme/WidgetFactory.java".to_string(),
        ]);
        let got = resolve_by_suffix("com.acme.Widget", "java", "/repo/src/Main.java", &supplied);
        assert_eq!(got, vec!["/repo/src/com/acme/Widget.java".to_string()]);
    }

    #[test]
    fn excludes_self() {
        let supplied = SuppliedFileSet::new(vec!["/repo/src/com/acme/Widget.java".to_string()]);
        let got = resolve_by_suffix(
            "com.acme.Widget",
            "java",
            "/repo/src/com/acme/Widget.java",
            &supplied,
        );
        assert!(got.is_empty());
    }
}
