//! Shared `#include` parsing/resolution for the C and C++ registry entries.

use crate::content_reader::ContentReader;
use crate::path_util;
use crate::record::ImportRecord;
use crate::registry::{ParseError, SuppliedFileSet};

use super::text_scan::{self, C_LIKE};

/// Parse `#include "x.h"` (quote form, local) and `#include <x.h>` (angle
/// form, external) directives out of already comment/string-stripped
/// source.
pub fn parse_includes(source: &[u8]) -> Result<Vec<ImportRecord>, ParseError> {
    let text = String::from_utf8_lossy(source);
    let cleaned = text_scan::strip(&text, &C_LIKE);
    let mut records = Vec::new();

    for line in cleaned.lines() {
        let line = line.trim_start();
        let Some(rest) = line.strip_prefix("#include") else {
            continue;
        };
        let rest = rest.trim_start();
        if let Some(quoted) = rest.strip_prefix('"') {
            if let Some(end) = quoted.find('"') {
                records.push(ImportRecord::relative(quoted[..end].to_string()));
            }
        } else if let Some(angled) = rest.strip_prefix('<') {
            if let Some(end) = angled.find('>') {
                records.push(ImportRecord::ExternalImport {
                    name: angled[..end].to_string(),
                });
            }
        }
    }

    Ok(records)
}

/// Resolve a quoted `#include` target: relative to the source file's
/// directory first, then by walking parent directories looking for the
/// header under a sibling `include/` tree.
pub fn resolve_include(
    source_file: &str,
    target: &str,
    supplied: &SuppliedFileSet,
    _reader: &dyn ContentReader,
) -> Vec<String> {
    let mut matches = Vec::new();
    let source_dir = path_util::parent(source_file);

    let direct = path_util::join_clean(&source_dir, target);
    if direct != source_file && supplied.contains(&direct) {
        matches.push(direct);
    }

    let mut dir = source_dir;
    loop {
        let candidate = path_util::join_clean(&path_util::join_clean(&dir, "include"), target);
        if candidate != source_file && supplied.contains(&candidate) && !matches.contains(&candidate)
        {
            matches.push(candidate);
        }
        let up = path_util::parent(&dir);
        if up == dir || up.is_empty() {
            break;
        }
        dir = up;
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_reader::FsContentReader;

    #[test]
    fn parses_quote_and_angle_includes() {
        let src = b"#include \"local.h\"\n#include <stdio.h>\n";
        let records = parse_includes(src).unwrap();
        assert_eq!(
            records,
            vec![
                ImportRecord::relative("local.h"),
                ImportRecord::ExternalImport {
                    name: "stdio.h".to_string()
                },
            ]
        );
    }

    #[test]
    fn ignores_include_text_inside_comment() {
        let src = b"// #include \"fake.h\"\n#include \"real.h\"\n";
        let records = parse_includes(src).unwrap();
        assert_eq!(records, vec![ImportRecord::relative("real.h")]);
    }

    #[test]
    fn resolves_relative_to_source_dir() {
        let supplied = SuppliedFileSet::new(vec!["/repo/src/local.h".to_string()]);
        let got = resolve_include("/repo/src/main.c", "local.h", &supplied, &FsContentReader);
        assert_eq!(got, vec!["/repo/src/local.h".to_string()]);
    }

    #[test]
    fn resolves_through_sibling_include_tree() {
        let supplied = SuppliedFileSet::new(vec!["/repo/include/widget.h".to_string()]);
        let got = resolve_include(
            "/repo/src/sub/main.c",
            "widget.h",
            &supplied,
            &FsContentReader,
        );
        assert_eq!(got, vec!["/repo/include/widget.h".to_string()]);
    }
}
