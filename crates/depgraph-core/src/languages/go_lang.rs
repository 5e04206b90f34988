//! Go: `import "path"` (single and block form), resolved against the
//! module path declared in the nearest `go.mod`.

use std::sync::LazyLock;

use regex::Regex;

use crate::content_reader::ContentReader;
use crate::path_util;
use crate::record::ImportRecord;
use crate::registry::{LanguageModule, Maturity, ParseError, SuppliedFileSet};

use super::text_scan::{self, C_LIKE};

static SINGLE_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\s*import\s+"([^"]+)""#).unwrap());
static BLOCK_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*import\s*\(").unwrap());
static BLOCK_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*(?:[A-Za-z_][A-Za-z0-9_]*\s+)?"([^"]+)""#).unwrap());

pub struct GoModule;

impl LanguageModule for GoModule {
    fn extensions(&self) -> &[&str] {
        &["go"]
    }

    fn display_name(&self) -> &str {
        "Go"
    }

    fn maturity(&self) -> Maturity {
        Maturity::Stable
    }

    fn parse(&self, source: &[u8]) -> Result<Vec<ImportRecord>, ParseError> {
        let text = String::from_utf8_lossy(source);
        let cleaned = text_scan::strip(&text, &C_LIKE);
        let mut records = Vec::new();

        for caps in SINGLE_IMPORT_RE.captures_iter(&cleaned) {
            records.push(ImportRecord::absolute(caps[1].to_string()));
        }

        if let Some(header) = BLOCK_HEADER_RE.find(&cleaned) {
            let rest = &cleaned[header.end()..];
            if let Some(close) = rest.find(')') {
                for line in rest[..close].lines() {
                    if let Some(caps) = BLOCK_ENTRY_RE.captures(line) {
                        records.push(ImportRecord::absolute(caps[1].to_string()));
                    }
                }
            }
        }

        Ok(records)
    }

    fn resolve(
        &self,
        source_file: &str,
        records: &[ImportRecord],
        supplied: &SuppliedFileSet,
        reader: &dyn ContentReader,
    ) -> Vec<String> {
        let Some((module_path, module_root)) = find_go_module(source_file, reader) else {
            return Vec::new();
        };

        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for record in records {
            let ImportRecord::PathImport { path, .. } = record else {
                continue;
            };
            // Standard-library imports have no slash and are never part of
            // the local module.
            if !path.contains('/') && *path != module_path {
                continue;
            }
            let Some(rel_dir) = path
                .strip_prefix(&module_path)
                .map(|r| r.trim_start_matches('/'))
            else {
                continue;
            };
            let dir = path_util::join_clean(&module_root, rel_dir);
            for target in supplied.iter() {
                if target == source_file {
                    continue;
                }
                if target.ends_with(".go") && path_util::parent(target) == dir && seen.insert(target.to_string())
                {
                    out.push(target.to_string());
                }
            }
        }
        out.sort();
        out
    }
}

fn find_go_module(source_file: &str, reader: &dyn ContentReader) -> Option<(String, String)> {
    let mut dir = path_util::parent(source_file);
    loop {
        let candidate = path_util::join_clean(&dir, "go.mod");
        if let Ok(bytes) = reader.read(&candidate) {
            let text = String::from_utf8_lossy(&bytes);
            for line in text.lines() {
                if let Some(module) = line.trim().strip_prefix("module ") {
                    return Some((module.trim().to_string(), dir));
                }
            }
        }
        let up = path_util::parent(&dir);
        if up == dir || dir.is_empty() {
            return None;
        }
        dir = up;
    }
}
