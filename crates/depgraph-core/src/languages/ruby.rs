//! Ruby: `require_relative` resolves against the source file's directory;
//! `require` is treated as an external (gem) load unless a supplied file's
//! path tail matches it exactly.

use std::sync::LazyLock;

use regex::Regex;

use crate::content_reader::ContentReader;
use crate::path_util;
use crate::record::ImportRecord;
use crate::registry::{LanguageModule, Maturity, ParseError, SuppliedFileSet};

use super::text_scan::{self, HASH_COMMENT};

static REQUIRE_RELATIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"require_relative\s+['"]([^'"]+)['"]"#).unwrap());
static REQUIRE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|[^_])require\s+['"]([^'"]+)['"]"#).unwrap());

pub struct RubyModule;

impl LanguageModule for RubyModule {
    fn extensions(&self) -> &[&str] {
        &["rb"]
    }

    fn display_name(&self) -> &str {
        "Ruby"
    }

    fn maturity(&self) -> Maturity {
        Maturity::Basic
    }

    fn parse(&self, source: &[u8]) -> Result<Vec<ImportRecord>, ParseError> {
        let text = String::from_utf8_lossy(source);
        let cleaned = text_scan::strip(&text, &HASH_COMMENT);
        let mut records = Vec::new();

        for caps in REQUIRE_RELATIVE_RE.captures_iter(&cleaned) {
            records.push(ImportRecord::relative(caps[1].to_string()));
        }
        for caps in REQUIRE_RE.captures_iter(&cleaned) {
            records.push(ImportRecord::absolute(caps[1].to_string()));
        }

        Ok(records)
    }

    fn resolve(
        &self,
        source_file: &str,
        records: &[ImportRecord],
        supplied: &SuppliedFileSet,
        _reader: &dyn ContentReader,
    ) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        let source_dir = path_util::parent(source_file);

        for record in records {
            let ImportRecord::PathImport { path, kind } = record else {
                continue;
            };
            let target = match kind {
                crate::record::PathKind::Relative => {
                    let candidate = path_util::join_clean(&source_dir, &format!("{path}.rb"));
                    let bare = path_util::join_clean(&source_dir, path);
                    if supplied.contains(&candidate) {
                        Some(candidate)
                    } else if supplied.contains(&bare) {
                        Some(bare)
                    } else {
                        None
                    }
                }
                _ => {
                    let tail = format!("{path}.rb");
                    supplied
                        .iter()
                        .find(|p| p.ends_with(&format!("/{tail}")) || *p == &tail)
                        .map(|s| s.to_string())
                }
            };
            if let Some(t) = target {
                if t != source_file && seen.insert(t.clone()) {
                    out.push(t);
                }
            }
        }
        out.sort();
        out
    }
}
