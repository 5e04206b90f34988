use std::sync::LazyLock;

use regex::Regex;

use crate::content_reader::ContentReader;
use crate::record::ImportRecord;
use crate::registry::{LanguageModule, Maturity, ParseError, SuppliedFileSet};

use super::dotted_path;
use super::text_scan::{self, C_LIKE};

static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*import\s+([A-Za-z_][A-Za-z0-9_.]*)").unwrap());

pub struct KotlinModule;

impl LanguageModule for KotlinModule {
    fn extensions(&self) -> &[&str] {
        &["kt", "kts"]
    }

    fn display_name(&self) -> &str {
        "Kotlin"
    }

    fn maturity(&self) -> Maturity {
        Maturity::Active
    }

    fn parse(&self, source: &[u8]) -> Result<Vec<ImportRecord>, ParseError> {
        let text = String::from_utf8_lossy(source);
        let cleaned = text_scan::strip(&text, &C_LIKE);
        Ok(IMPORT_RE
            .captures_iter(&cleaned)
            .map(|caps| ImportRecord::absolute(caps[1].trim_end_matches('.').to_string()))
            .collect())
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
        for record in records {
            if let ImportRecord::PathImport { path, .. } = record {
                for target in dotted_path::resolve_by_suffix(path, "kt", source_file, supplied) {
                    if seen.insert(target.clone()) {
                        out.push(target);
                    }
                }
            }
        }
        out
    }
}
