//! Swift: `import Foo` resolved against a module inferred from Swift Package
//! Manager layout (`Sources/Foo/…`, `Tests/FooTests/…`). Every supplied file
//! under the matching module directory is a target.

use std::sync::LazyLock;

use regex::Regex;

use crate::content_reader::ContentReader;
use crate::record::ImportRecord;
use crate::registry::{LanguageModule, Maturity, ParseError, SuppliedFileSet};

use super::text_scan::{self, C_LIKE};

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*import\s+(?:class|struct|enum|protocol|func|let|var)?\s*([A-Za-z_][A-Za-z0-9_]*)")
        .unwrap()
});

pub struct SwiftModule;

impl LanguageModule for SwiftModule {
    fn extensions(&self) -> &[&str] {
        &["swift"]
    }

    fn display_name(&self) -> &str {
        "Swift"
    }

    fn maturity(&self) -> Maturity {
        Maturity::Basic
    }

    fn parse(&self, source: &[u8]) -> Result<Vec<ImportRecord>, ParseError> {
        let text = String::from_utf8_lossy(source);
        let cleaned = text_scan::strip(&text, &C_LIKE);
        Ok(IMPORT_RE
            .captures_iter(&cleaned)
            .map(|caps| ImportRecord::absolute(caps[1].to_string()))
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
            let ImportRecord::PathImport { path: module, .. } = record else {
                continue;
            };
            for prefix in [
                format!("/Sources/{module}/"),
                format!("/Tests/{module}Tests/"),
            ] {
                for target in supplied.iter() {
                    if target != source_file
                        && target.contains(&prefix)
                        && seen.insert(target.to_string())
                    {
                        out.push(target.to_string());
                    }
                }
            }
        }
        out.sort();
        out
    }
}
