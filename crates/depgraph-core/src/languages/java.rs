use std::sync::LazyLock;

use regex::Regex;

use crate::content_reader::ContentReader;
use crate::record::ImportRecord;
use crate::registry::{LanguageModule, Maturity, ParseError, SuppliedFileSet};

use super::dotted_path;
use super::text_scan::{self, C_LIKE};

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*import\s+(?:static\s+)?([A-Za-z_][A-Za-z0-9_.]*?)(?:\.\*)?\s*;").unwrap()
});

pub struct JavaModule;

impl LanguageModule for JavaModule {
    fn extensions(&self) -> &[&str] {
        &["java"]
    }

    fn display_name(&self) -> &str {
        "Java"
    }

    fn maturity(&self) -> Maturity {
        Maturity::Stable
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
            if let ImportRecord::PathImport { path, .. } = record {
                for target in dotted_path::resolve_by_suffix(path, "java", source_file, supplied) {
                    if seen.insert(target.clone()) {
                        out.push(target);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_reader::FsContentReader;

    #[test]
    fn parses_dotted_import() {
        let src = b"import foo.bar.Baz;\n";
        let records = JavaModule.parse(src).unwrap();
        assert_eq!(records, vec![ImportRecord::absolute("foo.bar.Baz")]);
    }

    #[test]
    fn resolves_via_directory_match() {
        let supplied = SuppliedFileSet::new(vec!["/repo/src/foo/bar/Baz.java".to_string()]);
        let records = vec![ImportRecord::absolute("foo.bar.Baz")];
        let got = JavaModule.resolve(
            "/repo/src/Main.java",
            &records,
            &supplied,
            &FsContentReader,
        );
        assert_eq!(got, vec!["/repo/src/foo/bar/Baz.java".to_string()]);
    }
}
