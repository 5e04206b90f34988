//! JavaScript: `import … from 'spec'`, `require('spec')`, dynamic
//! `import('spec')`.

use std::sync::LazyLock;

use regex::Regex;

use crate::content_reader::ContentReader;
use crate::record::ImportRecord;
use crate::registry::{LanguageModule, Maturity, ParseError, SuppliedFileSet};

use super::text_scan::{self, C_LIKE};

static IMPORT_FROM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:from|import)\s*\(?\s*['"]([^'"]+)['"]"#).unwrap());
static REQUIRE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap());

pub struct JavaScriptModule;

impl LanguageModule for JavaScriptModule {
    fn extensions(&self) -> &[&str] {
        &["js", "jsx", "mjs", "cjs"]
    }

    fn display_name(&self) -> &str {
        "JavaScript"
    }

    fn maturity(&self) -> Maturity {
        Maturity::Stable
    }

    fn parse(&self, source: &[u8]) -> Result<Vec<ImportRecord>, ParseError> {
        Ok(parse_js_like(source))
    }

    fn resolve(
        &self,
        source_file: &str,
        records: &[ImportRecord],
        supplied: &SuppliedFileSet,
        reader: &dyn ContentReader,
    ) -> Vec<String> {
        resolve_js_like(source_file, records, supplied, reader, JS_EXTS)
    }
}

pub const JS_EXTS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

pub fn parse_js_like(source: &[u8]) -> Vec<ImportRecord> {
    let text = String::from_utf8_lossy(source);
    let cleaned = text_scan::strip(&text, &C_LIKE);
    let mut records = Vec::new();

    for caps in IMPORT_FROM_RE.captures_iter(&cleaned) {
        records.push(ImportRecord::relative(caps[1].to_string()));
    }
    for caps in REQUIRE_RE.captures_iter(&cleaned) {
        records.push(ImportRecord::relative(caps[1].to_string()));
    }

    records
}

pub fn resolve_js_like(
    source_file: &str,
    records: &[ImportRecord],
    supplied: &SuppliedFileSet,
    _reader: &dyn ContentReader,
    probe_exts: &[&str],
) -> Vec<String> {
    use crate::path_util;

    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    let source_dir = path_util::parent(source_file);

    for record in records {
        let ImportRecord::PathImport { path, .. } = record else {
            continue;
        };
        if !(path.starts_with("./") || path.starts_with("../")) {
            continue; // bare specifier: external package
        }

        let resolved = path_util::join_clean(&source_dir, path);
        let mut candidates = vec![resolved.clone()];
        for ext in probe_exts {
            candidates.push(format!("{resolved}.{ext}"));
        }
        for ext in probe_exts {
            candidates.push(path_util::join_clean(&resolved, &format!("index.{ext}")));
        }

        for candidate in candidates {
            if candidate != source_file && supplied.contains(&candidate) && seen.insert(candidate.clone())
            {
                out.push(candidate);
                break;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_reader::FsContentReader;

    #[test]
    fn parses_import_require_and_dynamic_import() {
        let src = b"import { x } from './to.js';\nconst y = require('./other');\nimport('./lazy');\n";
        let records = parse_js_like(src);
        assert_eq!(
            records,
            vec![
                ImportRecord::relative("./to.js"),
                ImportRecord::relative("./lazy"),
                ImportRecord::relative("./other"),
            ]
        );
    }

    #[test]
    fn bare_specifiers_are_external() {
        let supplied = SuppliedFileSet::new(vec!["/repo/node_modules/lodash/index.js".to_string()]);
        let records = vec![ImportRecord::relative("lodash")];
        let got = resolve_js_like("/repo/a.js", &records, &supplied, &FsContentReader, JS_EXTS);
        assert!(got.is_empty());
    }

    #[test]
    fn relative_import_probes_extensions() {
        let supplied = SuppliedFileSet::new(vec!["/repo/to.js".to_string()]);
        let records = vec![ImportRecord::relative("./to")];
        let got = resolve_js_like("/repo/from.js", &records, &supplied, &FsContentReader, JS_EXTS);
        assert_eq!(got, vec!["/repo/to.js".to_string()]);
    }

    #[test]
    fn relative_import_probes_index() {
        let supplied = SuppliedFileSet::new(vec!["/repo/util/index.js".to_string()]);
        let records = vec![ImportRecord::relative("./util")];
        let got = resolve_js_like("/repo/from.js", &records, &supplied, &FsContentReader, JS_EXTS);
        assert_eq!(got, vec!["/repo/util/index.js".to_string()]);
    }
}
