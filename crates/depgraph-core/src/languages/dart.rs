//! Dart: `import`/`export` URIs, both `package:<pkg>/<path>` form (resolved
//! against the nearest `pubspec.yaml` whose declared name matches) and
//! relative URIs (resolved under the source file's directory).

use std::sync::LazyLock;

use regex::Regex;

use crate::content_reader::ContentReader;
use crate::path_util;
use crate::record::ImportRecord;
use crate::registry::{LanguageModule, Maturity, ParseError, SuppliedFileSet};

use super::text_scan::{self, C_LIKE};

static URI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:import|export)\s+['"]([^'"]+)['"]"#).unwrap());

pub struct DartModule;

impl LanguageModule for DartModule {
    fn extensions(&self) -> &[&str] {
        &["dart"]
    }

    fn display_name(&self) -> &str {
        "Dart"
    }

    fn maturity(&self) -> Maturity {
        Maturity::Basic
    }

    fn parse(&self, source: &[u8]) -> Result<Vec<ImportRecord>, ParseError> {
        let text = String::from_utf8_lossy(source);
        let cleaned = text_scan::strip(&text, &C_LIKE);
        Ok(URI_RE
            .captures_iter(&cleaned)
            .map(|caps| ImportRecord::relative(caps[1].to_string()))
            .collect())
    }

    fn resolve(
        &self,
        source_file: &str,
        records: &[ImportRecord],
        supplied: &SuppliedFileSet,
        reader: &dyn ContentReader,
    ) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();

        for record in records {
            let ImportRecord::PathImport { path, .. } = record else {
                continue;
            };
            let target = if let Some(rest) = path.strip_prefix("package:") {
                resolve_package_uri(rest, source_file, supplied, reader)
            } else if path.starts_with("dart:") {
                None
            } else {
                let candidate = path_util::join_clean(&path_util::parent(source_file), path);
                supplied.contains(&candidate).then_some(candidate)
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

fn resolve_package_uri(
    rest: &str,
    source_file: &str,
    supplied: &SuppliedFileSet,
    reader: &dyn ContentReader,
) -> Option<String> {
    let (pkg, lib_rel) = rest.split_once('/')?;
    let pub_root = find_pubspec_root(source_file, pkg, supplied, reader)?;
    let candidate = path_util::join_clean(&path_util::join_clean(&pub_root, "lib"), lib_rel);
    supplied.contains(&candidate).then_some(candidate)
}

fn find_pubspec_root(
    source_file: &str,
    package: &str,
    supplied: &SuppliedFileSet,
    reader: &dyn ContentReader,
) -> Option<String> {
    let mut dir = path_util::parent(source_file);
    loop {
        let candidate = path_util::join_clean(&dir, "pubspec.yaml");
        if supplied.contains(&candidate) || reader.read(&candidate).is_ok() {
            if let Ok(bytes) = reader.read(&candidate) {
                let text = String::from_utf8_lossy(&bytes);
                for line in text.lines() {
                    if let Some(name) = line.strip_prefix("name:") {
                        if name.trim() == package {
                            return Some(dir);
                        }
                        return None;
                    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReadError;

    struct FakeReader;
    impl ContentReader for FakeReader {
        fn read(&self, path: &str) -> Result<Vec<u8>, ReadError> {
            if path == "/repo/pubspec.yaml" {
                Ok(b"name: myapp\nversion: 1.0.0\n".to_vec())
            } else {
                Err(ReadError::NotFound(path.to_string()))
            }
        }
    }

    #[test]
    fn parses_import_and_export_uris() {
        let src = b"import 'package:myapp/util.dart';\nexport 'sibling.dart';\n";
        let records = DartModule.parse(src).unwrap();
        assert_eq!(
            records,
            vec![
                ImportRecord::relative("package:myapp/util.dart"),
                ImportRecord::relative("sibling.dart"),
            ]
        );
    }

    #[test]
    fn resolves_package_uri_via_pubspec_name() {
        let supplied = SuppliedFileSet::new(vec![
            "/repo/pubspec.yaml".to_string(),
            "/repo/lib/main.dart".to_string(),
            "/repo/lib/util.dart".to_string(),
        ]);
        let records = vec![ImportRecord::relative("package:myapp/util.dart")];
        let got = DartModule.resolve("/repo/lib/main.dart", &records, &supplied, &FakeReader);
        assert_eq!(got, vec!["/repo/lib/util.dart".to_string()]);
    }

    #[test]
    fn resolves_relative_uri() {
        let supplied = SuppliedFileSet::new(vec![
            "/repo/lib/main.dart".to_string(),
            "/repo/lib/sibling.dart".to_string(),
        ]);
        let records = vec![ImportRecord::relative("sibling.dart")];
        let got = DartModule.resolve("/repo/lib/main.dart", &records, &supplied, &FakeReader);
        assert_eq!(got, vec!["/repo/lib/sibling.dart".to_string()]);
    }
}
