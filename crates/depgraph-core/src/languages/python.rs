//! Python: `import pkg.mod` and `from [.]...pkg import name` resolution.

use std::sync::LazyLock;

use regex::Regex;

use crate::content_reader::ContentReader;
use crate::path_util;
use crate::record::{ImportRecord, PathKind};
use crate::registry::{LanguageModule, Maturity, ParseError, SuppliedFileSet};

use super::text_scan::{self, PYTHON};

static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*import\s+([A-Za-z_][A-Za-z0-9_.]*)").unwrap());
static FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*from\s+(\.*)([A-Za-z_][A-Za-z0-9_.]*)?\s+import\s+").unwrap()
});

pub struct PythonModule;

impl LanguageModule for PythonModule {
    fn extensions(&self) -> &[&str] {
        &["py"]
    }

    fn display_name(&self) -> &str {
        "Python"
    }

    fn maturity(&self) -> Maturity {
        Maturity::Stable
    }

    fn parse(&self, source: &[u8]) -> Result<Vec<ImportRecord>, ParseError> {
        let text = String::from_utf8_lossy(source);
        let cleaned = text_scan::strip(&text, &PYTHON);
        let mut records = Vec::new();

        for caps in IMPORT_RE.captures_iter(&cleaned) {
            // `import a.b, c.d` — only the first module is captured by the
            // anchored regex; split manually to catch the rest.
            let rest_start = caps.get(0).unwrap().end();
            let line_end = cleaned[rest_start..]
                .find('\n')
                .map(|i| rest_start + i)
                .unwrap_or(cleaned.len());
            let first = caps[1].to_string();
            let tail = &cleaned[rest_start..line_end];
            records.push(ImportRecord::absolute(first));
            for extra in tail.split(',') {
                let name = extra.trim().split_whitespace().next().unwrap_or("");
                if !name.is_empty() && name.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
                {
                    records.push(ImportRecord::absolute(name.to_string()));
                }
            }
        }
        for caps in FROM_RE.captures_iter(&cleaned) {
            let dots = caps[1].len();
            let module = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            if dots == 0 {
                records.push(ImportRecord::absolute(module.to_string()));
            } else {
                records.push(ImportRecord::dotted(module.to_string(), dots));
            }
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
        for record in records {
            let ImportRecord::PathImport { path, kind } = record else {
                continue;
            };
            let targets = match kind {
                PathKind::PackageRelativeWithDots { dots } => {
                    resolve_relative(source_file, path, *dots, supplied)
                }
                _ => resolve_absolute(path, supplied),
            };
            for target in targets {
                if target != source_file && seen.insert(target.clone()) {
                    out.push(target);
                }
            }
        }
        out
    }
}

/// Permissive by design: yields every suffix match across the supplied set,
/// not just one sharing the source file's project root.
fn resolve_absolute(module: &str, supplied: &SuppliedFileSet) -> Vec<String> {
    if module.is_empty() {
        return Vec::new();
    }
    let rel = module.replace('.', "/");
    let mut matches: Vec<String> = supplied
        .iter()
        .filter(|p| {
            p.ends_with(&format!("/{rel}.py"))
                || *p == format!("{rel}.py")
                || p.ends_with(&format!("/{rel}/__init__.py"))
                || *p == format!("{rel}/__init__.py")
        })
        .map(|s| s.to_string())
        .collect();
    matches.sort();
    matches.dedup();
    matches
}

fn resolve_relative(
    source_file: &str,
    tail: &str,
    dots: usize,
    supplied: &SuppliedFileSet,
) -> Vec<String> {
    let mut base = path_util::parent(source_file);
    for _ in 0..dots.saturating_sub(1) {
        base = path_util::parent(&base);
    }

    if tail.is_empty() {
        let candidate = path_util::join_clean(&base, "__init__.py");
        return if supplied.contains(&candidate) {
            vec![candidate]
        } else {
            Vec::new()
        };
    }

    let rel = tail.replace('.', "/");
    let mut out = Vec::new();
    for candidate in [
        path_util::join_clean(&base, &format!("{rel}.py")),
        path_util::join_clean(&base, &format!("{rel}/__init__.py")),
    ] {
        if supplied.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_reader::FsContentReader;

    fn module() -> PythonModule {
        PythonModule
    }

    #[test]
    fn parses_plain_and_from_imports() {
        let src = b"import pkg.mod\nfrom . import sibling\nfrom ..utils import slugify\n";
        let records = module().parse(src).unwrap();
        assert_eq!(
            records,
            vec![
                ImportRecord::absolute("pkg.mod"),
                ImportRecord::dotted("", 1),
                ImportRecord::dotted("utils", 2),
            ]
        );
    }

    #[test]
    fn relative_import_resolves_via_parent_directory() {
        let supplied = SuppliedFileSet::new(vec![
            "/project/pkg/sub/app.py".to_string(),
            "/project/pkg/utils.py".to_string(),
        ]);
        let records = vec![ImportRecord::dotted("utils", 2)];
        let got = module().resolve(
            "/project/pkg/sub/app.py",
            &records,
            &supplied,
            &FsContentReader,
        );
        assert_eq!(got, vec!["/project/pkg/utils.py".to_string()]);
    }

    #[test]
    fn absolute_import_matches_package_init() {
        let supplied = SuppliedFileSet::new(vec![
            "/project/pkg/sub/__init__.py".to_string(),
            "/project/main.py".to_string(),
        ]);
        let records = vec![ImportRecord::absolute("pkg.sub")];
        let got = module().resolve("/project/main.py", &records, &supplied, &FsContentReader);
        assert_eq!(got, vec!["/project/pkg/sub/__init__.py".to_string()]);
    }
}
