//! Rust: crate-root-aware `use`/`mod`/`extern crate` resolution.

use std::collections::HashSet;

use regex::Regex;
use std::sync::LazyLock;

use crate::content_reader::ContentReader;
use crate::path_util;
use crate::record::ImportRecord;
use crate::registry::{LanguageModule, Maturity, ParseError, SuppliedFileSet};

use super::text_scan::{self, C_LIKE};

static USE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?use\s+([^;]+);").unwrap());
static MOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?mod\s+([A-Za-z_][A-Za-z0-9_]*)\s*;").unwrap()
});
static EXTERN_CRATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*extern\s+crate\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap()
});

pub struct RustModule;

impl LanguageModule for RustModule {
    fn extensions(&self) -> &[&str] {
        &["rs"]
    }

    fn display_name(&self) -> &str {
        "Rust"
    }

    fn maturity(&self) -> Maturity {
        Maturity::Stable
    }

    fn parse(&self, source: &[u8]) -> Result<Vec<ImportRecord>, ParseError> {
        let text = String::from_utf8_lossy(source);
        let cleaned = text_scan::strip(&text, &C_LIKE);
        let mut records = Vec::new();

        for caps in USE_RE.captures_iter(&cleaned) {
            let path = strip_use_alias(caps[1].trim());
            if !path.is_empty() {
                records.push(ImportRecord::absolute(path));
            }
        }
        for caps in MOD_RE.captures_iter(&cleaned) {
            records.push(ImportRecord::ModuleDeclaration {
                name: caps[1].to_string(),
            });
        }
        for caps in EXTERN_CRATE_RE.captures_iter(&cleaned) {
            records.push(ImportRecord::ExternalImport {
                name: caps[1].to_string(),
            });
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
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for record in records {
            match record {
                ImportRecord::PathImport { path, .. } => {
                    for target in resolve_use_path(source_file, path, supplied, reader) {
                        if target != source_file && seen.insert(target.clone()) {
                            out.push(target);
                        }
                    }
                }
                ImportRecord::ModuleDeclaration { name } => {
                    for target in resolve_mod_decl(source_file, name, supplied) {
                        if target != source_file && seen.insert(target.clone()) {
                            out.push(target);
                        }
                    }
                }
                ImportRecord::ExternalImport { .. } => {}
            }
        }

        out
    }
}

/// Drop a trailing `as alias` from a `use` path, keeping only the real
/// module path (`crate::utils::helper as h` -> `crate::utils::helper`).
fn strip_use_alias(path: &str) -> String {
    match path.find(" as ") {
        Some(idx) => path[..idx].trim().to_string(),
        None => path.trim().to_string(),
    }
}

fn resolve_mod_decl(source_file: &str, name: &str, supplied: &SuppliedFileSet) -> Vec<String> {
    let source_dir = path_util::parent(source_file);
    let mut out = Vec::new();
    for candidate in [
        path_util::join_clean(&source_dir, &format!("{name}.rs")),
        path_util::join_clean(&source_dir, &format!("{name}/mod.rs")),
    ] {
        if supplied.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

fn find_crate_root(
    source_file: &str,
    supplied: &SuppliedFileSet,
    reader: &dyn ContentReader,
) -> Option<String> {
    let mut dir = path_util::parent(source_file);
    loop {
        let candidate = path_util::join_clean(&dir, "Cargo.toml");
        if supplied.contains(&candidate) || reader.read(&candidate).is_ok() {
            return Some(dir);
        }
        let up = path_util::parent(&dir);
        if up == dir || dir.is_empty() {
            return None;
        }
        dir = up;
    }
}

/// Parse `[package] name` and `[lib] name` out of a `Cargo.toml`'s bytes.
fn crate_names_from_manifest(content: &str) -> HashSet<String> {
    let mut names = HashSet::new();
    let mut section = String::new();
    let mut package_name = None;
    let mut lib_name = None;

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            section = line.trim_matches(['[', ']']).to_string();
            continue;
        }
        if !line.starts_with("name") {
            continue;
        }
        let Some((_, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"');
        if value.is_empty() {
            continue;
        }
        match section.as_str() {
            "package" => package_name = Some(value.to_string()),
            "lib" => lib_name = Some(value.to_string()),
            _ => {}
        }
    }

    if let Some(lib) = lib_name {
        names.insert(lib);
    }
    if let Some(pkg) = package_name {
        names.insert(pkg.replace('-', "_"));
    }
    names
}

fn is_local_crate_name(
    first_segment: &str,
    crate_root: &str,
    reader: &dyn ContentReader,
) -> bool {
    let manifest = path_util::join_clean(crate_root, "Cargo.toml");
    match reader.read(&manifest) {
        Ok(bytes) => {
            let content = String::from_utf8_lossy(&bytes);
            crate_names_from_manifest(&content).contains(first_segment)
        }
        Err(_) => false,
    }
}

fn resolve_use_path(
    source_file: &str,
    import_path: &str,
    supplied: &SuppliedFileSet,
    reader: &dyn ContentReader,
) -> Vec<String> {
    let path = import_path.trim();
    if path.is_empty() {
        return Vec::new();
    }

    let mut segments: Vec<&str> = path.split("::").collect();
    let mut base_dir;
    let mut crate_root = String::new();
    let mut rooted_in_local_crate = false;

    match segments[0] {
        "crate" => {
            let Some(root) = find_crate_root(source_file, supplied, reader) else {
                return Vec::new();
            };
            crate_root = root.clone();
            base_dir = path_util::join_clean(&root, "src");
            rooted_in_local_crate = true;
            segments.remove(0);
        }
        "self" | "super" => {
            base_dir = path_util::parent(source_file);
            while !segments.is_empty() {
                match segments[0] {
                    "self" => {
                        segments.remove(0);
                    }
                    "super" => {
                        base_dir = path_util::parent(&base_dir);
                        segments.remove(0);
                    }
                    _ => break,
                }
            }
        }
        first => {
            let Some(root) = find_crate_root(source_file, supplied, reader) else {
                return Vec::new();
            };
            if !is_local_crate_name(first, &root, reader) {
                return Vec::new();
            }
            crate_root = root.clone();
            base_dir = path_util::join_clean(&root, "src");
            rooted_in_local_crate = true;
            segments.remove(0);
        }
    }

    if segments.is_empty() {
        return if rooted_in_local_crate {
            crate_root_candidates(&crate_root, supplied)
        } else {
            Vec::new()
        };
    }

    let mut candidates = module_candidates(&base_dir, &segments, supplied);
    if candidates.is_empty() && segments.len() > 1 {
        // The full path isn't a module file — the last segment is likely a
        // symbol inside a module, not a submodule, so retry one level up.
        candidates.extend(module_candidates(
            &base_dir,
            &segments[..segments.len() - 1],
            supplied,
        ));
    }
    if rooted_in_local_crate && segments.len() == 1 {
        candidates.extend(crate_root_candidates(&crate_root, supplied));
    }

    let mut seen = HashSet::new();
    candidates.retain(|c| supplied.contains(c) && seen.insert(c.clone()));
    candidates
}

fn crate_root_candidates(crate_root: &str, supplied: &SuppliedFileSet) -> Vec<String> {
    if crate_root.is_empty() {
        return Vec::new();
    }
    let lib_rs = path_util::join_clean(&path_util::join_clean(crate_root, "src"), "lib.rs");
    if supplied.contains(&lib_rs) {
        vec![lib_rs]
    } else {
        Vec::new()
    }
}

fn module_candidates(base_dir: &str, segments: &[&str], supplied: &SuppliedFileSet) -> Vec<String> {
    if segments.is_empty() {
        return Vec::new();
    }
    let rel = segments.join("/");
    let module_path = path_util::join_clean(base_dir, &rel);
    let mut out = Vec::new();
    for candidate in [
        format!("{module_path}.rs"),
        path_util::join_clean(&module_path, "mod.rs"),
    ] {
        if supplied.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}
