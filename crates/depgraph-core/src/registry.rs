//! Language registry: dispatches file extensions to language modules.
//!
//! A flat, ordered table of modules built once at construction: a trait per
//! language, plus a small lookup table from extension to module index.

use std::collections::HashMap;

use crate::content_reader::ContentReader;
use crate::record::ImportRecord;

/// How battle-tested a language module is. Human-facing only — surfaced by
/// the `languages` CLI command, never consulted by resolution logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Maturity {
    Vibed,
    Basic,
    Active,
    Stable,
}

impl Maturity {
    /// One-character glyph for terse CLI output.
    pub fn glyph(self) -> char {
        match self {
            Maturity::Vibed => '~',
            Maturity::Basic => '-',
            Maturity::Active => '+',
            Maturity::Stable => '*',
        }
    }
}

/// A genuine tokenizer failure, as opposed to syntactically-dubious-but-
/// harmless input (which parsers must treat as "no imports found", not an
/// error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// One language's parser + resolver, bundled with its identity.
///
/// Implementations must be pure: `parse` is a function of bytes alone, and
/// `resolve` may only read through the supplied `ContentReader` (for
/// manifest lookups) — never touch global or mutable state.
pub trait LanguageModule: Send + Sync {
    /// File extensions this module handles, without the leading dot.
    fn extensions(&self) -> &[&str];

    /// Human-readable name (e.g. "Rust", "C#").
    fn display_name(&self) -> &str;

    fn maturity(&self) -> Maturity;

    /// Parse raw source bytes into import records, in source order.
    fn parse(&self, source: &[u8]) -> Result<Vec<ImportRecord>, ParseError>;

    /// Resolve parsed records to targets within `supplied`, deduplicated and
    /// order-preserving, excluding `source_file` itself even if an import
    /// would syntactically name it.
    fn resolve(
        &self,
        source_file: &str,
        records: &[ImportRecord],
        supplied: &SuppliedFileSet,
        reader: &dyn ContentReader,
    ) -> Vec<String>;
}

/// The closed universe of files a build/resolve operates over.
#[derive(Debug, Clone, Default)]
pub struct SuppliedFileSet {
    paths: std::collections::HashSet<String>,
}

impl SuppliedFileSet {
    pub fn new(paths: impl IntoIterator<Item = String>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Metadata surfaced by the `languages` CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageInfo {
    pub display_name: String,
    pub maturity_glyph: char,
    pub extensions: Vec<String>,
}

/// Immutable-after-construction table mapping extensions to language
/// modules. Safe to share across concurrent lookups (no mutable state after
/// `new()`).
pub struct LanguageRegistry {
    modules: Vec<Box<dyn LanguageModule>>,
    extension_map: HashMap<String, usize>,
}

impl LanguageRegistry {
    /// Build the registry with every supported language. If two modules
    /// claim the same extension, the first-registered one wins; the
    /// registry's own test suite asserts this never actually happens for
    /// the built-in set.
    pub fn new() -> Self {
        let modules: Vec<Box<dyn LanguageModule>> = vec![
            Box::new(crate::languages::c::CModule),
            Box::new(crate::languages::cpp::CppModule),
            Box::new(crate::languages::csharp::CSharpModule),
            Box::new(crate::languages::dart::DartModule),
            Box::new(crate::languages::go_lang::GoModule),
            Box::new(crate::languages::java::JavaModule),
            Box::new(crate::languages::javascript::JavaScriptModule),
            Box::new(crate::languages::kotlin::KotlinModule),
            Box::new(crate::languages::python::PythonModule),
            Box::new(crate::languages::ruby::RubyModule),
            Box::new(crate::languages::rust_lang::RustModule),
            Box::new(crate::languages::swift::SwiftModule),
            Box::new(crate::languages::typescript::TypeScriptModule),
        ];

        let mut extension_map = HashMap::new();
        for (i, module) in modules.iter().enumerate() {
            for ext in module.extensions() {
                extension_map.entry(ext.to_string()).or_insert(i);
            }
        }

        Self {
            modules,
            extension_map,
        }
    }

    /// Case-sensitive lookup; `ext` must not include the leading dot.
    pub fn module_for_extension(&self, ext: &str) -> Option<&dyn LanguageModule> {
        self.extension_map.get(ext).map(|&i| self.modules[i].as_ref())
    }

    pub fn is_supported_extension(&self, ext: &str) -> bool {
        self.extension_map.contains_key(ext)
    }

    /// Supported languages, ordered alphabetically by display name for
    /// stable help output.
    pub fn supported_languages(&self) -> Vec<LanguageInfo> {
        let mut infos: Vec<LanguageInfo> = self
            .modules
            .iter()
            .map(|m| LanguageInfo {
                display_name: m.display_name().to_string(),
                maturity_glyph: m.maturity().glyph(),
                extensions: m.extensions().iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        infos.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        infos
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
