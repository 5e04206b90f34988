//! The closed `ImportRecord` family every language parser emits into.

/// How a `PathImport`'s textual path is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// `./foo`, `../foo` — relative to the importing file.
    Relative,
    /// `foo/bar`, `foo.bar.Baz` — rooted at a package/module root.
    PackageAbsolute,
    /// `.foo`, `..foo` (Python-style leading dots folded into the path).
    PackageRelativeWithDots { dots: usize },
}

/// One parsed import statement, tagged by family. Parsers produce these in
/// source order; duplicates within a file are allowed (the resolver
/// deduplicates targets, not records).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportRecord {
    /// A textual module path as written at the import site.
    PathImport { path: String, kind: PathKind },
    /// Declares that a child module file exists (Rust `mod foo;`).
    ModuleDeclaration { name: String },
    /// A crate/package import known not to resolve locally, retained for
    /// `why`-style diagnostics even though it never yields an edge.
    ExternalImport { name: String },
}

impl ImportRecord {
    pub fn relative(path: impl Into<String>) -> Self {
        ImportRecord::PathImport {
            path: path.into(),
            kind: PathKind::Relative,
        }
    }

    pub fn absolute(path: impl Into<String>) -> Self {
        ImportRecord::PathImport {
            path: path.into(),
            kind: PathKind::PackageAbsolute,
        }
    }

    pub fn dotted(path: impl Into<String>, dots: usize) -> Self {
        ImportRecord::PathImport {
            path: path.into(),
            kind: PathKind::PackageRelativeWithDots { dots },
        }
    }
}
