use crate::content_reader::ContentReader;
use crate::record::ImportRecord;
use crate::registry::{LanguageModule, Maturity, ParseError, SuppliedFileSet};

use super::include_family;

pub struct CppModule;

impl LanguageModule for CppModule {
    fn extensions(&self) -> &[&str] {
        &["cpp", "cc", "cxx", "hpp", "hh"]
    }

    fn display_name(&self) -> &str {
        "C++"
    }

    fn maturity(&self) -> Maturity {
        Maturity::Stable
    }

    fn parse(&self, source: &[u8]) -> Result<Vec<ImportRecord>, ParseError> {
        include_family::parse_includes(source)
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
            if let ImportRecord::PathImport { path, .. } = record {
                for target in include_family::resolve_include(source_file, path, supplied, reader)
                {
                    if seen.insert(target.clone()) {
                        out.push(target);
                    }
                }
            }
        }
        out
    }
}
