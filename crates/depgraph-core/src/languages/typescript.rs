//! TypeScript: JavaScript's import forms plus `import type { … } from '…'`.

use crate::content_reader::ContentReader;
use crate::record::ImportRecord;
use crate::registry::{LanguageModule, Maturity, ParseError, SuppliedFileSet};

use super::javascript::{self, JS_EXTS};

pub struct TypeScriptModule;

impl LanguageModule for TypeScriptModule {
    fn extensions(&self) -> &[&str] {
        &["ts", "tsx"]
    }

    fn display_name(&self) -> &str {
        "TypeScript"
    }

    fn maturity(&self) -> Maturity {
        Maturity::Stable
    }

    fn parse(&self, source: &[u8]) -> Result<Vec<ImportRecord>, ParseError> {
        // `import type { Foo } from '../foo'` already matches javascript's
        // `(?:from|import)` regex — the `type` keyword sits between
        // `import` and `{`, which the shared pattern doesn't require to be
        // absent, so no separate handling is needed beyond reusing the JS
        // parser.
        Ok(javascript::parse_js_like(source))
    }

    fn resolve(
        &self,
        source_file: &str,
        records: &[ImportRecord],
        supplied: &SuppliedFileSet,
        reader: &dyn ContentReader,
    ) -> Vec<String> {
        javascript::resolve_js_like(source_file, records, supplied, reader, JS_EXTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_import_type() {
        let src = b"import type { Foo } from '../foo';\n";
        let records = TypeScriptModule.parse(src).unwrap();
        assert_eq!(records, vec![ImportRecord::relative("../foo")]);
    }
}
