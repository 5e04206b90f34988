//! Shared comment/string-literal stripping so every parser's import regexes
//! never fire on import-like text sitting inside a comment or a string.
//!
//! This is deliberately not a full tokenizer for any of these languages —
//! just enough to skip line/block comments and quoted strings so import
//! regexes don't fire on commented-out or string-embedded text. Stripped
//! regions are replaced with spaces (newlines preserved) so that line
//! numbers some callers may want to report stay meaningful and so byte
//! offsets of surviving text are unchanged.

/// Per-language comment/string syntax, enough to blank out non-import text.
pub struct CommentSyntax {
    pub line_comment: Option<&'static str>,
    pub block_comment: Option<(&'static str, &'static str)>,
    pub quotes: &'static [char],
    /// Python/Ruby-style triple-quoted strings (`"""`/`'''`).
    pub triple_quotes: bool,
}

pub const C_LIKE: CommentSyntax = CommentSyntax {
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    quotes: &['"', '\''],
    triple_quotes: false,
};

pub const HASH_COMMENT: CommentSyntax = CommentSyntax {
    line_comment: Some("#"),
    block_comment: None,
    quotes: &['"', '\''],
    triple_quotes: false,
};

pub const PYTHON: CommentSyntax = CommentSyntax {
    line_comment: Some("#"),
    block_comment: None,
    quotes: &['"', '\''],
    triple_quotes: true,
};

/// Blank out comments and string-literal bodies, preserving line breaks and
/// overall byte layout outside of those regions.
pub fn strip(src: &str, syntax: &CommentSyntax) -> String {
    let bytes = src.as_bytes();
    let len = bytes.len();
    let mut out: Vec<u8> = Vec::with_capacity(len);
    let mut i = 0;

    while i < len {
        // Line comment.
        if let Some(lc) = syntax.line_comment {
            if starts_with_at(bytes, i, lc) {
                while i < len && bytes[i] != b'\n' {
                    out.push(b' ');
                    i += 1;
                }
                continue;
            }
        }

        // Block comment.
        if let Some((open, close)) = syntax.block_comment {
            if starts_with_at(bytes, i, open) {
                out.extend(std::iter::repeat(b' ').take(open.len()));
                i += open.len();
                while i < len && !starts_with_at(bytes, i, close) {
                    if bytes[i] == b'\n' {
                        out.push(b'\n');
                    } else {
                        out.push(b' ');
                    }
                    i += 1;
                }
                if i < len {
                    out.extend(std::iter::repeat(b' ').take(close.len()));
                    i += close.len();
                }
                continue;
            }
        }

        // Triple-quoted strings.
        if syntax.triple_quotes {
            for q in ["\"\"\"", "'''"] {
                if starts_with_at(bytes, i, q) {
                    out.extend(std::iter::repeat(b' ').take(q.len()));
                    i += q.len();
                    while i < len && !starts_with_at(bytes, i, q) {
                        if bytes[i] == b'\n' {
                            out.push(b'\n');
                        } else {
                            out.push(b' ');
                        }
                        i += 1;
                    }
                    if i < len {
                        out.extend(std::iter::repeat(b' ').take(q.len()));
                        i += q.len();
                    }
                    continue;
                }
            }
        }

        // Single/double quoted strings, with backslash escapes.
        if syntax.quotes.contains(&(bytes[i] as char)) {
            let quote = bytes[i];
            out.push(b' ');
            i += 1;
            while i < len && bytes[i] != quote {
                if bytes[i] == b'\\' && i + 1 < len {
                    out.push(b' ');
                    out.push(b' ');
                    i += 2;
                    continue;
                }
                if bytes[i] == b'\n' {
                    out.push(b'\n');
                } else {
                    out.push(b' ');
                }
                i += 1;
            }
            if i < len {
                out.push(b' ');
                i += 1;
            }
            continue;
        }

        out.push(bytes[i]);
        i += 1;
    }

    // Safety: we only ever overwrite bytes with ASCII spaces/newlines and
    // copy through untouched bytes, so UTF-8 validity of the original is
    // preserved.
    String::from_utf8(out).unwrap_or_default()
}

fn starts_with_at(bytes: &[u8], i: usize, pat: &str) -> bool {
    let pb = pat.as_bytes();
    i + pb.len() <= bytes.len() && &bytes[i..i + pb.len()] == pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_line_comment() {
        let out = strip("use foo; // use bar;\n", &C_LIKE);
        assert!(out.contains("use foo;"));
        assert!(!out.contains("use bar"));
    }

    #[test]
    fn strips_block_comment_preserving_lines() {
        let src = "a\n/* use fake;\n */\nb";
        let out = strip(src, &C_LIKE);
        assert_eq!(out.lines().count(), src.lines().count());
        assert!(!out.contains("fake"));
    }

    #[test]
    fn strips_string_contents() {
        let out = strip(r#"let s = "import os";"#, &C_LIKE);
        assert!(!out.contains("import os"));
    }

    #[test]
    fn python_triple_quote_docstring_is_blanked() {
        let src = "\"\"\"\nimport fake\n\"\"\"\nimport real\n";
        let out = strip(src, &PYTHON);
        assert!(!out.contains("fake"));
        assert!(out.contains("import real"));
    }
}
