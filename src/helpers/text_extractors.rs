use std::collections::BTreeSet;
use std::path::Path;
use once_cell::sync::Lazy;
use regex::Regex;

// Anchored on a trailing `.ext` token; a dot plus a slash somewhere in the
// word is not enough to qualify as a path.
static FILE_MENTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:[A-Za-z0-9_-]+/)*[A-Za-z0-9_-]+\.[A-Za-z]+\b").expect("file mention pattern")
});

static CODE_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_+-]*\n?(.*?)```").expect("code block pattern")
});

static INLINE_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"`([^`\n]+)`").expect("inline code pattern")
});

static PY_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*import\s+([A-Za-z_][A-Za-z0-9_.]*)").expect("python import pattern")
});

static PY_FROM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*from\s+([A-Za-z_][A-Za-z0-9_.]*)\s+import\b").expect("python from pattern")
});

static JS_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"import\s+[^;]*?\s*from\s+['"]([^'"]+)['"]"#).expect("js import pattern")
});

static JS_REQUIRE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"require\(\s*['"]([^'"]+)['"]\s*\)"#).expect("js require pattern")
});

static TEST_FN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:async\s+def|def|(?:async\s+)?function)\s+(test_[A-Za-z0-9_]*)\s*\(")
        .expect("test function pattern")
});

/// Extract path-like tokens (`segment/segment.ext`, bare `file.ext` also
/// counts) from free text. Deduplicated; empty text yields an empty set.
pub fn find_mentioned_files(text: &str) -> BTreeSet<String> {
    FILE_MENTION_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// All fenced code blocks first, then all single-line inline spans, each
/// group in document order. Delimiters are stripped.
pub fn extract_code_snippets(text: &str) -> Vec<String> {
    let mut snippets: Vec<String> = CODE_BLOCK_RE
        .captures_iter(text)
        .map(|c| c[1].trim().to_string())
        .collect();
    snippets.extend(
        INLINE_CODE_RE
            .captures_iter(text)
            .map(|c| c[1].trim().to_string()),
    );
    snippets
}

/// Imported module names for Python and JavaScript sources, selected by the
/// file extension. Unsupported extensions yield an empty set.
pub fn extract_imports(file_content: &str, file_path: &str) -> BTreeSet<String> {
    let ext = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let mut imports = BTreeSet::new();
    match ext.as_str() {
        "py" | "pyw" => {
            for caps in PY_IMPORT_RE.captures_iter(file_content) {
                imports.insert(caps[1].to_string());
            }
            for caps in PY_FROM_RE.captures_iter(file_content) {
                imports.insert(caps[1].to_string());
            }
        }
        "js" | "mjs" | "cjs" | "jsx" | "ts" | "tsx" => {
            for caps in JS_IMPORT_RE.captures_iter(file_content) {
                imports.insert(caps[1].to_string());
            }
            for caps in JS_REQUIRE_RE.captures_iter(file_content) {
                imports.insert(caps[1].to_string());
            }
        }
        _ => {}
    }
    imports
}

/// Names of declared functions prefixed with `test_`, in document order.
pub fn extract_test_function_names(file_content: &str) -> Vec<String> {
    TEST_FN_RE
        .captures_iter(file_content)
        .map(|c| c[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn mentioned_files_empty_text() {
        assert!(find_mentioned_files("").is_empty());
    }

    #[test]
    fn mentioned_files_with_path() {
        let found = find_mentioned_files("see src/app/main.py for details");
        assert!(found.contains("src/app/main.py"));
    }

    #[test]
    fn mentioned_files_bare_filename_matches() {
        // zero leading segments are allowed
        let found = find_mentioned_files("the config lives in file.txt");
        assert!(found.contains("file.txt"));
    }

    #[test]
    fn mentioned_files_ignores_plain_words() {
        let found = find_mentioned_files("nothing here looks like a path");
        assert!(found.is_empty());
    }

    #[test]
    fn mentioned_files_deduplicates() {
        let found = find_mentioned_files("src/a.py and again src/a.py");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn code_snippets_blocks_before_inline() {
        let text = indoc! {r#"
            Use `quick_fix()` for now.

            ```python
            def broken():
                return 1 / 0
            ```

            Also `other_helper` exists.
        "#};
        let snippets = extract_code_snippets(text);
        assert_eq!(snippets.len(), 3);
        assert!(snippets[0].contains("def broken()"));
        assert_eq!(snippets[1], "quick_fix()");
        assert_eq!(snippets[2], "other_helper");
    }

    #[test]
    fn code_snippets_empty_text() {
        assert!(extract_code_snippets("").is_empty());
    }

    #[test]
    fn python_imports() {
        let content = indoc! {"
            import os
            import collections.abc
            from datetime import datetime

            def handler():
                pass
        "};
        let imports = extract_imports(content, "src/handler.py");
        assert!(imports.contains("os"));
        assert!(imports.contains("collections.abc"));
        assert!(imports.contains("datetime"));
        assert_eq!(imports.len(), 3);
    }

    #[test]
    fn javascript_imports() {
        let content = indoc! {r#"
            import React from "react";
            import { render } from "react-dom";
            const fs = require("fs");
        "#};
        let imports = extract_imports(content, "src/app.js");
        assert!(imports.contains("react"));
        assert!(imports.contains("react-dom"));
        assert!(imports.contains("fs"));
    }

    #[test]
    fn unsupported_extension_yields_empty() {
        assert!(extract_imports("import something", "notes.txt").is_empty());
    }

    #[test]
    fn test_function_names_in_order() {
        let content = indoc! {"
            def test_parses_empty():
                pass

            def helper():
                pass

            async def test_handles_unicode():
                pass

            function test_renders() {
            }
        "};
        let names = extract_test_function_names(content);
        assert_eq!(
            names,
            vec!["test_parses_empty", "test_handles_unicode", "test_renders"]
        );
    }

    #[test]
    fn test_function_names_empty_input() {
        assert!(extract_test_function_names("").is_empty());
    }
}
