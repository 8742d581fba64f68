use std::path::Path;

/// Source languages the complexity estimator can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    Python,
    JavaScript,
}

impl SourceLanguage {
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension()?.to_str()?;
        match ext.to_lowercase().as_str() {
            "py" | "pyw" => Some(SourceLanguage::Python),
            "js" | "mjs" | "cjs" | "jsx" => Some(SourceLanguage::JavaScript),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceLanguage::Python => "python",
            SourceLanguage::JavaScript => "javascript",
        }
    }

    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            SourceLanguage::Python => tree_sitter_python::LANGUAGE.into(),
            SourceLanguage::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}
