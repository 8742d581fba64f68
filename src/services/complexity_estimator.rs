use thiserror::Error;
use tree_sitter::{Node, Parser};
use crate::enums::source_language::SourceLanguage;
use crate::structs::function_complexity::FunctionComplexity;

/// Result type for complexity estimation
pub type ComplexityResult<T> = std::result::Result<T, ComplexityError>;

/// Failures are signaled, never mapped to 0: a zero score is a valid
/// result, "could not analyze" is not.
#[derive(Error, Debug)]
pub enum ComplexityError {
    #[error("Unsupported language for '{0}'")]
    UnsupportedLanguage(String),

    #[error("Parse error in '{0}': {1}")]
    ParseError(String, String),
}

pub struct ComplexityEstimator;

impl ComplexityEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Whole-file structural score: base 1, plus one per function or class
    /// definition and per `if`/`while`/`for`. This is the per-issue
    /// variant, not a cyclomatic metric.
    pub fn file_complexity(&self, content: &str, path: &str) -> ComplexityResult<u32> {
        let language = SourceLanguage::from_path(path)
            .ok_or_else(|| ComplexityError::UnsupportedLanguage(path.to_string()))?;
        let tree = parse_source(content, path, language)?;

        let mut complexity = 1u32;
        walk(tree.root_node(), &mut |node| {
            if is_definition(node, language) || is_branch(node, language) {
                complexity += 1;
            }
        });
        Ok(complexity)
    }

    /// Per-function cyclomatic scores: each function starts at 1 and gains
    /// one per `if`/`while`/`for` and per logical and/or inside its
    /// subtree. Used for the repository-wide summary.
    pub fn function_complexities(
        &self,
        content: &str,
        path: &str,
    ) -> ComplexityResult<Vec<FunctionComplexity>> {
        let language = SourceLanguage::from_path(path)
            .ok_or_else(|| ComplexityError::UnsupportedLanguage(path.to_string()))?;
        let tree = parse_source(content, path, language)?;

        let mut functions = Vec::new();
        walk(tree.root_node(), &mut |node| {
            if !is_function(node, language) {
                return;
            }
            let name = node
                .child_by_field_name("name")
                .and_then(|n| n.utf8_text(content.as_bytes()).ok())
                .unwrap_or("<anonymous>")
                .to_string();
            let mut complexity = 1u32;
            walk(node, &mut |inner| {
                if is_branch(inner, language) || is_logical_operator(inner, language) {
                    complexity += 1;
                }
            });
            functions.push(FunctionComplexity { name, complexity });
        });
        Ok(functions)
    }
}

impl Default for ComplexityEstimator {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_source(
    content: &str,
    path: &str,
    language: SourceLanguage,
) -> ComplexityResult<tree_sitter::Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&language.tree_sitter_language())
        .map_err(|e| ComplexityError::ParseError(path.to_string(), e.to_string()))?;
    let tree = parser
        .parse(content, None)
        .ok_or_else(|| ComplexityError::ParseError(path.to_string(), "parser returned no tree".to_string()))?;
    if tree.root_node().has_error() {
        return Err(ComplexityError::ParseError(
            path.to_string(),
            "source contains syntax errors".to_string(),
        ));
    }
    Ok(tree)
}

fn walk(node: Node, visit: &mut impl FnMut(Node)) {
    visit(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, visit);
    }
}

fn is_function(node: Node, language: SourceLanguage) -> bool {
    match language {
        SourceLanguage::Python => node.kind() == "function_definition",
        SourceLanguage::JavaScript => matches!(
            node.kind(),
            "function_declaration"
                | "function_expression"
                | "generator_function_declaration"
                | "arrow_function"
                | "method_definition"
        ),
    }
}

fn is_definition(node: Node, language: SourceLanguage) -> bool {
    if is_function(node, language) {
        return true;
    }
    match language {
        SourceLanguage::Python => node.kind() == "class_definition",
        SourceLanguage::JavaScript => node.kind() == "class_declaration",
    }
}

fn is_branch(node: Node, language: SourceLanguage) -> bool {
    match language {
        SourceLanguage::Python => matches!(
            node.kind(),
            "if_statement" | "while_statement" | "for_statement"
        ),
        SourceLanguage::JavaScript => matches!(
            node.kind(),
            "if_statement" | "while_statement" | "for_statement" | "for_in_statement"
        ),
    }
}

fn is_logical_operator(node: Node, language: SourceLanguage) -> bool {
    match language {
        SourceLanguage::Python => node.kind() == "boolean_operator",
        SourceLanguage::JavaScript => {
            node.kind() == "binary_expression"
                && node
                    .child_by_field_name("operator")
                    .map(|op| matches!(op.kind(), "&&" | "||"))
                    .unwrap_or(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn file_complexity_counts_definitions_and_branches() {
        let source = indoc! {"
            class Widget:
                def resize(self, w):
                    if w > 0:
                        for i in range(w):
                            print(i)

            def main():
                while True:
                    break
        "};
        // base 1 + class + 2 defs + if + for + while = 7
        let estimator = ComplexityEstimator::new();
        assert_eq!(estimator.file_complexity(source, "widget.py").unwrap(), 7);
    }

    #[test]
    fn trivial_file_scores_base_one() {
        let estimator = ComplexityEstimator::new();
        assert_eq!(estimator.file_complexity("x = 1\n", "tiny.py").unwrap(), 1);
    }

    #[test]
    fn function_complexities_use_cyclomatic_rules() {
        let source = indoc! {"
            def simple():
                return 1

            def branchy(a, b):
                if a and b:
                    return 1
                for i in range(3):
                    if i:
                        pass
                return 0
        "};
        let estimator = ComplexityEstimator::new();
        let functions = estimator.function_complexities(source, "mod.py").unwrap();
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0].name, "simple");
        assert_eq!(functions[0].complexity, 1);
        assert_eq!(functions[1].name, "branchy");
        // 1 + if + and + for + if = 5
        assert_eq!(functions[1].complexity, 5);
    }

    #[test]
    fn two_counting_rules_disagree_on_the_same_source() {
        let source = indoc! {"
            def f(a, b):
                if a and b:
                    return 1
                return 0

            def g():
                return 2
        "};
        let estimator = ComplexityEstimator::new();
        // file aggregate: base 1 + two defs + if = 4 (logical ops not counted)
        assert_eq!(estimator.file_complexity(source, "m.py").unwrap(), 4);
        // cyclomatic is per function and does count the logical operator
        let functions = estimator.function_complexities(source, "m.py").unwrap();
        assert_eq!(functions[0].complexity, 3);
        assert_eq!(functions[1].complexity, 1);
    }

    #[test]
    fn javascript_branches_are_counted() {
        let source = indoc! {"
            function render(items) {
                for (const item of items) {
                    if (item.visible && item.ready) {
                        show(item);
                    }
                }
            }
        "};
        let estimator = ComplexityEstimator::new();
        // base 1 + function + for + if = 4
        assert_eq!(estimator.file_complexity(source, "render.js").unwrap(), 4);
        let functions = estimator.function_complexities(source, "render.js").unwrap();
        // 1 + for + if + && = 4
        assert_eq!(functions[0].complexity, 4);
    }

    #[test]
    fn unparseable_source_is_an_error() {
        let estimator = ComplexityEstimator::new();
        let result = estimator.file_complexity("def broken(:\n  ???", "broken.py");
        assert!(matches!(result, Err(ComplexityError::ParseError(_, _))));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let estimator = ComplexityEstimator::new();
        let result = estimator.file_complexity("fn main() {}", "main.rs");
        assert!(matches!(result, Err(ComplexityError::UnsupportedLanguage(_))));
    }
}
