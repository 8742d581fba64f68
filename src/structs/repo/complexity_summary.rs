use serde::{Deserialize, Serialize};

/// Repository-wide summary built from the per-function cyclomatic variant,
/// not the per-issue file-aggregate score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplexitySummary {
    pub total_lines: u64,
    pub total_functions: u64,
    pub avg_function_complexity: f64,
    pub files_analyzed: u64,
}
