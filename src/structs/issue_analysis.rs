use std::collections::{BTreeMap, BTreeSet};
use serde::{Deserialize, Serialize};
use crate::enums::issue_category::IssueCategory;
use crate::structs::similar_issue::SimilarIssue;

/// Per-issue analysis record. Built fresh per issue per run; ordered
/// collections keep the rendered report deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueAnalysis {
    pub number: u64,
    pub title: String,
    pub category: IssueCategory,
    pub score: u32,
    pub follows_template: bool,
    pub template_name: Option<String>,
    pub filled_sections: Vec<String>,
    pub related_files: BTreeSet<String>,
    pub code_snippets: Vec<String>,
    /// path -> imported module names, only for files where imports were found
    pub dependency_context: BTreeMap<String, BTreeSet<String>>,
    pub test_files: BTreeSet<String>,
    /// test file path -> test function names
    pub test_cases: BTreeMap<String, Vec<String>>,
    pub similar_issues: Vec<SimilarIssue>,
    /// path -> file-aggregate structural complexity; a missing key means
    /// the file could not be analyzed (0 is a valid score, absence is not)
    pub complexity: BTreeMap<String, u32>,
    pub fix_suggestions: Vec<String>,
}
