use serde::{Deserialize, Serialize};
use crate::config::constants::{DEFAULT_ISSUE_LIMIT, DEFAULT_PAGE_LIMIT, DEFAULT_SIMILAR_ISSUE_LIMIT};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnalysisConfig {
    /// How many open issues end up in the guide
    #[serde(default = "default_issue_limit")]
    pub issue_limit: usize,

    /// How many similar resolved issues to list per issue
    #[serde(default = "default_similar_issue_limit")]
    pub similar_issue_limit: usize,

    /// Cap on paginated GitHub listings (issues, commits, PRs)
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

fn default_issue_limit() -> usize {
    DEFAULT_ISSUE_LIMIT
}

fn default_similar_issue_limit() -> usize {
    DEFAULT_SIMILAR_ISSUE_LIMIT
}

fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            issue_limit: default_issue_limit(),
            similar_issue_limit: default_similar_issue_limit(),
            page_limit: default_page_limit(),
        }
    }
}
