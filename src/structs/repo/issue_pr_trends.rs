use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssuePrTrends {
    pub open_issues: u64,
    pub closed_issues: u64,
    pub recent_issue_activity: u64,
    pub open_prs: u64,
    pub closed_prs: u64,
    pub merged_prs: u64,
    pub recent_pr_activity: u64,
    pub avg_days_to_close_issues: Option<f64>,
    pub avg_days_to_merge_prs: Option<f64>,
    pub top_issue_labels: Vec<String>,
}
