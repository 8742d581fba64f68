use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitHistory {
    pub total_commits: u64,
    pub recent_commits: u64,
    pub top_contributors: Vec<String>,
    pub commits_per_day: Option<f64>,
}
