use serde::{Deserialize, Serialize};

/// Lightweight reference to a resolved issue, fed to the similarity ranker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedIssueRef {
    pub number: u64,
    pub title: String,
}
