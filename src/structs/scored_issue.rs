use serde::{Deserialize, Serialize};
use crate::structs::github::issue::Issue;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredIssue {
    pub issue: Issue,
    pub score: u32,
}
