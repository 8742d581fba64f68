use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarIssue {
    pub number: u64,
    pub title: String,
    pub score: f64,
}
