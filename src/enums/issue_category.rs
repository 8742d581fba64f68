use std::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq)]
pub enum IssueCategory {
    #[serde(rename = "bug")]
    Bug,
    #[serde(rename = "feature_request")]
    FeatureRequest,
    #[serde(rename = "documentation")]
    Documentation,
    #[serde(rename = "question")]
    Question,
    #[serde(rename = "enhancement")]
    Enhancement,
    #[serde(rename = "other")]
    Other,
}

impl IssueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Bug => "bug",
            IssueCategory::FeatureRequest => "feature_request",
            IssueCategory::Documentation => "documentation",
            IssueCategory::Question => "question",
            IssueCategory::Enhancement => "enhancement",
            IssueCategory::Other => "other",
        }
    }
}

impl Default for IssueCategory {
    fn default() -> Self {
        IssueCategory::Other
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
