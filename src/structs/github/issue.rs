use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::structs::github::label::Label;
use crate::structs::github::user::User;

/// Immutable snapshot of a GitHub issue. Comment bodies are attached after
/// fetching so the analysis core sees the issue and its discussion as one
/// value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub comments: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub state: String,
    pub user: Option<User>,
    /// Present when the issue is actually a pull request.
    pub pull_request: Option<serde_json::Value>,
    #[serde(skip, default)]
    pub comment_bodies: Vec<String>,
}

impl Issue {
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.name.clone()).collect()
    }

    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}
