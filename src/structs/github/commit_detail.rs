use serde::{Deserialize, Serialize};
use crate::structs::github::git_actor::GitActor;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub author: Option<GitActor>,
    pub message: String,
}
