use serde::{Deserialize, Serialize};
use crate::structs::github::commit_detail::CommitDetail;
use crate::structs::github::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetail,
    pub author: Option<User>,
}
