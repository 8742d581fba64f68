use serde::{Deserialize, Serialize};
use crate::structs::github::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub body: Option<String>,
    pub user: Option<User>,
}

impl Comment {
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}
