use serde::{Deserialize, Serialize};
use crate::config::constants::{DEFAULT_API_URL, GITHUB_TOKEN_ENV};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GithubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_token_env() -> String {
    GITHUB_TOKEN_ENV.to_string()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token_env: default_token_env(),
        }
    }
}
