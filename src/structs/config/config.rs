use serde::{Deserialize, Serialize};
use crate::structs::config::analysis_config::AnalysisConfig;
use crate::structs::config::github_config::GithubConfig;
use crate::structs::config::output_config::OutputConfig;
use crate::structs::config::repository_config::RepositoryConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GithubConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub repositories: Vec<RepositoryConfig>,
}
