pub mod config;
pub mod github_config;
pub mod analysis_config;
pub mod output_config;
pub mod repository_config;
