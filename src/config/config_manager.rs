use std::fs;
use crate::errors::{OnrampError, OnrampResult};
use crate::structs::config::config::Config;

pub struct ConfigManager;

impl ConfigManager {

    pub fn load() -> OnrampResult<Config> {
        let config_path = dirs::home_dir()
            .map(|d| d.join("onramp/config.toml"))
            .unwrap_or_default();

        if config_path.exists() {
            log::info!("📋 Loading config from: {}", config_path.display());
            let content = fs::read_to_string(&config_path).map_err(|e| {
                OnrampError::ConfigurationFileError {
                    path: config_path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
            let config: Config = toml::from_str(&content)?;
            return Ok(config);
        }

        Ok(Config::default())
    }

    pub fn create_sample_config() -> OnrampResult<()> {
        let sample_config = r#"# Onramp Configuration

[github]
# Base URL of the GitHub REST API (change for GitHub Enterprise)
api_url = "https://api.github.com"

# Environment variable holding the API token
token_env = "GITHUB_TOKEN"

[analysis]
# How many open issues to include in the guide
issue_limit = 10

# How many similar resolved issues to list per issue
similar_issue_limit = 5

# Cap on paginated API listings (100 items per page)
page_limit = 10

[output]
# Where the contribution guide is written
output_file = "contribution_guide.md"

# Repository definitions
[[repositories]]
name = "example"
repo = "octocat/Hello-World"
enabled = true
"#;
        let config_dir = dirs::home_dir()
            .map(|d| d.join("onramp"))
            .unwrap_or_default();
        let config_path = config_dir.join("config.toml");
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }
        fs::write(&config_path, sample_config)?;
        log::info!("✅ Created sample config at: {}", config_path.display());
        Ok(())
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for repo in &config.repositories {
            if !repo.repo.contains('/') || repo.repo.starts_with('/') || repo.repo.ends_with('/') {
                errors.push(format!(
                    "Repository '{}' must name a GitHub repository as owner/name, got: {}",
                    repo.name, repo.repo
                ));
            }
        }

        let mut names = std::collections::HashSet::new();
        for repo in &config.repositories {
            if !names.insert(&repo.name) {
                errors.push(format!("Duplicate repository name: {}", repo.name));
            }
        }

        if config.analysis.issue_limit == 0 {
            errors.push("analysis.issue_limit must be at least 1".to_string());
        }
        if config.analysis.page_limit == 0 {
            errors.push("analysis.page_limit must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::config::repository_config::RepositoryConfig;

    fn config_with_repos(repos: &[(&str, &str)]) -> Config {
        Config {
            repositories: repos
                .iter()
                .map(|(name, repo)| RepositoryConfig {
                    name: name.to_string(),
                    repo: repo.to_string(),
                    enabled: true,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_config_passes() {
        let config = config_with_repos(&[("main", "octo/demo")]);
        assert!(ConfigManager::validate_config(&config).is_ok());
    }

    #[test]
    fn malformed_slug_is_reported() {
        let config = config_with_repos(&[("bad", "no-slash-here")]);
        let errors = ConfigManager::validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("owner/name"));
    }

    #[test]
    fn duplicate_names_are_reported() {
        let config = config_with_repos(&[("dup", "a/b"), ("dup", "c/d")]);
        let errors = ConfigManager::validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("Duplicate")));
    }
}
