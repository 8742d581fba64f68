use std::fs;
use std::io::{self, Write};
use std::time::Instant;
use crate::config::config_manager::ConfigManager;
use crate::enums::commands::Commands;
use crate::errors::{OnrampError, OnrampResult};
use crate::logger::progress_logger::ProgressLogger;
use crate::services::github_client::GithubClient;
use crate::services::issue_analyzer::{filter_and_rank_issues, IssueAnalyzer};
use crate::services::repo_analyzer::RepoAnalyzer;
use crate::services::report_generator::generate_guide;
use crate::structs::config::config::Config;
use crate::structs::github::issue::Issue;
use crate::structs::issue_analysis::IssueAnalysis;
use crate::structs::issue_template::IssueTemplate;
use crate::structs::scored_issue::ScoredIssue;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self { start_time: None }
    }

    pub async fn run_command(&mut self, command: Commands) -> OnrampResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command().await,
            Commands::Analyze { repo, labels, keywords, limit, output } => {
                self.analyze_command(repo, labels, keywords, limit, output).await
            }
            Commands::List => self.list_command().await,
            Commands::Validate => self.validate_command().await,
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::info!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        result
    }

    async fn init_command(&self) -> OnrampResult<()> {
        log::info!("🚀 Initializing onramp configuration...");

        match ConfigManager::create_sample_config() {
            Ok(_) => {
                log::info!("✅ Configuration file created successfully!");
                log::info!("📝 Edit the configuration file to add your repositories.");
                log::info!("🔧 Run 'onramp validate' to check your configuration.");
            }
            Err(e) => {
                log::error!("❌ Failed to create configuration: {}", e);
                return Err(e);
            }
        }

        Ok(())
    }

    async fn analyze_command(
        &self,
        repo: Option<String>,
        labels: Vec<String>,
        keywords: Vec<String>,
        limit: usize,
        output: Option<String>,
    ) -> OnrampResult<()> {
        log::info!("🔍 Starting repository analysis...");

        let config = match ConfigManager::load() {
            Ok(config) => config,
            Err(e) => {
                log::error!("❌ Failed to load configuration: {}", e);
                log::error!("💡 Run 'onramp init' to create a configuration file.");
                return Err(e);
            }
        };

        if let Err(errors) = ConfigManager::validate_config(&config) {
            for error in &errors {
                log::error!("❌ {}", error);
            }
            return Err(OnrampError::config_error(
                "configuration is invalid",
                Some("run 'onramp validate' for details"),
            ));
        }

        let repo_slug = self.resolve_repo_slug(repo, &config)?;
        let token = std::env::var(&config.github.token_env).ok();
        if token.is_none() {
            log::warn!(
                "⚠️ {} is not set; unauthenticated requests are heavily rate-limited",
                config.github.token_env
            );
        }

        let mut client = GithubClient::new(
            config.github.api_url.clone(),
            token,
            &repo_slug,
            config.analysis.page_limit,
        )?;

        let mut progress = ProgressLogger::new();
        progress.start(&format!("Fetching {}", repo_slug));
        let repository = match client.get_repository().await {
            Ok(repository) => repository,
            Err(e) => {
                progress.error(&format!("Could not fetch {}", repo_slug)).await;
                return Err(e);
            }
        };
        client.set_primary_language(repository.language.clone());

        progress.update(format!("Analyzing repository {}", repo_slug));
        let repo_analyzer = RepoAnalyzer::new(&client);
        let repo_analysis = match repo_analyzer.analyze(&repository).await {
            Ok(analysis) => analysis,
            Err(e) => {
                progress.error("Repository analysis failed").await;
                return Err(e);
            }
        };
        progress.stop("Repository analysis complete").await;

        let labels = if labels.is_empty() {
            self.prompt_list("Enter labels to filter by (comma-separated, or press enter to skip): ")?
        } else {
            labels
        };
        let keywords = if keywords.is_empty() {
            self.prompt_list("Enter keywords to filter by (comma-separated, or press enter to skip): ")?
        } else {
            keywords
        };

        let mut progress = ProgressLogger::new();
        progress.start("Fetching open issues");
        let open_issues = match client.list_open_issues(&labels).await {
            Ok(issues) => issues,
            Err(e) => {
                progress.error("Could not fetch open issues").await;
                return Err(e);
            }
        };

        let ranked = filter_and_rank_issues(
            open_issues,
            &keywords,
            &repo_analysis.issue_templates,
            limit,
        );
        log::debug!("{} issues selected for analysis", ranked.len());

        let analyzed = self
            .analyze_issues(
                &client,
                ranked,
                &repo_analysis.issue_templates,
                config.analysis.similar_issue_limit,
                &mut progress,
            )
            .await;
        progress
            .stop(&format!("Analyzed {} issues", analyzed.len()))
            .await;

        let guide = generate_guide(&repo_analysis, &analyzed);
        let output_file = output.unwrap_or_else(|| config.output.output_file.clone());
        fs::write(&output_file, guide)?;

        log::info!("✅ Analysis complete. Results written to {}", output_file);
        Ok(())
    }

    /// Analyze the ranked issues one by one. A single issue failing is
    /// logged and skipped; the batch always runs to the end.
    async fn analyze_issues(
        &self,
        client: &GithubClient,
        ranked: Vec<ScoredIssue>,
        templates: &[IssueTemplate],
        similar_issue_limit: usize,
        progress: &mut ProgressLogger,
    ) -> Vec<(ScoredIssue, IssueAnalysis)> {
        let analyzer = IssueAnalyzer::new(client, similar_issue_limit);
        let total = ranked.len();
        let mut analyzed = Vec::new();

        for (index, mut scored) in ranked.into_iter().enumerate() {
            progress.update(format!(
                "Analyzing issue #{} ({}/{})",
                scored.issue.number,
                index + 1,
                total
            ));

            self.attach_comments(client, &mut scored.issue).await;

            match analyzer.analyze_issue(&scored.issue, templates).await {
                Ok(record) => analyzed.push((scored, record)),
                Err(e) => {
                    log::error!(
                        "❌ Failed to analyze issue #{}: {}",
                        scored.issue.number,
                        e
                    );
                    log::error!("   Continuing with the next issue...");
                }
            }
        }

        analyzed
    }

    async fn attach_comments(&self, client: &GithubClient, issue: &mut Issue) {
        if issue.comments == 0 {
            return;
        }
        match client.list_issue_comments(issue.number).await {
            Ok(comments) => {
                issue.comment_bodies = comments
                    .iter()
                    .map(|c| c.body_text().to_string())
                    .collect();
            }
            Err(e) => {
                log::debug!("comments unavailable for #{}: {}", issue.number, e);
            }
        }
    }

    fn resolve_repo_slug(&self, repo: Option<String>, config: &Config) -> OnrampResult<String> {
        if let Some(repo) = repo {
            // accept a configured name, a full URL, or a bare owner/name
            if let Some(configured) = config.repositories.iter().find(|r| r.name == repo) {
                return Ok(configured.repo.clone());
            }
            return Ok(normalize_repo_slug(&repo));
        }

        let enabled: Vec<_> = config.repositories.iter().filter(|r| r.enabled).collect();
        match enabled.len() {
            0 => {
                let input = self.prompt("Please enter the GitHub repository URL: ")?;
                if input.is_empty() {
                    return Err(OnrampError::UserInputError {
                        input,
                        expected: "a GitHub repository URL or owner/name".to_string(),
                    });
                }
                Ok(normalize_repo_slug(&input))
            }
            1 => Ok(enabled[0].repo.clone()),
            _ => {
                log::info!("📋 Configured repositories:");
                for (i, repo) in enabled.iter().enumerate() {
                    log::info!("  {}. {} ({})", i + 1, repo.name, repo.repo);
                }
                let input = self.prompt("Select repository (number): ")?;
                let index: usize = input.parse().map_err(|_| OnrampError::UserInputError {
                    input: input.clone(),
                    expected: format!("a number between 1 and {}", enabled.len()),
                })?;
                let repo = enabled.get(index.wrapping_sub(1)).ok_or_else(|| {
                    OnrampError::UserInputError {
                        input,
                        expected: format!("a number between 1 and {}", enabled.len()),
                    }
                })?;
                Ok(repo.repo.clone())
            }
        }
    }

    fn prompt(&self, question: &str) -> OnrampResult<String> {
        print!("{}", question);
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    fn prompt_list(&self, question: &str) -> OnrampResult<Vec<String>> {
        let input = self.prompt(question)?;
        Ok(input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect())
    }

    async fn list_command(&self) -> OnrampResult<()> {
        log::info!("📋 Loading repository configuration...");

        let config = ConfigManager::load()?;

        log::info!("\n📋 Configured Repositories:");
        log::info!("{}", "=".repeat(50));

        if config.repositories.is_empty() {
            log::info!("⚠️ No repositories configured.");
            log::info!("💡 Run 'onramp init' to create a configuration file.");
            return Ok(());
        }

        for (i, repo) in config.repositories.iter().enumerate() {
            let marker = if repo.enabled { "✅" } else { "💤" };
            log::info!("{}. {} {}", i + 1, marker, repo.name);
            log::info!("   🐙 Repository: {}", repo.repo);
        }

        log::info!("📊 Total repositories: {}", config.repositories.len());
        Ok(())
    }

    async fn validate_command(&self) -> OnrampResult<()> {
        log::info!("🔍 Validating onramp configuration...");

        let config = match ConfigManager::load() {
            Ok(config) => {
                log::info!("✅ Configuration file loaded successfully");
                config
            }
            Err(e) => {
                log::error!("❌ Failed to load configuration: {}", e);
                log::error!("💡 Run 'onramp init' to create a configuration file.");
                return Err(e);
            }
        };

        match ConfigManager::validate_config(&config) {
            Ok(()) => {
                log::info!("✅ Configuration is valid");
                log::info!(
                    "📊 Found {} configured repositories",
                    config.repositories.len()
                );
            }
            Err(errors) => {
                log::error!("❌ Issues found:");
                for error in &errors {
                    log::error!("   - {}", error);
                }
                return Err(OnrampError::config_error(
                    "configuration is invalid",
                    Some("fix the issues listed above"),
                ));
            }
        }

        if std::env::var(&config.github.token_env).is_err() {
            log::warn!(
                "⚠️ {} is not set; API requests will be rate-limited",
                config.github.token_env
            );
        }

        Ok(())
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Reduce a pasted GitHub URL to its owner/name slug; bare slugs pass
/// through unchanged.
fn normalize_repo_slug(input: &str) -> String {
    let slug = match input.rfind("github.com/") {
        Some(position) => &input[position + "github.com/".len()..],
        None => input,
    };
    slug.trim_end_matches('/')
        .trim_end_matches(".git")
        .to_string()
}
