use std::collections::HashMap;
use chrono::{Duration, Utc};
use crate::config::constants::{
    CI_CD_FILES, COMMUNITY_FILES, DEPENDENCY_FILES, IMPORTANT_FILES, ISSUE_TEMPLATE_DIR,
    RECENT_ACTIVITY_DAYS, SETUP_FILES, STYLE_CONFIG_FILES, TOP_ITEM_COUNT,
};
use crate::enums::entry_kind::EntryKind;
use crate::errors::OnrampResult;
use crate::helpers::markdown::extract_section;
use crate::services::complexity_estimator::ComplexityEstimator;
use crate::services::github_client::GithubClient;
use crate::structs::directory_entry::DirectoryEntry;
use crate::structs::github::commit::Commit;
use crate::structs::github::issue::Issue;
use crate::structs::github::pull_request::PullRequest;
use crate::structs::github::repository::Repository;
use crate::structs::issue_template::IssueTemplate;
use crate::structs::repo::commit_history::CommitHistory;
use crate::structs::repo::complexity_summary::ComplexitySummary;
use crate::structs::repo::dependency_report::DependencyReport;
use crate::structs::repo::file_inventory::FileInventory;
use crate::structs::repo::issue_pr_trends::IssuePrTrends;
use crate::structs::repo::language_files::LanguageFiles;
use crate::structs::repo::project_structure::ProjectStructure;
use crate::structs::repo::repo_analysis::RepoAnalysis;
use crate::structs::repo::setup_info::SetupInfo;
use crate::structs::template_section::TemplateSection;
use crate::traits::repository_explorer::RepositoryExplorer;

/// Repository-wide analysis: everything in the guide that is not tied to a
/// single issue.
pub struct RepoAnalyzer<'a> {
    client: &'a GithubClient,
    estimator: ComplexityEstimator,
}

impl<'a> RepoAnalyzer<'a> {
    pub fn new(client: &'a GithubClient) -> Self {
        Self {
            client,
            estimator: ComplexityEstimator::new(),
        }
    }

    pub async fn analyze(&self, repository: &Repository) -> OnrampResult<RepoAnalysis> {
        let contributors = match self.client.list_contributors().await {
            Ok(contributors) => contributors
                .into_iter()
                .take(TOP_ITEM_COUNT)
                .map(|c| c.login)
                .collect(),
            Err(e) => {
                log::warn!("⚠️ Could not list contributors: {}", e);
                Vec::new()
            }
        };

        let root_entries = self.client.list_directory("").await.unwrap_or_else(|e| {
            log::warn!("⚠️ Could not list repository root: {}", e);
            Vec::new()
        });

        let issues = self.client.list_all_issues().await.unwrap_or_else(|e| {
            log::warn!("⚠️ Could not list issues for trend analysis: {}", e);
            Vec::new()
        });
        let pulls = self.client.list_pull_requests().await.unwrap_or_else(|e| {
            log::warn!("⚠️ Could not list pull requests: {}", e);
            Vec::new()
        });
        let commits = self.client.list_commits().await.unwrap_or_else(|e| {
            log::warn!("⚠️ Could not list commits: {}", e);
            Vec::new()
        });

        Ok(RepoAnalysis {
            name: repository.name.clone(),
            description: repository.description.clone(),
            language: repository.language.clone(),
            contributors,
            setup_info: self.setup_instructions().await,
            project_structure: self.project_structure(repository, &root_entries),
            file_inventory: self.file_inventory(repository, &root_entries).await,
            issue_pr_trends: issue_pr_trends(&issues, &pulls),
            commit_history: commit_history(&commits),
            dependency_report: self.analyze_dependencies().await,
            complexity_summary: self.complexity_summary(&root_entries).await,
            issue_templates: self.discover_issue_templates().await,
        })
    }

    /// First matching installation and contributing sections across the
    /// conventional top-level docs. Each slot keeps its first hit.
    async fn setup_instructions(&self) -> SetupInfo {
        let mut info = SetupInfo::default();
        for file_name in SETUP_FILES {
            let Ok(Some(content)) = self.client.fetch_file_content(file_name).await else {
                continue;
            };
            if info.setup_instructions.is_empty() {
                info.setup_instructions =
                    extract_section(&content, "installation|setup|getting started");
            }
            if info.contribution_guidelines.is_empty() {
                info.contribution_guidelines =
                    extract_section(&content, "contributing|how to contribute");
            }
            if !info.setup_instructions.is_empty() && !info.contribution_guidelines.is_empty() {
                break;
            }
        }
        info
    }

    fn project_structure(
        &self,
        repository: &Repository,
        root_entries: &[DirectoryEntry],
    ) -> ProjectStructure {
        let mut structure = ProjectStructure {
            inferred_language: repository.language.clone(),
            ..Default::default()
        };

        for entry in root_entries {
            match entry.kind {
                EntryKind::Dir => structure.directories.push(entry.name.clone()),
                EntryKind::File => {
                    if STYLE_CONFIG_FILES.contains(&entry.name.as_str()) {
                        structure.important_files.push(entry.name.clone());
                        structure
                            .potential_standards
                            .push(format!("Possible use of {} for code style", entry.name));
                    }
                }
                EntryKind::Other => {}
            }
        }

        if structure.directories.iter().any(|d| d == "tests") {
            structure
                .potential_standards
                .push("Presence of a 'tests' directory suggests unit testing is used".to_string());
        }
        if structure.directories.iter().any(|d| d == "docs") {
            structure
                .potential_standards
                .push("Presence of a 'docs' directory suggests documentation is maintained".to_string());
        }

        structure
    }

    async fn file_inventory(
        &self,
        repository: &Repository,
        root_entries: &[DirectoryEntry],
    ) -> FileInventory {
        let mut inventory = FileInventory::default();

        for entry in root_entries {
            if entry.kind != EntryKind::File {
                continue;
            }
            let name = entry.name.as_str();
            if COMMUNITY_FILES.contains(&name) {
                inventory.community_health.push(entry.name.clone());
            } else if CI_CD_FILES.contains(&name) {
                inventory.ci_cd.push(entry.name.clone());
            } else if IMPORTANT_FILES.contains(&name) {
                inventory.important_files.push(entry.name.clone());
                if name == ".gitignore" {
                    if let Ok(content) = self.client.fetch_file_content(".gitignore").await {
                        inventory.gitignore_content = content;
                    }
                }
            }
        }

        if root_entries
            .iter()
            .any(|e| e.kind == EntryKind::Dir && e.name == ".github")
        {
            let workflow_entries = self
                .client
                .list_directory(".github/workflows")
                .await
                .unwrap_or_default();
            if !workflow_entries.is_empty() {
                inventory.ci_cd.push("GitHub Actions".to_string());
            }
        }

        inventory.language_files = self.language_files(repository).await;
        inventory
    }

    async fn language_files(&self, repository: &Repository) -> LanguageFiles {
        let mut files = LanguageFiles {
            primary_language: repository.language.clone(),
            ..Default::default()
        };
        match repository.language.as_deref().map(str::to_lowercase).as_deref() {
            Some("python") => {
                for file in ["requirements.txt", "setup.py", "Pipfile"] {
                    if self.client.file_exists(file).await.unwrap_or(false) {
                        files.python_files.push(file.to_string());
                    }
                }
            }
            Some("javascript") => {
                files.has_package_json =
                    self.client.file_exists("package.json").await.unwrap_or(false);
            }
            _ => {}
        }
        files
    }

    async fn analyze_dependencies(&self) -> DependencyReport {
        let mut report = DependencyReport::default();
        for (_, files) in DEPENDENCY_FILES {
            for file in *files {
                let Ok(Some(content)) = self.client.fetch_file_content(file).await else {
                    continue;
                };
                report.dependency_files.push(file.to_string());
                match *file {
                    "requirements.txt" => {
                        report.dependencies.extend(
                            content
                                .lines()
                                .map(str::trim)
                                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                                .map(String::from),
                        );
                    }
                    "package.json" => {
                        if let Ok(package) = serde_json::from_str::<serde_json::Value>(&content) {
                            for key in ["dependencies", "devDependencies"] {
                                if let Some(deps) = package.get(key).and_then(|d| d.as_object()) {
                                    report.dependencies.extend(deps.keys().cloned());
                                }
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        report
    }

    /// Repository-wide summary over top-level Python files, built from the
    /// per-function cyclomatic variant. Files that fail to parse are
    /// logged and skipped, never counted as zero.
    async fn complexity_summary(&self, root_entries: &[DirectoryEntry]) -> ComplexitySummary {
        let mut summary = ComplexitySummary::default();
        let mut per_file_averages = 0.0f64;

        for entry in root_entries {
            if entry.kind != EntryKind::File || !entry.name.ends_with(".py") {
                continue;
            }
            let Ok(Some(content)) = self.client.fetch_file_content(&entry.path).await else {
                continue;
            };
            match self.estimator.function_complexities(&content, &entry.path) {
                Ok(functions) => {
                    summary.total_lines += content.lines().count() as u64;
                    summary.total_functions += functions.len() as u64;
                    if !functions.is_empty() {
                        let file_total: u32 = functions.iter().map(|f| f.complexity).sum();
                        per_file_averages += f64::from(file_total) / functions.len() as f64;
                    }
                    summary.files_analyzed += 1;
                }
                Err(e) => {
                    log::warn!("⚠️ Error analyzing file {}: {}", entry.name, e);
                }
            }
        }

        if summary.files_analyzed > 0 {
            summary.avg_function_complexity = per_file_averages / summary.files_analyzed as f64;
        }
        summary
    }

    async fn discover_issue_templates(&self) -> Vec<IssueTemplate> {
        let mut templates = Vec::new();
        let entries = self
            .client
            .list_directory(ISSUE_TEMPLATE_DIR)
            .await
            .unwrap_or_default();

        for entry in &entries {
            if entry.kind != EntryKind::File {
                continue;
            }
            let is_template = ["md", "yml", "yaml"]
                .iter()
                .any(|ext| entry.name.ends_with(&format!(".{}", ext)));
            if !is_template {
                continue;
            }
            if let Ok(Some(content)) = self.client.fetch_file_content(&entry.path).await {
                let name = entry
                    .name
                    .rsplit_once('.')
                    .map(|(stem, _)| stem.to_string())
                    .unwrap_or_else(|| entry.name.clone());
                templates.push(IssueTemplate {
                    name,
                    sections: parse_issue_template(&content),
                });
            }
        }

        if templates.is_empty() {
            // some repositories keep just the two conventional templates
            for name in ["bug_report", "feature_request"] {
                let path = format!("{}/{}.md", ISSUE_TEMPLATE_DIR, name);
                if let Ok(Some(content)) = self.client.fetch_file_content(&path).await {
                    templates.push(IssueTemplate {
                        name: name.to_string(),
                        sections: parse_issue_template(&content),
                    });
                }
            }
        }

        templates
    }
}

/// Split a template body on `## ` headings; text before the first heading
/// is ignored.
pub fn parse_issue_template(content: &str) -> Vec<TemplateSection> {
    let mut sections: Vec<TemplateSection> = Vec::new();
    for line in content.lines() {
        if let Some(heading) = line.strip_prefix("## ") {
            sections.push(TemplateSection {
                name: heading.trim().to_string(),
                content: String::new(),
            });
        } else if let Some(section) = sections.last_mut() {
            if !section.content.is_empty() {
                section.content.push('\n');
            }
            section.content.push_str(line);
        }
    }
    for section in &mut sections {
        section.content = section.content.trim().to_string();
    }
    sections
}

fn issue_pr_trends(issues: &[Issue], pulls: &[PullRequest]) -> IssuePrTrends {
    let now = Utc::now();
    let recent = Duration::days(RECENT_ACTIVITY_DAYS);
    let mut trends = IssuePrTrends::default();
    let mut close_times = Vec::new();
    let mut label_counts: HashMap<String, u64> = HashMap::new();

    for issue in issues {
        if issue.state == "open" {
            trends.open_issues += 1;
        } else {
            trends.closed_issues += 1;
            if let Some(closed_at) = issue.closed_at {
                close_times.push((closed_at - issue.created_at).num_seconds());
            }
        }
        if now - issue.updated_at < recent {
            trends.recent_issue_activity += 1;
        }
        for label in &issue.labels {
            *label_counts.entry(label.name.clone()).or_insert(0) += 1;
        }
    }

    let mut merge_times = Vec::new();
    for pull in pulls {
        if pull.state == "open" {
            trends.open_prs += 1;
        } else if pull.is_merged() {
            trends.merged_prs += 1;
            if let Some(merged_at) = pull.merged_at {
                merge_times.push((merged_at - pull.created_at).num_seconds());
            }
        } else {
            trends.closed_prs += 1;
        }
        if now - pull.updated_at < recent {
            trends.recent_pr_activity += 1;
        }
    }

    trends.avg_days_to_close_issues = average_days(&close_times);
    trends.avg_days_to_merge_prs = average_days(&merge_times);

    let mut ranked_labels: Vec<(String, u64)> = label_counts.into_iter().collect();
    ranked_labels.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    trends.top_issue_labels = ranked_labels
        .into_iter()
        .take(TOP_ITEM_COUNT)
        .map(|(name, _)| name)
        .collect();

    trends
}

fn average_days(seconds: &[i64]) -> Option<f64> {
    if seconds.is_empty() {
        return None;
    }
    let total: i64 = seconds.iter().sum();
    Some(total as f64 / seconds.len() as f64 / 86_400.0)
}

fn commit_history(commits: &[Commit]) -> CommitHistory {
    let now = Utc::now();
    let recent = Duration::days(RECENT_ACTIVITY_DAYS);
    let mut history = CommitHistory {
        total_commits: commits.len() as u64,
        ..Default::default()
    };
    let mut contributor_counts: HashMap<String, u64> = HashMap::new();

    for commit in commits {
        if let Some(date) = commit.commit.author.as_ref().and_then(|a| a.date) {
            if now - date < recent {
                history.recent_commits += 1;
            }
        }
        if let Some(author) = &commit.author {
            *contributor_counts.entry(author.login.clone()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, u64)> = contributor_counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    history.top_contributors = ranked
        .into_iter()
        .take(TOP_ITEM_COUNT)
        .map(|(login, _)| login)
        .collect();

    // the listing is newest first, so the oldest fetched commit anchors
    // the frequency estimate
    if let Some(first_date) = commits
        .last()
        .and_then(|c| c.commit.author.as_ref())
        .and_then(|a| a.date)
    {
        let days = (now - first_date).num_days().max(1);
        history.commits_per_day = Some(history.total_commits as f64 / days as f64);
    }

    history
}
