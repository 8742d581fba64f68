use std::collections::{BTreeMap, BTreeSet};
use futures::StreamExt;
use crate::config::constants::COMPLEXITY_REFACTOR_THRESHOLD;
use crate::enums::issue_category::IssueCategory;
use crate::errors::OnrampResult;
use crate::helpers::text_extractors::{extract_code_snippets, extract_imports, extract_test_function_names};
use crate::services::complexity_estimator::ComplexityEstimator;
use crate::services::issue_classifier::classify_issue;
use crate::services::issue_scorer::{match_template, score_issue};
use crate::services::related_files::RelatedFileResolver;
use crate::services::similarity_ranker::rank_similar;
use crate::structs::closed_issue_ref::ClosedIssueRef;
use crate::structs::github::issue::Issue;
use crate::structs::issue_analysis::IssueAnalysis;
use crate::structs::issue_template::IssueTemplate;
use crate::structs::scored_issue::ScoredIssue;
use crate::traits::repository_explorer::RepositoryExplorer;

pub struct IssueAnalyzer<'a, E: RepositoryExplorer + ?Sized> {
    explorer: &'a E,
    estimator: ComplexityEstimator,
    similar_issue_limit: usize,
}

impl<'a, E: RepositoryExplorer + ?Sized> IssueAnalyzer<'a, E> {
    pub fn new(explorer: &'a E, similar_issue_limit: usize) -> Self {
        Self {
            explorer,
            estimator: ComplexityEstimator::new(),
            similar_issue_limit,
        }
    }

    /// Build the full analysis record for one issue. Individual lookups
    /// that fail degrade to absent data; nothing here aborts the batch.
    pub async fn analyze_issue(
        &self,
        issue: &Issue,
        templates: &[IssueTemplate],
    ) -> OnrampResult<IssueAnalysis> {
        let body = issue.body_text().to_string();
        let label_names = issue.label_names();

        let category = classify_issue(&issue.title, &body, &label_names);

        let resolver = RelatedFileResolver::new(self.explorer);
        let files = resolver.resolve(&body, &issue.comment_bodies).await;

        let mut dependency_context: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut complexity: BTreeMap<String, u32> = BTreeMap::new();
        let mut contents: BTreeMap<String, String> = BTreeMap::new();

        for path in &files.related {
            let Some(content) = self.file_content(path).await else {
                continue;
            };

            let imports = extract_imports(&content, path);
            if !imports.is_empty() {
                dependency_context.insert(path.clone(), imports);
            }

            match self.estimator.file_complexity(&content, path) {
                Ok(score) => {
                    complexity.insert(path.clone(), score);
                }
                Err(e) => {
                    // unknown complexity stays absent from the map
                    log::debug!("complexity unavailable for '{}': {}", path, e);
                }
            }

            contents.insert(path.clone(), content);
        }

        let mut test_cases: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for path in &files.tests {
            let content = match contents.get(path) {
                Some(content) => content.clone(),
                None => match self.file_content(path).await {
                    Some(content) => content,
                    None => continue,
                },
            };
            let names = extract_test_function_names(&content);
            if !names.is_empty() {
                test_cases.insert(path.clone(), names);
            }
        }

        let similar_issues = rank_similar(
            &issue.title,
            &self.closed_issue_candidates(issue.number).await,
            self.similar_issue_limit,
        );

        let score = score_issue(issue, templates);

        // evaluated here as well, independently of the scorer's use
        let matched_template = match_template(&body, templates);

        let fix_suggestions = build_fix_suggestions(category, &complexity, &test_cases);

        Ok(IssueAnalysis {
            number: issue.number,
            title: issue.title.clone(),
            category,
            score,
            follows_template: matched_template.is_some(),
            template_name: matched_template.map(|t| t.name.clone()),
            filled_sections: matched_template.map(|t| t.section_names()).unwrap_or_default(),
            related_files: files.related,
            code_snippets: extract_code_snippets(&body),
            dependency_context,
            test_files: files.tests,
            test_cases,
            similar_issues,
            complexity,
            fix_suggestions,
        })
    }

    async fn file_content(&self, path: &str) -> Option<String> {
        match self.explorer.fetch_file_content(path).await {
            Ok(content) => content,
            Err(e) => {
                log::debug!("content unavailable for '{}': {}", path, e);
                None
            }
        }
    }

    /// Drain the lazy closed-issue stream into ranker candidates. A failed
    /// page ends the stream early rather than failing the analysis.
    async fn closed_issue_candidates(&self, current_issue: u64) -> Vec<ClosedIssueRef> {
        let mut candidates = Vec::new();
        let mut stream = match self.explorer.closed_issues().await {
            Ok(stream) => stream,
            Err(e) => {
                log::debug!("closed issues unavailable: {}", e);
                return candidates;
            }
        };
        while let Some(item) = stream.next().await {
            match item {
                Ok(candidate) => {
                    if candidate.number != current_issue {
                        candidates.push(candidate);
                    }
                }
                Err(e) => {
                    log::debug!("closed issue page failed: {}", e);
                    break;
                }
            }
        }
        candidates
    }
}

/// Filter fetched open issues by keyword, score them, and return the most
/// approachable first. Matching stops once `limit` issues are collected,
/// then the collected set is sorted by score.
pub fn filter_and_rank_issues(
    issues: Vec<Issue>,
    keywords: &[String],
    templates: &[IssueTemplate],
    limit: usize,
) -> Vec<ScoredIssue> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let mut scored = Vec::new();

    for issue in issues {
        if scored.len() >= limit {
            break;
        }
        if !keywords.is_empty() {
            let title = issue.title.to_lowercase();
            let body = issue.body_text().to_lowercase();
            if !keywords.iter().any(|k| title.contains(k) || body.contains(k)) {
                continue;
            }
        }
        let score = score_issue(&issue, templates);
        scored.push(ScoredIssue { issue, score });
    }

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

fn build_fix_suggestions(
    category: IssueCategory,
    complexity: &BTreeMap<String, u32>,
    test_cases: &BTreeMap<String, Vec<String>>,
) -> Vec<String> {
    let mut suggestions = vec![category_advice(category).to_string()];

    for (path, score) in complexity {
        if *score > COMPLEXITY_REFACTOR_THRESHOLD {
            suggestions.push(format!(
                "{} has a high structural complexity ({}); consider splitting it into smaller functions while you are in there.",
                path, score
            ));
        }
    }

    if test_cases.is_empty() {
        suggestions.push("No related test cases were found; add tests covering the affected code.".to_string());
    } else {
        let files: Vec<&str> = test_cases.keys().map(|k| k.as_str()).collect();
        suggestions.push(format!(
            "Update the existing test cases in {} to cover your change.",
            files.join(", ")
        ));
    }

    suggestions
}

fn category_advice(category: IssueCategory) -> &'static str {
    match category {
        IssueCategory::Bug => "Reproduce the problem locally and write a failing test before changing any code.",
        IssueCategory::FeatureRequest => "Sketch the public API on the issue thread and get feedback before implementing.",
        IssueCategory::Documentation => "Build the docs locally and keep the tone consistent with the existing pages.",
        IssueCategory::Question => "Search closed issues and discussions first; the answer may already exist.",
        IssueCategory::Enhancement => "Measure before and after so the improvement is demonstrable.",
        IssueCategory::Other => "Clarify the scope with the maintainers before starting work.",
    }
}
