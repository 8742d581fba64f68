//! End-to-end tests for the issue analysis engine, driven through an
//! in-memory repository explorer.

use std::collections::BTreeMap;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use futures::stream;
use indoc::indoc;
use onramp::enums::entry_kind::EntryKind;
use onramp::enums::issue_category::IssueCategory;
use onramp::errors::OnrampResult;
use onramp::services::issue_analyzer::IssueAnalyzer;
use onramp::structs::closed_issue_ref::ClosedIssueRef;
use onramp::structs::directory_entry::DirectoryEntry;
use onramp::structs::github::issue::Issue;
use onramp::structs::github::label::Label;
use onramp::structs::issue_template::IssueTemplate;
use onramp::structs::template_section::TemplateSection;
use onramp::traits::repository_explorer::{ClosedIssueStream, RepositoryExplorer};

/// Repository held entirely in memory: a path -> content map plus a fixed
/// closed-issue history.
struct InMemoryRepo {
    files: BTreeMap<String, String>,
    closed: Vec<ClosedIssueRef>,
}

impl InMemoryRepo {
    fn new() -> Self {
        let mut files = BTreeMap::new();
        files.insert(
            "src/config.py".to_string(),
            indoc! {"
                import os
                from pathlib import Path

                def load(path):
                    if not path:
                        return {}
                    for line in open(path):
                        if line.strip():
                            print(line)
                    return {}
            "}
            .to_string(),
        );
        files.insert(
            "src/util.py".to_string(),
            "import json\n\ndef dump(x):\n    return json.dumps(x)\n".to_string(),
        );
        files.insert(
            "tests/test_config.py".to_string(),
            indoc! {"
                import pytest

                def test_load_empty():
                    pass

                def test_load_missing_file():
                    pass
            "}
            .to_string(),
        );
        Self {
            files,
            closed: vec![
                ClosedIssueRef {
                    number: 7,
                    title: "Crash when config file is empty".to_string(),
                },
                ClosedIssueRef {
                    number: 8,
                    title: "Completely unrelated packaging problem".to_string(),
                },
            ],
        }
    }
}

#[async_trait]
impl RepositoryExplorer for InMemoryRepo {
    async fn fetch_file_content(&self, path: &str) -> OnrampResult<Option<String>> {
        Ok(self.files.get(path).cloned())
    }

    async fn file_exists(&self, path: &str) -> OnrampResult<bool> {
        Ok(self.files.contains_key(path))
    }

    async fn list_directory(&self, path: &str) -> OnrampResult<Vec<DirectoryEntry>> {
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{}/", path)
        };
        let mut seen_dirs = std::collections::BTreeSet::new();
        let mut entries = Vec::new();
        for file in self.files.keys() {
            let Some(rest) = file.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    if seen_dirs.insert(dir.to_string()) {
                        entries.push(DirectoryEntry {
                            name: dir.to_string(),
                            path: format!("{}{}", prefix, dir),
                            kind: EntryKind::Dir,
                        });
                    }
                }
                None => entries.push(DirectoryEntry {
                    name: rest.to_string(),
                    path: file.clone(),
                    kind: EntryKind::File,
                }),
            }
        }
        Ok(entries)
    }

    async fn closed_issues(&self) -> OnrampResult<ClosedIssueStream> {
        let items: Vec<OnrampResult<ClosedIssueRef>> =
            self.closed.iter().cloned().map(Ok).collect();
        Ok(Box::pin(stream::iter(items)))
    }

    fn primary_language(&self) -> Option<String> {
        Some("Python".to_string())
    }
}

fn fixture_issue() -> Issue {
    let now = Utc::now();
    Issue {
        number: 42,
        title: "Crash when config file is empty or missing".to_string(),
        body: Some(
            indoc! {"
                Loading a missing config makes the app crash in src/config.py.

                ```python
                config = load(None)
                ```

                The traceback points at `load`.

                ## Steps to Reproduce
                run with no config

                ## Expected Behavior
                fall back to defaults
            "}
            .to_string(),
        ),
        labels: vec![Label {
            name: "good first issue".to_string(),
        }],
        comments: 1,
        created_at: now - Duration::days(5),
        updated_at: now,
        closed_at: None,
        state: "open".to_string(),
        user: None,
        pull_request: None,
        comment_bodies: vec!["src/util.py may also need a guard".to_string()],
    }
}

fn bug_template() -> IssueTemplate {
    IssueTemplate {
        name: "bug_report".to_string(),
        sections: vec![
            TemplateSection {
                name: "Steps to Reproduce".to_string(),
                content: String::new(),
            },
            TemplateSection {
                name: "Expected Behavior".to_string(),
                content: String::new(),
            },
        ],
    }
}

#[tokio::test]
async fn full_analysis_record_is_assembled() {
    let repo = InMemoryRepo::new();
    let analyzer = IssueAnalyzer::new(&repo, 5);
    let issue = fixture_issue();
    let templates = vec![bug_template()];

    let record = analyzer.analyze_issue(&issue, &templates).await.unwrap();

    assert_eq!(record.number, 42);
    assert_eq!(record.category, IssueCategory::Bug);

    // related files come from body + comments, confirmed against the tree
    assert!(record.related_files.contains("src/config.py"));
    assert!(record.related_files.contains("src/util.py"));
    assert_eq!(record.related_files.len(), 2);

    // no mentioned test file, so the walk fallback found the tests dir
    assert!(record.test_files.contains("tests/test_config.py"));
    let cases = record.test_cases.get("tests/test_config.py").unwrap();
    assert_eq!(cases, &["test_load_empty", "test_load_missing_file"]);

    // dependency context per related file
    let config_deps = record.dependency_context.get("src/config.py").unwrap();
    assert!(config_deps.contains("os"));
    assert!(config_deps.contains("pathlib"));

    // complexity is present for every parseable related file
    assert!(record.complexity.contains_key("src/config.py"));
    assert!(record.complexity.contains_key("src/util.py"));
    // load: def + if + for + if = base 1 + 4
    assert_eq!(record.complexity["src/config.py"], 5);

    // snippet extraction: one fenced block, one inline span
    assert_eq!(record.code_snippets.len(), 2);
    assert!(record.code_snippets[0].contains("load(None)"));
    assert_eq!(record.code_snippets[1], "load");

    // the near-duplicate closed issue ranks, the unrelated one is dropped
    assert_eq!(record.similar_issues.len(), 1);
    assert_eq!(record.similar_issues[0].number, 7);
    assert!(record.similar_issues[0].score > 0.5);

    // template adherence evaluated independently of the score
    assert!(record.follows_template);
    assert_eq!(record.template_name.as_deref(), Some("bug_report"));
    assert_eq!(
        record.filled_sections,
        vec!["Steps to Reproduce", "Expected Behavior"]
    );

    // label (+5), body in the 100-500 tier (+3), one comment (+1),
    // fresh (+2), template (+3)
    assert_eq!(record.score, 14);

    assert!(!record.fix_suggestions.is_empty());
}

#[tokio::test]
async fn analysis_is_idempotent() {
    let repo = InMemoryRepo::new();
    let analyzer = IssueAnalyzer::new(&repo, 5);
    let issue = fixture_issue();
    let templates = vec![bug_template()];

    let first = analyzer.analyze_issue(&issue, &templates).await.unwrap();
    let second = analyzer.analyze_issue(&issue, &templates).await.unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn unknown_complexity_stays_absent() {
    let mut repo = InMemoryRepo::new();
    repo.files.insert(
        "src/broken.py".to_string(),
        "def broken(:\n  ???\n".to_string(),
    );
    let analyzer = IssueAnalyzer::new(&repo, 5);
    let mut issue = fixture_issue();
    issue.body = Some("src/broken.py misbehaves".to_string());
    issue.comment_bodies.clear();

    let record = analyzer.analyze_issue(&issue, &[]).await.unwrap();

    assert!(record.related_files.contains("src/broken.py"));
    // unparseable, so the key must be absent rather than zero
    assert!(!record.complexity.contains_key("src/broken.py"));
}

#[tokio::test]
async fn empty_body_issue_analyzes_cleanly() {
    let repo = InMemoryRepo::new();
    let analyzer = IssueAnalyzer::new(&repo, 5);
    let mut issue = fixture_issue();
    issue.body = None;
    issue.labels.clear();
    issue.comment_bodies.clear();
    issue.title = "zzzz".to_string();

    let record = analyzer.analyze_issue(&issue, &[]).await.unwrap();

    assert_eq!(record.category, IssueCategory::Other);
    assert!(record.related_files.is_empty());
    assert!(record.code_snippets.is_empty());
    assert!(record.dependency_context.is_empty());
    assert!(record.similar_issues.is_empty());
    // the repository still has a tests directory, so fallback discovery
    // reports it even without any related files
    assert!(record.test_files.contains("tests/test_config.py"));
}
