use std::collections::BTreeSet;
use crate::enums::entry_kind::EntryKind;
use crate::helpers::text_extractors::find_mentioned_files;
use crate::structs::related_files::RelatedFiles;
use crate::traits::repository_explorer::RepositoryExplorer;

pub struct RelatedFileResolver<'a, E: RepositoryExplorer + ?Sized> {
    explorer: &'a E,
}

impl<'a, E: RepositoryExplorer + ?Sized> RelatedFileResolver<'a, E> {
    pub fn new(explorer: &'a E) -> Self {
        Self { explorer }
    }

    /// Collect file paths mentioned in the issue body and its comments,
    /// keep the ones that exist in the repository, and derive the test
    /// subset. When no mentioned test file exists, fall back to a
    /// repository-wide walk of test directories.
    pub async fn resolve(&self, body: &str, comment_bodies: &[String]) -> RelatedFiles {
        let mut candidates = find_mentioned_files(body);
        for comment in comment_bodies {
            candidates.extend(find_mentioned_files(comment));
        }

        let mut related = BTreeSet::new();
        for candidate in candidates {
            // a failed lookup means the path cannot be confirmed; skip it
            match self.explorer.file_exists(&candidate).await {
                Ok(true) => {
                    related.insert(candidate);
                }
                Ok(false) => {}
                Err(e) => {
                    log::debug!("could not confirm '{}': {}", candidate, e);
                }
            }
        }

        let mut tests: BTreeSet<String> = related
            .iter()
            .filter(|path| is_test_file(path))
            .cloned()
            .collect();

        if tests.is_empty() {
            tests = self.discover_test_files().await;
        }

        RelatedFiles { related, tests }
    }

    /// Iterative walk over the repository tree, collecting test-looking
    /// files under directories whose name contains "test". The hierarchy
    /// is a tree, so the work list shrinks to empty without cycle checks.
    async fn discover_test_files(&self) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        let mut work_list: Vec<(String, bool)> = vec![(String::new(), false)];

        while let Some((dir, in_test_dir)) = work_list.pop() {
            let entries = match self.explorer.list_directory(&dir).await {
                Ok(entries) => entries,
                Err(e) => {
                    log::debug!("could not list '{}': {}", dir, e);
                    continue;
                }
            };
            for entry in entries {
                match entry.kind {
                    EntryKind::Dir => {
                        let inside = in_test_dir || entry.name.to_lowercase().contains("test");
                        work_list.push((entry.path, inside));
                    }
                    EntryKind::File => {
                        if in_test_dir && is_test_file(&entry.path) {
                            found.insert(entry.path);
                        }
                    }
                    // symlinks and submodules are ignored by every consumer
                    EntryKind::Other => {}
                }
            }
        }

        found
    }
}

/// A path counts as a test file when it contains "test" anywhere
/// (case-insensitive), or its filename starts with `test_`, or it ends in
/// `_test.py`.
pub fn is_test_file(path: &str) -> bool {
    let lowered = path.to_lowercase();
    if lowered.contains("test") {
        return true;
    }
    let file_name = path.rsplit('/').next().unwrap_or(path);
    file_name.starts_with("test_") || file_name.ends_with("_test.py")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::stream;
    use pretty_assertions::assert_eq;
    use crate::errors::OnrampResult;
    use crate::structs::closed_issue_ref::ClosedIssueRef;
    use crate::structs::directory_entry::DirectoryEntry;
    use crate::traits::repository_explorer::ClosedIssueStream;

    struct StubExplorer {
        files: Vec<&'static str>,
    }

    #[async_trait]
    impl RepositoryExplorer for StubExplorer {
        async fn fetch_file_content(&self, path: &str) -> OnrampResult<Option<String>> {
            Ok(self
                .files
                .contains(&path)
                .then(|| format!("# contents of {}", path)))
        }

        async fn file_exists(&self, path: &str) -> OnrampResult<bool> {
            Ok(self.files.contains(&path))
        }

        async fn list_directory(&self, path: &str) -> OnrampResult<Vec<DirectoryEntry>> {
            let prefix = if path.is_empty() {
                String::new()
            } else {
                format!("{}/", path)
            };
            let mut dirs = std::collections::BTreeSet::new();
            let mut entries = Vec::new();
            for file in &self.files {
                let Some(rest) = file.strip_prefix(&prefix) else {
                    continue;
                };
                match rest.split_once('/') {
                    Some((dir, _)) => {
                        if dirs.insert(dir.to_string()) {
                            entries.push(DirectoryEntry {
                                name: dir.to_string(),
                                path: format!("{}{}", prefix, dir),
                                kind: EntryKind::Dir,
                            });
                        }
                    }
                    None => entries.push(DirectoryEntry {
                        name: rest.to_string(),
                        path: file.to_string(),
                        kind: EntryKind::File,
                    }),
                }
            }
            Ok(entries)
        }

        async fn closed_issues(&self) -> OnrampResult<ClosedIssueStream> {
            Ok(Box::pin(stream::iter(
                Vec::<OnrampResult<ClosedIssueRef>>::new(),
            )))
        }

        fn primary_language(&self) -> Option<String> {
            Some("Python".to_string())
        }
    }

    #[tokio::test]
    async fn only_existing_mentions_are_kept() {
        let explorer = StubExplorer {
            files: vec!["src/app.py", "src/util.py"],
        };
        let resolver = RelatedFileResolver::new(&explorer);
        let result = resolver
            .resolve("see src/app.py and also ghost/missing.py", &[])
            .await;
        assert_eq!(result.related.len(), 1);
        assert!(result.related.contains("src/app.py"));
    }

    #[tokio::test]
    async fn comment_mentions_are_unioned() {
        let explorer = StubExplorer {
            files: vec!["src/app.py", "src/util.py"],
        };
        let resolver = RelatedFileResolver::new(&explorer);
        let comments = vec!["maybe src/util.py is involved".to_string()];
        let result = resolver.resolve("starts in src/app.py", &comments).await;
        assert_eq!(result.related.len(), 2);
    }

    #[tokio::test]
    async fn mentioned_test_files_form_the_test_subset() {
        let explorer = StubExplorer {
            files: vec!["src/app.py", "tests/test_app.py"],
        };
        let resolver = RelatedFileResolver::new(&explorer);
        let result = resolver
            .resolve("src/app.py breaks, tests/test_app.py covers it", &[])
            .await;
        assert!(result.tests.contains("tests/test_app.py"));
        assert!(result.related.contains("tests/test_app.py"));
    }

    #[tokio::test]
    async fn walk_fallback_fires_only_without_mentioned_tests() {
        let explorer = StubExplorer {
            files: vec!["src/app.py", "tests/test_app.py", "tests/unit/test_util.py"],
        };
        let resolver = RelatedFileResolver::new(&explorer);
        let result = resolver.resolve("src/app.py misbehaves", &[]).await;
        // related stays mention-derived; the walk feeds only the test set
        assert_eq!(result.related.len(), 1);
        assert!(result.tests.contains("tests/test_app.py"));
        assert!(result.tests.contains("tests/unit/test_util.py"));
    }

    #[tokio::test]
    async fn no_mentions_and_no_test_dirs_yields_empty() {
        let explorer = StubExplorer {
            files: vec!["src/app.py"],
        };
        let resolver = RelatedFileResolver::new(&explorer);
        let result = resolver.resolve("nothing concrete here", &[]).await;
        assert!(result.related.is_empty());
        assert!(result.tests.is_empty());
    }

    #[test]
    fn test_file_rules() {
        assert!(is_test_file("tests/test_app.py"));
        assert!(is_test_file("src/parser_test.py"));
        assert!(is_test_file("test_standalone.py"));
        assert!(is_test_file("src/Testing/helper.js"));
        assert!(!is_test_file("src/app.py"));
    }
}
