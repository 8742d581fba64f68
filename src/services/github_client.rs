use async_trait::async_trait;
use futures::stream::{self, TryStreamExt};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use crate::config::constants::{PER_PAGE, USER_AGENT};
use crate::errors::{OnrampError, OnrampResult};
use crate::structs::closed_issue_ref::ClosedIssueRef;
use crate::structs::directory_entry::DirectoryEntry;
use crate::structs::github::comment::Comment;
use crate::structs::github::commit::Commit;
use crate::structs::github::content_entry::ContentEntry;
use crate::structs::github::contributor::Contributor;
use crate::structs::github::issue::Issue;
use crate::structs::github::pull_request::PullRequest;
use crate::structs::github::repository::Repository;
use crate::traits::repository_explorer::{ClosedIssueStream, RepositoryExplorer};

/// GitHub REST client scoped to a single repository.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    api_url: String,
    token: Option<String>,
    owner: String,
    repo: String,
    page_limit: u32,
    primary_language: Option<String>,
}

impl GithubClient {
    pub fn new(
        api_url: String,
        token: Option<String>,
        repo_slug: &str,
        page_limit: u32,
    ) -> OnrampResult<Self> {
        let (owner, repo) = repo_slug.split_once('/').ok_or_else(|| {
            OnrampError::UserInputError {
                input: repo_slug.to_string(),
                expected: "a repository in the form owner/name".to_string(),
            }
        })?;
        if owner.is_empty() || repo.is_empty() {
            return Err(OnrampError::UserInputError {
                input: repo_slug.to_string(),
                expected: "a repository in the form owner/name".to_string(),
            });
        }
        Ok(Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            owner: owner.to_string(),
            repo: repo.to_string(),
            page_limit,
            primary_language: None,
        })
    }

    pub fn repo_slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn set_primary_language(&mut self, language: Option<String>) {
        self.primary_language = language;
    }

    fn repo_url(&self, tail: &str) -> String {
        format!("{}/repos/{}/{}{}", self.api_url, self.owner, self.repo, tail)
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        operation: &str,
    ) -> OnrampResult<T> {
        let response = self
            .request(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(OnrampError::not_found(url));
        }
        if !status.is_success() {
            return Err(OnrampError::network_error(
                operation,
                Some(url),
                Some(status.as_u16()),
                "unexpected status",
            ));
        }
        Ok(response.json::<T>().await?)
    }

    pub async fn get_repository(&self) -> OnrampResult<Repository> {
        let url = self.repo_url("");
        self.get_json(&url, &[], "fetch repository").await
    }

    pub async fn list_contributors(&self) -> OnrampResult<Vec<Contributor>> {
        let url = self.repo_url("/contributors");
        self.get_json(&url, &[("per_page", PER_PAGE.to_string())], "list contributors")
            .await
    }

    /// One page of the issues endpoint, pull requests filtered out. The
    /// returned flag marks the last page, judged before filtering so a
    /// page full of pull requests does not end pagination early.
    async fn issue_page(
        &self,
        state: &str,
        labels: &[String],
        page: u32,
    ) -> OnrampResult<(Vec<Issue>, bool)> {
        let url = self.repo_url("/issues");
        let mut query = vec![
            ("state", state.to_string()),
            ("per_page", PER_PAGE.to_string()),
            ("page", page.to_string()),
        ];
        if !labels.is_empty() {
            query.push(("labels", labels.join(",")));
        }
        let batch: Vec<Issue> = self.get_json(&url, &query, "list issues").await?;
        let last_page = batch.len() < PER_PAGE as usize;
        let issues = batch.into_iter().filter(|i| !i.is_pull_request()).collect();
        Ok((issues, last_page))
    }

    async fn paginated_issues(&self, state: &str, labels: &[String]) -> OnrampResult<Vec<Issue>> {
        let mut all = Vec::new();
        for page in 1..=self.page_limit {
            let (issues, last_page) = self.issue_page(state, labels, page).await?;
            all.extend(issues);
            if last_page {
                break;
            }
        }
        Ok(all)
    }

    pub async fn list_open_issues(&self, labels: &[String]) -> OnrampResult<Vec<Issue>> {
        self.paginated_issues("open", labels).await
    }

    pub async fn list_all_issues(&self) -> OnrampResult<Vec<Issue>> {
        self.paginated_issues("all", &[]).await
    }

    pub async fn list_issue_comments(&self, number: u64) -> OnrampResult<Vec<Comment>> {
        let url = self.repo_url(&format!("/issues/{}/comments", number));
        self.get_json(&url, &[("per_page", PER_PAGE.to_string())], "list issue comments")
            .await
    }

    pub async fn list_pull_requests(&self) -> OnrampResult<Vec<PullRequest>> {
        let mut all = Vec::new();
        for page in 1..=self.page_limit {
            let url = self.repo_url("/pulls");
            let query = vec![
                ("state", "all".to_string()),
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ];
            let batch: Vec<PullRequest> = self.get_json(&url, &query, "list pull requests").await?;
            let done = batch.len() < PER_PAGE as usize;
            all.extend(batch);
            if done {
                break;
            }
        }
        Ok(all)
    }

    pub async fn list_commits(&self) -> OnrampResult<Vec<Commit>> {
        let mut all = Vec::new();
        for page in 1..=self.page_limit {
            let url = self.repo_url("/commits");
            let query = vec![
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ];
            let batch: Vec<Commit> = self.get_json(&url, &query, "list commits").await?;
            let done = batch.len() < PER_PAGE as usize;
            all.extend(batch);
            if done {
                break;
            }
        }
        Ok(all)
    }

    async fn get_raw_content(&self, path: &str) -> OnrampResult<Option<String>> {
        let url = self.repo_url(&format!("/contents/{}", path));
        let response = self
            .request(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github.raw+json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(OnrampError::network_error(
                "fetch file content",
                Some(&url),
                Some(status.as_u16()),
                "unexpected status",
            ));
        }
        // binary files that fail to decode are treated as absent
        match response.text().await {
            Ok(text) => Ok(Some(text)),
            Err(e) => {
                log::debug!("could not decode '{}': {}", path, e);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl RepositoryExplorer for GithubClient {
    async fn fetch_file_content(&self, path: &str) -> OnrampResult<Option<String>> {
        self.get_raw_content(path).await
    }

    async fn file_exists(&self, path: &str) -> OnrampResult<bool> {
        Ok(self.get_raw_content(path).await?.is_some())
    }

    async fn list_directory(&self, path: &str) -> OnrampResult<Vec<DirectoryEntry>> {
        let url = self.repo_url(&format!("/contents/{}", path));
        let entries: Vec<ContentEntry> = match self.get_json(&url, &[], "list directory").await {
            Ok(entries) => entries,
            Err(OnrampError::NotFound { .. }) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        Ok(entries
            .into_iter()
            .map(|e| DirectoryEntry {
                name: e.name,
                path: e.path,
                kind: e.kind,
            })
            .collect())
    }

    async fn closed_issues(&self) -> OnrampResult<ClosedIssueStream> {
        let client = self.clone();
        let pages = stream::try_unfold((1u32, false), move |(page, done)| {
            let client = client.clone();
            async move {
                if done || page > client.page_limit {
                    return Ok::<_, OnrampError>(None);
                }
                let (issues, last_page) = client.issue_page("closed", &[], page).await?;
                let refs: Vec<OnrampResult<ClosedIssueRef>> = issues
                    .into_iter()
                    .map(|i| {
                        Ok(ClosedIssueRef {
                            number: i.number,
                            title: i.title,
                        })
                    })
                    .collect();
                Ok(Some((stream::iter(refs), (page + 1, last_page))))
            }
        })
        .try_flatten();
        Ok(Box::pin(pages))
    }

    fn primary_language(&self) -> Option<String> {
        self.primary_language.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn repo_slug_requires_owner_and_name() {
        assert!(GithubClient::new("https://api.github.com".into(), None, "rust-lang/rust", 10).is_ok());
        assert!(GithubClient::new("https://api.github.com".into(), None, "just-a-name", 10).is_err());
        assert!(GithubClient::new("https://api.github.com".into(), None, "/missing-owner", 10).is_err());
    }

    #[test]
    fn repo_url_is_scoped_to_the_repository() {
        let client =
            GithubClient::new("https://api.github.com/".into(), None, "octo/demo", 10).unwrap();
        assert_eq!(
            client.repo_url("/issues"),
            "https://api.github.com/repos/octo/demo/issues"
        );
        assert_eq!(client.repo_slug(), "octo/demo");
    }
}
