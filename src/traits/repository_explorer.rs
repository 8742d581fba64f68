use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use crate::errors::OnrampResult;
use crate::structs::closed_issue_ref::ClosedIssueRef;
use crate::structs::directory_entry::DirectoryEntry;

/// Stream of previously resolved issues, fetched page by page on demand.
pub type ClosedIssueStream = Pin<Box<dyn Stream<Item = OnrampResult<ClosedIssueRef>> + Send>>;

/// Read-only view of a hosted repository, as consumed by the analysis
/// engine. The engine treats a failed content lookup as "absent", never as
/// a reason to abort an issue's analysis.
#[async_trait]
pub trait RepositoryExplorer: Send + Sync {

    /// File content at `path`, or `None` when the file does not exist or
    /// cannot be decoded as text.
    async fn fetch_file_content(&self, path: &str) -> OnrampResult<Option<String>>;

    async fn file_exists(&self, path: &str) -> OnrampResult<bool>;

    /// Entries directly under `path` ("" for the repository root).
    async fn list_directory(&self, path: &str) -> OnrampResult<Vec<DirectoryEntry>>;

    /// Lazily paged closed issues, for similarity ranking.
    async fn closed_issues(&self) -> OnrampResult<ClosedIssueStream>;

    /// Primary language reported by the host, informational only.
    fn primary_language(&self) -> Option<String>;
}
