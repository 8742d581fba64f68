use serde::{Deserialize, Serialize};
use crate::structs::issue_template::IssueTemplate;
use crate::structs::repo::commit_history::CommitHistory;
use crate::structs::repo::complexity_summary::ComplexitySummary;
use crate::structs::repo::dependency_report::DependencyReport;
use crate::structs::repo::file_inventory::FileInventory;
use crate::structs::repo::issue_pr_trends::IssuePrTrends;
use crate::structs::repo::project_structure::ProjectStructure;
use crate::structs::repo::setup_info::SetupInfo;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoAnalysis {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub contributors: Vec<String>,
    pub setup_info: SetupInfo,
    pub project_structure: ProjectStructure,
    pub file_inventory: FileInventory,
    pub issue_pr_trends: IssuePrTrends,
    pub commit_history: CommitHistory,
    pub dependency_report: DependencyReport,
    pub complexity_summary: ComplexitySummary,
    pub issue_templates: Vec<IssueTemplate>,
}
