use serde::{Deserialize, Serialize};
use crate::structs::repo::language_files::LanguageFiles;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileInventory {
    pub community_health: Vec<String>,
    pub ci_cd: Vec<String>,
    pub important_files: Vec<String>,
    pub gitignore_content: Option<String>,
    pub language_files: LanguageFiles,
}
