use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageFiles {
    pub primary_language: Option<String>,
    pub python_files: Vec<String>,
    pub has_package_json: bool,
}
