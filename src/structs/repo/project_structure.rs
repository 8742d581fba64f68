use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectStructure {
    pub directories: Vec<String>,
    pub important_files: Vec<String>,
    pub inferred_language: Option<String>,
    pub potential_standards: Vec<String>,
}
