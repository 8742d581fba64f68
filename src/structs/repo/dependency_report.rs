use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyReport {
    pub dependency_files: Vec<String>,
    pub dependencies: Vec<String>,
}
