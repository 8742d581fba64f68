use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupInfo {
    pub setup_instructions: String,
    pub contribution_guidelines: String,
}
