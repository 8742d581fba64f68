use serde::{Deserialize, Serialize};
use crate::config::constants::DEFAULT_OUTPUT_FILE;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

fn default_output_file() -> String {
    DEFAULT_OUTPUT_FILE.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_file: default_output_file(),
        }
    }
}
