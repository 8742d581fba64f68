use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq)]
pub enum EntryKind {
    #[serde(rename = "file")]
    File,
    #[serde(rename = "dir")]
    Dir,
    // symlinks and submodules are ignored by every consumer
    #[serde(other)]
    Other,
}
