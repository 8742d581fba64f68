use serde::{Deserialize, Serialize};
use crate::enums::entry_kind::EntryKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
}
