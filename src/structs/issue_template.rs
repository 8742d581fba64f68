use serde::{Deserialize, Serialize};
use crate::structs::template_section::TemplateSection;

/// Parsed issue template: an ordered list of `## ` sections. Template sets
/// keep discovery order; the first satisfying template wins adherence
/// checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTemplate {
    pub name: String,
    pub sections: Vec<TemplateSection>,
}

impl IssueTemplate {
    pub fn section_names(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.name.clone()).collect()
    }
}
