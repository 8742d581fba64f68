use std::collections::BTreeSet;

/// Output of the related-file resolver. `related` holds only confirmed
/// paths mentioned in the issue text; `tests` may additionally contain
/// repository-walk discoveries when no mentioned test file exists.
#[derive(Debug, Clone, Default)]
pub struct RelatedFiles {
    pub related: BTreeSet<String>,
    pub tests: BTreeSet<String>,
}
