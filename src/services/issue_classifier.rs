use crate::enums::issue_category::IssueCategory;

/// Ordered rule table: categories are evaluated top to bottom and the first
/// match wins, so an issue that reads as both bug and enhancement lands on
/// bug.
const CATEGORY_RULES: &[(IssueCategory, &[&str])] = &[
    (
        IssueCategory::Bug,
        &["bug", "error", "crash", "broken", "defect", "regression"],
    ),
    (
        IssueCategory::FeatureRequest,
        &["feature request", "feature", "new feature", "add support"],
    ),
    (
        IssueCategory::Documentation,
        &["documentation", "docs", "typo", "readme"],
    ),
    (IssueCategory::Question, &["question", "how do i", "how to"]),
    (
        IssueCategory::Enhancement,
        &["enhancement", "improvement", "improve", "optimize", "refactor"],
    ),
];

/// Classify an issue. Labels are checked first with exact (lowercased)
/// equality against the trigger phrases; only if no label matches is the
/// title/body text scanned for substring hits.
pub fn classify_issue(title: &str, body: &str, labels: &[String]) -> IssueCategory {
    let labels: Vec<String> = labels.iter().map(|l| l.to_lowercase()).collect();
    for (category, triggers) in CATEGORY_RULES {
        if labels.iter().any(|l| triggers.contains(&l.as_str())) {
            return *category;
        }
    }

    let haystack = format!("{} {}", title.to_lowercase(), body.to_lowercase());
    for (category, triggers) in CATEGORY_RULES {
        if triggers.iter().any(|t| haystack.contains(t)) {
            return *category;
        }
    }

    IssueCategory::Other
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn label_match_beats_title_text() {
        let category = classify_issue("Add feature toggle", "", &labels(&["bug"]));
        assert_eq!(category, IssueCategory::Bug);
    }

    #[test]
    fn label_match_is_case_insensitive() {
        let category = classify_issue("anything", "", &labels(&["Enhancement"]));
        assert_eq!(category, IssueCategory::Enhancement);
    }

    #[test]
    fn body_text_matches_when_no_label_does() {
        let category = classify_issue(
            "Weird behavior",
            "the app will crash when the file is missing",
            &labels(&["needs-triage"]),
        );
        assert_eq!(category, IssueCategory::Bug);
    }

    #[test]
    fn bug_wins_over_enhancement_when_both_present() {
        let category = classify_issue("Improve handling of the crash screen", "", &[]);
        assert_eq!(category, IssueCategory::Bug);
    }

    #[test]
    fn question_from_title() {
        let category = classify_issue("How to configure the cache?", "", &[]);
        assert_eq!(category, IssueCategory::Question);
    }

    #[test]
    fn unmatched_issue_is_other() {
        let category = classify_issue("Thoughts on the roadmap", "some musings", &[]);
        assert_eq!(category, IssueCategory::Other);
    }

    #[test]
    fn partial_label_text_does_not_match() {
        // labels must equal a trigger exactly, not merely contain one
        let category = classify_issue("Thoughts", "musings", &labels(&["bugfix-needed"]));
        assert_eq!(category, IssueCategory::Other);
    }
}
