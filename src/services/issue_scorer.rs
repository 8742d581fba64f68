use chrono::{DateTime, Utc};
use crate::structs::github::issue::Issue;
use crate::structs::issue_template::IssueTemplate;

/// Labels that mark an issue as newcomer-friendly.
const NEWCOMER_LABELS: &[&str] = &["good first issue", "help wanted"];

struct ScoreInput<'a> {
    issue: &'a Issue,
    templates: &'a [IssueTemplate],
    body_len: usize,
    age_days: i64,
}

struct ScoreRule {
    #[allow(dead_code)]
    name: &'static str,
    points: u32,
    applies: fn(&ScoreInput) -> bool,
}

fn has_newcomer_label(input: &ScoreInput) -> bool {
    input
        .issue
        .labels
        .iter()
        .any(|l| NEWCOMER_LABELS.contains(&l.name.to_lowercase().as_str()))
}

fn body_is_clear(input: &ScoreInput) -> bool {
    (100..=500).contains(&input.body_len)
}

fn body_is_short_but_present(input: &ScoreInput) -> bool {
    (50..100).contains(&input.body_len)
}

fn no_comments(input: &ScoreInput) -> bool {
    input.issue.comments == 0
}

fn few_comments(input: &ScoreInput) -> bool {
    input.issue.comments > 0 && input.issue.comments < 5
}

fn is_fresh(input: &ScoreInput) -> bool {
    input.age_days < 30
}

fn is_recent(input: &ScoreInput) -> bool {
    (30..90).contains(&input.age_days)
}

fn follows_known_template(input: &ScoreInput) -> bool {
    match_template(input.issue.body_text(), input.templates).is_some()
}

/// Additive approachability rules. Every applicable row contributes its
/// points; there is no early return.
const APPROACHABILITY_RULES: &[ScoreRule] = &[
    ScoreRule { name: "newcomer label", points: 5, applies: has_newcomer_label },
    ScoreRule { name: "clear description", points: 3, applies: body_is_clear },
    ScoreRule { name: "short description", points: 2, applies: body_is_short_but_present },
    ScoreRule { name: "no discussion", points: 2, applies: no_comments },
    ScoreRule { name: "little discussion", points: 1, applies: few_comments },
    ScoreRule { name: "fresh", points: 2, applies: is_fresh },
    ScoreRule { name: "recent", points: 1, applies: is_recent },
    ScoreRule { name: "follows template", points: 3, applies: follows_known_template },
];

/// Approachability score of an issue, higher is more newcomer-friendly.
pub fn score_issue(issue: &Issue, templates: &[IssueTemplate]) -> u32 {
    score_issue_at(issue, templates, Utc::now())
}

/// Pure scoring variant: age is measured against the supplied `now`, both
/// timestamps in UTC, floored to whole days.
pub fn score_issue_at(issue: &Issue, templates: &[IssueTemplate], now: DateTime<Utc>) -> u32 {
    let input = ScoreInput {
        issue,
        templates,
        body_len: issue.body_text().chars().count(),
        age_days: (now - issue.created_at).num_days(),
    };
    APPROACHABILITY_RULES
        .iter()
        .filter(|rule| (rule.applies)(&input))
        .map(|rule| rule.points)
        .sum()
}

/// First template whose every section header appears in the body.
/// Templates are tried in iteration order and the search short-circuits;
/// later templates get no credit even if they would also match.
pub fn match_template<'a>(body: &str, templates: &'a [IssueTemplate]) -> Option<&'a IssueTemplate> {
    templates
        .iter()
        .find(|t| t.sections.iter().all(|s| body.contains(&s.name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use crate::structs::github::label::Label;
    use crate::structs::template_section::TemplateSection;

    fn issue_with(body: &str, labels: &[&str], comments: u32, age_days: i64) -> (Issue, DateTime<Utc>) {
        let now = Utc::now();
        let issue = Issue {
            number: 1,
            title: "Sample issue".to_string(),
            body: Some(body.to_string()),
            labels: labels
                .iter()
                .map(|n| Label { name: n.to_string() })
                .collect(),
            comments,
            created_at: now - Duration::days(age_days),
            updated_at: now,
            closed_at: None,
            state: "open".to_string(),
            user: None,
            pull_request: None,
            comment_bodies: Vec::new(),
        };
        (issue, now)
    }

    fn template(name: &str, sections: &[&str]) -> IssueTemplate {
        IssueTemplate {
            name: name.to_string(),
            sections: sections
                .iter()
                .map(|s| TemplateSection {
                    name: s.to_string(),
                    content: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn newcomer_label_adds_exactly_five() {
        let (plain, now) = issue_with("x", &[], 7, 200);
        let (labeled, _) = issue_with("x", &["help wanted"], 7, 200);
        let base = score_issue_at(&plain, &[], now);
        assert_eq!(score_issue_at(&labeled, &[], now), base + 5);
    }

    #[test]
    fn body_length_tier_boundaries() {
        let cases: [(usize, u32); 6] = [(99, 2), (100, 3), (500, 3), (501, 0), (50, 2), (49, 0)];
        for (len, expected) in cases {
            let (issue, now) = issue_with(&"x".repeat(len), &[], 7, 200);
            assert_eq!(
                score_issue_at(&issue, &[], now),
                expected,
                "body length {}",
                len
            );
        }
    }

    #[test]
    fn comment_count_tiers() {
        let (none, now) = issue_with("", &[], 0, 200);
        assert_eq!(score_issue_at(&none, &[], now), 2);
        let (few, now) = issue_with("", &[], 3, 200);
        assert_eq!(score_issue_at(&few, &[], now), 1);
        let (many, now) = issue_with("", &[], 9, 200);
        assert_eq!(score_issue_at(&many, &[], now), 0);
    }

    #[test]
    fn age_tiers() {
        let (fresh, now) = issue_with("", &[], 7, 10);
        assert_eq!(score_issue_at(&fresh, &[], now), 2);
        let (recent, now) = issue_with("", &[], 7, 45);
        assert_eq!(score_issue_at(&recent, &[], now), 1);
        let (old, now) = issue_with("", &[], 7, 120);
        assert_eq!(score_issue_at(&old, &[], now), 0);
    }

    #[test]
    fn template_adherence_adds_three() {
        let body = "Steps to Reproduce\nclick the button\nExpected Behavior\nno crash";
        let templates = vec![template("bug_report", &["Steps to Reproduce", "Expected Behavior"])];
        let (issue, now) = issue_with(body, &[], 7, 200);
        let with_templates = score_issue_at(&issue, &templates, now);
        let without = score_issue_at(&issue, &[], now);
        assert_eq!(with_templates, without + 3);
    }

    #[test]
    fn first_matching_template_wins() {
        let body = "Summary\nboth templates match this";
        let templates = vec![
            template("minimal", &["Summary"]),
            template("detailed", &["Summary"]),
        ];
        let matched = match_template(body, &templates).expect("should match");
        assert_eq!(matched.name, "minimal");
    }

    #[test]
    fn scoring_is_deterministic() {
        let templates = vec![template("bug_report", &["Steps"])];
        let (issue, now) = issue_with(&"d".repeat(150), &["bug"], 2, 12);
        let first = score_issue_at(&issue, &templates, now);
        let second = score_issue_at(&issue, &templates, now);
        assert_eq!(first, second);
    }
}
