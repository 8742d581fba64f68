use crate::helpers::text_extractors::find_mentioned_files;
use crate::structs::github::issue::Issue;
use crate::structs::issue_analysis::IssueAnalysis;
use crate::structs::repo::repo_analysis::RepoAnalysis;
use crate::structs::scored_issue::ScoredIssue;

/// Render the full contribution guide: repository overview first, then the
/// ranked issues with their analysis records.
pub fn generate_guide(analysis: &RepoAnalysis, issues: &[(ScoredIssue, IssueAnalysis)]) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Contribution Guide for {}\n\n", analysis.name));
    md.push_str("## Repository Analysis\n");
    md.push_str(&format!("- Name: {}\n", analysis.name));
    md.push_str(&format!(
        "- Description: {}\n",
        analysis.description.as_deref().unwrap_or("(none)")
    ));
    md.push_str(&format!(
        "- Primary Language: {}\n",
        analysis.language.as_deref().unwrap_or("(unknown)")
    ));
    md.push_str(&format!(
        "- Top Contributors: {}\n\n",
        analysis.contributors.join(", ")
    ));

    md.push_str("## Setup Instructions\n");
    if analysis.setup_info.setup_instructions.is_empty() {
        md.push_str("No specific setup instructions found.\n");
    } else {
        md.push_str(&analysis.setup_info.setup_instructions);
        md.push('\n');
    }
    md.push('\n');

    md.push_str("## Contribution Guidelines\n");
    if analysis.setup_info.contribution_guidelines.is_empty() {
        md.push_str("No specific contribution guidelines found.\n");
    } else {
        md.push_str(&analysis.setup_info.contribution_guidelines);
        md.push('\n');
    }
    md.push('\n');

    md.push_str("## Project Structure\n");
    md.push_str(&format!(
        "- Directories: {}\n",
        analysis.project_structure.directories.join(", ")
    ));
    md.push_str(&format!(
        "- Important Files: {}\n",
        analysis.project_structure.important_files.join(", ")
    ));
    md.push_str(&format!(
        "- Inferred Language: {}\n",
        analysis
            .project_structure
            .inferred_language
            .as_deref()
            .unwrap_or("(unknown)")
    ));
    md.push_str("- Potential Coding Standards:\n");
    for standard in &analysis.project_structure.potential_standards {
        md.push_str(&format!("  - {}\n", standard));
    }
    md.push('\n');

    render_file_inventory(&mut md, analysis);
    render_trends(&mut md, analysis);
    render_commit_history(&mut md, analysis);
    render_dependencies(&mut md, analysis);
    render_complexity_summary(&mut md, analysis);
    render_issue_templates(&mut md, analysis);

    md.push_str("## Open Issues (Sorted by Approachability)\n");
    for (scored, record) in issues {
        render_issue_section(&mut md, scored, record);
    }

    md
}

fn render_file_inventory(md: &mut String, analysis: &RepoAnalysis) {
    let inventory = &analysis.file_inventory;

    md.push_str("## Repository File Analysis\n### Community Health Files\n");
    if inventory.community_health.is_empty() {
        md.push_str("No community health files found.\n");
    } else {
        md.push_str("The following community health files are present:\n");
        for file in &inventory.community_health {
            md.push_str(&format!("- {}\n", file));
        }
    }

    md.push_str("\n### CI/CD Configuration\n");
    if inventory.ci_cd.is_empty() {
        md.push_str("No CI/CD configuration detected.\n");
    } else {
        md.push_str("The following CI/CD configurations were detected:\n");
        for entry in &inventory.ci_cd {
            md.push_str(&format!("- {}\n", entry));
        }
    }

    md.push_str("\n### Important Files\n");
    if !inventory.important_files.is_empty() {
        md.push_str("The following important files are present:\n");
        for file in &inventory.important_files {
            md.push_str(&format!("- {}\n", file));
        }
    }
    if let Some(gitignore) = &inventory.gitignore_content {
        md.push_str(&format!("\n.gitignore file content:\n```\n{}\n```\n", gitignore.trim_end()));
    }

    md.push_str("\n### Language-Specific Analysis\n");
    match &inventory.language_files.primary_language {
        Some(language) => {
            md.push_str(&format!("Primary language: {}\n", language));
            if !inventory.language_files.python_files.is_empty() {
                md.push_str(&format!(
                    "Python-specific files found: {}\n",
                    inventory.language_files.python_files.join(", ")
                ));
            }
            if inventory.language_files.has_package_json {
                md.push_str("package.json found for JavaScript project.\n");
            }
        }
        None => md.push_str("No language-specific information found.\n"),
    }
    md.push('\n');
}

fn render_trends(md: &mut String, analysis: &RepoAnalysis) {
    let trends = &analysis.issue_pr_trends;
    md.push_str("## Issue and Pull Request Trends\n");
    md.push_str(&format!("- Open Issues: {}\n", trends.open_issues));
    md.push_str(&format!("- Closed Issues: {}\n", trends.closed_issues));
    md.push_str(&format!("- Open Pull Requests: {}\n", trends.open_prs));
    md.push_str(&format!("- Merged Pull Requests: {}\n", trends.merged_prs));
    md.push_str(&format!(
        "- Recent Issue Activity (last 30 days): {}\n",
        trends.recent_issue_activity
    ));
    md.push_str(&format!(
        "- Recent PR Activity (last 30 days): {}\n",
        trends.recent_pr_activity
    ));
    if let Some(avg) = trends.avg_days_to_close_issues {
        md.push_str(&format!("- Average Time to Close Issues: {:.2} days\n", avg));
    }
    if let Some(avg) = trends.avg_days_to_merge_prs {
        md.push_str(&format!("- Average Time to Merge PRs: {:.2} days\n", avg));
    }
    md.push_str(&format!(
        "- Top Issue Labels: {}\n\n",
        trends.top_issue_labels.join(", ")
    ));
}

fn render_commit_history(md: &mut String, analysis: &RepoAnalysis) {
    let history = &analysis.commit_history;
    md.push_str("## Commit History Analysis\n");
    md.push_str(&format!("- Total Commits: {}\n", history.total_commits));
    md.push_str(&format!(
        "- Recent Commits (last 30 days): {}\n",
        history.recent_commits
    ));
    md.push_str(&format!(
        "- Top Contributors: {}\n",
        history.top_contributors.join(", ")
    ));
    if let Some(frequency) = history.commits_per_day {
        md.push_str(&format!("- Commit Frequency: {:.2} commits per day\n", frequency));
    }
    md.push('\n');
}

fn render_dependencies(md: &mut String, analysis: &RepoAnalysis) {
    let report = &analysis.dependency_report;
    md.push_str("## Dependency Analysis\n");
    md.push_str(&format!(
        "- Dependency Files Found: {}\n",
        report.dependency_files.join(", ")
    ));
    if report.dependencies.is_empty() {
        md.push_str("- No dependencies found or unable to parse dependency files.\n");
    } else {
        md.push_str("- Dependencies:\n");
        for dep in report.dependencies.iter().take(10) {
            md.push_str(&format!("  - {}\n", dep));
        }
        if report.dependencies.len() > 10 {
            md.push_str(&format!("  - ... and {} more\n", report.dependencies.len() - 10));
        }
    }
    md.push('\n');
}

fn render_complexity_summary(md: &mut String, analysis: &RepoAnalysis) {
    let summary = &analysis.complexity_summary;
    md.push_str("## Code Complexity Analysis\n");
    md.push_str(&format!("- Total Lines of Code: {}\n", summary.total_lines));
    md.push_str(&format!("- Total Functions: {}\n", summary.total_functions));
    md.push_str(&format!(
        "- Average Function Complexity: {:.2}\n",
        summary.avg_function_complexity
    ));
    md.push_str(&format!("- Files Analyzed: {}\n\n", summary.files_analyzed));
}

fn render_issue_templates(md: &mut String, analysis: &RepoAnalysis) {
    md.push_str("## Issue Templates Analysis\n");
    if analysis.issue_templates.is_empty() {
        md.push_str("No issue templates were found in this repository.\n");
    } else {
        md.push_str("The following issue templates were found:\n");
        for template in &analysis.issue_templates {
            md.push_str(&format!("- {}\n  Sections:\n", template.name));
            for section in &template.sections {
                md.push_str(&format!("  - {}\n", section.name));
            }
        }
    }
    md.push('\n');
}

fn render_issue_section(md: &mut String, scored: &ScoredIssue, record: &IssueAnalysis) {
    let issue = &scored.issue;
    md.push_str(&format!(
        "### Issue #{}: {} (Score: {})\n",
        issue.number, issue.title, scored.score
    ));
    md.push_str(&format!("Category: {}\n", record.category));
    md.push_str(&format!("Labels: {}\n", issue.label_names().join(", ")));
    let preview: String = issue.body_text().chars().take(100).collect();
    md.push_str(&format!("Description: {}...\n", preview));

    if record.follows_template {
        if let Some(name) = &record.template_name {
            md.push_str(&format!("Follows template: {}\n", name));
        }
        md.push_str(&format!(
            "Filled sections: {}\n",
            record.filled_sections.join(", ")
        ));
    }
    if !record.related_files.is_empty() {
        let files: Vec<&str> = record.related_files.iter().map(|f| f.as_str()).collect();
        md.push_str(&format!("Related files: {}\n", files.join(", ")));
    }
    if !record.code_snippets.is_empty() {
        md.push_str(&format!("Code snippets found: {}\n", record.code_snippets.len()));
    }
    if !record.dependency_context.is_empty() {
        md.push_str("Dependency context:\n");
        for (file, deps) in &record.dependency_context {
            let deps: Vec<&str> = deps.iter().map(|d| d.as_str()).collect();
            md.push_str(&format!("  {}: {}\n", file, deps.join(", ")));
        }
    }
    if !record.test_files.is_empty() {
        md.push_str("Related test files:\n");
        for test_file in &record.test_files {
            md.push_str(&format!("  {}\n", test_file));
            if let Some(cases) = record.test_cases.get(test_file) {
                md.push_str("    Test cases:\n");
                for case in cases {
                    md.push_str(&format!("      - {}\n", case));
                }
            }
        }
    }
    if !record.similar_issues.is_empty() {
        md.push_str("Similar resolved issues:\n");
        for similar in &record.similar_issues {
            md.push_str(&format!(
                "  - #{}: {} (Similarity: {:.2})\n",
                similar.number, similar.title, similar.score
            ));
        }
    }
    if !record.complexity.is_empty() {
        md.push_str("Code area complexity:\n");
        for (file, complexity) in &record.complexity {
            md.push_str(&format!("  - {}: Complexity score {}\n", file, complexity));
        }
    }
    md.push_str("Automated Fix Suggestions:\n");
    for suggestion in &record.fix_suggestions {
        md.push_str(&format!("- {}\n", suggestion));
    }
    md.push_str("\nHow to Approach This Issue:\n");
    for step in contribution_steps(issue) {
        md.push_str(&format!("{}\n", step));
    }
    md.push('\n');
}

/// Numbered contribution steps for one issue, tailored by its labels and
/// the files its body mentions.
pub fn contribution_steps(issue: &Issue) -> Vec<String> {
    let mut steps = vec![
        format!("To contribute to issue #{}:", issue.number),
        "1. Read through the issue description and comments carefully.".to_string(),
    ];
    let mut step = 2;
    if !issue.labels.is_empty() {
        steps.push(format!(
            "{}. Note that this issue is labeled as: {}",
            step,
            issue.label_names().join(", ")
        ));
        step += 1;
    }
    let mentioned = find_mentioned_files(issue.body_text());
    if !mentioned.is_empty() {
        let files: Vec<&str> = mentioned.iter().map(|f| f.as_str()).collect();
        steps.push(format!(
            "{}. The issue mentions these files, which you should examine: {}",
            step,
            files.join(", ")
        ));
        step += 1;
    }
    steps.push(format!(
        "{}. Set up the project locally using the provided setup instructions.",
        step
    ));
    steps.push(format!("{}. Create a new branch for your work.", step + 1));
    steps.push(format!(
        "{}. Make your changes, commit them, and push to your fork.",
        step + 2
    ));
    steps.push(format!(
        "{}. Open a pull request referencing this issue.",
        step + 3
    ));
    steps
}
