use regex::Regex;

/// Pull the body of the first markdown section whose heading matches one of
/// the alternatives in `section_pattern` (e.g. "installation|setup").
/// Returns an empty string when no section matches.
pub fn extract_section(content: &str, section_pattern: &str) -> String {
    let pattern = format!(r"(?is)#+\s*(?:{})[^\n]*\n(.*?)(?:\n#+\s|\z)", section_pattern);
    match Regex::new(&pattern) {
        Ok(re) => re
            .captures(content)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_default(),
        Err(e) => {
            log::debug!("invalid section pattern '{}': {}", section_pattern, e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn extracts_matching_section() {
        let readme = indoc! {"
            # My Project

            ## Installation

            pip install my-project

            ## Usage

            Run it.
        "};
        let section = extract_section(readme, "installation|setup|getting started");
        assert_eq!(section, "pip install my-project");
    }

    #[test]
    fn missing_section_yields_empty() {
        assert_eq!(extract_section("# Title\nbody", "contributing"), "");
    }

    #[test]
    fn heading_match_is_case_insensitive() {
        let content = "## GETTING STARTED\nclone the repo\n";
        let section = extract_section(content, "installation|setup|getting started");
        assert_eq!(section, "clone the repo");
    }
}
