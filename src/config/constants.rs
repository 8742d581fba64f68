pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const USER_AGENT: &str = "onramp-cli";

pub const DEFAULT_ISSUE_LIMIT: usize = 10;
pub const DEFAULT_SIMILAR_ISSUE_LIMIT: usize = 5;
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const PER_PAGE: u32 = 100;
pub const DEFAULT_OUTPUT_FILE: &str = "contribution_guide.md";

/// File-aggregate scores above this get a refactoring suggestion.
pub const COMPLEXITY_REFACTOR_THRESHOLD: u32 = 10;

pub const RECENT_ACTIVITY_DAYS: i64 = 30;
pub const TOP_ITEM_COUNT: usize = 5;

pub const SETUP_FILES: &[&str] = &["README.md", "CONTRIBUTING.md", "SETUP.md", "CONTRIBUTE.md"];
pub const COMMUNITY_FILES: &[&str] = &[
    "CODE_OF_CONDUCT.md",
    "CONTRIBUTING.md",
    "SECURITY.md",
    "SUPPORT.md",
];
pub const CI_CD_FILES: &[&str] = &[
    ".travis.yml",
    "azure-pipelines.yml",
    "Jenkinsfile",
    ".gitlab-ci.yml",
];
pub const IMPORTANT_FILES: &[&str] = &[".gitignore", "README.md", "LICENSE"];
pub const STYLE_CONFIG_FILES: &[&str] = &[".editorconfig", ".pylintrc", "tox.ini", "setup.cfg"];

pub const DEPENDENCY_FILES: &[(&str, &[&str])] = &[
    ("Python", &["requirements.txt", "Pipfile", "setup.py"]),
    ("JavaScript", &["package.json"]),
    ("Ruby", &["Gemfile"]),
    ("Java", &["pom.xml", "build.gradle"]),
    ("PHP", &["composer.json"]),
    ("Go", &["go.mod"]),
];

pub const ISSUE_TEMPLATE_DIR: &str = ".github/ISSUE_TEMPLATE";
