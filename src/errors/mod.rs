use std::fmt;
use std::error::Error as StdError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OnrampError {
    // Configuration errors
    ConfigurationError {
        message: String,
        suggestion: Option<String>,
    },
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // GitHub API errors
    NetworkError {
        operation: String,
        url: Option<String>,
        status_code: Option<u16>,
        reason: String,
    },
    NotFound {
        resource: String,
    },

    // Parser errors
    ParseError {
        content_type: String,
        reason: String,
    },

    // Analysis errors
    AnalysisError {
        repository: String,
        stage: String,
        reason: String,
    },

    // User input errors
    UserInputError {
        input: String,
        expected: String,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },
}

impl OnrampError {
    pub fn config_error(message: &str, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn network_error(operation: &str, url: Option<&str>, status_code: Option<u16>, reason: &str) -> Self {
        Self::NetworkError {
            operation: operation.to_string(),
            url: url.map(|s| s.to_string()),
            status_code,
            reason: reason.to_string(),
        }
    }

    pub fn not_found(resource: &str) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
        }
    }

    pub fn parse_error(content_type: &str, reason: &str) -> Self {
        Self::ParseError {
            content_type: content_type.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn analysis_error(repository: &str, stage: &str, reason: &str) -> Self {
        Self::AnalysisError {
            repository: repository.to_string(),
            stage: stage.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::NetworkError { .. } => true,
            Self::NotFound { .. } => true,
            Self::UserInputError { .. } => true,
            Self::ConfigurationError { .. } => true,
            Self::AnalysisError { .. } => true,
            Self::ConfigurationFileError { .. } => false,
            Self::ParseError { .. } => false,
            Self::SystemError { .. } => false,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::AnalysisError { .. } => ErrorSeverity::High,
            Self::NetworkError { .. } => ErrorSeverity::Medium,
            Self::ParseError { .. } => ErrorSeverity::Medium,
            Self::NotFound { .. } => ErrorSeverity::Medium,
            Self::ConfigurationError { .. } => ErrorSeverity::Low,
            Self::UserInputError { .. } => ErrorSeverity::Low,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Check file permissions and syntax", path, reason)
            }
            Self::NetworkError { operation, url, status_code, reason } => {
                let mut msg = format!("GitHub API error during {}: {}", operation, reason);
                if let Some(url) = url {
                    msg.push_str(&format!(" (URL: {})", url));
                }
                if let Some(code) = status_code {
                    msg.push_str(&format!(" (Status: {})", code));
                }
                msg.push_str("\n💡 Check your network connection and GITHUB_TOKEN, then try again");
                msg
            }
            Self::NotFound { resource } => {
                format!("Not found: {}\n💡 Check the repository name and your access rights", resource)
            }
            Self::ParseError { content_type, reason } => {
                format!("Parse error in {}: {}", content_type, reason)
            }
            Self::AnalysisError { repository, stage, reason } => {
                format!("Analysis error in repository '{}' during {}: {}", repository, stage, reason)
            }
            Self::UserInputError { input, expected } => {
                format!("Invalid input '{}': expected {}", input, expected)
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}", operation, reason)
            }
        }
    }
}

impl fmt::Display for OnrampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for OnrampError {}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for onramp operations
pub type OnrampResult<T> = Result<T, OnrampError>;

impl From<std::io::Error> for OnrampError {
    fn from(error: std::io::Error) -> Self {
        OnrampError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for OnrampError {
    fn from(error: serde_json::Error) -> Self {
        OnrampError::ParseError {
            content_type: "JSON".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for OnrampError {
    fn from(error: toml::de::Error) -> Self {
        OnrampError::ParseError {
            content_type: "TOML".to_string(),
            reason: error.message().to_string(),
        }
    }
}

impl From<reqwest::Error> for OnrampError {
    fn from(error: reqwest::Error) -> Self {
        OnrampError::NetworkError {
            operation: "HTTP request".to_string(),
            url: error.url().map(|u| u.to_string()),
            status_code: error.status().map(|s| s.as_u16()),
            reason: error.to_string(),
        }
    }
}
