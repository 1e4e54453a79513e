use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Upstream request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Upstream {url} answered with status {status}")]
    UpstreamStatusError { url: String, status: u16 },

    #[error("Page structure mismatch: {element} not found")]
    StructureError { element: String },

    #[error("Could not parse {field} from text: {text:?}")]
    ParseError { field: String, text: String },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Structure,
    Parse,
    Config,
    System,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Structure => "structure",
            ErrorCategory::Parse => "parse",
            ErrorCategory::Config => "config",
            ErrorCategory::System => "system",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn structure(element: impl Into<String>) -> Self {
        ReportError::StructureError {
            element: element.into(),
        }
    }

    pub fn parse(field: impl Into<String>, text: impl Into<String>) -> Self {
        ReportError::ParseError {
            field: field.into(),
            text: text.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::NetworkError(_) | ReportError::UpstreamStatusError { .. } => {
                ErrorCategory::Network
            }
            ReportError::StructureError { .. } => ErrorCategory::Structure,
            ReportError::ParseError { .. } => ErrorCategory::Parse,
            ReportError::ConfigError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::TomlError(_)
            | ReportError::UrlError(_) => ErrorCategory::Config,
            ReportError::IoError(_) | ReportError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 上游暫時不可用，稍後重試即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Structure | ErrorCategory::Parse => ErrorSeverity::High,
            ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// HTTP status used when this error is rendered as an API response.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Network => 502,
            _ => 500,
        }
    }

    /// Whether a retry of the same request has a chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            ReportError::NetworkError(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ReportError::UpstreamStatusError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::NetworkError(_) => {
                "The health authority website could not be reached".to_string()
            }
            ReportError::UpstreamStatusError { status, .. } => {
                format!("The health authority website answered with status {}", status)
            }
            ReportError::StructureError { element } => {
                format!("The source page layout changed: {} is missing", element)
            }
            ReportError::ParseError { field, .. } => {
                format!("The source page text changed: {} could not be read", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check connectivity to www.augsburg.de and try again later",
            ErrorCategory::Structure => "Inspect the source page and update the heading navigation",
            ErrorCategory::Parse => "Inspect the source text and update the extraction patterns",
            ErrorCategory::Config => "Check the configuration file and environment variables",
            ErrorCategory::System => "Check file permissions and available resources",
        }
    }
}
