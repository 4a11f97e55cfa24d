use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIGURATION_MISSING_MESSAGE: &str =
    "API base URL is not configured. Set FEDERATION_API_BASE_URL or pass --base-url.";

pub const TOKEN_MISSING_MESSAGE: &str = "Authorization token was not provided.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Configuration { message: String },

    #[error("{message}")]
    Precondition { message: String },

    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// 任何非 2xx 回應，訊息已經過統一正規化
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error while communicating with the API: {message}")]
    Network { message: String },

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Request was cancelled")]
    Cancelled,

    #[error("API contract violation: {message}")]
    ContractViolation { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token store error: {message}")]
    TokenStore { message: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Uniform view of any failure: a message plus the HTTP status when one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedError {
    pub message: String,
    pub http_status: Option<u16>,
}

impl std::fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.http_status {
            Some(status) => write!(f, "{} (HTTP {})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Authentication,
    Authorization,
    Server,
    Transport,
    Cancelled,
    Contract,
    Local,
}

impl ApiError {
    pub fn configuration_missing() -> Self {
        ApiError::Configuration {
            message: CONFIGURATION_MISSING_MESSAGE.to_string(),
        }
    }

    pub fn missing_token() -> Self {
        ApiError::Precondition {
            message: TOKEN_MISSING_MESSAGE.to_string(),
        }
    }

    pub fn contract(message: impl Into<String>) -> Self {
        ApiError::ContractViolation {
            message: message.into(),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn normalized(&self) -> NormalizedError {
        NormalizedError {
            message: self.message(),
            http_status: self.http_status(),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.http_status() == Some(401)
    }

    pub fn is_forbidden(&self) -> bool {
        self.http_status() == Some(403)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Configuration { .. } => ErrorCategory::Configuration,
            ApiError::Precondition { .. } | ApiError::Validation { .. } => ErrorCategory::Input,
            ApiError::Http { status: 401, .. } => ErrorCategory::Authentication,
            ApiError::Http { status: 403, .. } => ErrorCategory::Authorization,
            ApiError::Http { status, .. } if *status >= 500 => ErrorCategory::Server,
            ApiError::Http { .. } => ErrorCategory::Input,
            ApiError::Network { .. } | ApiError::Timeout { .. } => ErrorCategory::Transport,
            ApiError::Cancelled => ErrorCategory::Cancelled,
            ApiError::ContractViolation { .. } => ErrorCategory::Contract,
            ApiError::Serialization(_) | ApiError::Io(_) | ApiError::TokenStore { .. } => {
                ErrorCategory::Local
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Authentication => format!("Not authenticated: {}", self),
            ErrorCategory::Authorization => format!("Not authorized: {}", self),
            ErrorCategory::Server => format!("The server failed to handle the request: {}", self),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Provide the API base URL through the environment, the config file or --base-url"
            }
            ErrorCategory::Input => "Check the submitted values and try again",
            ErrorCategory::Authentication => "Log in again to obtain a fresh access token",
            ErrorCategory::Authorization => "Use an account with the required role",
            ErrorCategory::Server => "Try again later or contact the API administrator",
            ErrorCategory::Transport => "Check network connectivity and that the API is reachable",
            ErrorCategory::Cancelled => "Re-run the command if the cancellation was unintended",
            ErrorCategory::Contract => "The API returned an unexpected payload; check client and server versions",
            ErrorCategory::Local => "Check local file permissions and configuration",
        }
    }
}
