//! Service error types
//!
//! Maps internal failures to HTTP status codes at the response boundary.
//! Upstream generation failures are surfaced as opaque server errors; the
//! detailed cause goes to the logs only, after sanitization.

use crate::config::ConfigError;
use crate::llm::provider::LlmError;
use serde::Serialize;
use thiserror::Error;
use warp::http::StatusCode;

/// Main error type for service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM provider error: {0}")]
    Llm(#[from] LlmError),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ServiceError {
    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ServiceError::Config(_) | ServiceError::Llm(_) | ServiceError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// JSON error body returned to clients
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Sanitize error messages before they reach the logs
///
/// Credentials can leak through provider error text (for example a signed
/// URL or an echoed header), so secret-looking patterns are redacted and
/// very long messages truncated.
pub fn sanitize_error_message(message: &str) -> String {
    let mut sanitized = message.to_string();

    sanitized = regex::Regex::new(r"(?i)(password|token|key|secret)[=:]\s*\S+")
        .unwrap()
        .replace_all(&sanitized, "${1}=***")
        .to_string();

    sanitized = regex::Regex::new(r"[?&]key=[A-Za-z0-9_-]+")
        .unwrap()
        .replace_all(&sanitized, "?key=***")
        .to_string();

    if sanitized.len() > 500 {
        let truncate_suffix = "...[truncated]";
        let max_content_len = 500 - truncate_suffix.len();
        sanitized = format!("{}{}", &sanitized[..max_content_len], truncate_suffix);
    }

    sanitized
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
