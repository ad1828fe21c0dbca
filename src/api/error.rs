use serde::Deserialize;
use thiserror::Error;

/// Error payload the backend attaches to rejected responses.
///
/// Shape: `{"success": false, "message": "...", "errors": ["field: msg", ...]}`.
/// `errors` is only populated for request-validation failures.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", message.as_deref().unwrap_or("Unauthorized - session is no longer valid"))]
    Unauthorized { message: Option<String> },

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<String>,
    },

    /// Backend reported failure inside a 2xx envelope (`success: false`)
    #[error("{0}")]
    Rejected(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for raw response bodies embedded in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    /// Map a non-success status and its body to a typed error.
    ///
    /// The backend wraps errors in a JSON envelope; when the body doesn't
    /// parse as one (proxies, hard crashes) the raw text is carried instead.
    pub(crate) fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed.message;
        let truncated = Self::truncate_body(body);

        match status.as_u16() {
            401 => ApiError::Unauthorized { message },
            403 => ApiError::Forbidden(message.unwrap_or(truncated)),
            404 => ApiError::NotFound(message.unwrap_or(truncated)),
            400 | 422 => ApiError::Validation {
                message: message.unwrap_or_else(|| "Validation failed".to_string()),
                errors: parsed.errors.unwrap_or_default(),
            },
            500..=599 => ApiError::Server(message.unwrap_or(truncated)),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    /// Human-readable message supplied by the backend, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message } => message.as_deref(),
            ApiError::Forbidden(m)
            | ApiError::NotFound(m)
            | ApiError::Rejected(m)
            | ApiError::Server(m)
            | ApiError::Validation { message: m, .. } => Some(m.as_str()),
            ApiError::Network(_) | ApiError::InvalidResponse(_) => None,
        }
    }

    /// Field-validation messages from the backend, empty for other kinds.
    pub fn validation_errors(&self) -> &[String] {
        match self {
            ApiError::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}
