//! Error taxonomy for every read and write against the admin API.

use homeservice_api_types::FieldErrors;
use thiserror::Error;

/// Failure surfaced by a query or mutation.
///
/// Cloneable so one failed network call can be handed to every caller that
/// joined the same in-flight request.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Rejected locally before any request was sent.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    /// Non-2xx response.
    #[error("request failed with status {status}: {message}")]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
        field_errors: FieldErrors,
    },
    /// 2xx response whose envelope reported `success: false`.
    #[error("request rejected: {message}")]
    Envelope {
        code: Option<String>,
        message: String,
        field_errors: FieldErrors,
    },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// A required input (usually an id) was absent when a fetch was forced.
    #[error("missing required input: {0}")]
    MissingPrecondition(&'static str),
}

impl ApiError {
    /// Text suitable for a toast or a CLI error line.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(errors) => errors.to_string(),
            ApiError::Status { message, .. } | ApiError::Envelope { message, .. } => {
                message.clone()
            }
            ApiError::Transport(_) => "network error, please try again".to_string(),
            ApiError::Decode(_) => "unexpected response from server".to_string(),
            ApiError::MissingPrecondition(what) => format!("{what} is required"),
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation(errors)
            | ApiError::Status {
                field_errors: errors,
                ..
            }
            | ApiError::Envelope {
                field_errors: errors,
                ..
            } if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Status { code, .. } | ApiError::Envelope { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Only transient failures are worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::Status { .. } => "status",
            ApiError::Envelope { .. } => "envelope",
            ApiError::Transport(_) => "transport",
            ApiError::Decode(_) => "decode",
            ApiError::MissingPrecondition(_) => "missing_precondition",
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Decode(error.to_string())
    }
}
