use serde::Serialize;
use thiserror::Error;
use warp::http::StatusCode;

/// Custom error types for the interview server
#[derive(Debug, Error)]
pub enum AppError {
    /// Credential errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Request payload errors
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    /// Delivery to a live connection failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Collaborator errors
    #[error("Failed to generate {what}: {reason}")]
    Generation { what: String, reason: String },

    #[error("Code execution failed: {0}")]
    Execution(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Missing required configuration: {0}")]
    MissingConfiguration(String),

    #[error("Failed to serialize message: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        AppError::NotFound(what.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        AppError::Storage(msg.into())
    }

    /// Wraps any collaborator failure as an opaque generation error
    pub fn generation(what: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        AppError::Generation {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body returned to HTTP clients. Collaborator failures keep a short
    /// message and carry the underlying reason in `error`.
    pub fn body(&self) -> ErrorBody {
        match self {
            AppError::Generation { what, reason } => ErrorBody {
                message: format!("Failed to generate {}", what),
                error: Some(reason.clone()),
            },
            AppError::Validation(msg) => ErrorBody {
                message: msg.clone(),
                error: None,
            },
            AppError::NotFound(what) => ErrorBody {
                message: format!("{} not found", what),
                error: None,
            },
            AppError::Authentication(_) => ErrorBody {
                message: "Access token required".to_string(),
                error: None,
            },
            AppError::InvalidToken(_) => ErrorBody {
                message: "Invalid token".to_string(),
                error: None,
            },
            other => ErrorBody {
                message: "Server error".to_string(),
                error: Some(other.to_string()),
            },
        }
    }
}

impl warp::reject::Reject for AppError {}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
