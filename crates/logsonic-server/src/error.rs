//! Error-to-response mapping for the HTTP surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use logsonic_types::ErrorResponse;
use thiserror::Error;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request body.
    #[error("invalid request body")]
    InvalidRequest(String),

    /// Failed query-parameter validation.
    #[error("invalid {name} parameter")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Unknown, expired, or missing ingest session.
    #[error("invalid or missing session id")]
    InvalidSession,

    /// Pattern name/body validation failed.
    #[error("pattern name or pattern is required")]
    InvalidPattern,

    /// The main Grok pattern failed to compile.
    #[error("failed to add pattern")]
    Pattern(String),

    /// A custom placeholder definition failed to compile.
    #[error("failed to add custom pattern")]
    CustomPattern(String),

    /// Parsing failed wholesale.
    #[error("failed to parse logs")]
    Parse(String),

    /// Catalog entry not found.
    #[error("pattern not found")]
    NotFound(String),

    /// Catalog entry name already taken.
    #[error("pattern already exists")]
    Conflict(String),

    /// Index write/commit/clear failure.
    #[error("storage operation failed")]
    Storage(String),

    /// Search-time failure propagated from storage.
    #[error("failed to read logs")]
    Read(String),

    /// Fatal error during an autosuggest sweep.
    #[error("failed to autosuggest patterns")]
    Autosuggest(String),

    /// Anything else.
    #[error("internal error")]
    Internal(String),
}

/// Result type alias for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// The stable error code for this kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::InvalidParameter { .. } => "INVALID_PARAMETER",
            Self::InvalidSession => "INVALID_SESSION",
            Self::InvalidPattern => "INVALID_PATTERN",
            Self::Pattern(_) => "PATTERN_ERROR",
            Self::CustomPattern(_) => "CUSTOM_PATTERN_ERROR",
            Self::Parse(_) => "PARSE_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Read(_) => "READ_ERROR",
            Self::Autosuggest(_) => "AUTOSUGGEST_ERROR",
            Self::Internal(_) => "INTERNAL",
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_)
            | Self::InvalidParameter { .. }
            | Self::InvalidSession
            | Self::InvalidPattern
            | Self::Pattern(_)
            | Self::CustomPattern(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Parse(_)
            | Self::Storage(_)
            | Self::Read(_)
            | Self::Autosuggest(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> String {
        match self {
            Self::InvalidRequest(details)
            | Self::Pattern(details)
            | Self::CustomPattern(details)
            | Self::Parse(details)
            | Self::NotFound(details)
            | Self::Conflict(details)
            | Self::Storage(details)
            | Self::Read(details)
            | Self::Autosuggest(details)
            | Self::Internal(details) => details.clone(),
            Self::InvalidParameter { reason, .. } => reason.clone(),
            Self::InvalidSession | Self::InvalidPattern => String::new(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: "error".to_string(),
            error: self.to_string(),
            code: self.code().to_string(),
            details: self.details(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<logsonic_ingest::IngestError> for ApiError {
    fn from(err: logsonic_ingest::IngestError) -> Self {
        use logsonic_ingest::IngestError;
        match err {
            IngestError::MissingPattern => Self::InvalidPattern,
            IngestError::InvalidSession => Self::InvalidSession,
            IngestError::CustomPattern(e) => Self::CustomPattern(e.to_string()),
            IngestError::Pattern(e) => Self::Pattern(e.to_string()),
            IngestError::Parse(e) => Self::Parse(e.to_string()),
        }
    }
}

impl From<logsonic_storage::StorageError> for ApiError {
    fn from(err: logsonic_storage::StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<logsonic_grok::GrokError> for ApiError {
    fn from(err: logsonic_grok::GrokError) -> Self {
        use logsonic_grok::GrokError;
        match err {
            GrokError::Conflict(name) => Self::Conflict(format!("pattern name '{name}' already exists")),
            GrokError::NotFound(name) => Self::NotFound(format!("pattern '{name}' not found")),
            other => Self::Internal(other.to_string()),
        }
    }
}
