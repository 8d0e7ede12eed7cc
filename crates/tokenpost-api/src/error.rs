//! Tokenpost API — error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tokenpost_core::error::DomainError;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Tracing subscriber or exporter setup failed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON envelope returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub code: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// HTTP status, mirrored from the status line.
    pub status: u16,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status and machine-readable code for the wrapped error.
    #[must_use]
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            DomainError::InvalidTitle { .. } => (StatusCode::BAD_REQUEST, "invalid_title"),
            DomainError::DuplicateTitle => (StatusCode::BAD_REQUEST, "duplicate_post"),
            DomainError::InvalidContent { .. } => (StatusCode::BAD_REQUEST, "invalid_content"),
            DomainError::CreationFailed => (StatusCode::BAD_REQUEST, "post_creation_failed"),
            DomainError::InvalidIdFormat => (StatusCode::BAD_REQUEST, "post_id_invalid_format"),
            DomainError::RecordNotFound => (StatusCode::NOT_FOUND, "post_id_invalid_value"),
            DomainError::DeletionDenied => (StatusCode::FORBIDDEN, "post_deletion_denied"),
            DomainError::MalformedRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request_body"),
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = ErrorBody {
            code,
            message: self.0.to_string(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}
