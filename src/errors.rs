//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::domain::ValidationError;
use crate::infra::templates::RenderError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Client errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid email address or password")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    // Store errors
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    // Collaborator errors
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Email transport error: {0}")]
    Transport(String),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::DataIntegrity(_)
            | AppError::Render(_)
            | AppError::Transport(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) | AppError::InvalidCredentials | AppError::NotFound(_) => {
                self.to_string()
            }

            AppError::Database(e) => {
                tracing::error!(error = ?e, "Database error");
                "A database error occurred".to_string()
            }
            AppError::DataIntegrity(msg) => {
                tracing::error!(%msg, "Stored record failed validation");
                "A stored record is invalid".to_string()
            }
            AppError::Render(e) => {
                tracing::error!(error = %e, "Template error");
                "Unable to render message".to_string()
            }
            AppError::Transport(msg) => {
                tracing::error!(%msg, "Email transport error");
                "Unable to send email".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!(%msg, "Internal error");
                "An internal error occurred".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, message: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, message: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(message.into()))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn no_such_resource() -> Self {
        AppError::NotFound(NO_SUCH_RESOURCE.to_string())
    }

    pub fn data_integrity(msg: impl Into<String>) -> Self {
        AppError::DataIntegrity(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Map a unique-constraint violation to a validation error, keeping
    /// every other store error as is.
    pub fn from_db_unique(err: DbErr, conflict_message: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Validation(conflict_message.into()),
            _ => AppError::Database(err),
        }
    }
}

/// Message used for every "not found" outcome without a more specific one.
pub const NO_SUCH_RESOURCE: &str = "No such resource found";
