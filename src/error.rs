//! Unified error type for staff-hub
//!
//! `AppError` carries an `ErrorCode` plus a message and renders as a plain
//! HTML error page. Database errors convert via `From<sqlx::Error>` so
//! handlers can use `?` without per-call `.map_err` boilerplate; the
//! conversion logs the underlying error and surfaces a 500.

use axum::response::{Html, IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

/// Error categories, mapped to HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Referenced record does not exist (404)
    NotFound,
    /// Role mismatch (403)
    Forbidden,
    /// No valid session (401)
    Unauthorized,
    /// Duplicate record (409)
    Conflict,
    /// Malformed input (400)
    Validation,
    /// Database or infrastructure failure (500)
    InternalError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::NotFound => "Not found",
            Self::Forbidden => "Permission denied",
            Self::Unauthorized => "Authentication required",
            Self::Conflict => "Already exists",
            Self::Validation => "Invalid input",
            Self::InternalError => "Internal server error",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
}

impl AppError {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        AppError::new(ErrorCode::InternalError)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code.status();
        // Internal detail stays in the logs, not on the page
        let message = if self.code == ErrorCode::InternalError {
            ErrorCode::InternalError.default_message().to_string()
        } else {
            self.message
        };
        (status, Html(crate::pages::error_page(status, &message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_status_mapping() {
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::Validation.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_with_message_overrides_default() {
        let err = AppError::with_message(ErrorCode::NotFound, "Task not found");
        assert_eq!(err.message, "Task not found");
        assert_eq!(err.to_string(), "Task not found");
    }
}
