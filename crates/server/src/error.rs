//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Response bodies are fixed strings. Storage and hashing faults are logged
//! in full but always reach the client as `500 Server error`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Body sent for every 5xx response.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl AppError {
    const fn is_server_error(&self) -> bool {
        match self {
            Self::Database(_) | Self::Internal(_) => true,
            Self::Auth(err) => matches!(err, AuthError::Repository(_) | AuthError::PasswordHash(_)),
            Self::BadRequest(_) => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
            return (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response();
        }

        let (status, message) = match self {
            Self::Auth(AuthError::UserAlreadyExists) => {
                (StatusCode::BAD_REQUEST, "User already exists".to_string())
            }
            Self::Auth(AuthError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            Self::Auth(AuthError::MissingCredentials) => (
                StatusCode::BAD_REQUEST,
                "Email and password are required".to_string(),
            ),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SERVER_ERROR_MESSAGE.to_string(),
            ),
        };

        tracing::debug!(status = %status, message = %message, "Request rejected");
        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::body::to_bytes;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[tokio::test]
    async fn test_auth_errors_map_to_fixed_responses() {
        assert_eq!(
            render(AuthError::UserAlreadyExists.into()).await,
            (StatusCode::BAD_REQUEST, "User already exists".to_string())
        );
        assert_eq!(
            render(AuthError::InvalidCredentials.into()).await,
            (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
        );
        assert_eq!(
            render(AuthError::MissingCredentials.into()).await,
            (
                StatusCode::BAD_REQUEST,
                "Email and password are required".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let cases = [
            AppError::Database(RepositoryError::Timeout(Duration::from_secs(10))),
            AppError::Database(RepositoryError::DataCorruption("bad row".to_string())),
            AppError::Auth(AuthError::PasswordHash("salt too short".to_string())),
            AppError::Auth(AuthError::Repository(RepositoryError::Conflict(
                "x".to_string(),
            ))),
            AppError::Internal("boom".to_string()),
        ];

        for err in cases {
            assert_eq!(
                render(err).await,
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            );
        }
    }

    #[tokio::test]
    async fn test_bad_request_passes_message() {
        assert_eq!(
            render(AppError::BadRequest("missing body".to_string())).await,
            (StatusCode::BAD_REQUEST, "missing body".to_string())
        );
    }
}
