//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password absent from the request.
    #[error("email and password are required")]
    MissingCredentials,

    /// No account matches the supplied email and password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error, including unreadable stored hashes.
    #[error("password hashing error: {0}")]
    PasswordHash(String),
}
