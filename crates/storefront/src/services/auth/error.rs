//! Authentication error types.

use thiserror::Error;

use cubed_core::token::TokenError;
use cubed_core::types::EmailError;

use crate::repo::RepositoryError;

/// Errors that can occur during authentication operations.
///
/// Every variant maps to a human-readable message at the API boundary;
/// the variants themselves exist so tests can tell failure causes apart.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Required registration fields are missing.
    #[error("{0} are required")]
    MissingFields(String),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password too weak or invalid.
    #[error("{0}")]
    WeakPassword(String),

    /// Invalid credentials (wrong password or unknown email).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("an account with this email already exists")]
    UserAlreadyExists,

    /// No user behind a verified token.
    #[error("user not found")]
    UserNotFound,

    /// Missing, malformed, or expired bearer token.
    #[error("{0}")]
    Token(#[from] TokenError),

    /// Repository error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
