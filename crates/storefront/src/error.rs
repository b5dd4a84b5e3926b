//! Unified error handling for route handlers.
//!
//! Provides a unified `AppError` type that converts every failure into a
//! status code plus a client-safe `{message}` JSON body. All route
//! handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::services::AuthError;
use crate::stores::{AuthApiError, AuthStoreError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication service failure.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Auth backend failure surfaced through a store.
    #[error("auth error: {0}")]
    AuthApi(#[from] AuthApiError),

    /// Store refused to run an operation.
    #[error("store error: {0}")]
    Store(#[from] AuthStoreError),

    /// Checkout validation failure.
    #[error("checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Auth(err) => match err {
                AuthError::MissingFields(_)
                | AuthError::InvalidEmail(_)
                | AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials | AuthError::Token(_) => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::AuthApi(err) => match err {
                AuthApiError::Validation(_) => StatusCode::BAD_REQUEST,
                AuthApiError::Credentials(_) | AuthApiError::Token(_) => StatusCode::UNAUTHORIZED,
                AuthApiError::Conflict(_) => StatusCode::CONFLICT,
                AuthApiError::NotFound(_) => StatusCode::NOT_FOUND,
                AuthApiError::Network => StatusCode::BAD_GATEWAY,
                AuthApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Store(AuthStoreError::RequestInFlight(_)) => StatusCode::TOO_MANY_REQUESTS,
            Self::Checkout(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to clients. Internal details stay internal.
    fn message(&self) -> String {
        match self {
            Self::Auth(err) => match err {
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    "internal server error".to_owned()
                }
                other => other.to_string(),
            },
            Self::AuthApi(err) => err.to_string(),
            Self::Store(err) => err.to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::BadRequest(message) => message.clone(),
            Self::Internal(_) => "internal server error".to_owned(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request error");
        }
        (status, Json(json!({ "message": self.message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Auth(AuthError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Auth(AuthError::UserAlreadyExists).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Auth(AuthError::UserNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Checkout(CheckoutError::EmptyCart).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("product".to_owned()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("boom".to_owned()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_not_leaked() {
        let err = AppError::Internal("connection pool exhausted".to_owned());
        assert_eq!(err.message(), "internal server error");

        let err = AppError::Auth(AuthError::PasswordHash);
        assert_eq!(err.message(), "internal server error");
    }

    #[test]
    fn test_client_facing_messages_pass_through() {
        let err = AppError::Auth(AuthError::InvalidCredentials);
        assert_eq!(err.message(), "invalid credentials");

        let err = AppError::Checkout(CheckoutError::EmptyCart);
        assert_eq!(err.message(), "cart is empty");
    }
}
