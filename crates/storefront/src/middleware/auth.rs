//! Authentication extractors.
//!
//! Handlers that need the caller's identity take [`RequireAuth`] or
//! [`OptionalAuth`] as an argument. The bearer token comes from the
//! `Authorization` header, falling back to the `auth-token` cookie.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use cubed_core::auth::User;

use crate::middleware::cookies::RequestCookies;
use crate::state::AppState;
use crate::stores::AUTH_TOKEN_COOKIE;

/// Extractor that requires an authenticated user.
///
/// # Example
///
/// ```rust,ignore
/// async fn profile(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     Json(user)
/// }
/// ```
pub struct RequireAuth(pub User);

/// Why authentication failed.
pub enum AuthRejection {
    /// No bearer token in the header or the cookie.
    MissingToken,
    /// Token failed verification (malformed, bad signature, expired).
    InvalidToken,
    /// Token verified but the subject no longer exists.
    UserNotFound,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "token not provided"),
            Self::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid token"),
            Self::UserNotFound => (StatusCode::NOT_FOUND, "user not found"),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Pull the bearer token from the request: `Authorization` header first,
/// `auth-token` cookie second.
#[must_use]
pub fn bearer_token(parts: &Parts) -> Option<String> {
    let from_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(ToOwned::to_owned);

    from_header.or_else(|| {
        RequestCookies::from_headers(&parts.headers)
            .get(AUTH_TOKEN_COOKIE)
            .map(ToOwned::to_owned)
    })
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthRejection::MissingToken)?;

        let claims = state
            .auth()
            .verify_token(&token)
            .map_err(|_| AuthRejection::InvalidToken)?;

        let user = state
            .auth()
            .user_by_id(&claims.sub)
            .map_err(|_| AuthRejection::UserNotFound)?;

        Ok(Self(user))
    }
}

/// Extractor that optionally resolves the current user.
///
/// Unlike [`RequireAuth`], this never rejects the request.
pub struct OptionalAuth(pub Option<User>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = bearer_token(parts)
            .and_then(|token| state.auth().verify_token(&token).ok())
            .and_then(|claims| state.auth().user_by_id(&claims.sub).ok());

        Ok(Self(user))
    }
}
