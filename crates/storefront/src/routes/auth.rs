//! Authentication route handlers.
//!
//! The handlers drive the auth store, which owns the state transitions,
//! the token cookie, and the notifications; the wire contract stays the
//! mock backend's: `{user, token}` on login, `{message, user}` on
//! register, bare `{message}` bodies on failure.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use cubed_core::auth::{ProfileUpdate, User};

use crate::error::{AppError, Result};
use crate::middleware::{CookieStorage, RequestCookies, RequireAuth};
use crate::models::RegisterData;
use crate::state::AppState;
use crate::stores::{AUTH_TOKEN_COOKIE, AuthStore, BufferedNotifier};

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// Register response body.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

type RequestAuthStore =
    AuthStore<std::sync::Arc<crate::services::AuthService>, CookieStorage, BufferedNotifier>;

/// Build the auth store for this request.
///
/// An `Authorization: Bearer` header takes precedence over the token
/// cookie, so API clients and the browser share one code path.
fn restore_store(state: &AppState, headers: &HeaderMap) -> RequestAuthStore {
    let mut cookies = RequestCookies::from_headers(headers);
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    if let Some(token) = bearer {
        cookies.insert(AUTH_TOKEN_COOKIE, token);
    }

    let storage = CookieStorage::new(state.cookie_policy(), cookies);
    AuthStore::new(state.auth().clone(), storage, BufferedNotifier::new())
}

fn with_cookies(mut response: Response, storage: CookieStorage) -> Response {
    for cookie in storage.into_set_cookie_headers() {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    response
}

/// Login action.
///
/// POST /api/auth/login
#[instrument(skip(state, headers, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<LoginRequest>,
) -> Result<Response> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::BadRequest("email and password are required".to_owned()));
    }

    let mut store = restore_store(&state, &headers);
    let payload = store.login(&request.email, &request.password).await??;

    let (_, storage, _) = store.into_parts();
    let body = Json(LoginResponse {
        user: payload.user,
        token: payload.token,
    });
    Ok(with_cookies(body.into_response(), storage))
}

/// Register action.
///
/// POST /api/auth/register
#[instrument(skip(state, headers, data), fields(email = %data.email))]
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(data): Json<RegisterData>,
) -> Result<Response> {
    let mut store = restore_store(&state, &headers);
    let payload = store.register(&data).await??;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: payload.message,
            user: payload.user,
        }),
    )
        .into_response())
}

/// Logout action. Cannot fail.
///
/// POST /api/auth/logout
#[instrument(skip(state, headers))]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut store = restore_store(&state, &headers);
    store.logout();

    let (_, storage, notifier) = store.into_parts();
    let message = notifier
        .into_notifications()
        .into_iter()
        .next()
        .map_or_else(|| "logged out".to_owned(), |notification| notification.message);

    let body = Json(serde_json::json!({ "message": message }));
    with_cookies(body.into_response(), storage)
}

/// Current user.
///
/// GET /api/auth/me
#[instrument(skip_all)]
pub async fn me(RequireAuth(user): RequireAuth) -> Json<User> {
    Json(user)
}

/// Update the current user's profile.
///
/// PUT /api/auth/profile
#[instrument(skip(state, headers, update))]
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<ProfileUpdate>,
) -> Result<Response> {
    let mut store = restore_store(&state, &headers);
    let user = store.update_profile(&update).await??;

    Ok(Json(serde_json::json!({ "user": user })).into_response())
}
