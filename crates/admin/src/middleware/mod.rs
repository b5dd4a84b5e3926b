//! Admin authentication extractor.
//!
//! Every admin route requires a bearer token whose claims carry the
//! admin role. Tokens are minted by the storefront (or the CLI) with the
//! shared secret; the admin binary never issues them.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use cubed_core::token::Claims;
use cubed_core::types::Role;

use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires an admin-role bearer token.
#[derive(Debug)]
pub struct RequireAdmin(pub Claims);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("token not provided".to_owned()))?;

        let claims = state
            .keys()
            .verify(token)
            .map_err(|_| AppError::Unauthorized("invalid token".to_owned()))?;

        if claims.role != Role::Admin {
            return Err(AppError::Forbidden);
        }

        Ok(Self(claims))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;
    use chrono::Utc;
    use cubed_core::auth::User;
    use cubed_core::token::TokenKeys;
    use cubed_core::{Email, UserId};
    use secrecy::SecretString;

    use crate::config::AdminConfig;

    const SECRET: &str = "admin-middleware-test-secret";

    fn state() -> AppState {
        AppState::new(AdminConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            token_secret: SecretString::from(SECRET),
        })
    }

    fn token_for(role: Role) -> String {
        let user = User {
            id: UserId::new("1"),
            name: "Someone".to_owned(),
            email: Email::parse("someone@example.com").unwrap(),
            role,
            phone: None,
            address: None,
            created_at: Utc::now(),
        };
        TokenKeys::new(SECRET).sign(&user).unwrap()
    }

    async fn extract(authorization: Option<String>) -> Result<RequireAdmin, AppError> {
        let mut builder = Request::builder().uri("/api/dashboard");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        RequireAdmin::from_request_parts(&mut parts, &state()).await
    }

    #[tokio::test]
    async fn test_admin_token_is_accepted() {
        let token = token_for(Role::Admin);
        let RequireAdmin(claims) = extract(Some(format!("Bearer {token}")))
            .await
            .expect("admin token passes");
        assert_eq!(claims.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_user_role_token_is_forbidden() {
        let token = token_for(Role::User);
        let err = extract(Some(format!("Bearer {token}"))).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let err = extract(None).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let err = extract(Some("Bearer not.a.token".to_owned())).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
