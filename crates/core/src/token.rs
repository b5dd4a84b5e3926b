//! Bearer-token signing and verification.
//!
//! Tokens are HS256 JWTs carrying the subject id, email, and role, with a
//! 30-day expiry matched to the auth cookie's TTL so a persisted cookie
//! never outlives its token. Signing and verification are pure
//! computations, which is why they live in core.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::User;
use crate::types::{Role, UserId};

/// Token lifetime in days.
pub const TOKEN_TTL_DAYS: i64 = 30;

/// Claims carried by a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: UserId,
    pub email: String,
    pub role: Role,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Errors from token verification.
///
/// Expired and otherwise-invalid tokens are distinct causes, but both
/// collapse to "not authenticated" at the session boundary.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
    #[error("token signing failed")]
    Signing,
}

/// Paired encoding/decoding keys derived from one shared secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    /// Build keys from the shared signing secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a token for a user, valid for [`TOKEN_TTL_DAYS`].
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn sign(&self, user: &User) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.to_string(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|_| TokenError::Signing)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` for an out-of-date token and
    /// `TokenError::Invalid` for anything else (bad signature, garbage
    /// input, wrong algorithm).
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::default();
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Email;
    use chrono::DateTime;

    fn sample_user(role: Role) -> User {
        User {
            id: UserId::new("1"),
            name: "Admin Cubed".to_owned(),
            email: Email::parse("admin@cubed3d.com.br").unwrap(),
            role,
            phone: None,
            address: None,
            created_at: DateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_sign_and_verify_round_trip() {
        let keys = TokenKeys::new("test-secret");
        let token = keys.sign(&sample_user(Role::Admin)).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, UserId::new("1"));
        assert_eq!(claims.email, "admin@cubed3d.com.br");
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = TokenKeys::new("secret-a").sign(&sample_user(Role::User)).unwrap();
        let err = TokenKeys::new("secret-b").verify(&token).unwrap_err();
        assert!(matches!(err, TokenError::Invalid));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let keys = TokenKeys::new("test-secret");
        assert!(matches!(keys.verify("not-a-token"), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_rejects_expired() {
        let keys = TokenKeys::new("test-secret");
        let user = sample_user(Role::User);
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: user.email.to_string(),
            role: user.role,
            iat: (now - Duration::days(31)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret"))
            .unwrap();

        let err = keys.verify(&token).unwrap_err();
        assert!(matches!(err, TokenError::Expired));
    }
}
