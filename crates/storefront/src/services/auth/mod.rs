//! Authentication service.
//!
//! Resolves the four auth contracts (login, register, me, profile update)
//! against an injected user repository. Passwords are hashed with
//! Argon2id; sessions are identified by signed bearer tokens.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use uuid::Uuid;

use cubed_core::auth::{ProfileUpdate, User};
use cubed_core::token::{Claims, TokenKeys};
use cubed_core::{Email, Role, UserId};

use crate::models::user::RegisterData;
use crate::repo::{RepositoryError, UserStore};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication service.
///
/// Cheap to clone; the repository is shared behind an `Arc`.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    keys: TokenKeys,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>, keys: TokenKeys) -> Self {
        Self { users, keys }
    }

    /// Register a new user with name, email, and password.
    ///
    /// Validation happens before the repository is consulted: missing
    /// fields and short passwords never reach storage.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields`, `AuthError::InvalidEmail`, or
    /// `AuthError::WeakPassword` for rejected input, and
    /// `AuthError::UserAlreadyExists` for a duplicate email.
    pub async fn register(&self, data: &RegisterData) -> Result<User, AuthError> {
        let mut missing = Vec::new();
        if data.name.trim().is_empty() {
            missing.push("name");
        }
        if data.email.trim().is_empty() {
            missing.push("email");
        }
        if data.password.is_empty() {
            missing.push("password");
        }
        if !missing.is_empty() {
            return Err(AuthError::MissingFields(missing.join(", ")));
        }

        let email = Email::parse(&data.email)?;
        validate_password(&data.password)?;
        let password_hash = hash_password(&data.password)?;

        let user = User {
            id: UserId::new(Uuid::new_v4().to_string()),
            name: data.name.trim().to_owned(),
            email,
            role: Role::User,
            phone: data.phone.clone().filter(|phone| !phone.trim().is_empty()),
            address: None,
            created_at: chrono::Utc::now(),
        };

        self.users.create(user, password_hash).map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Repository(other),
        })
    }

    /// Login with email and password, issuing a fresh bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the email is unknown
    /// or the password does not match. The two cases are deliberately
    /// indistinguishable to callers.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .find_with_password_hash(&email)?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = self.keys.sign(&user).map_err(AuthError::Token)?;
        Ok((user, token))
    }

    /// Resolve the user behind a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` for a missing/expired/invalid token and
    /// `AuthError::UserNotFound` when the token's subject no longer
    /// exists.
    pub async fn me(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.verify_token(token)?;
        self.users
            .find_by_id(&claims.sub)?
            .ok_or(AuthError::UserNotFound)
    }

    /// Merge a profile update into the token's user and persist it.
    ///
    /// # Errors
    ///
    /// Same failure causes as [`Self::me`].
    pub async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<User, AuthError> {
        let mut user = self.me(token).await?;
        user.apply_update(update);
        Ok(self.users.update(&user)?)
    }

    /// Verify a bearer token without touching the repository.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` for an invalid or expired token.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(self.keys.verify(token)?)
    }

    /// Look up a user by id, for request extractors.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` when the id is unknown.
    pub fn user_by_id(&self, id: &UserId) -> Result<User, AuthError> {
        self.users.find_by_id(id)?.ok_or(AuthError::UserNotFound)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
pub(crate) fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}


// =============================================================================
// Store-facing backend seam
// =============================================================================

use crate::stores::{AuthApiError, AuthBackend, LoginPayload, RegisterPayload};

impl From<AuthError> for AuthApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingFields(_) | AuthError::InvalidEmail(_) | AuthError::WeakPassword(_) => {
                Self::Validation(err.to_string())
            }
            AuthError::InvalidCredentials => Self::Credentials(err.to_string()),
            AuthError::UserAlreadyExists => Self::Conflict(err.to_string()),
            AuthError::UserNotFound => Self::NotFound(err.to_string()),
            AuthError::Token(inner) => Self::Token(inner.to_string()),
            AuthError::Repository(_) | AuthError::PasswordHash => Self::Internal,
        }
    }
}

impl AuthBackend for AuthService {
    async fn login(&self, email: &str, password: &str) -> Result<LoginPayload, AuthApiError> {
        let (user, token) = Self::login(self, email, password).await?;
        Ok(LoginPayload { user, token })
    }

    async fn register(&self, data: &RegisterData) -> Result<RegisterPayload, AuthApiError> {
        let user = Self::register(self, data).await?;
        Ok(RegisterPayload {
            message: "Account created successfully! Log in to continue.".to_owned(),
            user,
        })
    }

    async fn me(&self, token: &str) -> Result<User, AuthApiError> {
        Ok(Self::me(self, token).await?)
    }

    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<User, AuthApiError> {
        Ok(Self::update_profile(self, token, update).await?)
    }
}
