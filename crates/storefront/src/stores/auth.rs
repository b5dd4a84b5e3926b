//! The auth store: session state machine over a backend seam.
//!
//! Resolves and holds the session's identity from a persisted bearer
//! token. The backend is a trait so the store is testable against mocks
//! and so the state machine never knows whether the service is
//! in-process or remote.
//!
//! # State machine
//!
//! Fresh store -> `initialize`: stored token verified -> authenticated;
//! verification fails or no token -> unauthenticated (token cleared,
//! silently - a returning visitor with a stale token gets no spurious
//! "logged out" message). From there `login`/`register`/`logout`/
//! `update_profile` drive explicit transitions, each with exactly one
//! user-facing notification per outcome.
//!
//! # Concurrency policy
//!
//! One operation at a time per store instance: a call made while another
//! is outstanding is rejected with [`AuthStoreError::RequestInFlight`]
//! rather than racing for the last write.
//!
//! # Return shape
//!
//! Operations return nested results: the outer error is the store
//! refusing to run (in-flight rejection), the inner result is the
//! backend outcome - already reduced into state and notified by the time
//! the caller sees it.

use std::future::Future;

use thiserror::Error;

use cubed_core::auth::{AuthAction, AuthState, ProfileUpdate, User, reduce};

use super::{AUTH_TOKEN_COOKIE, Notifier, StoragePort};
use crate::models::RegisterData;

/// Payload of a successful credential exchange.
#[derive(Debug, Clone)]
pub struct LoginPayload {
    pub user: User,
    pub token: String,
}

/// Payload of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterPayload {
    pub message: String,
    pub user: User,
}

/// Failure causes surfaced by the auth backend.
///
/// Users only ever see the message, but the kinds stay distinct so tests
/// and status-code mapping can tell them apart.
#[derive(Debug, Clone, Error)]
pub enum AuthApiError {
    /// Input rejected before any backend work.
    #[error("{0}")]
    Validation(String),
    /// Wrong email/password pair.
    #[error("{0}")]
    Credentials(String),
    /// Duplicate account.
    #[error("{0}")]
    Conflict(String),
    /// Missing, malformed, or expired token.
    #[error("{0}")]
    Token(String),
    /// Token verified but its subject is gone.
    #[error("{0}")]
    NotFound(String),
    /// The backend could not be reached.
    #[error("connection error, please try again")]
    Network,
    /// Backend-side failure.
    #[error("internal error, please try again")]
    Internal,
}

/// The four authentication contracts the store consumes.
pub trait AuthBackend: Send + Sync {
    /// Exchange credentials for a user and a fresh token.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginPayload, AuthApiError>> + Send;

    /// Create an account. Does not sign the user in.
    fn register(
        &self,
        data: &RegisterData,
    ) -> impl Future<Output = Result<RegisterPayload, AuthApiError>> + Send;

    /// Resolve the user behind a token.
    fn me(&self, token: &str) -> impl Future<Output = Result<User, AuthApiError>> + Send;

    /// Merge a partial profile into the token's user.
    fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<User, AuthApiError>> + Send;
}

impl<T: AuthBackend> AuthBackend for std::sync::Arc<T> {
    async fn login(&self, email: &str, password: &str) -> Result<LoginPayload, AuthApiError> {
        T::login(self, email, password).await
    }

    async fn register(&self, data: &RegisterData) -> Result<RegisterPayload, AuthApiError> {
        T::register(self, data).await
    }

    async fn me(&self, token: &str) -> Result<User, AuthApiError> {
        T::me(self, token).await
    }

    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<User, AuthApiError> {
        T::update_profile(self, token, update).await
    }
}

/// Which store operation is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOperation {
    Initialize,
    Login,
    Register,
    UpdateProfile,
}

impl std::fmt::Display for AuthOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialize => write!(f, "initialize"),
            Self::Login => write!(f, "login"),
            Self::Register => write!(f, "register"),
            Self::UpdateProfile => write!(f, "update-profile"),
        }
    }
}

/// Errors from the store itself (as opposed to backend failures, which
/// become notifications).
#[derive(Debug, Error)]
pub enum AuthStoreError {
    /// A second operation was requested while one is outstanding.
    #[error("a {0} request is already in flight")]
    RequestInFlight(AuthOperation),
}

/// The auth store.
pub struct AuthStore<B, S, N> {
    state: AuthState,
    in_flight: Option<AuthOperation>,
    backend: B,
    storage: S,
    notifier: N,
}

impl<B: AuthBackend, S: StoragePort, N: Notifier> AuthStore<B, S, N> {
    /// Create a store in its initial (loading, unauthenticated) state.
    pub fn new(backend: B, storage: S, notifier: N) -> Self {
        Self {
            state: AuthState::default(),
            in_flight: None,
            backend,
            storage,
            notifier,
        }
    }

    /// The current session state.
    #[must_use]
    pub const fn state(&self) -> &AuthState {
        &self.state
    }

    /// Notifications emitted so far.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The persisted token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage.load(AUTH_TOKEN_COOKIE)
    }

    /// Mount-time resolution of the persisted token.
    ///
    /// Both outcomes are silent: success needs no announcement, and a
    /// rejected token is simply cleared so a returning visitor is not
    /// greeted with an error they never caused.
    ///
    /// # Errors
    ///
    /// Returns `AuthStoreError::RequestInFlight` if another operation is
    /// outstanding.
    pub async fn initialize(&mut self) -> Result<(), AuthStoreError> {
        self.begin(AuthOperation::Initialize)?;

        let Some(token) = self.storage.load(AUTH_TOKEN_COOKIE) else {
            self.dispatch(AuthAction::LoadUser(None));
            self.finish();
            return Ok(());
        };

        match self.backend.me(&token).await {
            Ok(user) => self.dispatch(AuthAction::LoginSuccess(user)),
            Err(err) => {
                tracing::debug!(error = %err, "stored token rejected, clearing");
                self.storage.clear(AUTH_TOKEN_COOKIE);
                self.dispatch(AuthAction::LoadUser(None));
            }
        }

        self.finish();
        Ok(())
    }

    /// Exchange credentials for a session.
    ///
    /// On success the fresh token is persisted and the user held; on
    /// failure the session settles unauthenticated, any previously
    /// stored token untouched. Exactly one notification either way.
    ///
    /// # Errors
    ///
    /// Returns `AuthStoreError::RequestInFlight` if another operation is
    /// outstanding. The inner result is the backend outcome.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Result<LoginPayload, AuthApiError>, AuthStoreError> {
        self.begin(AuthOperation::Login)?;
        self.dispatch(AuthAction::LoginStart);

        let result = self.backend.login(email, password).await;
        self.finish();

        match result {
            Ok(payload) => {
                self.storage.save(AUTH_TOKEN_COOKIE, &payload.token);
                self.dispatch(AuthAction::LoginSuccess(payload.user.clone()));
                self.notifier.success("Logged in successfully!");
                Ok(Ok(payload))
            }
            Err(err) => {
                self.dispatch(AuthAction::LoginFailure);
                self.notifier.error(err.to_string());
                Ok(Err(err))
            }
        }
    }

    /// Create an account.
    ///
    /// Registration never touches the session state or the token: the
    /// user logs in afterwards.
    ///
    /// # Errors
    ///
    /// Returns `AuthStoreError::RequestInFlight` if another operation is
    /// outstanding. The inner result is the backend outcome.
    pub async fn register(
        &mut self,
        data: &RegisterData,
    ) -> Result<Result<RegisterPayload, AuthApiError>, AuthStoreError> {
        self.begin(AuthOperation::Register)?;
        let result = self.backend.register(data).await;
        self.finish();

        match result {
            Ok(payload) => {
                self.notifier.success(payload.message.clone());
                Ok(Ok(payload))
            }
            Err(err) => {
                self.notifier.error(err.to_string());
                Ok(Err(err))
            }
        }
    }

    /// Sign out. Unconditional: clears the token and the held user.
    pub fn logout(&mut self) {
        self.storage.clear(AUTH_TOKEN_COOKIE);
        self.dispatch(AuthAction::Logout);
        self.notifier.success("Logged out successfully!");
    }

    /// Merge changed profile fields into the session's user.
    ///
    /// On failure the held state is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `AuthStoreError::RequestInFlight` if another operation is
    /// outstanding. The inner result is the backend outcome.
    pub async fn update_profile(
        &mut self,
        update: &ProfileUpdate,
    ) -> Result<Result<User, AuthApiError>, AuthStoreError> {
        self.begin(AuthOperation::UpdateProfile)?;

        let result = match self.storage.load(AUTH_TOKEN_COOKIE) {
            Some(token) => self.backend.update_profile(&token, update).await,
            None => Err(AuthApiError::Token("no session token".to_owned())),
        };
        self.finish();

        match result {
            Ok(user) => {
                self.dispatch(AuthAction::UpdateUser(update.clone()));
                self.notifier.success("Profile updated successfully!");
                Ok(Ok(user))
            }
            Err(err) => {
                self.notifier.error(err.to_string());
                Ok(Err(err))
            }
        }
    }

    fn begin(&mut self, operation: AuthOperation) -> Result<(), AuthStoreError> {
        if let Some(pending) = self.in_flight {
            return Err(AuthStoreError::RequestInFlight(pending));
        }
        self.in_flight = Some(operation);
        Ok(())
    }

    fn finish(&mut self) {
        self.in_flight = None;
    }

    fn dispatch(&mut self, action: AuthAction) {
        self.state = reduce(&self.state, action);
    }

    /// Tear down into state, storage, and notifier.
    pub fn into_parts(self) -> (AuthState, S, N) {
        (self.state, self.storage, self.notifier)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::{BufferedNotifier, MemoryStorage, NotificationKind};
    use super::*;
    use cubed_core::{Email, Role, UserId};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_user() -> User {
        User {
            id: UserId::new("1"),
            name: "Admin Cubed".to_owned(),
            email: Email::parse("admin@cubed3d.com.br").unwrap(),
            role: Role::Admin,
            phone: None,
            address: None,
            created_at: chrono::DateTime::UNIX_EPOCH,
        }
    }

    /// Scripted backend: each call consumes its configured response.
    #[derive(Default)]
    struct MockBackend {
        login_response: Mutex<Option<Result<LoginPayload, AuthApiError>>>,
        me_response: Mutex<Option<Result<User, AuthApiError>>>,
        me_calls: AtomicUsize,
    }

    impl AuthBackend for MockBackend {
        async fn login(&self, _email: &str, _password: &str) -> Result<LoginPayload, AuthApiError> {
            self.login_response
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(AuthApiError::Network))
        }

        async fn register(&self, _data: &RegisterData) -> Result<RegisterPayload, AuthApiError> {
            Ok(RegisterPayload {
                message: "Account created successfully!".to_owned(),
                user: sample_user(),
            })
        }

        async fn me(&self, _token: &str) -> Result<User, AuthApiError> {
            self.me_calls.fetch_add(1, Ordering::SeqCst);
            self.me_response
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(AuthApiError::Token("token not provided".to_owned())))
        }

        async fn update_profile(
            &self,
            _token: &str,
            update: &ProfileUpdate,
        ) -> Result<User, AuthApiError> {
            let mut user = sample_user();
            user.apply_update(update);
            Ok(user)
        }
    }

    fn store_with(
        backend: MockBackend,
        storage: MemoryStorage,
    ) -> AuthStore<MockBackend, MemoryStorage, BufferedNotifier> {
        AuthStore::new(backend, storage, BufferedNotifier::new())
    }

    #[tokio::test]
    async fn test_initialize_without_token_settles_silently() {
        let backend = MockBackend::default();
        let mut store = store_with(backend, MemoryStorage::new());

        store.initialize().await.unwrap();

        assert!(!store.state().is_authenticated());
        assert!(!store.state().is_loading());
        assert_eq!(store.backend.me_calls.load(Ordering::SeqCst), 0);
        assert!(store.notifier().notifications().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_with_valid_token_authenticates_silently() {
        let backend = MockBackend::default();
        *backend.me_response.lock().unwrap() = Some(Ok(sample_user()));
        let storage = MemoryStorage::new().with(AUTH_TOKEN_COOKIE, "stored-token");
        let mut store = store_with(backend, storage);

        store.initialize().await.unwrap();

        assert!(store.state().is_authenticated());
        assert_eq!(store.state().user().unwrap().id, UserId::new("1"));
        // Success on mount is not announced.
        assert!(store.notifier().notifications().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_with_rejected_token_clears_it_silently() {
        let backend = MockBackend::default();
        *backend.me_response.lock().unwrap() =
            Some(Err(AuthApiError::Token("invalid token".to_owned())));
        let storage = MemoryStorage::new().with(AUTH_TOKEN_COOKIE, "expired-token");
        let mut store = store_with(backend, storage);

        store.initialize().await.unwrap();

        assert!(!store.state().is_authenticated());
        assert!(store.token().is_none(), "rejected token must be cleared");
        assert!(store.notifier().notifications().is_empty());
    }

    #[tokio::test]
    async fn test_login_success_persists_token_and_notifies_once() {
        let backend = MockBackend::default();
        *backend.login_response.lock().unwrap() = Some(Ok(LoginPayload {
            user: sample_user(),
            token: "fresh-token".to_owned(),
        }));
        let mut store = store_with(backend, MemoryStorage::new());

        let outcome = store.login("admin@cubed3d.com.br", "password").await.unwrap();

        assert!(outcome.is_ok());
        assert!(store.state().is_authenticated());
        assert_eq!(store.token().as_deref(), Some("fresh-token"));
        let notifications = store.notifier().notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications.first().unwrap().kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn test_login_failure_notifies_once_and_writes_no_token() {
        let backend = MockBackend::default();
        *backend.login_response.lock().unwrap() =
            Some(Err(AuthApiError::Credentials("invalid credentials".to_owned())));
        let mut store = store_with(backend, MemoryStorage::new());

        let outcome = store.login("bad@x.com", "wrong").await.unwrap();

        assert!(matches!(outcome, Err(AuthApiError::Credentials(_))));
        assert!(!store.state().is_authenticated());
        assert!(!store.state().is_loading());
        assert!(store.token().is_none());
        let notifications = store.notifier().notifications();
        assert_eq!(notifications.len(), 1);
        let failure = notifications.first().unwrap();
        assert_eq!(failure.kind, NotificationKind::Error);
        assert_eq!(failure.message, "invalid credentials");
    }

    #[tokio::test]
    async fn test_login_failure_leaves_existing_token_untouched() {
        let backend = MockBackend::default();
        *backend.login_response.lock().unwrap() = Some(Err(AuthApiError::Network));
        let storage = MemoryStorage::new().with(AUTH_TOKEN_COOKIE, "old-token");
        let mut store = store_with(backend, storage);

        let outcome = store.login("a@b.com", "pw").await.unwrap();

        assert!(outcome.is_err());
        assert_eq!(store.token().as_deref(), Some("old-token"));
        let failure = store.notifier().notifications().first().unwrap().clone();
        assert_eq!(failure.message, "connection error, please try again");
    }

    #[tokio::test]
    async fn test_logout_clears_token_and_cannot_fail() {
        let backend = MockBackend::default();
        let storage = MemoryStorage::new().with(AUTH_TOKEN_COOKIE, "some-token");
        let mut store = store_with(backend, storage);

        store.logout();

        assert!(!store.state().is_authenticated());
        assert!(store.token().is_none());
        assert_eq!(store.notifier().notifications().len(), 1);
    }

    #[tokio::test]
    async fn test_update_profile_merges_into_held_user() {
        let backend = MockBackend::default();
        *backend.me_response.lock().unwrap() = Some(Ok(sample_user()));
        let storage = MemoryStorage::new().with(AUTH_TOKEN_COOKIE, "token");
        let mut store = store_with(backend, storage);
        store.initialize().await.unwrap();

        let update = ProfileUpdate {
            phone: Some("+55 11 91234-5678".to_owned()),
            ..ProfileUpdate::default()
        };
        let outcome = store.update_profile(&update).await.unwrap();

        assert!(outcome.is_ok());
        let user = store.state().user().unwrap();
        assert_eq!(user.phone.as_deref(), Some("+55 11 91234-5678"));
        assert_eq!(user.name, "Admin Cubed");
    }

    #[tokio::test]
    async fn test_update_profile_without_token_leaves_state_unchanged() {
        let backend = MockBackend::default();
        let mut store = store_with(backend, MemoryStorage::new());
        store.initialize().await.unwrap();
        let before = store.state().clone();

        let outcome = store.update_profile(&ProfileUpdate::default()).await.unwrap();

        assert!(matches!(outcome, Err(AuthApiError::Token(_))));
        assert_eq!(store.state(), &before);
        let failure = store.notifier().notifications().first().unwrap();
        assert_eq!(failure.kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_second_operation_while_pending_is_rejected() {
        let backend = MockBackend::default();
        let mut store = store_with(backend, MemoryStorage::new());

        // Simulate an outstanding request.
        store.begin(AuthOperation::Login).unwrap();

        let err = store.login("a@b.com", "pw").await.unwrap_err();
        assert!(matches!(
            err,
            AuthStoreError::RequestInFlight(AuthOperation::Login)
        ));

        let err = store.initialize().await.unwrap_err();
        assert!(matches!(err, AuthStoreError::RequestInFlight(_)));

        // Once the outstanding request finishes, operations work again.
        store.finish();
        let outcome = store.login("a@b.com", "pw").await.unwrap();
        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn test_register_success_notifies_without_authenticating() {
        let backend = MockBackend::default();
        let mut store = store_with(backend, MemoryStorage::new());

        let data = RegisterData {
            name: "Maria".to_owned(),
            email: "maria@example.com".to_owned(),
            password: "hunter22".to_owned(),
            phone: None,
        };
        let outcome = store.register(&data).await.unwrap();

        assert!(outcome.is_ok());
        assert!(!store.state().is_authenticated(), "register must not log in");
        assert!(store.token().is_none());
        assert_eq!(store.notifier().notifications().len(), 1);
    }
}
