//! Application state shared across handlers.

use std::sync::Arc;

use secrecy::ExposeSecret;

use cubed_core::token::TokenKeys;

use crate::catalog::ProductCatalog;
use crate::config::StorefrontConfig;
use crate::middleware::CookiePolicy;
use crate::repo::{InMemoryUserRepository, UserStore};
use crate::services::AuthService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the configuration, the seeded
/// catalog, and the auth service over the in-memory user repository.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    cookie_policy: CookiePolicy,
    catalog: ProductCatalog,
    auth: Arc<AuthService>,
}

impl AppState {
    /// Create a new application state with seeded mock data.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let keys = TokenKeys::new(config.token_secret.expose_secret());
        let users: Arc<dyn UserStore> = Arc::new(InMemoryUserRepository::seeded());
        let auth = Arc::new(AuthService::new(users, keys));
        let cookie_policy = CookiePolicy::from_config(&config);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                cookie_policy,
                catalog: ProductCatalog::seeded(),
                auth,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The write policy for cookies set by this app.
    #[must_use]
    pub fn cookie_policy(&self) -> CookiePolicy {
        self.inner.cookie_policy
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &ProductCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &Arc<AuthService> {
        &self.inner.auth
    }
}
