//! Application state shared across admin handlers.

use std::sync::Arc;

use secrecy::ExposeSecret;

use cubed_core::token::TokenKeys;

use crate::config::AdminConfig;
use crate::reports::ReportsRepository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    keys: TokenKeys,
    reports: ReportsRepository,
}

impl AppState {
    /// Create a new application state with the seeded report snapshot.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let keys = TokenKeys::new(config.token_secret.expose_secret());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                keys,
                reports: ReportsRepository::seeded(),
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Token verification keys.
    #[must_use]
    pub fn keys(&self) -> &TokenKeys {
        &self.inner.keys
    }

    /// Get a reference to the reports repository.
    #[must_use]
    pub fn reports(&self) -> &ReportsRepository {
        &self.inner.reports
    }
}
