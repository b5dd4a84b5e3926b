//! The two client-state stores and the ports they depend on.
//!
//! A store owns one piece of session state and every operation that
//! mutates it. Stores are persistence-agnostic: they talk to a
//! [`StoragePort`] (cookies in production, a map in tests) and surface
//! user-facing messages through a [`Notifier`]. The cart and auth stores
//! are independent and share nothing but these seams.

pub mod auth;
pub mod cart;

use std::collections::HashMap;

use serde::Serialize;

pub use auth::{AuthApiError, AuthBackend, AuthStore, AuthStoreError, LoginPayload, RegisterPayload};
pub use cart::CartStore;

/// Cookie holding the JSON-serialized cart item list.
pub const CART_COOKIE: &str = "cart";

/// Cookie holding the opaque bearer token.
pub const AUTH_TOKEN_COOKIE: &str = "auth-token";

/// Key/value persistence seam.
///
/// Exactly one store writes each key; reads happen once, at restore
/// time. Implementations must not fail: a storage layer that cannot
/// persist simply loses state, it never breaks an operation.
pub trait StoragePort {
    /// Read a persisted value.
    fn load(&self, key: &str) -> Option<String>;
    /// Persist a value, replacing any previous one.
    fn save(&mut self, key: &str, value: &str);
    /// Drop a persisted value.
    fn clear(&mut self, key: &str);
}

/// In-memory storage, for tests and tooling.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, e.g. a stored token for a returning session.
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl StoragePort for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }

    fn clear(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A single user-facing message emitted by a store operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Notification seam: where store side-effect messages go.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);

    fn success(&mut self, message: impl Into<String>) {
        self.notify(Notification {
            kind: NotificationKind::Success,
            message: message.into(),
        });
    }

    fn error(&mut self, message: impl Into<String>) {
        self.notify(Notification {
            kind: NotificationKind::Error,
            message: message.into(),
        });
    }
}

/// Collects notifications so a response can carry them to the client.
#[derive(Debug, Default, Clone)]
pub struct BufferedNotifier {
    notifications: Vec<Notification>,
}

impl BufferedNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far, in order.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Consume the buffer.
    #[must_use]
    pub fn into_notifications(self) -> Vec<Notification> {
        self.notifications
    }
}

impl Notifier for BufferedNotifier {
    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}
