//! Users, auth session state, and the auth reducer.
//!
//! The session state machine mirrors the cart module: a state struct with
//! private fields, tagged actions, and a single [`reduce`] transition
//! function. A session is authenticated exactly when it holds a resolved
//! user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Email, Role, UserId};

/// A shipping/billing address on a user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Shallow-merge a profile update into this user.
    ///
    /// Only fields present in the update change; identity fields (id,
    /// email, role) are never touched by a profile update.
    pub fn apply_update(&mut self, update: &ProfileUpdate) {
        if let Some(name) = &update.name {
            self.name.clone_from(name);
        }
        if let Some(phone) = &update.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(address) = &update.address {
            self.address = Some(address.clone());
        }
    }
}

/// The subset of profile fields a user may change.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl ProfileUpdate {
    /// True when the update carries nothing to change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.address.is_none()
    }
}

/// The auth session: who is logged in, and whether a resolution is in
/// flight.
///
/// `is_authenticated` is derived from `user` and never stored. A fresh
/// state is loading, because the first thing a session does is verify
/// any persisted token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    user: Option<User>,
    is_loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }
}

impl AuthState {
    /// The resolved user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Derived: authenticated exactly when a user is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True while the initial verification or a login is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }
}

/// An auth session transition.
#[derive(Debug, Clone)]
pub enum AuthAction {
    /// A credential exchange has started.
    LoginStart,
    /// A credential exchange or token verification resolved a user.
    LoginSuccess(User),
    /// A credential exchange failed; the session is unauthenticated.
    LoginFailure,
    /// Explicit sign-out. Cannot fail.
    Logout,
    /// Settle the initial resolution with whatever was found.
    LoadUser(Option<User>),
    /// Merge changed profile fields into the held user.
    UpdateUser(ProfileUpdate),
}

/// Apply one action, returning the next state.
#[must_use]
pub fn reduce(state: &AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::LoginStart => AuthState {
            user: state.user.clone(),
            is_loading: true,
        },

        AuthAction::LoginSuccess(user) => AuthState {
            user: Some(user),
            is_loading: false,
        },

        AuthAction::LoginFailure | AuthAction::Logout => AuthState {
            user: None,
            is_loading: false,
        },

        AuthAction::LoadUser(user) => AuthState {
            user,
            is_loading: false,
        },

        AuthAction::UpdateUser(update) => {
            let user = state.user.clone().map(|mut user| {
                user.apply_update(&update);
                user
            });
            AuthState {
                user,
                is_loading: state.is_loading,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new("1"),
            name: "Admin Cubed".to_owned(),
            email: Email::parse("admin@cubed3d.com.br").unwrap(),
            role: Role::Admin,
            phone: None,
            address: None,
            created_at: DateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_default_is_loading_and_unauthenticated() {
        let state = AuthState::default();
        assert!(state.is_loading());
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
    }

    #[test]
    fn test_login_success_resolves_user() {
        let state = reduce(&AuthState::default(), AuthAction::LoginStart);
        assert!(state.is_loading());

        let state = reduce(&state, AuthAction::LoginSuccess(sample_user()));
        assert!(state.is_authenticated());
        assert!(!state.is_loading());
        assert_eq!(state.user().unwrap().id, UserId::new("1"));
    }

    #[test]
    fn test_login_failure_settles_unauthenticated() {
        let state = reduce(&AuthState::default(), AuthAction::LoginStart);
        let state = reduce(&state, AuthAction::LoginFailure);
        assert!(!state.is_authenticated());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_logout_always_clears_user() {
        let state = reduce(&AuthState::default(), AuthAction::LoginSuccess(sample_user()));
        let state = reduce(&state, AuthAction::Logout);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_load_user_none_settles() {
        let state = reduce(&AuthState::default(), AuthAction::LoadUser(None));
        assert!(!state.is_loading());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_update_merges_shallowly() {
        let state = reduce(&AuthState::default(), AuthAction::LoginSuccess(sample_user()));
        let update = ProfileUpdate {
            phone: Some("+55 11 99999-0000".to_owned()),
            ..ProfileUpdate::default()
        };
        let state = reduce(&state, AuthAction::UpdateUser(update));

        let user = state.user().unwrap();
        assert_eq!(user.phone.as_deref(), Some("+55 11 99999-0000"));
        // Untouched fields survive the merge.
        assert_eq!(user.name, "Admin Cubed");
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_update_without_user_is_a_no_op() {
        let state = reduce(&AuthState::default(), AuthAction::LoadUser(None));
        let update = ProfileUpdate {
            name: Some("Ghost".to_owned()),
            ..ProfileUpdate::default()
        };
        let state = reduce(&state, AuthAction::UpdateUser(update));
        assert!(state.user().is_none());
    }
}
