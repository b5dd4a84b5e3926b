//! Backend services consumed by the stores and route handlers.

pub mod auth;

pub use auth::{AuthError, AuthService};
