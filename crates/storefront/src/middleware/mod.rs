//! Request middleware: cookie handling and authentication extractors.

pub mod auth;
pub mod cookies;

pub use auth::{AuthRejection, OptionalAuth, RequireAuth};
pub use cookies::{CookiePolicy, CookieStorage, RequestCookies};
