//! User-facing account payloads.
//!
//! The domain `User` type lives in core; this module holds the payloads
//! that arrive over the wire before validation.

use serde::Deserialize;

/// Registration payload.
///
/// Raw strings on purpose - validation happens in the auth service so
/// the "reject before any backend work" rule lives in one place.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}
