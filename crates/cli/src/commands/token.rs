//! Mint a development bearer token.
//!
//! The token carries a synthetic user with the requested role and is
//! signed with the same `AUTH_TOKEN_SECRET` the services read, so it
//! passes verification on both the storefront and the admin dashboard.

use chrono::Utc;

use cubed_core::auth::User;
use cubed_core::token::TokenKeys;
use cubed_core::{Email, Role, UserId};

use super::CommandError;

/// Run `cubed-cli token`.
pub fn run(email: &str, name: &str, role: &str) -> Result<(), CommandError> {
    let secret =
        std::env::var("AUTH_TOKEN_SECRET").map_err(|_| CommandError::MissingSecret)?;
    let email = Email::parse(email).map_err(|e| CommandError::InvalidInput(e.to_string()))?;
    let role: Role = role.parse().map_err(CommandError::InvalidInput)?;

    let user = User {
        id: UserId::new("dev"),
        name: name.to_owned(),
        email,
        role,
        phone: None,
        address: None,
        created_at: Utc::now(),
    };

    let token = TokenKeys::new(&secret)
        .sign(&user)
        .map_err(|e| CommandError::InvalidInput(e.to_string()))?;

    println!("{token}");
    Ok(())
}
