//! Integration tests for Cubed.
//!
//! These tests exercise the stores end to end against the real auth
//! service and in-memory ports - the same wiring the binaries use, minus
//! the HTTP layer.
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart store scenarios and cookie-format round trips
//! - `auth_flow` - Session lifecycle against the real auth service
//! - `checkout_flow` - Cart to order confirmation

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use cubed_core::token::TokenKeys;
use cubed_storefront::repo::InMemoryUserRepository;
use cubed_storefront::services::AuthService;

/// Signing secret shared by every test.
pub const TEST_SECRET: &str = "integration-test-secret";

/// The auth service as the binaries build it: seeded in-memory users,
/// token keys from one secret.
#[must_use]
pub fn seeded_auth_service() -> Arc<AuthService> {
    Arc::new(AuthService::new(
        Arc::new(InMemoryUserRepository::seeded()),
        TokenKeys::new(TEST_SECRET),
    ))
}
