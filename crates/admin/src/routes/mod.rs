//! HTTP route handlers for the admin dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET /health              - Health check
//! GET /api/dashboard       - Dashboard stats summary (admin only)
//! GET /api/orders          - Recent orders, optional ?status= filter (admin only)
//! GET /api/orders/{id}     - Order detail (admin only)
//! ```

pub mod dashboard;
pub mod orders;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the admin dashboard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard", get(dashboard::show))
        .route("/api/orders", get(orders::index))
        .route("/api/orders/{id}", get(orders::show))
}
