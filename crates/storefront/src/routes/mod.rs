//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Store profile + featured products
//! GET  /health                  - Health check
//!
//! # Products
//! GET  /api/products            - Product listing (search/category/sort)
//! GET  /api/products/{id}       - Product detail
//!
//! # Cart
//! GET  /api/cart                - Cart view
//! POST /api/cart/add            - Add one unit of an item
//! POST /api/cart/update         - Set line quantity (<= 0 removes)
//! POST /api/cart/remove         - Remove a line
//! POST /api/cart/clear          - Empty the cart
//! GET  /api/cart/count          - Item count badge
//!
//! # Checkout
//! GET  /api/checkout/quote      - Totals incl. shipping and PIX discount
//! POST /api/checkout            - Place order, clear cart
//!
//! # Auth
//! POST /api/auth/login          - Login action
//! POST /api/auth/register       - Register action
//! POST /api/auth/logout         - Logout action
//! GET  /api/auth/me             - Current user
//! PUT  /api/auth/profile        - Update profile
//!
//! # Contact & quotes
//! POST /api/contact             - Contact form
//! POST /api/quotes              - General quote request
//! POST /api/quotes/print        - STL print quote request
//! POST /api/quotes/modeling     - Custom modeling quote request
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::place_order))
        .route("/quote", get(checkout::quote))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/profile", put(auth::update_profile))
}

/// Create the contact and quote routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(contact::contact))
        .route("/api/quotes", post(contact::quote))
        .route("/api/quotes/print", post(contact::print_quote))
        .route("/api/quotes/modeling", post(contact::modeling_quote))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/api/products", product_routes())
        // Cart routes
        .nest("/api/cart", cart_routes())
        // Checkout routes
        .nest("/api/checkout", checkout_routes())
        // Auth routes
        .nest("/api/auth", auth_routes())
        // Contact & quote routes
        .merge(contact_routes())
}
