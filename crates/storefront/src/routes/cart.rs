//! Cart route handlers.
//!
//! Each request restores the cart store from the client's cookie, applies
//! one operation, and sends back the new state, the operation's
//! notifications, and a `Set-Cookie` carrying the updated item list. The
//! cookie is the only cart persistence there is.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use cubed_core::Price;
use cubed_core::cart::{CartState, NewCartItem};
use cubed_core::types::{ItemId, ProductId, ServiceCategory};

use crate::error::{AppError, Result};
use crate::middleware::{CookieStorage, RequestCookies};
use crate::state::AppState;
use crate::stores::{BufferedNotifier, CartStore, Notification};

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub id: ItemId,
    pub name: String,
    pub quantity: u32,
    pub category: ServiceCategory,
    pub price: String,
    pub line_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&CartState> for CartView {
    fn from(state: &CartState) -> Self {
        Self {
            items: state
                .items()
                .iter()
                .map(|item| CartItemView {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    category: item.category,
                    price: Price::brl(item.price).display(),
                    line_price: Price::brl(item.line_total()).display(),
                    image: item.image.clone(),
                })
                .collect(),
            subtotal: Price::brl(state.total()).display(),
            item_count: state.item_count(),
        }
    }
}

/// Response envelope for cart operations.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: CartView,
    pub notifications: Vec<Notification>,
}

// =============================================================================
// Request Types
// =============================================================================

/// Add to cart payload: a catalog product by id, or a custom service line
/// (STL print / modeling quotes priced elsewhere).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub item: Option<NewCartItem>,
}

/// Update quantity payload.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub id: ItemId,
    pub quantity: i64,
}

/// Remove from cart payload.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub id: ItemId,
}

// =============================================================================
// Helpers
// =============================================================================

/// Restore the cart store from the request's cookies.
fn restore_store(state: &AppState, headers: &HeaderMap) -> CartStore<CookieStorage, BufferedNotifier> {
    let cookies = RequestCookies::from_headers(headers);
    let storage = CookieStorage::new(state.cookie_policy(), cookies);
    CartStore::restore(storage, BufferedNotifier::new())
}

/// Build the response: new state, notifications, pending cookie writes.
fn respond(store: CartStore<CookieStorage, BufferedNotifier>) -> Response {
    let (state, storage, notifier) = store.into_parts();
    let body = Json(CartResponse {
        cart: CartView::from(&state),
        notifications: notifier.into_notifications(),
    });

    let mut response = body.into_response();
    for cookie in storage.into_set_cookie_headers() {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    response
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart.
#[instrument(skip(state, headers))]
pub async fn show(State(state): State<AppState>, headers: HeaderMap) -> Response {
    respond(restore_store(&state, &headers))
}

/// Add one unit of an item to the cart.
///
/// Catalog products are resolved by id so the price always comes from the
/// catalog; custom service lines arrive fully described.
#[instrument(skip(state, headers, request))]
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AddToCartRequest>,
) -> Result<Response> {
    let item = match (request.product_id, request.item) {
        (Some(product_id), _) => state
            .catalog()
            .get(&product_id)
            .map(crate::catalog::Product::to_cart_item)
            .ok_or_else(|| AppError::NotFound("product".to_owned()))?,
        (None, Some(item)) => item,
        (None, None) => {
            return Err(AppError::BadRequest(
                "productId or item is required".to_owned(),
            ));
        }
    };

    let mut store = restore_store(&state, &headers);
    store.add_to_cart(item);
    Ok(respond(store))
}

/// Set a line's quantity. Zero or negative removes the line.
#[instrument(skip(state, headers, request))]
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdateCartRequest>,
) -> Response {
    let mut store = restore_store(&state, &headers);
    store.update_quantity(&request.id, request.quantity);
    respond(store)
}

/// Remove a line from the cart.
#[instrument(skip(state, headers, request))]
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RemoveFromCartRequest>,
) -> Response {
    let mut store = restore_store(&state, &headers);
    store.remove_from_cart(&request.id);
    respond(store)
}

/// Empty the cart.
#[instrument(skip(state, headers))]
pub async fn clear(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut store = restore_store(&state, &headers);
    store.clear_cart();
    respond(store)
}

/// Item count badge.
#[instrument(skip(state, headers))]
pub async fn count(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let store = restore_store(&state, &headers);
    let count = store.state().item_count();
    Json(serde_json::json!({ "count": count }))
}
