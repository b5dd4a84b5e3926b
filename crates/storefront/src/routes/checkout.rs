//! Checkout route handlers.
//!
//! The quote endpoint prices the current cart; placing an order validates
//! the form, simulates processing, clears the cart cookie, and returns
//! the confirmation.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use cubed_core::Price;

use crate::checkout::{self, CheckoutForm, CheckoutQuote, OrderConfirmation, PaymentMethod};
use crate::error::Result;
use crate::middleware::{CookieStorage, RequestCookies};
use crate::state::AppState;
use crate::stores::{BufferedNotifier, CartStore, Notification};

/// Query parameters for pricing the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

/// A quote with both raw decimals and display strings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    #[serde(flatten)]
    pub quote: CheckoutQuote,
    pub subtotal_display: String,
    pub shipping_display: String,
    pub total_display: String,
}

impl From<CheckoutQuote> for QuoteView {
    fn from(quote: CheckoutQuote) -> Self {
        Self {
            subtotal_display: Price::brl(quote.subtotal).display(),
            shipping_display: Price::brl(quote.shipping).display(),
            total_display: Price::brl(quote.total).display(),
            quote,
        }
    }
}

/// Response for a placed order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order: OrderConfirmation,
    pub message: String,
    pub notifications: Vec<Notification>,
}

fn restore_store(state: &AppState, headers: &HeaderMap) -> CartStore<CookieStorage, BufferedNotifier> {
    let cookies = RequestCookies::from_headers(headers);
    let storage = CookieStorage::new(state.cookie_policy(), cookies);
    CartStore::restore(storage, BufferedNotifier::new())
}

/// Price the current cart.
#[instrument(skip(state, headers))]
pub async fn quote(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<QuoteParams>,
) -> impl IntoResponse {
    let store = restore_store(&state, &headers);
    let priced = checkout::quote(store.state(), params.payment_method);
    Json(QuoteView::from(priced))
}

/// Place an order.
///
/// On success the cart is cleared: checkout ends with an empty cart and
/// a confirmation payload.
#[instrument(skip(state, headers, form), fields(payment_method = ?form.payment_method))]
pub async fn place_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<CheckoutForm>,
) -> Result<Response> {
    let mut store = restore_store(&state, &headers);

    let confirmation = checkout::place_order(store.state(), &form)?;
    tracing::info!(
        order_id = %confirmation.order_id,
        total = %confirmation.total,
        "order placed"
    );

    store.clear_cart();

    let (_, storage, notifier) = store.into_parts();
    let body = Json(OrderResponse {
        order: confirmation,
        message: "Order placed successfully! You will receive a confirmation email.".to_owned(),
        notifications: notifier.into_notifications(),
    });

    let mut response = (StatusCode::CREATED, body).into_response();
    for cookie in storage.into_set_cookie_headers() {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    Ok(response)
}
