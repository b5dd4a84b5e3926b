//! Order listing route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use cubed_core::types::{OrderId, OrderStatus};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::reports::OrderSummary;
use crate::state::AppState;

/// Order listing filters.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// Recent orders, optionally filtered by status.
///
/// GET /api/orders?status=pending
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<OrdersQuery>,
) -> Json<Vec<OrderSummary>> {
    Json(state.reports().orders(query.status))
}

/// Order detail.
///
/// GET /api/orders/{id}
#[instrument(skip(state, _admin))]
pub async fn show(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<OrderSummary>> {
    state
        .reports()
        .order(&OrderId::new(id))
        .map(Json)
        .ok_or_else(|| AppError::NotFound("order".to_owned()))
}
