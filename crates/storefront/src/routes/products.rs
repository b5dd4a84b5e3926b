//! Product catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use tracing::instrument;

use cubed_core::types::ProductId;

use crate::catalog::{CatalogQuery, Product};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Catalog listing response.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total: usize,
}

/// Product listing with search, category filter, and sort.
///
/// GET /api/products?search=&category=&sort=
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<ProductListResponse> {
    let products = state.catalog().list(&query);
    let total = products.len();
    Json(ProductListResponse { products, total })
}

/// Product detail.
///
/// GET /api/products/{id}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    state
        .catalog()
        .get(&ProductId::new(id))
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("product".to_owned()))
}
