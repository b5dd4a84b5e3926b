//! Home route handler: store profile and featured products.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use cubed_core::types::ServiceCategory;

use crate::catalog::Product;
use crate::state::AppState;

/// One of the store's three services.
#[derive(Debug, Serialize)]
pub struct ServiceView {
    pub category: ServiceCategory,
    pub name: &'static str,
    pub description: &'static str,
}

/// Home payload: who we are and what is on the shelf.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub name: &'static str,
    pub tagline: &'static str,
    pub services: Vec<ServiceView>,
    pub featured_products: Vec<Product>,
}

/// GET /
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    Json(HomeResponse {
        name: "Cubed",
        tagline: "3D printing, from ready prints to custom modeling",
        services: vec![
            ServiceView {
                category: ServiceCategory::ReadyPrint,
                name: "Ready prints",
                description: "Curated catalog of printed pieces, shipped from stock",
            },
            ServiceView {
                category: ServiceCategory::StlPrint,
                name: "STL printing",
                description: "Send your STL file and we print it in your material and color",
            },
            ServiceView {
                category: ServiceCategory::Modeling,
                name: "3D modeling",
                description: "Custom modeling from sketches or references, print included",
            },
        ],
        featured_products: state.catalog().featured().into_iter().cloned().collect(),
    })
}
