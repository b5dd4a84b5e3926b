//! Dashboard route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::middleware::RequireAdmin;
use crate::reports::DashboardStats;
use crate::state::AppState;

/// Dashboard stats summary.
///
/// GET /api/dashboard
#[instrument(skip(state, _admin))]
pub async fn show(State(state): State<AppState>, _admin: RequireAdmin) -> Json<DashboardStats> {
    Json(state.reports().dashboard_stats())
}
