//! Dashboard statistics endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::stats::{today_in, DashboardStats, StatsService};

/// GET /api/stats - counts, with "today" taken at call time
async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<DashboardStats>, ApiError> {
    let today = today_in(state.timezone);

    let mut conn = state.acquire().await?;
    let stats = StatsService::new(&mut conn).compute(today).await?;

    Ok(Json(stats))
}

/// Stats routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/stats", get(get_stats))
}
