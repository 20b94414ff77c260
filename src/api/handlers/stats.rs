//! Handler for internal service statistics.

use axum::{Json, extract::State};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the number of stored links and distinct users.
///
/// # Endpoint
///
/// `GET /api/internal/stats`
///
/// Reachable only through the trusted subnet gate
/// ([`crate::api::middleware::trusted_subnet`]).
///
/// # Response
///
/// ```json
/// { "urls": 42, "users": 7 }
/// ```
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.link_service.stats().await?;

    Ok(Json(stats.into()))
}
