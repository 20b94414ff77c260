//! Handler for storage liveness probe.

use axum::{extract::State, http::StatusCode};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Reports whether the link store is reachable.
///
/// # Endpoint
///
/// `GET /ping`
///
/// Returns **200 OK** with an empty body, or **500** when the store does not answer.
pub async fn ping_handler(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.link_service.ping().await.map_err(|e| {
        tracing::error!(error = %e, "Storage ping failed");
        AppError::internal("Storage is unavailable", json!({ "reason": e.to_string() }))
    })?;

    Ok(StatusCode::OK)
}
