//! Handlers for the caller's own links.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::user_links::UserLinkResponse;
use crate::api::middleware::identity::Owner;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the live links owned by the caller.
///
/// # Endpoint
///
/// `GET /api/user/urls`
///
/// # Response Codes
///
/// - **200 OK**: `[{"short_url": "...", "original_url": "..."}]`
/// - **204 No Content**: the caller owns no live links
/// - **401 Unauthorized**: no identity in the request
pub async fn user_links_handler(
    State(state): State<AppState>,
    Owner(owner_id): Owner,
) -> Result<Response, AppError> {
    let links = state.link_service.user_links(&owner_id).await?;

    if links.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let body: Vec<UserLinkResponse> = links.into_iter().map(Into::into).collect();
    Ok(Json(body).into_response())
}

/// Soft-deletes the caller's links by short code.
///
/// # Endpoint
///
/// `DELETE /api/user/urls`
///
/// # Request Body
///
/// ```json
/// ["aee7dad94e", "100680ad54"]
/// ```
///
/// Codes that do not belong to the caller are silently skipped.
///
/// # Response Codes
///
/// - **202 Accepted**: the batch was applied
/// - **400 Bad Request**: the body is not a JSON array of strings
/// - **401 Unauthorized**: no identity in the request
pub async fn delete_user_links_handler(
    State(state): State<AppState>,
    Owner(owner_id): Owner,
    payload: Result<Json<Vec<String>>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(codes) = payload.map_err(|e| {
        AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
    })?;

    state.link_service.delete_batch(codes, &owner_id).await?;

    Ok(StatusCode::ACCEPTED)
}
