//! Handlers for link shortening endpoints.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{
    BatchItemRequest, BatchItemResponse, ShortenRequest, ShortenResponse,
};
use crate::api::middleware::identity::OwnerIdentity;
use crate::application::services::ShortenOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL sent as the plain-text request body.
///
/// # Endpoint
///
/// `POST /`
///
/// # Response Codes
///
/// - **201 Created**: body is the new short URL
/// - **409 Conflict**: URL was shortened before; body is the existing short URL
/// - **400 Bad Request**: empty body, or a URL with control characters
///
/// The body is taken verbatim, as on `POST /api/shorten`.
pub async fn shorten_text_handler(
    State(state): State<AppState>,
    identity: OwnerIdentity,
    body: String,
) -> Result<Response, AppError> {
    let payload = ShortenRequest { url: body };
    payload.validate()?;

    let outcome = state.link_service.shorten(&payload.url, &identity.id).await?;
    let status = outcome_status(&outcome);

    Ok((status, identity, outcome.short_url).into_response())
}

/// Shortens a URL sent as JSON.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "result": "http://localhost:8080/100680ad54" }
/// ```
///
/// Status is **201 Created** for a new link and **409 Conflict** (same body)
/// when the URL was shortened before.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed, `url` is empty, or
/// `url` contains control characters.
pub async fn shorten_json_handler(
    State(state): State<AppState>,
    identity: OwnerIdentity,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload.map_err(json_rejection)?;
    payload.validate()?;

    let outcome = state.link_service.shorten(&payload.url, &identity.id).await?;
    let status = outcome_status(&outcome);

    Ok((
        status,
        identity,
        Json(ShortenResponse {
            result: outcome.short_url,
        }),
    )
        .into_response())
}

/// Shortens a batch of URLs.
///
/// # Endpoint
///
/// `POST /api/shorten/batch`
///
/// # Request Body
///
/// ```json
/// [
///   { "correlation_id": "1", "original_url": "https://example.com" }
/// ]
/// ```
///
/// # Response
///
/// ```json
/// [
///   { "correlation_id": "1", "short_url": "http://localhost:8080/100680ad54" }
/// ]
/// ```
///
/// Items without a `correlation_id` are skipped. The batch is stored
/// atomically: if any URL was shortened before, nothing is stored and the
/// request fails with 500.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed, the array is empty, or
/// a retained item has an empty or unusable `original_url`.
pub async fn shorten_batch_handler(
    State(state): State<AppState>,
    identity: OwnerIdentity,
    payload: Result<Json<Vec<BatchItemRequest>>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(items) = payload.map_err(json_rejection)?;
    if items.is_empty() {
        return Err(AppError::bad_request(
            "Batch must not be empty",
            json!({ "field": "body" }),
        ));
    }
    for item in items.iter().filter(|i| !i.correlation_id.is_empty()) {
        item.validate()?;
    }

    let entries = items.into_iter().map(Into::into).collect();
    let shortened = state
        .link_service
        .shorten_batch(entries, &identity.id)
        .await?;

    let body: Vec<BatchItemResponse> = shortened.into_iter().map(Into::into).collect();
    Ok((StatusCode::CREATED, identity, Json(body)).into_response())
}

fn outcome_status(outcome: &ShortenOutcome) -> StatusCode {
    if outcome.already_exists {
        StatusCode::CONFLICT
    } else {
        StatusCode::CREATED
    }
}

fn json_rejection(e: JsonRejection) -> AppError {
    AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
}
