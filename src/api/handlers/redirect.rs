//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Errors
///
/// - **404 Not Found**: the code was never issued
/// - **410 Gone**: the link was deleted by its owner
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let original_url = state.link_service.find_original(&code).await?;

    Ok(Redirect::temporary(&original_url))
}
