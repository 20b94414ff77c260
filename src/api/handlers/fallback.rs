//! Handler for unmatched routes.

use axum::http::{Method, Uri};
use serde_json::json;

use crate::error::AppError;

/// Rejects any request that matches no route with `400 Bad Request`.
pub async fn fallback_handler(method: Method, uri: Uri) -> AppError {
    AppError::bad_request(
        "Unsupported request",
        json!({ "method": method.as_str(), "path": uri.path() }),
    )
}
