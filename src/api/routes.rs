//! API route configuration.

use crate::api::handlers::{
    delete_user_links_handler, shorten_batch_handler, shorten_json_handler, stats_handler,
    user_links_handler,
};
use crate::api::middleware::trusted_subnet;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Routes open to any caller, nested under `/api`.
///
/// # Endpoints
///
/// - `POST   /shorten`        - Shorten a URL (JSON)
/// - `POST   /shorten/batch`  - Shorten a batch of URLs
/// - `GET    /user/urls`      - List the caller's links
/// - `DELETE /user/urls`      - Delete the caller's links
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_json_handler))
        .route("/shorten/batch", post(shorten_batch_handler))
        .route(
            "/user/urls",
            get(user_links_handler).delete(delete_user_links_handler),
        )
}

/// Routes restricted to the trusted subnet, nested under `/api/internal`.
///
/// # Endpoints
///
/// - `GET /stats` - Link and user counters
pub fn internal_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats_handler))
        .route_layer(middleware::from_fn_with_state(state, trusted_subnet::layer))
}
