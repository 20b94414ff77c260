//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /`                 - Shorten a plain-text URL
//! - `GET  /{code}`           - Short link redirect
//! - `GET  /ping`             - Storage liveness probe
//! - `/api/*`                 - JSON API
//! - `/api/internal/*`        - Trusted subnet only
//!
//! Unmatched paths answer `400 Bad Request`.

use crate::api;
use crate::api::handlers::{fallback_handler, ping_handler, redirect_handler, shorten_text_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let api_router = api::routes::public_routes()
        .nest("/internal", api::routes::internal_routes(state.clone()));

    Router::new()
        .route("/", post(shorten_text_handler))
        .route("/ping", get(ping_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api_router)
        .fallback(fallback_handler)
        .with_state(state)
        .layer(tracing::layer())
}
