//! Trusted subnet gate for internal endpoints.

use std::net::IpAddr;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Header carrying the real client address, set by the fronting proxy.
pub const REAL_IP_HEADER: &str = "x-real-ip";

/// Lets the request through only if `X-Real-IP` lies inside the trusted subnet.
///
/// # Errors
///
/// Returns `403 Forbidden` if:
/// - no trusted subnet is configured
/// - the `X-Real-IP` header is missing or not an IP address
/// - the address is outside the subnet
///
/// # Example
///
/// ```rust,ignore
/// let internal = Router::new()
///     .route("/stats", get(stats_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), trusted_subnet::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(subnet) = st.trusted_subnet else {
        return Err(AppError::forbidden(
            "Forbidden",
            json!({ "reason": "Trusted subnet is not configured" }),
        ));
    };

    let client_ip = req
        .headers()
        .get(REAL_IP_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<IpAddr>().ok())
        .ok_or_else(|| {
            AppError::forbidden(
                "Forbidden",
                json!({ "reason": "X-Real-IP header is missing or invalid" }),
            )
        })?;

    if !subnet.contains(client_ip) {
        tracing::debug!(%client_ip, %subnet, "Client outside trusted subnet");
        return Err(AppError::forbidden(
            "Forbidden",
            json!({ "reason": "Client is outside the trusted subnet" }),
        ));
    }

    Ok(next.run(req).await)
}
