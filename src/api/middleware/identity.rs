//! Caller identity extractors.
//!
//! A caller is identified by an opaque owner id carried in the
//! `Authorization` header or, failing that, in the `user` cookie. The header
//! may hold the bare id or `Bearer <id>`.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, header, request::Parts},
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the owner id.
pub const USER_COOKIE: &str = "user";

/// Reads the owner id from the request headers, if any.
pub fn owner_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.strip_prefix("Bearer ").unwrap_or(v).trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    from_header.or_else(|| {
        CookieJar::from_headers(headers)
            .get(USER_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Identity of a caller who must already have one.
///
/// Rejects with `401 Unauthorized` when the request carries no owner id.
#[derive(Debug, Clone)]
pub struct Owner(pub String);

impl<S> FromRequestParts<S> for Owner
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        owner_from_headers(&parts.headers).map(Owner).ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "No user identity in Authorization header or cookie" }),
            )
        })
    }
}

/// Identity of a caller on a creation route.
///
/// Anonymous callers get a freshly minted id. Returned as a response part, a
/// minted id is handed back in the `user` cookie and the `Authorization`
/// header; a presented id adds nothing to the response.
#[derive(Debug, Clone)]
pub struct OwnerIdentity {
    pub id: String,
    pub issued: bool,
}

impl FromRequestParts<AppState> for OwnerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(id) = owner_from_headers(&parts.headers) {
            return Ok(Self { id, issued: false });
        }

        let id = state.link_service.issue_owner_id()?;
        tracing::debug!(owner_id = %id, "Issued new user identity");
        Ok(Self { id, issued: true })
    }
}

impl IntoResponseParts for OwnerIdentity {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if !self.issued {
            return Ok(res);
        }

        let mut res = res;
        if let Ok(value) = HeaderValue::from_str(&self.id) {
            res.headers_mut().insert(header::AUTHORIZATION, value);
        }

        let cookie = Cookie::build((USER_COOKIE, self.id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();

        CookieJar::new().add(cookie).into_response_parts(res)
    }
}
