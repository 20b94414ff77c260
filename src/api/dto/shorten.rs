//! DTOs for link shortening endpoints.

use std::borrow::Cow;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::application::services::{BatchEntry, BatchShortened};

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, message = "URL must not be empty"))]
    #[validate(custom(function = "validate_redirect_target"))]
    pub url: String,
}

/// Short URL created for (or already assigned to) the requested URL.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub result: String,
}

/// One URL of a batch request.
#[derive(Debug, Deserialize, Validate)]
pub struct BatchItemRequest {
    #[validate(length(min = 1, message = "URL must not be empty"))]
    #[validate(custom(function = "validate_redirect_target"))]
    pub original_url: String,
    #[serde(default)]
    pub correlation_id: String,
}

impl From<BatchItemRequest> for BatchEntry {
    fn from(item: BatchItemRequest) -> Self {
        Self {
            original_url: item.original_url,
            correlation_id: item.correlation_id,
        }
    }
}

/// One shortened URL of a batch response, matched to its request by `correlation_id`.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchItemResponse {
    pub short_url: String,
    pub correlation_id: String,
}

impl From<BatchShortened> for BatchItemResponse {
    fn from(item: BatchShortened) -> Self {
        Self {
            short_url: item.short_url,
            correlation_id: item.correlation_id,
        }
    }
}

/// Rejects URLs that cannot be sent back in a `Location` header.
///
/// The URL is stored and hashed exactly as received, so control characters
/// such as a trailing newline are refused rather than stripped.
pub fn validate_redirect_target(url: &str) -> Result<(), ValidationError> {
    if HeaderValue::from_str(url).is_ok() {
        return Ok(());
    }

    let mut err = ValidationError::new("redirect_target");
    err.message = Some(Cow::Borrowed("URL must not contain control characters"));
    Err(err)
}
