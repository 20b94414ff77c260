//! Application error type shared by every layer.
//!
//! [`AppError`] is returned by repositories, services and handlers alike and
//! renders itself as a JSON error body via [`IntoResponse`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::code_generator::GenerationError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    Forbidden { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    /// The record exists but has been soft-deleted.
    #[error("{message}")]
    Gone { message: String, details: Value },
    /// A uniqueness constraint rejected the write.
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn gone(message: impl Into<String>, details: Value) -> Self {
        Self::Gone {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns true for storage-level uniqueness conflicts.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    fn parts(&self) -> (StatusCode, &'static str, &str, &Value) {
        match self {
            Self::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message.as_str(),
                details,
            ),
            Self::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message.as_str(), details)
            }
            Self::Forbidden { message, details } => {
                (StatusCode::FORBIDDEN, "forbidden", message.as_str(), details)
            }
            Self::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message.as_str(), details)
            }
            Self::Gone { message, details } => (StatusCode::GONE, "gone", message.as_str(), details),
            Self::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message.as_str(), details)
            }
            Self::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message.as_str(),
                details,
            ),
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        self.parts().0
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message: message.to_string(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Validation failed", json!({ "fields": e.to_string() }))
    }
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        tracing::error!(error = %e, "Identifier generation failed");
        AppError::internal("Failed to generate identifier", json!({}))
    }
}
