//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::config::ConfigError;
use crate::domain::{DomainError, ReviewNotAllowedReason};
use crate::store::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Message returned for every storage or internal failure
const TRY_AGAIN_LATER: &str = "Unable to save or recall the resource at this time";

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Missing identity: {0} header is required")]
    MissingIdentity(&'static str),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Store errors (conflict or 5xx)
    #[error(transparent)]
    Store(#[from] StoreError),

    // Server errors (5xx)
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Error response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Status, machine-readable code, public message and optional details
    fn parts(&self) -> (StatusCode, &'static str, String, Option<serde_json::Value>) {
        match self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "invalid_request",
                self.to_string(),
                Some(serde_json::Value::String(msg.clone())),
            ),

            // 401 Unauthorized
            AppError::MissingIdentity(_) => (
                StatusCode::UNAUTHORIZED,
                "missing_identity",
                self.to_string(),
                None,
            ),

            AppError::Domain(domain_err) => match domain_err {
                DomainError::RestaurantNotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "restaurant_not_found",
                    "The specified restaurant wasn't found".to_string(),
                    Some(serde_json::Value::String(id.clone())),
                ),
                DomainError::ReviewNotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "review_not_found",
                    "The specified review wasn't found".to_string(),
                    Some(serde_json::Value::String(id.clone())),
                ),
                DomainError::ReviewNotAllowed(reason) => {
                    let code = match reason {
                        ReviewNotAllowedReason::AlreadyReviewed => "already_reviewed",
                        ReviewNotAllowedReason::EditWindowExpired => "edit_window_expired",
                    };
                    (
                        StatusCode::BAD_REQUEST,
                        code,
                        "The specified review cannot be created or updated".to_string(),
                        Some(serde_json::Value::String(reason.to_string())),
                    )
                }
                DomainError::Validation(errors) => (
                    StatusCode::BAD_REQUEST,
                    "validation_failed",
                    domain_err.to_string(),
                    serde_json::to_value(errors).ok(),
                ),
            },

            // 409 Conflict
            AppError::Store(StoreError::VersionConflict { .. }) => (
                StatusCode::CONFLICT,
                "version_conflict",
                "The restaurant was modified concurrently, please retry".to_string(),
                None,
            ),

            // 500 Internal Server Error
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    TRY_AGAIN_LATER.to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "config_error",
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
        }
    }
}

// Extractor rejections carry serde diagnostics; only a fixed message is
// returned, the diagnostic goes to the debug log.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("JSON body rejected: {}", rejection.body_text());

        let message = match rejection {
            JsonRejection::JsonDataError(_) => {
                "Request body has a missing or wrongly typed field"
            }
            JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON",
            JsonRejection::MissingJsonContentType(_) => {
                "Expected request with `Content-Type: application/json`"
            }
            _ => "Request body could not be read",
        };

        AppError::InvalidRequest(message.to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Query string rejected: {}", rejection.body_text());
        AppError::InvalidRequest("Query parameters are malformed".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, error, details) = self.parts();

        if status.is_client_error() {
            tracing::debug!(status = %status, error_code, "Request rejected: {}", self);
        }

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
