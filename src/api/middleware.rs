//! API Middleware
//!
//! Identity extraction and request logging.

use axum::{
    body::Body,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::domain::{Author, OperationContext};
use crate::error::AppError;

/// Subject of the token verified by the gateway
pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USERNAME_HEADER: &str = "X-Username";
pub const GIVEN_NAME_HEADER: &str = "X-Given-Name";
pub const FAMILY_NAME_HEADER: &str = "X-Family-Name";

const CORRELATION_ID_HEADER: &str = "X-Correlation-Id";
const REQUEST_ID_HEADER: &str = "X-Request-Id";

// =========================================================================
// Identity Middleware
// =========================================================================

/// Read the gateway's identity headers into an `Author` extension and
/// attach an `OperationContext` to every request.
///
/// Requests without `X-User-Id` pass through anonymously; routes that need
/// an author reject them themselves.
pub async fn identity_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let headers = request.headers();

    let author = match read_header(headers, USER_ID_HEADER)? {
        Some(user_id) if user_id.is_empty() => {
            return Err(AppError::InvalidRequest(format!(
                "{} header must not be blank",
                USER_ID_HEADER
            ))
            .into_response());
        }
        Some(user_id) => Some(
            Author::new(user_id)
                .with_username(read_header(headers, USERNAME_HEADER)?.unwrap_or_default())
                .with_name(
                    read_header(headers, GIVEN_NAME_HEADER)?.unwrap_or_default(),
                    read_header(headers, FAMILY_NAME_HEADER)?.unwrap_or_default(),
                ),
        ),
        None => None,
    };

    // Prefer the caller's correlation id, then the generated request id
    let correlation_id = [CORRELATION_ID_HEADER, REQUEST_ID_HEADER]
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|v| v.to_str().ok())
        .find_map(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let mut context = OperationContext::new().with_correlation_id(correlation_id);

    if let Some(author) = author {
        context = context.with_request_user(author.id.clone());
        request.extensions_mut().insert(author);
    }

    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

/// Trimmed header value; non-UTF-8 values are rejected
fn read_header(headers: &HeaderMap, name: &'static str) -> Result<Option<String>, Response> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|s| Some(s.trim().to_string()))
            .map_err(|_| {
                AppError::InvalidRequest(format!("Invalid {} header format", name)).into_response()
            }),
    }
}

// =========================================================================
// mask_headers_for_logging
// =========================================================================

/// Headers that should be masked in logs
const SENSITIVE_HEADERS: &[&str] = &[
    "x-api-key",
    "authorization",
    "cookie",
    "set-cookie",
];

/// Mask sensitive headers for logging
pub fn mask_headers_for_logging(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let masked_value = if SENSITIVE_HEADERS.contains(&name.as_str()) {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("[invalid utf8]").to_string()
            };
            (name.to_string(), masked_value)
        })
        .collect()
}

// =========================================================================
// Request Logging Middleware
// =========================================================================

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let headers = mask_headers_for_logging(request.headers());

    let correlation_id = request
        .extensions()
        .get::<OperationContext>()
        .and_then(|ctx| ctx.correlation_id);

    let start = std::time::Instant::now();

    tracing::info!(
        method = %method,
        uri = %uri,
        correlation_id = ?correlation_id,
        headers = ?headers,
        "Incoming request"
    );

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = %start.elapsed().as_millis(),
        correlation_id = ?correlation_id,
        "Request completed"
    );

    response
}
