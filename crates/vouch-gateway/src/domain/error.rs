//! Gateway error taxonomy and the JSON response envelope.
//!
//! Every response body is `{"ok": true, ...}` or `{"ok": false, "error"}`.
//! [`ApiError`] is the single client-facing error type: each variant knows
//! its status code, and its `Display` output is the exact wire message.
//! Validation-class messages are actionable; authorization failures stay
//! generic; storage corruption is reported but never auto-repaired.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

use crate::domain::config::ConfigError;
use vouch_store::BlobStoreError;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Client-facing errors for the five endpoint operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing input; the message tells the caller what to fix.
    #[error("{0}")]
    Validation(String),

    /// Submission budget for this IP and window is spent. Surfaced with the
    /// same status class as validation failures.
    #[error("Too many submissions. Please try again later.")]
    RateLimited,

    /// Moderation action was neither `approve` nor `decline`.
    #[error("Invalid action")]
    InvalidAction,

    /// Missing or incorrect admin token. Deliberately detail-free.
    #[error("Unauthorized")]
    Unauthorized,

    /// The id does not exist in the target list.
    #[error("Not found")]
    NotFound,

    /// Route exists but not for this HTTP method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The server has no admin token configured. Distinct from
    /// `Unauthorized`: this is operator misconfiguration, not a bad client.
    #[error("Admin token is not configured")]
    AdminTokenUnconfigured,

    /// A stored document exists but is not the expected array shape.
    /// Fatal and never self-healing: overwriting it could destroy
    /// recoverable data, so an operator must intervene.
    #[error("Storage corrupted ({0})")]
    StorageCorrupted(&'static str),

    /// The blob store itself failed.
    #[error("Storage unavailable")]
    Store(#[source] BlobStoreError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::RateLimited | Self::InvalidAction => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::AdminTokenUnconfigured | Self::StorageCorrupted(_) | Self::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<BlobStoreError> for ApiError {
    fn from(e: BlobStoreError) -> Self {
        Self::Store(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Store(BlobStoreError::Serialization(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = ?self, "request failed");
        }
        json_response(status, &json!({ "ok": false, "error": self.to_string() }))
    }
}

/// Build a JSON response with the fixed envelope headers.
pub fn json_response(status: StatusCode, body: &Value) -> Response {
    let mut response = Response::new(Body::from(serde_json::to_vec(body).unwrap_or_default()));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

/// `200` success envelope.
pub fn ok_response(body: Value) -> Response {
    json_response(StatusCode::OK, &body)
}

/// Gateway-level errors (startup, not per-request)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),
}
