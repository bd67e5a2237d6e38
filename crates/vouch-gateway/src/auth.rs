//! Admin authentication: token extraction and constant-time verification.
//!
//! The secret arrives through [`AdminConfig`], injected at startup. An
//! unset secret is a server misconfiguration surfaced as its own error,
//! never conflated with a client's bad token.

use axum::http::{header, HeaderMap};
use subtle::ConstantTimeEq;

use crate::domain::config::AdminConfig;
use crate::domain::error::ApiError;

/// Pull the admin token from the request: `Authorization: Bearer <token>`
/// preferred, `x-admin-token` as the fallback.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth) = headers.get(header::AUTHORIZATION) {
        if let Ok(raw) = auth.to_str() {
            if raw.len() >= 7 && raw[..7].eq_ignore_ascii_case("bearer ") {
                let token = raw[7..].trim();
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    headers
        .get("x-admin-token")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Authorize an admin request against the configured secret.
///
/// ## Errors
///
/// - `AdminTokenUnconfigured`: no secret configured on the server
/// - `Unauthorized`: token absent or not equal to the secret
pub fn require_admin(headers: &HeaderMap, admin: &AdminConfig) -> Result<(), ApiError> {
    let expected = admin
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::AdminTokenUnconfigured)?;

    let token = extract_token(headers).ok_or(ApiError::Unauthorized)?;
    if constant_time_compare(&token, expected) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

/// Constant-time string comparison to prevent timing attacks.
///
/// Both inputs are padded to the longer length (with different pad bytes,
/// so padded tails can never match) and compared with
/// `subtle::ConstantTimeEq`; the length check itself is also constant-time.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let max_len = std::cmp::max(a.len(), b.len());

    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];
    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);

    (lengths_equal & contents_equal).into()
}
