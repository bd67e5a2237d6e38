//! Submitter IP resolution for rate-limit keying.
//!
//! Precedence: the platform-supplied `x-client-ip` header, then the first
//! entry of `x-forwarded-for`. A request that yields no parseable address
//! resolves to `None`, which the rate limiter treats as an unidentifiable
//! submitter and waves through. Values are parsed as real addresses: the
//! resulting string keys a store document, so raw header text is never
//! used.

use axum::http::HeaderMap;
use std::net::IpAddr;

pub fn client_ip(headers: &HeaderMap) -> Option<IpAddr> {
    if let Some(value) = headers.get("x-client-ip").and_then(|v| v.to_str().ok()) {
        if let Ok(ip) = value.trim().parse::<IpAddr>() {
            return Some(ip);
        }
    }

    // x-forwarded-for may contain a list; the first value is the original
    // client.
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            if let Ok(ip) = first.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }

    None
}
