//! # Testimonial Gateway - HTTP API for submission, moderation, and display
//!
//! This crate exposes the public and operator interfaces of the testimonial
//! service.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                       TESTIMONIAL GATEWAY                          │
//! ├────────────────────────────────────────────────────────────────────┤
//! │  public                          admin (bearer / x-admin-token)    │
//! │  GET  /api/testimonials          GET  .../pending                  │
//! │  POST /api/testimonials/submit   POST .../moderate  POST .../delete│
//! │         │                                  │                       │
//! │  ┌──────┴──────────┐              ┌────────┴─────────┐             │
//! │  │ Intake          │              │ Moderation       │             │
//! │  │ parse→validate→ │              │ auth→locate→move │             │
//! │  │ rate-limit→queue│              │ or discard       │             │
//! │  └──────┬──────────┘              └────────┬─────────┘             │
//! └─────────┼──────────────────────────────────┼───────────────────────┘
//!           ▼                                  ▼
//!      pending (≤200)  ──approve──▶  approved (≤100)
//!          blob store: pending / approved / ratelimit/<ip>
//! ```
//!
//! # Security
//!
//! - Honeypot deflection: bot submissions receive an indistinguishable
//!   success response and persist nothing
//! - Per-IP fixed-window rate limiting, persisted next to the data it guards
//! - Admin token compared in constant time (no timing side channel)
//! - Request body size cap and per-request timeout at the router layer

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod auth;
pub mod client_ip;
pub mod domain;
pub mod intake;
pub mod moderation;
pub mod queue;
pub mod ratelimit;
pub mod service;

// Re-exports for public API
pub use domain::config::{ConfigError, GatewayConfig};
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use service::{build_router, AppState, TestimonialGateway};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
