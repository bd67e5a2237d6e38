//! # Vouch Test Suite
//!
//! Unified test crate exercising the full HTTP surface over the real
//! router, an in-memory blob store, and a manually advanced clock.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── support.rs        # Harness: router + store + clock, request builders
//! └── integration/      # End-to-end flows per concern
//!     ├── intake.rs     # Submission parsing, validation, honeypot, bounds
//!     ├── ratelimit.rs  # Window boundary and expiry
//!     ├── moderation.rs # Approve/decline move semantics, approved bound
//!     ├── admin.rs      # Auth, pending view, delete, corruption fatality
//!     └── public_read.rs# Public list, degradation, headers
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p vouch-tests
//! cargo test -p vouch-tests integration::moderation::
//! ```

#![allow(dead_code)]

pub mod support;

#[cfg(test)]
mod integration;
