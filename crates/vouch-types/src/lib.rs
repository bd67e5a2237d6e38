//! # Shared Domain Types
//!
//! This crate contains the domain entities shared by the store, gateway, and
//! server crates: the testimonial entries in their two lifecycle states, the
//! submitter-facing draft with its normalization rules, and the persisted
//! rate-limit window.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every document shape that reaches the blob
//!   store is defined here, with the exact field names it is persisted under.
//! - **Entries are immutable**: a [`PendingEntry`] is never edited in place;
//!   it is either removed by moderation or evicted by the list bound. An
//!   [`ApprovedEntry`] is only ever created from a pending one.
//! - **Email never crosses the approval boundary**: the conversion in
//!   [`ApprovedEntry::from_pending`] drops it by construction.

pub mod draft;
pub mod entry;

pub use draft::{DraftError, NormalizedDraft, TestimonialDraft};
pub use entry::{ApprovedEntry, PendingEntry, RateLimitState};
