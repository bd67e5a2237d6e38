//! Persisted entry types for the two lifecycle states, plus the rate-limit
//! window document.
//!
//! Both lists are stored newest-first: insertion is always at the head and
//! eviction trims the tail. Field names are fixed by the persisted format
//! (camelCase); changing them would orphan existing documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::draft::NormalizedDraft;

/// A submitted testimonial awaiting operator review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingEntry {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl PendingEntry {
    /// Build a new entry from a validated draft with a server-assigned id
    /// and timestamp.
    pub fn new(draft: NormalizedDraft, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            role: draft.role,
            company: draft.company,
            project: draft.project,
            message: draft.message,
            created_at,
        }
    }
}

/// A testimonial cleared for public display.
///
/// Carries the original submission timestamp alongside the approval
/// timestamp. The submitter email is intentionally absent: it is dropped
/// at approval time and never republished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedEntry {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub approved_at: DateTime<Utc>,
}

impl ApprovedEntry {
    /// Promote a pending entry, stamping the approval time and dropping
    /// the email.
    pub fn from_pending(entry: PendingEntry, approved_at: DateTime<Utc>) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            role: entry.role,
            company: entry.company,
            project: entry.project,
            message: entry.message,
            created_at: entry.created_at,
            approved_at,
        }
    }
}

/// Fixed-window submission counter for one submitter IP, stored at
/// `ratelimit/<ip>`. `reset_at` is epoch milliseconds; the window rolls
/// over lazily on the first check after expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitState {
    pub count: u32,
    pub reset_at: i64,
}

impl RateLimitState {
    /// A fresh window with no submissions recorded.
    pub fn fresh(reset_at: i64) -> Self {
        Self { count: 0, reset_at }
    }
}
