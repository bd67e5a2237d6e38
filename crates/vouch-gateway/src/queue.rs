//! Typed access to the two list documents.
//!
//! Both lists are stored newest-first. Bounds are enforced here at write
//! time: insertion happens at the head and `truncate` evicts the oldest
//! tail entries, so storage never holds more than the cap.
//!
//! A document that is present but not an array (or holds entries that no
//! longer decode) is corruption: mutating and operator paths fail with
//! `StorageCorrupted` and never overwrite the document, because the data
//! may still be recoverable by hand. The public display path is the one
//! deliberate exception, since a broken store must not blank out the site,
//! so it degrades to an empty list.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::error::{ApiError, ApiResult};
use vouch_store::{BlobStore, BlobStoreError, Consistency};
use vouch_types::{ApprovedEntry, PendingEntry};

/// Key of the moderation queue document.
pub const PENDING_KEY: &str = "pending";
/// Key of the published list document.
pub const APPROVED_KEY: &str = "approved";

/// Hard cap on queued submissions.
pub const MAX_PENDING: usize = 200;
/// Hard cap on published testimonials.
pub const MAX_APPROVED: usize = 100;

async fn load_list<T: DeserializeOwned>(
    store: &dyn BlobStore,
    key: &'static str,
    consistency: Consistency,
) -> ApiResult<Vec<T>> {
    match store.get(key, consistency).await? {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value @ Value::Array(_)) => serde_json::from_value(value).map_err(|e| {
            tracing::error!(key, error = %e, "stored list holds undecodable entries");
            ApiError::StorageCorrupted(key)
        }),
        Some(other) => {
            tracing::error!(key, found = ?json_kind(&other), "stored document is not an array");
            Err(ApiError::StorageCorrupted(key))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Load the moderation queue for a read-modify-write cycle.
pub async fn load_pending(store: &dyn BlobStore) -> ApiResult<Vec<PendingEntry>> {
    load_list(store, PENDING_KEY, Consistency::Strong).await
}

/// Persist the moderation queue, evicting the oldest entries past the cap.
pub async fn save_pending(store: &dyn BlobStore, mut entries: Vec<PendingEntry>) -> ApiResult<()> {
    entries.truncate(MAX_PENDING);
    store
        .set(PENDING_KEY, &serde_json::to_value(&entries)?)
        .await?;
    Ok(())
}

/// Load the published list for a read-modify-write cycle.
pub async fn load_approved(store: &dyn BlobStore) -> ApiResult<Vec<ApprovedEntry>> {
    load_list(store, APPROVED_KEY, Consistency::Strong).await
}

/// Persist the published list, evicting the oldest entries past the cap.
pub async fn save_approved(
    store: &dyn BlobStore,
    mut entries: Vec<ApprovedEntry>,
) -> ApiResult<()> {
    entries.truncate(MAX_APPROVED);
    store
        .set(APPROVED_KEY, &serde_json::to_value(&entries)?)
        .await?;
    Ok(())
}

/// Load the published list for public display: eventual consistency, and
/// malformed storage degrades to an empty list instead of erroring.
pub async fn load_approved_for_display(store: &dyn BlobStore) -> ApiResult<Vec<ApprovedEntry>> {
    match load_list(store, APPROVED_KEY, Consistency::Eventual).await {
        Ok(entries) => Ok(entries),
        Err(ApiError::StorageCorrupted(_)) | Err(ApiError::Store(BlobStoreError::Serialization(_))) => {
            tracing::warn!("approved list malformed; serving empty list to public readers");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}
