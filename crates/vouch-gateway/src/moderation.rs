//! Moderation: moving entries out of the queue and managing the published
//! list.
//!
//! Approve and decline share one removal path: the entry leaves `pending`
//! and that shortened list is persisted before, and independently of, any
//! write to `approved`. An entry can therefore never appear in both
//! lists, though an approval can be lost if the second write fails after
//! the first lands (accepted partial-failure mode; there is no rollback).

use serde::Deserialize;
use uuid::Uuid;

use crate::domain::error::{ApiError, ApiResult};
use crate::queue;
use crate::service::AppState;
use vouch_types::ApprovedEntry;

/// Payload of a moderation request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ModerateRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub action: String,
}

/// Payload of a published-entry deletion request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub id: String,
}

/// Approve or decline a queued entry.
pub async fn moderate(state: &AppState, request: ModerateRequest) -> ApiResult<()> {
    if request.id.is_empty() {
        return Err(ApiError::validation("Missing id"));
    }
    let approve = match request.action.as_str() {
        "approve" => true,
        "decline" => false,
        _ => return Err(ApiError::InvalidAction),
    };

    let store = state.store.as_ref();
    let mut pending = queue::load_pending(store).await?;
    let idx = find_by_id(&request.id, pending.iter().map(|e| e.id)).ok_or(ApiError::NotFound)?;
    let entry = pending.remove(idx);
    queue::save_pending(store, pending).await?;

    if approve {
        let mut approved = queue::load_approved(store).await?;
        approved.insert(
            0,
            ApprovedEntry::from_pending(entry, state.clock.now_utc()),
        );
        queue::save_approved(store, approved).await?;
        tracing::info!(id = %request.id, "testimonial approved");
    } else {
        tracing::info!(id = %request.id, "testimonial declined");
    }
    Ok(())
}

/// Remove a published entry by id.
pub async fn delete_approved(state: &AppState, request: DeleteRequest) -> ApiResult<()> {
    if request.id.is_empty() {
        return Err(ApiError::validation("Missing id"));
    }

    let store = state.store.as_ref();
    let mut approved = queue::load_approved(store).await?;
    let idx = find_by_id(&request.id, approved.iter().map(|e| e.id)).ok_or(ApiError::NotFound)?;
    approved.remove(idx);
    queue::save_approved(store, approved).await?;

    tracing::info!(id = %request.id, "published testimonial deleted");
    Ok(())
}

/// Position of the entry whose id matches the caller-supplied string.
/// An unparseable id matches nothing.
fn find_by_id(raw: &str, ids: impl Iterator<Item = Uuid>) -> Option<usize> {
    let id = Uuid::parse_str(raw).ok()?;
    ids.enumerate().find(|(_, have)| *have == id).map(|(i, _)| i)
}
