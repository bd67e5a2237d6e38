//! Submission intake: body parsing, bot deflection, validation, rate
//! limiting, and the append to the moderation queue.

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;
use axum::{Form, Json};
use uuid::Uuid;

use crate::client_ip::client_ip;
use crate::domain::error::{ApiError, ApiResult};
use crate::queue;
use crate::service::AppState;
use vouch_types::{PendingEntry, TestimonialDraft};

/// Result of a submission attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Queued for review under the given id.
    Accepted { id: Uuid },
    /// Honeypot tripped: nothing persisted. The caller must answer with a
    /// success indistinguishable from `Accepted` so bots learn nothing.
    Deflected,
}

/// Handle one submission request end to end.
pub async fn submit(state: &AppState, req: Request) -> ApiResult<SubmitOutcome> {
    let ip = client_ip(req.headers());
    let draft = parse_draft(req).await?;

    if draft.is_bot() {
        tracing::info!("honeypot triggered, dropping submission");
        return Ok(SubmitOutcome::Deflected);
    }

    let normalized = draft
        .normalize()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    state.rate_limiter.check_and_increment(ip).await?;

    let entry = PendingEntry::new(normalized, Uuid::new_v4(), state.clock.now_utc());
    let id = entry.id;

    let mut pending = queue::load_pending(state.store.as_ref()).await?;
    pending.insert(0, entry);
    queue::save_pending(state.store.as_ref(), pending).await?;

    tracing::info!(id = %id, "testimonial queued for review");
    Ok(SubmitOutcome::Accepted { id })
}

/// Parse the draft out of a JSON, form-urlencoded, or multipart body.
async fn parse_draft(req: Request) -> ApiResult<TestimonialDraft> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.contains("application/json") {
        let Json(draft) = Json::<TestimonialDraft>::from_request(req, &())
            .await
            .map_err(|_| invalid_body())?;
        return Ok(draft);
    }

    if content_type.contains("application/x-www-form-urlencoded") {
        let Form(draft) = Form::<TestimonialDraft>::from_request(req, &())
            .await
            .map_err(|_| invalid_body())?;
        return Ok(draft);
    }

    // Fallback covers multipart/form-data.
    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|_| invalid_body())?;
    let mut draft = TestimonialDraft::default();
    while let Some(field) = multipart.next_field().await.map_err(|_| invalid_body())? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        // Non-text parts (file uploads) are skipped, not errors.
        let Ok(text) = field.text().await else {
            continue;
        };
        match name.as_str() {
            "name" => draft.name = text,
            "email" => draft.email = text,
            "role" => draft.role = text,
            "company" => draft.company = text,
            "project" => draft.project = text,
            "message" => draft.message = text,
            "bot-field" => draft.bot_field = text,
            _ => {}
        }
    }
    Ok(draft)
}

fn invalid_body() -> ApiError {
    ApiError::validation("Invalid request body")
}
