//! Test harness: a real router over an in-memory store and a manual clock,
//! plus request builders for the five endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;

use vouch_gateway::{build_router, AppState, GatewayConfig};
use vouch_store::{BlobStore, ManualTimeSource, MemoryBlobStore, TimeSource};

/// Secret configured on every harness unless overridden.
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Fixed start instant for the manual clock.
pub fn test_epoch() -> DateTime<Utc> {
    "2026-03-01T00:00:00Z".parse().unwrap()
}

/// Default harness configuration: admin token set, production limits.
pub fn default_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.admin.token = Some(ADMIN_TOKEN.to_string());
    config
}

pub struct Harness {
    pub store: Arc<MemoryBlobStore>,
    pub clock: Arc<ManualTimeSource>,
    pub router: Router,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(default_config())
    }

    pub fn with_config(config: GatewayConfig) -> Self {
        let store = Arc::new(MemoryBlobStore::new());
        let clock = Arc::new(ManualTimeSource::new(test_epoch()));
        let store_dyn: Arc<dyn BlobStore> = Arc::clone(&store) as Arc<dyn BlobStore>;
        let clock_dyn: Arc<dyn TimeSource> = Arc::clone(&clock) as Arc<dyn TimeSource>;
        let router = build_router(AppState::new(Arc::new(config), store_dyn, clock_dyn));
        Self {
            store,
            clock,
            router,
        }
    }

    /// Send a request and decode the JSON envelope.
    pub async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Send a request and return the raw response (for header assertions).
    pub async fn call_raw(&self, request: Request<Body>) -> axum::response::Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON submission with no submitter IP (never rate limited).
pub fn submit_json(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/testimonials/submit")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// JSON submission attributed to a submitter IP.
pub fn submit_json_from(ip: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/testimonials/submit")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-client-ip", ip)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// GET the public approved list.
pub fn public_list() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/api/testimonials")
        .body(Body::empty())
        .unwrap()
}

/// Admin GET with a bearer token.
pub fn admin_get(path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

/// Admin POST with a bearer token and JSON payload.
pub fn admin_post(path: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Submit a minimal valid draft and return the assigned id.
pub async fn submit_one(harness: &Harness, name: &str) -> String {
    let (status, body) = harness
        .call(submit_json(&serde_json::json!({
            "name": name,
            "message": format!("Message from {name}"),
        })))
        .await;
    assert_eq!(status, StatusCode::OK, "submission failed: {body}");
    body["id"].as_str().expect("submission id").to_string()
}

/// Approve an id through the moderation endpoint.
pub async fn approve(harness: &Harness, id: &str) {
    let (status, body) = harness
        .call(admin_post(
            "/api/admin/testimonials/moderate",
            ADMIN_TOKEN,
            &serde_json::json!({"id": id, "action": "approve"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "approval failed: {body}");
}
