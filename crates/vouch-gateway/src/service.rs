//! Gateway service - router construction, endpoint handlers, lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::map_response_body::MapResponseBodyLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::auth;
use crate::domain::config::{CorsConfig, GatewayConfig};
use crate::domain::error::{ok_response, ApiError, ApiResult, GatewayError};
use crate::intake::{self, SubmitOutcome};
use crate::moderation::{self, DeleteRequest, ModerateRequest};
use crate::queue;
use crate::ratelimit::SubmissionRateLimiter;
use vouch_store::{BlobStore, SystemTimeSource, TimeSource};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub store: Arc<dyn BlobStore>,
    pub clock: Arc<dyn TimeSource>,
    pub rate_limiter: Arc<SubmissionRateLimiter>,
}

impl AppState {
    pub fn new(
        config: Arc<GatewayConfig>,
        store: Arc<dyn BlobStore>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        let rate_limiter = Arc::new(SubmissionRateLimiter::new(
            Arc::clone(&store),
            Arc::clone(&clock),
            config.rate_limit.clone(),
        ));
        Self {
            config,
            store,
            clock,
            rate_limiter,
        }
    }
}

/// Testimonial gateway service
pub struct TestimonialGateway {
    config: Arc<GatewayConfig>,
    store: Arc<dyn BlobStore>,
    clock: Arc<dyn TimeSource>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    serve_handle: Option<JoinHandle<()>>,
}

impl TestimonialGateway {
    /// Create a gateway over the given store with the system clock.
    pub fn new(config: GatewayConfig, store: Arc<dyn BlobStore>) -> Result<Self, GatewayError> {
        Self::with_time_source(config, store, Arc::new(SystemTimeSource))
    }

    /// Create a gateway with an explicit time source (tests).
    pub fn with_time_source(
        config: GatewayConfig,
        store: Arc<dyn BlobStore>,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, GatewayError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            store,
            clock,
            shutdown_tx: None,
            serve_handle: None,
        })
    }

    /// Build the router for this gateway's configuration and store.
    pub fn router(&self) -> Router {
        build_router(AppState::new(
            Arc::clone(&self.config),
            Arc::clone(&self.store),
            Arc::clone(&self.clock),
        ))
    }

    /// Bind and start serving. Returns the bound address.
    pub async fn start(&mut self) -> Result<SocketAddr, GatewayError> {
        let addr = self.config.http_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let router = self.router();
        info!(addr = %local_addr, "starting testimonial gateway");

        self.serve_handle = Some(tokio::spawn(async move {
            let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = serve.await {
                error!(error = %e, "gateway server error");
            }
        }));

        Ok(local_addr)
    }

    /// Trigger graceful shutdown and wait for the server task to finish.
    pub async fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.serve_handle.take() {
            let _ = handle.await;
        }
        info!("testimonial gateway stopped");
    }
}

/// Build the HTTP router.
///
/// Every route registers a method fallback so a wrong-method request gets
/// the JSON envelope rather than axum's empty default 405.
pub fn build_router(state: AppState) -> Router {
    let limits = &state.config.limits;
    let middleware = ServiceBuilder::new()
        .layer(create_cors_layer(&state.config.cors))
        // Normalize the response body type so `CorsLayer` (which requires
        // `ResBody: Default`) can wrap the inner stack whose body originates
        // from `RequestBodyLimitLayer` (a non-`Default` body type).
        .layer(MapResponseBodyLayer::new(Body::new))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            limits.request_timeout_secs,
        )))
        // Same normalization just inside the timeout layer, which also
        // requires `ResBody: Default` (it emits an empty body on elapse).
        .layer(MapResponseBodyLayer::new(Body::new))
        .layer(RequestBodyLimitLayer::new(limits.max_request_size));

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/testimonials",
            get(list_approved).fallback(method_not_allowed),
        )
        .route(
            "/api/testimonials/submit",
            post(submit).fallback(method_not_allowed),
        )
        .route(
            "/api/admin/testimonials/pending",
            get(list_pending).fallback(method_not_allowed),
        )
        .route(
            "/api/admin/testimonials/moderate",
            post(moderate).fallback(method_not_allowed),
        )
        .route(
            "/api/admin/testimonials/delete",
            post(delete_approved).fallback(method_not_allowed),
        )
        .layer(middleware)
        .with_state(state)
}

/// Create CORS layer from gateway config
fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::very_permissive();
    }

    let mut cors = CorsLayer::new();

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors.allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-admin-token"),
        ])
        .max_age(Duration::from_secs(config.max_age_secs))
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "vouch-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Wrong-method fallback with the JSON envelope.
async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// GET /api/testimonials - public list of published testimonials.
async fn list_approved(State(state): State<AppState>) -> ApiResult<Response> {
    let entries = queue::load_approved_for_display(state.store.as_ref()).await?;
    let mut response = ok_response(json!({ "ok": true, "testimonials": entries }));
    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    Ok(response)
}

/// POST /api/testimonials/submit - public submission intake.
async fn submit(State(state): State<AppState>, req: Request) -> ApiResult<Response> {
    match intake::submit(&state, req).await? {
        SubmitOutcome::Accepted { id } => Ok(ok_response(json!({ "ok": true, "id": id }))),
        // Same shape as success: bots get no signal they were detected.
        SubmitOutcome::Deflected => Ok(ok_response(json!({ "ok": true }))),
    }
}

/// GET /api/admin/testimonials/pending - operator view of the queue.
async fn list_pending(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    auth::require_admin(&headers, &state.config.admin)?;
    let entries = queue::load_pending(state.store.as_ref()).await?;
    Ok(ok_response(json!({ "ok": true, "pending": entries })))
}

/// POST /api/admin/testimonials/moderate - approve or decline an entry.
async fn moderate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    auth::require_admin(&headers, &state.config.admin)?;
    // Tolerant parse: an unreadable payload reads as missing fields.
    let request = serde_json::from_slice::<ModerateRequest>(&body).unwrap_or_default();
    moderation::moderate(&state, request).await?;
    Ok(ok_response(json!({ "ok": true })))
}

/// POST /api/admin/testimonials/delete - remove a published entry.
async fn delete_approved(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    auth::require_admin(&headers, &state.config.admin)?;
    let request = serde_json::from_slice::<DeleteRequest>(&body).unwrap_or_default();
    moderation::delete_approved(&state, request).await?;
    Ok(ok_response(json!({ "ok": true })))
}
