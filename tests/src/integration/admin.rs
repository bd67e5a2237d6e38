//! Admin surface: authentication, the pending view, deletion, and the
//! corruption-is-fatal contract for operators.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use vouch_store::BlobStore;

use crate::support::{
    admin_get, admin_post, approve, default_config, public_list, submit_one, Harness, ADMIN_TOKEN,
};
use vouch_gateway::GatewayConfig;

#[tokio::test]
async fn test_admin_endpoints_reject_bad_tokens() {
    let harness = Harness::new();
    submit_one(&harness, "Ada").await;

    // One character off.
    let near_miss = format!("{}x", &ADMIN_TOKEN[..ADMIN_TOKEN.len() - 1]);
    for token in ["wrong-token", near_miss.as_str()] {
        let (status, body) = harness
            .call(admin_get("/api/admin/testimonials/pending", token))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "token: {token}");
        assert_eq!(body["error"], "Unauthorized");

        let (status, _) = harness
            .call(admin_post(
                "/api/admin/testimonials/moderate",
                token,
                &json!({"id": "whatever", "action": "approve"}),
            ))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_admin_endpoints_reject_absent_token() {
    let harness = Harness::new();
    let request = Request::builder()
        .method("GET")
        .uri("/api/admin/testimonials/pending")
        .body(Body::empty())
        .unwrap();

    let (status, body) = harness.call(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_x_admin_token_header_accepted() {
    let harness = Harness::new();
    let request = Request::builder()
        .method("GET")
        .uri("/api/admin/testimonials/pending")
        .header("x-admin-token", ADMIN_TOKEN)
        .body(Body::empty())
        .unwrap();

    let (status, body) = harness.call(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_missing_server_secret_is_a_server_error() {
    let mut config = default_config();
    config.admin.token = None;
    let harness = Harness::with_config(config);

    let (status, body) = harness
        .call(admin_get("/api/admin/testimonials/pending", ADMIN_TOKEN))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Admin token is not configured");
}

#[tokio::test]
async fn test_pending_view_fails_on_corrupt_storage() {
    // Unlike the public read, operators must see that the store is broken.
    let harness = Harness::new();
    harness
        .store
        .set("pending", &json!({"not": "a list"}))
        .await
        .unwrap();

    let (status, body) = harness
        .call(admin_get("/api/admin/testimonials/pending", ADMIN_TOKEN))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Storage corrupted (pending)");
}

#[tokio::test]
async fn test_delete_removes_published_entry() {
    let harness = Harness::new();
    let id = submit_one(&harness, "Ada").await;
    approve(&harness, &id).await;

    let (status, _) = harness
        .call(admin_post(
            "/api/admin/testimonials/delete",
            ADMIN_TOKEN,
            &json!({"id": id}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = harness.call(public_list()).await;
    assert_eq!(body["testimonials"].as_array().unwrap().len(), 0);

    // A second delete finds nothing.
    let (status, body) = harness
        .call(admin_post(
            "/api/admin/testimonials/delete",
            ADMIN_TOKEN,
            &json!({"id": id}),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_delete_requires_id() {
    let harness = Harness::new();
    let (status, body) = harness
        .call(admin_post(
            "/api/admin/testimonials/delete",
            ADMIN_TOKEN,
            &json!({}),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing id");
}

#[tokio::test]
async fn test_wrong_method_on_admin_routes() {
    let harness = Harness::new();

    let request = Request::builder()
        .method("POST")
        .uri("/api/admin/testimonials/pending")
        .header(header::AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = harness.call(request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");
}

#[tokio::test]
async fn test_default_config_has_no_admin_token() {
    // Out of the box the admin surface is disabled, not open.
    let config = GatewayConfig::default();
    assert!(config.admin.token.is_none());
}
