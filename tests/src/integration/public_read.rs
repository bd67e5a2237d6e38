//! Public read path: always an array, degrades on malformed storage, and
//! carries the display-path response headers.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;

use vouch_store::BlobStore;

use crate::support::{approve, public_list, submit_one, Harness};

#[tokio::test]
async fn test_empty_store_serves_empty_array() {
    let harness = Harness::new();
    let (status, body) = harness.call(public_list()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["testimonials"], json!([]));
}

#[tokio::test]
async fn test_malformed_storage_degrades_to_empty() {
    let harness = Harness::new();
    harness
        .store
        .set("approved", &json!({"scrambled": true}))
        .await
        .unwrap();

    let (status, body) = harness.call(public_list()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["testimonials"], json!([]));
}

#[tokio::test]
async fn test_newest_approval_listed_first() {
    let harness = Harness::new();
    let first = submit_one(&harness, "First").await;
    let second = submit_one(&harness, "Second").await;
    approve(&harness, &first).await;
    approve(&harness, &second).await;

    let (_, body) = harness.call(public_list()).await;
    let list = body["testimonials"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], second.as_str());
    assert_eq!(list[1]["id"], first.as_str());
}

#[tokio::test]
async fn test_display_headers() {
    let harness = Harness::new();
    let response = harness.call_raw(public_list()).await;

    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json; charset=utf-8"
    );
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
}

#[tokio::test]
async fn test_wrong_method_is_405() {
    let harness = Harness::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/testimonials")
        .body(Body::empty())
        .unwrap();

    let (status, body) = harness.call(request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");
}

#[tokio::test]
async fn test_health_endpoint() {
    let harness = Harness::new();
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = harness.call(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
