// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Labels endpoint tests for GET /v1/labels
//!
//! Drives the real router with `tower::ServiceExt::oneshot` and checks:
//! - successful responses are a bare array of `{ name, confidence }`
//! - validation errors return 400
//! - upstream failures return 502 with a sanitized body and a request id

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use fabstir_label_translator::{
    api::{create_router, AppState, ErrorResponse},
    labels::{LabelConfig, LabelService, ResultEntry, TranslationStrategy},
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::common::{spawn_stub_server, StubServer};

fn router_for(stub: &StubServer) -> Router {
    let config = LabelConfig {
        detector_endpoint: stub.base_url.clone(),
        translator_endpoint: stub.base_url.clone(),
        strategy: TranslationStrategy::Joined,
        request_timeout_secs: 5,
        allow_private_hosts: true,
        ..LabelConfig::default()
    };
    let service = LabelService::new(config).expect("valid config");
    create_router(AppState::new(service))
}

fn labels_uri(image_url: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("imageUrl", image_url)
        .finish();
    format!("/v1/labels?{}", query)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).expect("JSON body")
}

#[tokio::test]
async fn test_labels_success() {
    let stub = spawn_stub_server().await;
    let app = router_for(&stub);

    let (status, body) = get(app, &labels_uri(&stub.image_url("pets.png"))).await;
    assert_eq!(status, StatusCode::OK);

    let results: Vec<ResultEntry> = parse(&body);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "Cachorro");
    assert_eq!(results[0].confidence, "95.50");
    assert_eq!(results[1].name, "Gato");
    assert_eq!(results[1].confidence, "88.20");

    let raw: serde_json::Value = parse(&body);
    assert_eq!(raw[0]["confidence"], "95.50");
}

#[tokio::test]
async fn test_labels_empty_result() {
    let stub = spawn_stub_server().await;
    let app = router_for(&stub);

    let (status, body) = get(app, &labels_uri(&stub.image_url("lawn.png"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]".to_vec());
}

#[tokio::test]
async fn test_labels_missing_image_url() {
    let stub = spawn_stub_server().await;
    let app = router_for(&stub);

    let (status, body) = get(app, "/v1/labels").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error_type, "validation_error");
    assert!(error.request_id.is_some());
    assert_eq!(stub.detect_calls(), 0);
}

#[tokio::test]
async fn test_labels_duplicate_image_url_is_json_error() {
    let stub = spawn_stub_server().await;
    let app = router_for(&stub);

    let uri = format!(
        "/v1/labels?imageUrl={}&imageUrl={}",
        stub.image_url("dog.png"),
        stub.image_url("pets.png")
    );
    let (status, body) = get(app, &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error_type, "validation_error");
    assert!(error.request_id.is_some());
    assert_eq!(stub.detect_calls(), 0);
}

#[tokio::test]
async fn test_labels_malformed_image_url() {
    let stub = spawn_stub_server().await;
    let app = router_for(&stub);

    let (status, _) = get(app, &labels_uri("not-a-url")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_labels_fetch_failure() {
    let stub = spawn_stub_server().await;
    let app = router_for(&stub);

    let (status, body) = get(app, &labels_uri(&stub.image_url("missing.png"))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error_type, "image_fetch_error");
    assert_eq!(error.message, "Failed to fetch image");
    assert!(!String::from_utf8_lossy(&body).contains("missing.png"));
    assert_eq!(stub.detect_calls(), 0);
    assert_eq!(stub.translate_calls(), 0);
}

#[tokio::test]
async fn test_labels_detection_failure_is_sanitized() {
    let stub = spawn_stub_server().await;
    let app = router_for(&stub);

    let (status, body) = get(app, &labels_uri(&stub.image_url("broken.png"))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error_type, "detection_error");
    assert!(!String::from_utf8_lossy(&body).contains("stack trace"));
}

#[tokio::test]
async fn test_labels_translation_failure_is_sanitized() {
    let stub = spawn_stub_server().await;
    let app = router_for(&stub);

    let (status, body) = get(app, &labels_uri(&stub.image_url("unicorn.png"))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error_type, "translation_error");
    assert!(!String::from_utf8_lossy(&body).contains("account 1234"));
}

#[tokio::test]
async fn test_health() {
    let stub = spawn_stub_server().await;
    let app = router_for(&stub);

    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let health: serde_json::Value = parse(&body);
    assert_eq!(health["status"], "ok");
    assert_eq!(
        health["version"],
        fabstir_label_translator::version::VERSION_NUMBER
    );
    let features = health["features"].as_array().unwrap();
    assert_eq!(
        features.len(),
        fabstir_label_translator::version::FEATURES.len()
    );
    assert!(features.iter().any(|f| f == "per-label-translation"));
}
