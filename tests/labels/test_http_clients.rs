// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! HTTP client tests for the image fetcher, detector and translator
//!
//! Each test talks to a local stub server, so no external services are needed.

use fabstir_label_translator::labels::{
    FetchError, HttpImageFetcher, HttpLabelDetector, HttpTextTranslator, ImageSource,
    LabelCandidate, LabelDetector, LabelError, TextTranslator, ENGLISH_TO_PORTUGUESE,
};
use std::time::Duration;

use crate::common::{spawn_stub_server, STREAM_CHUNKS, STREAM_CHUNK_BYTES};

const TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// Image fetcher
// =============================================================================

#[tokio::test]
async fn test_fetch_returns_raw_bytes() {
    let stub = spawn_stub_server().await;
    let fetcher = HttpImageFetcher::new(TIMEOUT, 1024, true).unwrap();

    let bytes = fetcher.fetch(&stub.image_url("dog.png")).await.unwrap();
    assert_eq!(bytes, b"dog".to_vec());
}

#[tokio::test]
async fn test_fetch_not_found() {
    let stub = spawn_stub_server().await;
    let fetcher = HttpImageFetcher::new(TIMEOUT, 1024, true).unwrap();

    let result = fetcher.fetch(&stub.image_url("missing.png")).await;
    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
}

#[tokio::test]
async fn test_fetch_empty_body() {
    let stub = spawn_stub_server().await;
    let fetcher = HttpImageFetcher::new(TIMEOUT, 1024, true).unwrap();

    let result = fetcher.fetch(&stub.image_url("empty.png")).await;
    assert!(matches!(result, Err(FetchError::EmptyBody { .. })));
}

#[tokio::test]
async fn test_fetch_too_large() {
    let stub = spawn_stub_server().await;
    let fetcher = HttpImageFetcher::new(TIMEOUT, 1024, true).unwrap();

    let result = fetcher.fetch(&stub.image_url("large.png")).await;
    assert!(matches!(
        result,
        Err(FetchError::TooLarge {
            size: 4096,
            max: 1024
        })
    ));
}

#[tokio::test]
async fn test_fetch_streamed_body_stops_at_limit() {
    let stub = spawn_stub_server().await;
    let fetcher = HttpImageFetcher::new(TIMEOUT, 1024, true).unwrap();

    let result = fetcher.fetch(&stub.image_url("stream.png")).await;
    match result {
        Err(FetchError::TooLarge { size, max }) => {
            assert_eq!(max, 1024);
            assert!(size > 1024);
            // Rejected as soon as the running total passes the limit
            assert!(size < STREAM_CHUNKS * STREAM_CHUNK_BYTES);
        }
        other => panic!("expected too large error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_refuses_loopback_when_private_hosts_disallowed() {
    let stub = spawn_stub_server().await;
    let fetcher = HttpImageFetcher::new(TIMEOUT, 1024, false).unwrap();

    let result = fetcher.fetch(&stub.image_url("dog.png")).await;
    assert!(matches!(result, Err(FetchError::UnsafeUrl { .. })));
}

#[tokio::test]
async fn test_fetch_within_larger_limit() {
    let stub = spawn_stub_server().await;
    let fetcher = HttpImageFetcher::new(TIMEOUT, 8192, true).unwrap();

    let bytes = fetcher.fetch(&stub.image_url("large.png")).await.unwrap();
    assert_eq!(bytes.len(), 4096);
}

// =============================================================================
// Label detector
// =============================================================================

#[tokio::test]
async fn test_detector_returns_unfiltered_labels() {
    let stub = spawn_stub_server().await;
    let detector = HttpLabelDetector::new(&stub.base_url, TIMEOUT).unwrap();

    let labels = detector.detect(b"dog").await.unwrap();
    assert_eq!(
        labels,
        vec![
            LabelCandidate::new("Dog", 95.5),
            LabelCandidate::new("Grass", 40.0),
        ]
    );
    assert_eq!(stub.detect_calls(), 1);
}

#[tokio::test]
async fn test_detector_service_error() {
    let stub = spawn_stub_server().await;
    let detector = HttpLabelDetector::new(&stub.base_url, TIMEOUT).unwrap();

    let result = detector.detect(b"broken").await;
    match result {
        Err(LabelError::Detection { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("detector exploded"));
        }
        other => panic!("expected detection error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_detector_unreachable() {
    let detector = HttpLabelDetector::new("http://127.0.0.1:59999", TIMEOUT).unwrap();

    let result = detector.detect(b"dog").await;
    assert!(matches!(result, Err(LabelError::Detection { status: 0, .. })));
}

// =============================================================================
// Text translator
// =============================================================================

#[tokio::test]
async fn test_translator_translates_single_name() {
    let stub = spawn_stub_server().await;
    let translator = HttpTextTranslator::new(&stub.base_url, TIMEOUT).unwrap();

    let translated = translator
        .translate("Dog", ENGLISH_TO_PORTUGUESE)
        .await
        .unwrap();
    assert_eq!(translated, "Cachorro");
}

#[tokio::test]
async fn test_translator_translates_joined_names() {
    let stub = spawn_stub_server().await;
    let translator = HttpTextTranslator::new(&stub.base_url, TIMEOUT).unwrap();

    let translated = translator
        .translate("Dog and Cat", ENGLISH_TO_PORTUGUESE)
        .await
        .unwrap();
    assert_eq!(translated, "Cachorro e Gato");
}

#[tokio::test]
async fn test_translator_service_error() {
    let stub = spawn_stub_server().await;
    let translator = HttpTextTranslator::new(&stub.base_url, TIMEOUT).unwrap();

    let result = translator.translate("Unicorn", ENGLISH_TO_PORTUGUESE).await;
    assert!(matches!(
        result,
        Err(LabelError::Translation { status: 503, .. })
    ));
    assert_eq!(stub.translate_calls(), 1);
}
