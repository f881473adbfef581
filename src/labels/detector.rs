// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Label detection
//!
//! Sends image bytes to a detection sidecar and keeps only confident labels.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::types::{DetectedLabels, LabelCandidate, LabelError, JOIN_SEPARATOR};

/// A label/object detection capability
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// Detect labels in raw image bytes, unfiltered and in service order
    async fn detect(&self, image: &[u8]) -> Result<Vec<LabelCandidate>, LabelError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Keep labels scoring strictly above `threshold`, preserving order
pub fn filter_confident(labels: Vec<LabelCandidate>, threshold: f64) -> Vec<LabelCandidate> {
    labels
        .into_iter()
        .filter(|label| label.confidence > threshold)
        .collect()
}

/// Join label names with `" and "`
pub fn join_names(candidates: &[LabelCandidate]) -> String {
    candidates
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(JOIN_SEPARATOR)
}

/// Run detection and shape the result for translation
pub async fn detect_labels(
    detector: &dyn LabelDetector,
    image: &[u8],
    threshold: f64,
) -> Result<DetectedLabels, LabelError> {
    let labels = detector.detect(image).await?;
    let total = labels.len();
    let candidates = filter_confident(labels, threshold);

    debug!(
        "{} returned {} labels, {} above {}",
        detector.name(),
        total,
        candidates.len(),
        threshold
    );

    Ok(DetectedLabels {
        joined_names: join_names(&candidates),
        candidates,
    })
}

/// Detection sidecar speaking the Rekognition DetectLabels JSON shape
pub struct HttpLabelDetector {
    client: Client,
    endpoint: String,
}

impl HttpLabelDetector {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, LabelError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LabelError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LabelDetector for HttpLabelDetector {
    async fn detect(&self, image: &[u8]) -> Result<Vec<LabelCandidate>, LabelError> {
        let request = DetectLabelsRequest {
            image: DetectImage {
                bytes: STANDARD.encode(image),
            },
        };

        let response = self
            .client
            .post(format!("{}/detect-labels", self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| LabelError::Detection {
                status: 0,
                message: if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    e.to_string()
                },
            })?;

        let status = response.status();

        if status == 429 {
            return Err(LabelError::Detection {
                status: 429,
                message: "rate limited".to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LabelError::Detection {
                status: status.as_u16(),
                message,
            });
        }

        let data: DetectLabelsResponse =
            response.json().await.map_err(|e| LabelError::Detection {
                status: 0,
                message: format!("JSON parse error: {}", e),
            })?;

        Ok(data
            .labels
            .into_iter()
            .map(|l| LabelCandidate::new(l.name, l.confidence))
            .collect())
    }

    fn name(&self) -> &'static str {
        "http-detector"
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct DetectLabelsRequest {
    image: DetectImage,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct DetectImage {
    bytes: String,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetectLabelsResponse {
    #[serde(default)]
    labels: Vec<DetectedLabel>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetectedLabel {
    name: String,
    confidence: f64,
}
