// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the labelling pipeline

use std::env;
use std::str::FromStr;
use url::Url;

use super::types::DEFAULT_CONFIDENCE_THRESHOLD;

/// Rekognition-style inline image limit
const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// How label names are sent to the translation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationStrategy {
    /// Translate each name on its own, keeping its confidence attached
    #[default]
    PerLabel,
    /// Join names with " and ", translate once, split on " e "
    Joined,
}

impl TranslationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationStrategy::PerLabel => "per-label",
            TranslationStrategy::Joined => "joined",
        }
    }
}

impl FromStr for TranslationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per-label" | "per_label" | "perlabel" => Ok(TranslationStrategy::PerLabel),
            "joined" => Ok(TranslationStrategy::Joined),
            other => Err(format!(
                "unknown translation strategy '{}', expected 'per-label' or 'joined'",
                other
            )),
        }
    }
}

/// Configuration for the labelling pipeline
#[derive(Debug, Clone)]
pub struct LabelConfig {
    /// Base URL of the label detection service
    pub detector_endpoint: String,
    /// Base URL of the translation service
    pub translator_endpoint: String,
    /// Labels must score strictly above this to be kept
    pub confidence_threshold: f64,
    /// Translation strategy
    pub strategy: TranslationStrategy,
    /// Timeout for every outbound HTTP call
    pub request_timeout_secs: u64,
    /// Largest image body accepted from the image host
    pub max_image_bytes: usize,
    /// Allow image URLs that resolve to loopback or private addresses
    pub allow_private_hosts: bool,
}

impl LabelConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            detector_endpoint: env::var("LABEL_DETECTOR_URL")
                .unwrap_or(defaults.detector_endpoint),
            translator_endpoint: env::var("TRANSLATOR_URL")
                .unwrap_or(defaults.translator_endpoint),
            confidence_threshold: env::var("LABEL_CONFIDENCE_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.confidence_threshold),
            strategy: env::var("TRANSLATION_STRATEGY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.strategy),
            request_timeout_secs: env::var("LABEL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            max_image_bytes: env::var("MAX_IMAGE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_image_bytes),
            allow_private_hosts: env::var("ALLOW_PRIVATE_IMAGE_HOSTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.allow_private_hosts),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.confidence_threshold) {
            return Err(format!(
                "Confidence threshold must be between 0 and 100, got {}",
                self.confidence_threshold
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }
        if self.max_image_bytes == 0 {
            return Err("Max image size must be greater than 0".to_string());
        }
        validate_endpoint("detector", &self.detector_endpoint)?;
        validate_endpoint("translator", &self.translator_endpoint)?;
        Ok(())
    }
}

fn validate_endpoint(name: &str, endpoint: &str) -> Result<(), String> {
    let parsed =
        Url::parse(endpoint).map_err(|e| format!("Invalid {} endpoint '{}': {}", name, endpoint, e))?;
    if !["http", "https"].contains(&parsed.scheme()) {
        return Err(format!(
            "Invalid {} endpoint '{}': scheme must be http or https",
            name, endpoint
        ));
    }
    Ok(())
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            detector_endpoint: "http://localhost:8081".to_string(),
            translator_endpoint: "http://localhost:8082".to_string(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            strategy: TranslationStrategy::PerLabel,
            request_timeout_secs: 30,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            allow_private_hosts: false,
        }
    }
}
