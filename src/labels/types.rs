// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for image labelling and translation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum confidence (exclusive) for a label to be kept
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 80.0;

/// Separator used to join label names before translation
pub const JOIN_SEPARATOR: &str = " and ";

/// Separator used to split the translated joined string back into names
pub const SPLIT_SEPARATOR: &str = " e ";

/// A detected label with the detection service's confidence (0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCandidate {
    pub name: String,
    pub confidence: f64,
}

impl LabelCandidate {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// Output of the detection step: retained candidates and their joined names
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetectedLabels {
    /// Retained names joined with `" and "`
    pub joined_names: String,
    /// Candidates above the threshold, in detector order
    pub candidates: Vec<LabelCandidate>,
}

impl DetectedLabels {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// A translated label name that still carries its original confidence
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedLabel {
    pub name: String,
    pub confidence: f64,
}

/// Final entry returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Translated label name
    pub name: String,
    /// Confidence formatted with two decimals, e.g. "87.32"
    pub confidence: String,
}

/// Errors raised while fetching the source image
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("Timeout fetching image: {url}")]
    Timeout { url: String },

    /// Transport-level failure
    #[error("HTTP error fetching image: {message}")]
    Http { message: String },

    /// Non-success status returned by the image host
    #[error("HTTP {status} fetching image: {url}")]
    Status { status: u16, url: String },

    /// Body larger than the configured limit
    #[error("Image is {size} bytes, limit is {max} bytes")]
    TooLarge { size: usize, max: usize },

    /// Image host returned no bytes
    #[error("Image body is empty: {url}")]
    EmptyBody { url: String },

    /// URL points at a loopback, private or link-local address
    #[error("Refusing to fetch image from private address: {url}")]
    UnsafeUrl { url: String },
}

/// Closed set of failure kinds surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    Detection,
    Translation,
    Internal,
}

/// Errors that can occur while labelling an image
#[derive(Debug, Error)]
pub enum LabelError {
    /// The image could not be downloaded
    #[error("Image fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The detection service failed or returned an unusable response
    #[error("Label detection failed ({status}): {message}")]
    Detection { status: u16, message: String },

    /// The translation service failed or returned an unusable response
    #[error("Translation failed ({status}): {message}")]
    Translation { status: u16, message: String },

    /// Anything else, e.g. a misconfigured client
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LabelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LabelError::Fetch(_) => ErrorKind::Fetch,
            LabelError::Detection { .. } => ErrorKind::Detection,
            LabelError::Translation { .. } => ErrorKind::Translation,
            LabelError::Internal(_) => ErrorKind::Internal,
        }
    }
}
