// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image labelling and label translation
//!
//! Given an image URL the pipeline:
//! - downloads the image bytes
//! - detects labels via a detection sidecar and keeps those scoring above 80
//! - translates label names from English to Portuguese
//! - returns `{ name, confidence }` entries in detector order

pub mod config;
pub mod detector;
pub mod fetcher;
pub mod formatter;
pub mod service;
pub mod translator;
pub mod types;

// Re-export commonly used types
pub use config::{LabelConfig, TranslationStrategy};
pub use detector::{detect_labels, filter_confident, join_names, HttpLabelDetector, LabelDetector};
pub use fetcher::{HttpImageFetcher, ImageSource};
pub use formatter::{format_confidence, format_results, format_translated};
pub use service::LabelService;
pub use translator::{
    split_translation, translate_each, translate_joined, HttpTextTranslator, LanguagePair,
    TextTranslator, ENGLISH_TO_PORTUGUESE,
};
pub use types::{
    DetectedLabels, ErrorKind, FetchError, LabelCandidate, LabelError, ResultEntry,
    TranslatedLabel,
};
