// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Labelling pipeline orchestration
//!
//! fetch -> detect -> translate -> format, strictly in sequence.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::config::{LabelConfig, TranslationStrategy};
use super::detector::{detect_labels, HttpLabelDetector, LabelDetector};
use super::fetcher::{HttpImageFetcher, ImageSource};
use super::formatter::{format_results, format_translated};
use super::translator::{
    translate_each, translate_joined, HttpTextTranslator, TextTranslator, ENGLISH_TO_PORTUGUESE,
};
use super::types::{LabelError, ResultEntry};

/// Labels an image and translates the label names
pub struct LabelService {
    fetcher: Arc<dyn ImageSource>,
    detector: Arc<dyn LabelDetector>,
    translator: Arc<dyn TextTranslator>,
    config: LabelConfig,
}

impl LabelService {
    /// Create a service backed by the HTTP fetcher and sidecar clients
    pub fn new(config: LabelConfig) -> Result<Self, LabelError> {
        config.validate().map_err(LabelError::Internal)?;

        let timeout = Duration::from_secs(config.request_timeout_secs);
        let fetcher = HttpImageFetcher::new(
            timeout,
            config.max_image_bytes,
            config.allow_private_hosts,
        )?;
        let detector = HttpLabelDetector::new(&config.detector_endpoint, timeout)?;
        let translator = HttpTextTranslator::new(&config.translator_endpoint, timeout)?;

        info!(
            "Label service configured: detector={}, translator={}, threshold={}, strategy={}",
            config.detector_endpoint,
            config.translator_endpoint,
            config.confidence_threshold,
            config.strategy.as_str()
        );

        Ok(Self::with_providers(
            Arc::new(fetcher),
            Arc::new(detector),
            Arc::new(translator),
            config,
        ))
    }

    /// Create a service from explicit capabilities
    pub fn with_providers(
        fetcher: Arc<dyn ImageSource>,
        detector: Arc<dyn LabelDetector>,
        translator: Arc<dyn TextTranslator>,
        config: LabelConfig,
    ) -> Self {
        Self {
            fetcher,
            detector,
            translator,
            config,
        }
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Run the full pipeline for one image URL
    pub async fn label_image(&self, image_url: &str) -> Result<Vec<ResultEntry>, LabelError> {
        let start = Instant::now();

        let image = self.fetcher.fetch(image_url).await?;
        debug!("Fetched {} bytes from {}", image.len(), image_url);

        let detected = detect_labels(
            self.detector.as_ref(),
            &image,
            self.config.confidence_threshold,
        )
        .await?;

        if detected.is_empty() {
            info!(
                "No labels above {} for {} ({}ms)",
                self.config.confidence_threshold,
                image_url,
                start.elapsed().as_millis()
            );
            return Ok(Vec::new());
        }

        let results = match self.config.strategy {
            TranslationStrategy::PerLabel => {
                let translated = translate_each(
                    self.translator.as_ref(),
                    &detected.candidates,
                    ENGLISH_TO_PORTUGUESE,
                )
                .await?;
                format_translated(&translated)
            }
            TranslationStrategy::Joined => {
                let tokens = translate_joined(
                    self.translator.as_ref(),
                    &detected.joined_names,
                    ENGLISH_TO_PORTUGUESE,
                )
                .await?;
                if tokens.len() != detected.candidates.len() {
                    debug!(
                        "Translated token count {} differs from label count {}, truncating",
                        tokens.len(),
                        detected.candidates.len()
                    );
                }
                format_results(&tokens, &detected.candidates)
            }
        };

        info!(
            "Labelled {}: {} labels in {}ms",
            image_url,
            results.len(),
            start.elapsed().as_millis()
        );

        Ok(results)
    }
}
