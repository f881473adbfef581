// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Label name translation

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::types::{LabelCandidate, LabelError, TranslatedLabel, SPLIT_SEPARATOR};

/// Source and target language codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: &'static str,
    pub target: &'static str,
}

/// The only pair this service translates
pub const ENGLISH_TO_PORTUGUESE: LanguagePair = LanguagePair {
    source: "en",
    target: "pt",
};

/// A text translation capability
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextTranslator: Send + Sync {
    /// Translate `text`, returning a single translated string
    async fn translate(&self, text: &str, languages: LanguagePair) -> Result<String, LabelError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Split a translated joined string on `" e "`
pub fn split_translation(translated: &str) -> Vec<String> {
    translated
        .split(SPLIT_SEPARATOR)
        .map(|token| token.to_string())
        .collect()
}

/// Translate a joined names string and split it back into tokens
///
/// Token count is not guaranteed to match the number of joined names.
pub async fn translate_joined(
    translator: &dyn TextTranslator,
    text: &str,
    languages: LanguagePair,
) -> Result<Vec<String>, LabelError> {
    let translated = translator.translate(text, languages).await?;
    let tokens = split_translation(&translated);
    debug!(
        "{} translated '{}' into {} tokens",
        translator.name(),
        text,
        tokens.len()
    );
    Ok(tokens)
}

/// Translate every candidate's name separately, keeping its confidence
///
/// Results come back in candidate order. The first failure fails the batch.
pub async fn translate_each(
    translator: &dyn TextTranslator,
    candidates: &[LabelCandidate],
    languages: LanguagePair,
) -> Result<Vec<TranslatedLabel>, LabelError> {
    let futures = candidates.iter().map(|candidate| async move {
        let name = translator.translate(&candidate.name, languages).await?;
        Ok::<_, LabelError>(TranslatedLabel {
            name: name.trim().to_string(),
            confidence: candidate.confidence,
        })
    });

    let translated = try_join_all(futures).await?;
    debug!(
        "{} translated {} labels individually",
        translator.name(),
        translated.len()
    );
    Ok(translated)
}

/// Translation sidecar speaking the AWS Translate TranslateText JSON shape
pub struct HttpTextTranslator {
    client: Client,
    endpoint: String,
}

impl HttpTextTranslator {
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
impl TextTranslator for HttpTextTranslator {
    async fn translate(&self, text: &str, languages: LanguagePair) -> Result<String, LabelError> {
        let request = TranslateTextRequest {
            source_language_code: languages.source,
            target_language_code: languages.target,
            text,
        };

        let response = self
            .client
            .post(format!("{}/translate-text", self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| LabelError::Translation {
                status: 0,
                message: if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    e.to_string()
                },
            })?;

        let status = response.status();

        if status == 429 {
            return Err(LabelError::Translation {
                status: 429,
                message: "rate limited".to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LabelError::Translation {
                status: status.as_u16(),
                message,
            });
        }

        let data: TranslateTextResponse =
            response.json().await.map_err(|e| LabelError::Translation {
                status: 0,
                message: format!("JSON parse error: {}", e),
            })?;

        Ok(data.translated_text)
    }

    fn name(&self) -> &'static str {
        "http-translator"
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct TranslateTextRequest<'a> {
    source_language_code: &'a str,
    target_language_code: &'a str,
    text: &'a str,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TranslateTextResponse {
    translated_text: String,
}
