// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shapes translated labels into result entries

use super::types::{LabelCandidate, ResultEntry, TranslatedLabel};

/// Format a confidence score with exactly two decimals
///
/// Ties round away from zero (`87.625` becomes `"87.63"`).
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}", (confidence * 100.0).round() / 100.0)
}

/// Pair translated tokens with candidates by position
///
/// Stops at the shorter of the two sequences.
pub fn format_results(tokens: &[String], candidates: &[LabelCandidate]) -> Vec<ResultEntry> {
    tokens
        .iter()
        .zip(candidates)
        .map(|(name, candidate)| ResultEntry {
            name: name.clone(),
            confidence: format_confidence(candidate.confidence),
        })
        .collect()
}

/// Format labels that were translated one by one
pub fn format_translated(labels: &[TranslatedLabel]) -> Vec<ResultEntry> {
    labels
        .iter()
        .map(|label| ResultEntry {
            name: label.name.clone(),
            confidence: format_confidence(label.confidence),
        })
        .collect()
}
