// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Labels request types and validation

use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::errors::ApiError;

/// Maximum accepted image URL length
const MAX_URL_LENGTH: usize = 2048;

/// Query parameters for GET /v1/labels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelsQuery {
    /// URL of the image to label
    #[serde(default)]
    pub image_url: Option<String>,
}

impl LabelsQuery {
    /// Validate the query, returning the image URL
    pub fn validate(&self) -> Result<&str, ApiError> {
        let image_url = self
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::ValidationError {
                field: "imageUrl".to_string(),
                message: "imageUrl is required".to_string(),
            })?;

        if image_url.len() > MAX_URL_LENGTH {
            return Err(ApiError::ValidationError {
                field: "imageUrl".to_string(),
                message: format!("imageUrl exceeds maximum length of {}", MAX_URL_LENGTH),
            });
        }

        let parsed = Url::parse(image_url).map_err(|e| ApiError::ValidationError {
            field: "imageUrl".to_string(),
            message: format!("imageUrl is not a valid URL: {}", e),
        })?;

        if !["http", "https"].contains(&parsed.scheme()) {
            return Err(ApiError::ValidationError {
                field: "imageUrl".to_string(),
                message: format!(
                    "unsupported scheme '{}', expected http or https",
                    parsed.scheme()
                ),
            });
        }

        Ok(image_url)
    }
}
