// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::labels::{ErrorKind, LabelError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

/// Errors returned to HTTP callers
///
/// Upstream failures carry no detail; the raw cause is logged, not returned.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    ValidationError { field: String, message: String },
    ImageFetchFailed,
    DetectionFailed,
    TranslationFailed,
    InternalError,
}

impl ApiError {
    pub fn to_response(&self, request_id: Option<String>) -> ErrorResponse {
        let (error_type, message, details) = match self {
            ApiError::ValidationError { field, message } => {
                let mut details = HashMap::new();
                details.insert(
                    "field".to_string(),
                    serde_json::Value::String(field.clone()),
                );
                ("validation_error", message.clone(), Some(details))
            }
            ApiError::ImageFetchFailed => {
                ("image_fetch_error", "Failed to fetch image".to_string(), None)
            }
            ApiError::DetectionFailed => {
                ("detection_error", "Label detection failed".to_string(), None)
            }
            ApiError::TranslationFailed => {
                ("translation_error", "Translation failed".to_string(), None)
            }
            ApiError::InternalError => {
                ("internal_error", "Internal server error".to_string(), None)
            }
        };

        ErrorResponse {
            error_type: error_type.to_string(),
            message,
            request_id,
            details,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError { .. } => 400,
            ApiError::ImageFetchFailed | ApiError::DetectionFailed | ApiError::TranslationFailed => {
                502
            }
            ApiError::InternalError => 500,
        }
    }
}

impl From<&LabelError> for ApiError {
    fn from(error: &LabelError) -> Self {
        match error.kind() {
            ErrorKind::Fetch => ApiError::ImageFetchFailed,
            ErrorKind::Detection => ApiError::DetectionFailed,
            ErrorKind::Translation => ApiError::TranslationFailed,
            ErrorKind::Internal => ApiError::InternalError,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ValidationError { field, message } => {
                write!(f, "Validation error for {}: {}", field, message)
            }
            ApiError::ImageFetchFailed => write!(f, "Failed to fetch image"),
            ApiError::DetectionFailed => write!(f, "Label detection failed"),
            ApiError::TranslationFailed => write!(f, "Translation failed"),
            ApiError::InternalError => write!(f, "Internal server error"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error response wrapper carrying the request id
pub struct ApiErrorResponse {
    pub error: ApiError,
    pub request_id: Option<String>,
}

impl ApiErrorResponse {
    pub fn new(error: ApiError, request_id: impl Into<String>) -> Self {
        Self {
            error,
            request_id: Some(request_id.into()),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = self.error.to_response(self.request_id);

        (status, Json(body)).into_response()
    }
}
