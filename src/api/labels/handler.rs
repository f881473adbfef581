// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Labels endpoint handler

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::request::LabelsQuery;
use crate::api::errors::{ApiError, ApiErrorResponse};
use crate::api::http_server::AppState;
use crate::labels::ResultEntry;

/// GET /v1/labels - Detect and translate the labels of an image
///
/// # Request
/// - `imageUrl`: URL of the image (required, http or https)
///
/// # Response
/// Array of `{ name, confidence }`, names in Portuguese, confidence with two
/// decimals, in detector order.
///
/// # Errors
/// - 400 Bad Request: missing or malformed `imageUrl`
/// - 502 Bad Gateway: image fetch, label detection or translation failed
/// - 500 Internal Server Error: anything else
pub async fn labels_handler(
    State(state): State<AppState>,
    query: Result<Query<LabelsQuery>, QueryRejection>,
) -> Result<Json<Vec<ResultEntry>>, ApiErrorResponse> {
    let request_id = Uuid::new_v4().to_string();

    let Query(query) = query.map_err(|rejection| {
        warn!(request_id = %request_id, "Labels query rejected: {}", rejection);
        ApiErrorResponse::new(
            ApiError::ValidationError {
                field: "imageUrl".to_string(),
                message: "query string could not be parsed".to_string(),
            },
            request_id.clone(),
        )
    })?;

    let image_url = query.validate().map_err(|e| {
        warn!(request_id = %request_id, "Labels validation failed: {}", e);
        ApiErrorResponse::new(e, request_id.clone())
    })?;

    info!(request_id = %request_id, "Labelling image: {}", image_url);

    match state.label_service.label_image(image_url).await {
        Ok(results) => Ok(Json(results)),
        Err(e) => {
            error!(
                request_id = %request_id,
                kind = ?e.kind(),
                "Labelling {} failed: {}",
                image_url,
                e
            );
            Err(ApiErrorResponse::new(ApiError::from(&e), request_id))
        }
    }
}
