// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{response::IntoResponse, routing::get, Json, Router};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::labels::labels_handler;
use crate::labels::LabelService;

#[derive(Clone)]
pub struct AppState {
    pub label_service: Arc<LabelService>,
}

impl AppState {
    pub fn new(label_service: LabelService) -> Self {
        Self {
            label_service: Arc::new(label_service),
        }
    }
}

/// Build the HTTP router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Labels endpoint
        .route("/v1/labels", get(labels_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router until Ctrl+C
pub async fn start_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn health_handler() -> impl IntoResponse {
    let mut health = crate::version::get_version_info();
    health["status"] = serde_json::json!("ok");
    Json(health)
}
