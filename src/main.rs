// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Parser;
use fabstir_label_translator::{
    api::{start_server, AppState},
    cli::Cli,
    labels::LabelService,
    version,
};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    tracing::info!("Starting {}", version::get_version_string());

    let config = cli.label_config();
    let service = LabelService::new(config).context("Failed to configure label service")?;

    let addr = cli.listen_addr();
    println!("Label translator listening on http://{}", addr);
    println!("  Health:       http://{}/health", addr);
    println!("  Labels:       GET http://{}/v1/labels?imageUrl=<url>", addr);

    start_server(addr, AppState::new(service)).await
}
