// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;
use std::net::{IpAddr, SocketAddr};

use crate::labels::{LabelConfig, TranslationStrategy};

/// Fabstir Label Translator server
#[derive(Parser, Debug)]
#[command(name = "fabstir-label-translator")]
#[command(version)]
#[command(about = "Detects image labels and translates them to Portuguese", long_about = None)]
pub struct Cli {
    /// Host to bind the API server to
    #[arg(long, env = "API_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to bind the API server to
    #[arg(long, env = "API_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Label detection service URL (overrides LABEL_DETECTOR_URL)
    #[arg(long)]
    pub detector_url: Option<String>,

    /// Translation service URL (overrides TRANSLATOR_URL)
    #[arg(long)]
    pub translator_url: Option<String>,

    /// Translation strategy: per-label or joined (overrides TRANSLATION_STRATEGY)
    #[arg(long)]
    pub strategy: Option<TranslationStrategy>,
}

impl Cli {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Environment configuration with command-line overrides applied
    pub fn label_config(&self) -> LabelConfig {
        self.apply_overrides(LabelConfig::from_env())
    }

    fn apply_overrides(&self, mut config: LabelConfig) -> LabelConfig {
        if let Some(ref url) = self.detector_url {
            config.detector_endpoint = url.clone();
        }
        if let Some(ref url) = self.translator_url {
            config.translator_endpoint = url.clone();
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        config
    }
}
