// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image download
//!
//! The body is returned as raw bytes. Image hosts serve binary content, so no
//! base64 decoding is applied.

use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;
use tracing::{debug, warn};
use url::{Host, Url};

use super::types::{FetchError, LabelError};

const MAX_REDIRECTS: usize = 5;

/// Source of raw image bytes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Download the image behind `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetches images over HTTP(S)
pub struct HttpImageFetcher {
    client: Client,
    max_image_bytes: usize,
    allow_private_hosts: bool,
}

impl HttpImageFetcher {
    /// Create a fetcher
    ///
    /// Unless `allow_private_hosts` is set, loopback, private and link-local
    /// targets are refused, including as redirect targets.
    pub fn new(
        timeout: Duration,
        max_image_bytes: usize,
        allow_private_hosts: bool,
    ) -> Result<Self, LabelError> {
        let redirect_policy = redirect::Policy::custom(move |attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else if !allow_private_hosts && !Self::is_safe_url(attempt.url().as_str()) {
                attempt.stop()
            } else {
                attempt.follow()
            }
        });

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fabstir-label-translator/", env!("CARGO_PKG_VERSION")))
            .redirect(redirect_policy)
            .build()
            .map_err(|e| LabelError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_image_bytes,
            allow_private_hosts,
        })
    }

    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes
    }

    /// Check that a URL is http(s) and does not point into a private network
    pub fn is_safe_url(url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(_) => return false,
        };

        if !["http", "https"].contains(&parsed.scheme()) {
            return false;
        }

        match parsed.host() {
            Some(Host::Domain(domain)) => {
                let domain = domain.trim_end_matches('.').to_lowercase();
                domain != "localhost" && !domain.ends_with(".localhost")
            }
            Some(Host::Ipv4(ip)) => is_public_ipv4(ip),
            Some(Host::Ipv6(ip)) => match ip.to_ipv4_mapped() {
                Some(mapped) => is_public_ipv4(mapped),
                None => is_public_ipv6(ip),
            },
            None => false,
        }
    }
}

fn is_public_ipv4(ip: Ipv4Addr) -> bool {
    !(ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast())
}

fn is_public_ipv6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    // fc00::/7 unique local, fe80::/10 link local
    !(ip.is_loopback()
        || ip.is_unspecified()
        || (first & 0xfe00) == 0xfc00
        || (first & 0xffc0) == 0xfe80)
}

fn read_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl ImageSource for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if !self.allow_private_hosts && !Self::is_safe_url(url) {
            warn!("Refusing to fetch image from private address: {}", url);
            return Err(FetchError::UnsafeUrl {
                url: url.to_string(),
            });
        }

        debug!("Fetching image from: {}", url);

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| read_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Reject early when the host announces an oversized body
        let announced = response.content_length();
        if let Some(length) = announced {
            if length as usize > self.max_image_bytes {
                return Err(FetchError::TooLarge {
                    size: length as usize,
                    max: self.max_image_bytes,
                });
            }
        }

        // Chunked bodies carry no length, so the limit is enforced while reading
        let mut body = Vec::with_capacity(announced.unwrap_or(0) as usize);
        while let Some(chunk) = response.chunk().await.map_err(|e| read_error(url, e))? {
            let size = body.len() + chunk.len();
            if size > self.max_image_bytes {
                return Err(FetchError::TooLarge {
                    size,
                    max: self.max_image_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        if body.is_empty() {
            return Err(FetchError::EmptyBody {
                url: url.to_string(),
            });
        }

        debug!("Fetched {} image bytes from: {}", body.len(), url);
        Ok(body)
    }
}
