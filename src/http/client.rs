// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use super::headers;
use crate::config::ScannerConfig;
use crate::error::Result;
use crate::scanner::CapturedResponse;

/// Fetches targets and captures their response headers
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client from scanner configuration
    pub fn new(config: &ScannerConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            headers::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        default_headers.insert(
            headers::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.5"),
        );

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.ignore_https_errors)
            .default_headers(default_headers)
            .build()?;

        Ok(Self { client })
    }

    /// GET a URL and capture the final response headers
    pub async fn fetch(&self, url: impl AsRef<str>) -> Result<CapturedResponse> {
        let url = Url::parse(url.as_ref())?;
        let start = Instant::now();

        let response = self.client.get(url).send().await?;
        let response_time = start.elapsed().as_millis() as u64;

        let final_url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        tracing::info!(
            url = %final_url,
            status = %response.status(),
            time_ms = response_time,
            "Response"
        );

        Ok(CapturedResponse::new(final_url, headers))
    }
}
