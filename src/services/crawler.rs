// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::error::UpstreamError;
use crate::services::logging::preview_body;
use crate::services::payload::{payload_candidates, PayloadCandidate};
use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Client for the upstream crawl API.
///
/// Holds one pooled HTTP client for the whole process. No request timeout is
/// set; a hanging upstream holds the inbound request open.
pub struct CrawlApiClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl CrawlApiClient {
    /// Create a client posting to `endpoint`, which must be an absolute URL
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid crawl API endpoint: {}", endpoint))?;

        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Crawl `urls`, trying each payload shape in order until one succeeds.
    ///
    /// Returns the parsed JSON of the first successful attempt. When every
    /// attempt fails, the error of the last attempt is returned; earlier
    /// failures are only logged.
    pub async fn crawl(&self, urls: &[String]) -> Result<Value, UpstreamError> {
        let mut last_error = UpstreamError::NoCandidates;

        for candidate in payload_candidates(urls) {
            match self.call(&candidate).await {
                Ok(data) => {
                    debug!(shape = %candidate.shape, "crawl api accepted payload");
                    return Ok(data);
                }
                Err(e) => {
                    warn!(
                        shape = %candidate.shape,
                        error = %e,
                        "crawl api rejected payload"
                    );
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    /// Send one candidate. Success means status 200 with a JSON body.
    async fn call(&self, candidate: &PayloadCandidate) -> Result<Value, UpstreamError> {
        // `json` also sets `Content-Type: application/json`
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&candidate.request)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(&e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::transport(&e))?;

        if status != StatusCode::OK {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body_preview: preview_body(&bytes),
            });
        }

        serde_json::from_slice(&bytes).map_err(|_| UpstreamError::InvalidJson)
    }
}
