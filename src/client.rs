// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Gated submission client for the registry document-create endpoint.
//!
//! One `submit` call is one gated attempt: serialize, take a permit,
//! POST, return the registry's answer. Retry and backoff belong to the
//! caller. Non-2xx statuses are returned as data, not errors; only
//! transport failures become errors, and they are always surfaced so the
//! caller can decide whether to retry.

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::limiter::RateLimiter;
use crate::model::Document;
use reqwest::header;
use reqwest::StatusCode;
use tracing::{debug, info};
use url::Url;

/// Request header carrying the detached document signature.
pub const SIGNATURE_HEADER: &str = "X-Signature";

/// The registry's answer to one submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub status: StatusCode,
    pub body: String,
}

/// Registry submission client.
///
/// Cheap to share behind an `Arc`; `submit` takes `&self` and any number
/// of tasks may submit concurrently. The rate gate holds outbound
/// traffic to the configured cap while the HTTP calls themselves run
/// unserialized.
pub struct CrptClient {
    http: reqwest::Client,
    gate: RateLimiter,
}

impl CrptClient {
    /// Build a client from configuration.
    ///
    /// Must be called from within a Tokio runtime; the gate starts its
    /// window timer here.
    pub fn new(config: &Config) -> Result<Self> {
        let gate = RateLimiter::new(config.rate_limit.window_unit, config.rate_limit.capacity)?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { http, gate })
    }

    /// The gate in front of the transport, for inspection and shutdown.
    pub fn gate(&self) -> &RateLimiter {
        &self.gate
    }

    /// Submit one document to `endpoint`, waiting for gate capacity
    /// first.
    ///
    /// The signature goes out in the [`SIGNATURE_HEADER`] request
    /// header. The permit is returned to the gate on every exit path,
    /// success or failure.
    pub async fn submit(
        &self,
        endpoint: &str,
        document: &Document,
        signature: &str,
    ) -> Result<Submission> {
        let url = parse_endpoint(endpoint)?;
        let body = serde_json::to_string(document)?;

        let _permit = self.gate.acquire().await?;
        debug!(endpoint = %url, bytes = body.len(), "submitting document");

        let response = self
            .http
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        info!(status = status.as_u16(), "registry responded");

        Ok(Submission { status, body })
    }
}

/// Accept only absolute http(s) URLs with a host.
fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let invalid = || ClientError::InvalidEndpoint {
        url: endpoint.to_string(),
    };
    let url = Url::parse(endpoint).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(url)
}
