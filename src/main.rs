// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Registry submission CLI
//!
//! Submits one document to the registry through the rate gate and logs
//! the response. The document is read from the JSON file given as the
//! first argument; with no argument an empty document is sent, which is
//! enough to exercise the endpoint.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `CRPT_API_URL`: document-create endpoint
//!   (default: https://ismp.crpt.ru/api/v3/lk/documents/create)
//! - `CRPT_RATE_WINDOW`: rate window unit, one of seconds/minutes/hours
//!   (default: seconds)
//! - `CRPT_RATE_CAPACITY`: max calls per window (default: 5)
//! - `CRPT_TIMEOUT_SECS`: per-request transport timeout (default: 30)
//! - `CRPT_SIGNATURE`: detached signature sent with the document

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crpt_client::{Config, CrptClient, Document};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = load_config()?;
    info!(
        endpoint = %config.endpoint,
        window = %config.rate_limit.window_unit,
        capacity = config.rate_limit.capacity,
        "Starting registry submission"
    );

    let document = load_document()?;
    let signature = std::env::var("CRPT_SIGNATURE").unwrap_or_default();

    let client = CrptClient::new(&config)?;
    let submission = client
        .submit(&config.endpoint, &document, &signature)
        .await?;

    info!(
        status = submission.status.as_u16(),
        body = %submission.body,
        "Registry responded"
    );

    client.gate().close();
    Ok(())
}

/// Load configuration from environment variables.
fn load_config() -> anyhow::Result<Config> {
    let mut config = Config::default();
    if let Ok(endpoint) = std::env::var("CRPT_API_URL") {
        config.endpoint = endpoint;
    }
    if let Ok(unit) = std::env::var("CRPT_RATE_WINDOW") {
        config.rate_limit.window_unit = unit.parse()?;
    }
    if let Ok(capacity) = std::env::var("CRPT_RATE_CAPACITY") {
        config.rate_limit.capacity = capacity
            .parse()
            .context("CRPT_RATE_CAPACITY must be an integer")?;
    }
    if let Ok(timeout) = std::env::var("CRPT_TIMEOUT_SECS") {
        config.request_timeout_secs = timeout
            .parse()
            .context("CRPT_TIMEOUT_SECS must be an integer")?;
    }
    Ok(config)
}

/// Read the document from the file named on the command line, or fall
/// back to an empty document.
fn load_document() -> anyhow::Result<Document> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read document file {path}"))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse document file {path}"))
        }
        None => Ok(Document::default()),
    }
}
