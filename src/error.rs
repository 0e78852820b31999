// SPDX-License-Identifier: Apache-2.0
//! Error types for the registry submission client

use thiserror::Error;

/// Configuration errors, reported at construction time and never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported rate window unit {0:?} (expected seconds, minutes or hours)")]
    UnsupportedUnit(String),

    #[error("request capacity must be greater than zero")]
    ZeroCapacity,
}

/// Failure to obtain a permit from the rate gate.
///
/// A failed acquire never granted a permit, so there is nothing to
/// release.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AcquireError {
    #[error("rate gate closed while waiting for a permit")]
    Closed,
}

/// Errors surfaced by a document submission.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid endpoint URL (expected an absolute http(s) URL): {url}")]
    InvalidEndpoint { url: String },

    #[error("failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("submission cancelled: {0}")]
    Cancelled(#[from] AcquireError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;
