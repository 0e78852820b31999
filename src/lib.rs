// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Rate-limited submission client for the CRPT marking registry.
//!
//! This crate submits goods-introduction documents to the registry's
//! `documents/create` endpoint while holding outbound traffic to a hard
//! cap of N calls per fixed window:
//!
//! - A fixed-window permit gate admits at most `capacity` calls per
//!   window and parks excess callers until capacity returns
//! - The window timer restores full capacity at each boundary, so a new
//!   window always starts with a clean slate
//! - Permits are RAII guards, released on every exit path
//! - Transport failures are surfaced to the caller, never swallowed

pub mod client;
pub mod config;
pub mod error;
pub mod limiter;
pub mod model;

pub use client::{CrptClient, Submission, SIGNATURE_HEADER};
pub use config::{Config, RateLimitConfig, WindowUnit};
pub use error::{AcquireError, ClientError, ConfigError};
pub use limiter::{Permit, RateLimiter};
pub use model::{Document, Product};
