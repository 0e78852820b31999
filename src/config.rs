// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the registry submission client.
//!
//! Defaults target the production `documents/create` endpoint with the
//! conservative five-calls-per-second cap the registry contract allows.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Unit of the fixed window after which permit capacity is fully reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowUnit {
    Seconds,
    Minutes,
    Hours,
}

impl WindowUnit {
    /// Duration of one window.
    pub fn period(self) -> Duration {
        match self {
            Self::Seconds => Duration::from_secs(1),
            Self::Minutes => Duration::from_secs(60),
            Self::Hours => Duration::from_secs(3600),
        }
    }
}

impl fmt::Display for WindowUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seconds => write!(f, "seconds"),
            Self::Minutes => write!(f, "minutes"),
            Self::Hours => write!(f, "hours"),
        }
    }
}

impl FromStr for WindowUnit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "second" | "seconds" => Ok(Self::Seconds),
            "minute" | "minutes" => Ok(Self::Minutes),
            "hour" | "hours" => Ok(Self::Hours),
            other => Err(ConfigError::UnsupportedUnit(other.to_string())),
        }
    }
}

/// Configuration for the registry submission client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Registry document-create endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Rate gate configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Per-request transport timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Rate gate configuration: at most `capacity` calls per window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Window after which capacity is fully restored (default: seconds)
    #[serde(default = "default_window_unit")]
    pub window_unit: WindowUnit,

    /// Maximum calls admitted per window (default: 5)
    #[serde(default = "default_capacity")]
    pub capacity: u32,
}

// Default value functions
fn default_endpoint() -> String {
    "https://ismp.crpt.ru/api/v3/lk/documents/create".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_window_unit() -> WindowUnit {
    WindowUnit::Seconds
}

fn default_capacity() -> u32 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            rate_limit: RateLimitConfig::default(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_unit: default_window_unit(),
            capacity: default_capacity(),
        }
    }
}

impl Config {
    /// Get the transport timeout duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl RateLimitConfig {
    /// Reject parameter combinations the gate cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_unit_parses_config_spellings() {
        assert_eq!("seconds".parse::<WindowUnit>(), Ok(WindowUnit::Seconds));
        assert_eq!("Minutes".parse::<WindowUnit>(), Ok(WindowUnit::Minutes));
        assert_eq!(" hour ".parse::<WindowUnit>(), Ok(WindowUnit::Hours));
    }

    #[test]
    fn window_unit_rejects_unknown_spellings() {
        for bad in ["days", "millis", "", "sec onds"] {
            assert!(matches!(
                bad.parse::<WindowUnit>(),
                Err(ConfigError::UnsupportedUnit(_))
            ));
        }
    }

    #[test]
    fn window_unit_periods() {
        assert_eq!(WindowUnit::Seconds.period(), Duration::from_secs(1));
        assert_eq!(WindowUnit::Minutes.period(), Duration::from_secs(60));
        assert_eq!(WindowUnit::Hours.period(), Duration::from_secs(3600));
    }

    #[test]
    fn zero_capacity_fails_validation() {
        let config = RateLimitConfig {
            capacity: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.rate_limit.validate().is_ok());
        assert_eq!(config.rate_limit.capacity, 5);
        assert_eq!(config.rate_limit.window_unit, WindowUnit::Seconds);
    }
}
