//! Client configuration.

use std::env::VarError;
use std::num::NonZeroU64;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable read by `ClientConfig::from_env`.
pub const TIMEOUT_ENV: &str = "FETCHKIT_DEFAULT_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Settings shared by every request a client sends. Read-only once the
/// client is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    default_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn with_default_timeout_secs(secs: NonZeroU64) -> Self {
        Self {
            default_timeout: Duration::from_secs(secs.get()),
        }
    }

    /// Timeout applied to requests that do not carry their own.
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Build from `FETCHKIT_DEFAULT_TIMEOUT_SECS`, falling back to the
    /// default when the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(TIMEOUT_ENV) {
            Ok(value) => Self::from_timeout_value(&value),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(raw)) => Err(ConfigError::InvalidTimeout {
                var: TIMEOUT_ENV,
                value: raw.to_string_lossy().into_owned(),
            }),
        }
    }

    fn from_timeout_value(value: &str) -> Result<Self, ConfigError> {
        value
            .trim()
            .parse::<NonZeroU64>()
            .map(Self::with_default_timeout_secs)
            .map_err(|_| ConfigError::InvalidTimeout {
                var: TIMEOUT_ENV,
                value: value.to_string(),
            })
    }
}
