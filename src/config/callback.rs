//! Evaluator callback configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where and how finalization reports are delivered
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CallbackConfig {
    /// Evaluator endpoint
    #[serde(default)]
    pub url: String,

    /// Per-report timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Whether reports are sent at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl CallbackConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate callback configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("HONEYPOT__CALLBACK__URL"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidCallbackUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 30 {
            return Err(ValidationError::OutOfRange("callback.timeout_secs (1..=30)"));
        }
        Ok(())
    }
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: default_timeout(),
            enabled: default_enabled(),
        }
    }
}

fn default_timeout() -> u64 {
    3
}

fn default_enabled() -> bool {
    true
}
