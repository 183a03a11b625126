//! Inbound API key configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Shared-secret authentication for callers of the honeypot endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Value callers must send in the `x-api-key` header
    #[serde(default = "default_api_key")]
    pub api_key: Secret<String>,
}

impl AuthConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
        }
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("HONEYPOT__AUTH__API_KEY"));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
        }
    }
}

fn default_api_key() -> Secret<String> {
    Secret::new(String::new())
}
