//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HONEYPOT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use scam_honeypot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod auth;
mod callback;
mod engine;
mod error;
mod server;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use callback::CallbackConfig;
pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

use crate::application::LifecycleConfig;
use crate::domain::session::FinalizationPolicy;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Inbound API key
    #[serde(default)]
    pub auth: AuthConfig,

    /// Reply generator (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Session engine tuning
    #[serde(default)]
    pub engine: EngineConfig,

    /// Evaluator callback
    #[serde(default)]
    pub callback: CallbackConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HONEYPOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HONEYPOT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `HONEYPOT__AUTH__API_KEY=...` -> `auth.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HONEYPOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.auth.validate()?;
        self.ai.validate()?;
        self.engine.validate()?;
        self.callback.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Engine settings for the session lifecycle manager
    pub fn lifecycle(&self) -> LifecycleConfig {
        LifecycleConfig {
            history_limit: self.engine.history_limit,
            history_window: self.ai.history_window,
            reply_timeout: self.ai.timeout(),
            temperature: self.ai.temperature,
            idle_timeout_secs: self.engine.idle_timeout_secs,
            sweep_probability: self.engine.sweep_probability,
            policy: FinalizationPolicy::new(self.engine.turn_cap, self.engine.max_session_secs),
        }
    }
}
