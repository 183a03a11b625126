//! Session engine configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Session engine tuning
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Turns retained per session
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Message count at which a scam session finalizes
    #[serde(default = "default_turn_cap")]
    pub turn_cap: u32,

    /// Session age in seconds after which a scam session finalizes
    #[serde(default = "default_max_session_secs")]
    pub max_session_secs: u64,

    /// Idle time in seconds before a session may be swept
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Chance per message of running the idle sweep
    #[serde(default = "default_sweep_probability")]
    pub sweep_probability: f64,
}

impl EngineConfig {
    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_limit == 0 {
            return Err(ValidationError::OutOfRange("engine.history_limit (>= 1)"));
        }
        if self.turn_cap == 0 {
            return Err(ValidationError::OutOfRange("engine.turn_cap (>= 1)"));
        }
        if self.max_session_secs == 0 {
            return Err(ValidationError::OutOfRange("engine.max_session_secs (>= 1)"));
        }
        if self.idle_timeout_secs == 0 {
            return Err(ValidationError::OutOfRange("engine.idle_timeout_secs (>= 1)"));
        }
        if !(0.0..=1.0).contains(&self.sweep_probability) {
            return Err(ValidationError::OutOfRange(
                "engine.sweep_probability (0.0..=1.0)",
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            turn_cap: default_turn_cap(),
            max_session_secs: default_max_session_secs(),
            idle_timeout_secs: default_idle_timeout(),
            sweep_probability: default_sweep_probability(),
        }
    }
}

fn default_history_limit() -> usize {
    10
}

fn default_turn_cap() -> u32 {
    10
}

fn default_max_session_secs() -> u64 {
    600
}

fn default_idle_timeout() -> u64 {
    3600
}

fn default_sweep_probability() -> f64 {
    0.05
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.turn_cap, 10);
        assert_eq!(config.max_session_secs, 600);
        assert_eq!(config.idle_timeout_secs, 3600);
        assert_eq!(config.sweep_probability, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sweep_probability_must_be_a_probability() {
        let config = EngineConfig {
            sweep_probability: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            sweep_probability: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            sweep_probability: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        let config = EngineConfig {
            history_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            turn_cap: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
