//! Configuration validation.

use crate::config::types::ShellConfig;
use crate::errors::ConfigError;

/// Validate the configuration.
///
/// Rejects values that would stall the scheduler or make the backend give up
/// before its first attempt.
pub fn validate_config(config: &ShellConfig) -> Result<(), ConfigError> {
    if config.scheduler.refresh_period_ms == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "scheduler.refresh_period_ms must be greater than 0".to_string(),
        });
    }

    if config.scheduler.fetch_timeout_ms == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "scheduler.fetch_timeout_ms must be greater than 0".to_string(),
        });
    }

    if config.backend.max_creation_attempts == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "backend.max_creation_attempts must be greater than 0".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ShellConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_refresh_period_rejected() {
        let mut config = ShellConfig::default();
        config.scheduler.refresh_period_ms = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("refresh_period_ms"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ShellConfig::default();
        config.scheduler.fetch_timeout_ms = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = ShellConfig::default();
        config.backend.max_creation_attempts = 0;
        assert!(validate_config(&config).is_err());
    }
}
