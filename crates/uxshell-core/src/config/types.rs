//! Configuration type definitions for uxshell.
//!
//! These types are serialized/deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [scheduler]
//! refresh_period_ms = 100
//! fetch_timeout_ms = 5000
//! require_data_thread = true
//!
//! [backend]
//! creation_failure = "retry"
//! max_creation_attempts = 3
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.uxshell/config.toml`
/// 2. Project config: `./.uxshell/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShellConfig {
    /// Background data refresh settings
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Window lifecycle settings
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Data refresh scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchedulerConfig {
    /// Idle interval between scheduler cycles in milliseconds.
    /// Default: 100ms.
    #[serde(default = "super::defaults::default_refresh_period_ms")]
    pub refresh_period_ms: u64,

    /// Upper bound for a single fetcher run in milliseconds, used when the
    /// fetcher does not carry its own timeout.
    /// Default: 5000ms.
    #[serde(default = "super::defaults::default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Fail the next frame when a window's data thread has died.
    /// Default: true.
    #[serde(default = "super::defaults::default_require_data_thread")]
    pub require_data_thread: bool,
}

impl SchedulerConfig {
    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(self.refresh_period_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            refresh_period_ms: super::defaults::default_refresh_period_ms(),
            fetch_timeout_ms: super::defaults::default_fetch_timeout_ms(),
            require_data_thread: super::defaults::default_require_data_thread(),
        }
    }
}

/// What the lifecycle manager does when a native window cannot be created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CreationFailurePolicy {
    /// Tear everything down and return an error from the run loop.
    #[default]
    Fatal,
    /// Keep the window pending and try again on the next iteration.
    Retry,
}

/// Window lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    #[serde(default)]
    pub creation_failure: CreationFailurePolicy,

    /// Attempts per window before a `retry` policy gives up.
    /// Default: 3.
    #[serde(default = "super::defaults::default_max_creation_attempts")]
    pub max_creation_attempts: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            creation_failure: CreationFailurePolicy::default(),
            max_creation_attempts: super::defaults::default_max_creation_attempts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_config_serialization() {
        let config = ShellConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: ShellConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_scheduler_section_uses_defaults() {
        let toml_str = r#"
[scheduler]
refresh_period_ms = 250
"#;
        let config: ShellConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.scheduler.refresh_period(), Duration::from_millis(250));
        assert_eq!(config.scheduler.fetch_timeout_ms, 5000);
        assert!(config.scheduler.require_data_thread);
        assert_eq!(config.backend.creation_failure, CreationFailurePolicy::Fatal);
    }

    #[test]
    fn test_creation_failure_policy_deserialize() {
        let toml_str = r#"
[backend]
creation_failure = "retry"
max_creation_attempts = 5
"#;
        let config: ShellConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.creation_failure, CreationFailurePolicy::Retry);
        assert_eq!(config.backend.max_creation_attempts, 5);
    }
}
