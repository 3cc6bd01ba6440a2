//! # Configuration System
//!
//! Hierarchical TOML configuration for uxshell.
//!
//! ## Configuration Hierarchy
//!
//! 1. **Hardcoded defaults**
//! 2. **User config** - `~/.uxshell/config.toml`
//! 3. **Project config** - `./.uxshell/config.toml`
//! 4. **CLI arguments** - highest priority
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.uxshell/config.toml
//! [scheduler]
//! refresh_period_ms = 100
//! fetch_timeout_ms = 5000
//!
//! [backend]
//! creation_failure = "fatal"
//! ```
//!
//! ```rust,no_run
//! use uxshell_core::config::ShellConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ShellConfig::load_hierarchy()?;
//!     let period = config.scheduler.refresh_period();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{BackendConfig, CreationFailurePolicy, SchedulerConfig, ShellConfig};
pub use validation::validate_config;

impl ShellConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
