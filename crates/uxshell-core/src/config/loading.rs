//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.uxshell/config.toml`
//! 3. **Project config** - `./.uxshell/config.toml`
//! 4. **CLI arguments** - Command-line flags (applied by the binary)
//!
//! Files are merged key by key before deserializing, so a project file that
//! only sets `[backend]` keeps the user's `[scheduler]` settings.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::ShellConfig;
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

const CONFIG_DIR: &str = ".uxshell";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a present file cannot be read or parsed, or if
/// validation fails. Missing config files are not errors.
pub fn load_hierarchy() -> Result<ShellConfig, ConfigError> {
    let mut paths = Vec::new();
    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(CONFIG_DIR).join(CONFIG_FILE));
    }
    paths.push(std::env::current_dir()?.join(CONFIG_DIR).join(CONFIG_FILE));

    load_from_paths(&paths)
}

/// Load and merge the given files in order, skipping missing ones.
pub fn load_from_paths(paths: &[PathBuf]) -> Result<ShellConfig, ConfigError> {
    let mut merged = toml::Table::new();

    for path in paths {
        match read_table(path)? {
            Some(table) => {
                debug!(event = "core.config.file_loaded", path = %path.display());
                merge_tables(&mut merged, table);
            }
            None => {
                debug!(event = "core.config.file_missing", path = %path.display());
            }
        }
    }

    let config: ShellConfig = toml::Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ConfigParseError {
            message: e.to_string(),
        })?;

    validate_config(&config)?;

    Ok(config)
}

/// Load a single configuration file.
pub fn load_config_file(path: &Path) -> Result<ShellConfig, ConfigError> {
    load_from_paths(&[path.to_path_buf()])
}

fn read_table(path: &Path) -> Result<Option<toml::Table>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let table = content
        .parse::<toml::Table>()
        .map_err(|e| ConfigError::ConfigParseError {
            message: format!("'{}': {}", path.display(), e),
        })?;

    Ok(Some(table))
}

/// Merge `override_table` into `base`, recursing into nested tables.
///
/// Scalars and arrays in the override replace the base value.
pub fn merge_tables(base: &mut toml::Table, override_table: toml::Table) {
    for (key, value) in override_table {
        let override_inner = match value {
            toml::Value::Table(inner) => inner,
            other => {
                base.insert(key, other);
                continue;
            }
        };

        if let Some(toml::Value::Table(base_inner)) = base.get_mut(&key) {
            merge_tables(base_inner, override_inner);
            continue;
        }
        base.insert(key, toml::Value::Table(override_inner));
    }
}
