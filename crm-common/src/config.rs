//! Configuration loading and database path resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// TOML configuration file contents (`config.toml`)
///
/// All fields are optional; services fall back to compiled defaults.
/// Service-specific sections (for example `[scoring]`) are parsed by the
/// owning service from the same file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path to the shared SQLite database file
    pub database_path: Option<String>,
}

impl TomlConfig {
    /// Parse a configuration file, tolerating unknown sections.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Load the platform config file if one exists.
    pub fn load() -> Result<Self> {
        let path = config_file_path()?;
        let contents = std::fs::read_to_string(&path)?;
        Self::parse(&contents)
    }
}

/// Database path resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file (`database_path` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_database_path(cli_arg: Option<&str>, env_var_name: &str) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config) = TomlConfig::load() {
        if let Some(path) = config.database_path {
            return PathBuf::from(path);
        }
    }

    // Priority 4: OS-dependent compiled default
    default_data_dir().join("crm.db")
}

/// Get the configuration file path for the platform.
///
/// Checks `~/.config/crm/config.toml` (or the platform equivalent), then
/// `/etc/crm/config.toml` on Linux.
pub fn config_file_path() -> Result<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("crm").join("config.toml")) {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/crm/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// OS-dependent default data directory.
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("crm"))
        .unwrap_or_else(|| PathBuf::from("./crm_data"))
}
