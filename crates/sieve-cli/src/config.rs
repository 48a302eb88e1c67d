//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - A TOML configuration file (`--config`, `SIEVE_CONFIG`, `.sieve.toml`
//!   or the user config directory)
//! - Command-line arguments, applied by the caller

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Rule document settings
    pub rules: RulesConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

/// Rule document configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Rule document used when `--rules` is not given
    pub default_rules: Option<PathBuf>,

    /// Definition selected when `--rule` is not given
    pub default_rule: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "Loaded configuration");
                    return Ok(config);
                }
                Err(e) => {
                    eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) if !path.exists() => Err(Error::FileNotFound {
                path: path.to_path_buf(),
            }),
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Configured output format
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_name(&self.output.format).unwrap_or(OutputFormat::Human)
    }

    fn validate(&self) -> Result<()> {
        if OutputFormat::from_name(&self.output.format).is_none() {
            return Err(Error::config(format!(
                "unknown output format '{}'",
                self.output.format
            )));
        }
        Ok(())
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".sieve.toml"), PathBuf::from("sieve.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("sieve").join("config.toml"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".sieve.toml"));
        }

        paths
    }
}
