//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! the failure modes of the CLI application.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Rule document or data file could not be loaded
    #[error("{0}")]
    Loader(#[from] sieve_schemas::LoaderError),

    /// The data document does not satisfy the rules
    #[error("Validation failed with {errors} error(s)")]
    ValidationFailed { errors: usize },

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument combination
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML configuration parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::ValidationFailed { .. } => 2,
            Self::Loader(_) => 3,
            Self::FileNotFound { .. } => 4,
            Self::Config(_) => 5,
            Self::InvalidArgs(_) => 6,
            Self::Json(_) => 7,
            Self::Yaml(_) => 8,
            Self::Toml(_) => 9,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    use colored::Colorize;

    let label = match error {
        Error::ValidationFailed { .. } => "Invalid:",
        _ => "Error:",
    };

    if use_color {
        format!("{} {}", label.red().bold(), error)
    } else {
        format!("{} {}", label, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::ValidationFailed { errors: 3 }.exit_code(), 2);
        assert_eq!(Error::config("bad").exit_code(), 5);
        assert_eq!(Error::other("boom").exit_code(), 99);

        let loader = sieve_schemas::LoaderError::unsupported_format(PathBuf::from("rules.txt"));
        assert_eq!(Error::from(loader).exit_code(), 3);
    }

    #[test]
    fn test_format_error_plain() {
        let formatted = format_error(&Error::ValidationFailed { errors: 2 }, false);
        assert_eq!(formatted, "Invalid: Validation failed with 2 error(s)");

        let formatted = format_error(&Error::FileNotFound { path: PathBuf::from("x.json") }, false);
        assert_eq!(formatted, "Error: File not found: x.json");
    }

    #[test]
    fn test_help_only_for_argument_errors() {
        assert!(Error::invalid_args("no rule document").should_show_help());
        assert!(!Error::ValidationFailed { errors: 1 }.should_show_help());
    }
}
