//! Error types for rule document loading
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

use sieve_core::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors raised while reading a rule document or building its validators
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// Document that does not describe a rule tree
    #[error("Invalid rule document '{path}': {reason}")]
    InvalidDocument { path: PathBuf, reason: String },

    /// Reference to a definition that does not exist
    #[error("Unknown definition '{reference}' referenced at '{location}' in '{path}'")]
    UnknownReference {
        reference: String,
        location: String,
        path: PathBuf,
    },

    /// Definitions that only alias each other
    #[error("Circular reference detected in '{path}': {chain}")]
    CircularReference { chain: String, path: PathBuf },

    /// Validator configuration rejected by its constructor
    #[error("Invalid validator at '{location}' in '{path}': {source}")]
    InvalidValidator {
        location: String,
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    /// Rule document without a root rule where one is required
    #[error("Rule document '{path}' has no rule named '{name}'")]
    MissingRule { name: String, path: PathBuf },
}

impl From<std::io::Error> for LoaderError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::from("<unknown>"),
            source: error,
        }
    }
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path,
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path,
            source: error,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    pub fn invalid_document(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            path,
            reason: reason.into(),
        }
    }

    pub fn unknown_reference(reference: &str, location: &str, path: PathBuf) -> Self {
        Self::UnknownReference {
            reference: reference.to_string(),
            location: location.to_string(),
            path,
        }
    }

    /// Create a circular reference error from the visited definition names
    pub fn circular_reference(chain: &[String], path: PathBuf) -> Self {
        Self::CircularReference {
            chain: chain.join(" -> "),
            path,
        }
    }

    pub fn invalid_validator(location: &str, path: PathBuf, source: ConfigError) -> Self {
        Self::InvalidValidator {
            location: location.to_string(),
            path,
            source,
        }
    }

    pub fn missing_rule(name: impl Into<String>, path: PathBuf) -> Self {
        Self::MissingRule {
            name: name.into(),
            path,
        }
    }

    /// Get the path associated with this error
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::IoError { path, .. }
            | Self::YamlParseError { path, .. }
            | Self::JsonParseError { path, .. }
            | Self::UnsupportedFormat { path }
            | Self::InvalidDocument { path, .. }
            | Self::UnknownReference { path, .. }
            | Self::CircularReference { path, .. }
            | Self::InvalidValidator { path, .. }
            | Self::MissingRule { path, .. } => path,
        }
    }

    /// Whether the document itself is malformed, as opposed to unreadable
    pub fn is_document_error(&self) -> bool {
        !matches!(self, Self::IoError { .. } | Self::UnsupportedFormat { .. })
    }
}
