//! Construction-time error types
//!
//! Validation failures are data carried by a [`Context`](crate::Context).
//! The errors defined here are programmer errors raised while a validator is
//! being configured, never while it evaluates a value.
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Result type for fallible validator constructors
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Invalid validator configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Neither a lower nor an upper bound was given
    #[error("At least one of `min` or `max` must be specified for {validator}")]
    MissingBounds { validator: &'static str },

    /// Lower bound greater than the upper bound
    #[error("`min` ({min}) cannot be more than `max` ({max}) for {validator}")]
    InvertedBounds {
        validator: &'static str,
        min: String,
        max: String,
    },

    /// Numeric bound that is not a number
    #[error("Bound '{bound}' of {validator} is not a number")]
    NonNumericBound {
        validator: &'static str,
        bound: String,
    },

    /// Address validator with every family disabled
    #[error("IP address validator must have at least one of ipv4 or ipv6 enabled")]
    NoAddressFamily,

    /// Regular expression that does not compile
    #[error("Invalid regular expression '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl ConfigError {
    /// Create a missing bounds error
    pub fn missing_bounds(validator: &'static str) -> Self {
        Self::MissingBounds { validator }
    }

    /// Create an inverted bounds error
    pub fn inverted_bounds(
        validator: &'static str,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        Self::InvertedBounds {
            validator,
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Create an invalid pattern error from a regex compilation failure
    pub fn invalid_pattern(pattern: impl Into<String>, error: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: error.to_string(),
        }
    }
}
