//! Validation error records
//!
//! A [`ValidationError`] starts with no field path where it originates and
//! gains dotted prefixes as ancestors import it.
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

pub mod template;

use crate::value::Value;
use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

/// One failure reason, addressed by an optional dotted field path
#[derive(Debug, Clone)]
pub struct ValidationError {
    code: String,
    template: String,
    values: IndexMap<String, Value>,
    field_path: Option<String>,
    message: OnceLock<String>,
}

impl ValidationError {
    pub fn new(code: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            template: template.into(),
            values: IndexMap::new(),
            field_path: None,
            message: OnceLock::new(),
        }
    }

    /// Replace the substitution values
    pub fn with_values(mut self, values: IndexMap<String, Value>) -> Self {
        self.values = values;
        self.message = OnceLock::new();
        self
    }

    /// Add one substitution value
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self.message = OnceLock::new();
        self
    }

    /// Set the field path
    pub fn at(mut self, field_path: impl Into<String>) -> Self {
        self.field_path = Some(field_path.into());
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    pub fn field_path(&self) -> Option<&str> {
        self.field_path.as_deref()
    }

    /// Rendered message, computed on first access
    pub fn message(&self) -> &str {
        self.message
            .get_or_init(|| template::render(&self.template, &self.values))
    }

    /// Copy this error under `prefix`
    ///
    /// With no prefix the path is kept as is; otherwise the prefix becomes
    /// the path or is dot-joined in front of the existing one.
    pub fn copy_as_child(&self, prefix: Option<&str>) -> Self {
        let field_path = match (prefix, &self.field_path) {
            (None, path) => path.clone(),
            (Some(prefix), None) => Some(prefix.to_string()),
            (Some(prefix), Some(path)) => Some(format!("{}.{}", prefix, path)),
        };

        Self {
            code: self.code.clone(),
            template: self.template.clone(),
            values: self.values.clone(),
            field_path,
            message: self.message.clone(),
        }
    }
}

impl PartialEq for ValidationError {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
            && self.field_path == other.field_path
            && self.message() == other.message()
    }
}

impl Eq for ValidationError {}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field_path {
            Some(path) => write!(f, "{} -> {}: {}", path, self.code, self.message()),
            None => write!(f, "{}: {}", self.code, self.message()),
        }
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("ValidationError", 3)?;
        out.serialize_field("code", &self.code)?;
        out.serialize_field("message", self.message())?;
        out.serialize_field("field_path", &self.field_path)?;
        out.end()
    }
}
