//! In-memory record implementing the [`Model`] accessor
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

use crate::value::{Model, Value};
use indexmap::IndexMap;
use std::collections::HashSet;

/// A named bag of fields, usable wherever a structured record is expected
///
/// Fields are stored under their storage name. Aliases map a declared field
/// name onto its storage name, as a record type with renamed columns would.
#[derive(Debug, Clone, Default)]
pub struct Record {
    name: String,
    fields: IndexMap<String, Value>,
    aliases: IndexMap<String, String>,
    modified: HashSet<String>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set a field by storage name
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Declare that `declared` is stored as `storage`
    pub fn with_alias(mut self, declared: impl Into<String>, storage: impl Into<String>) -> Self {
        self.aliases.insert(declared.into(), storage.into());
        self
    }

    /// Flag a field as modified
    pub fn with_modified(mut self, name: impl Into<String>) -> Self {
        self.modified.insert(name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_value(self) -> Value {
        Value::model(self)
    }
}

impl Model for Record {
    fn model_name(&self) -> &str {
        &self.name
    }

    fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    fn field_value(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    fn storage_name(&self, field: &str) -> Option<String> {
        self.aliases.get(field).cloned()
    }

    fn is_modified(&self, name: &str) -> bool {
        self.modified.contains(name)
    }
}
