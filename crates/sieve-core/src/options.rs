//! Per-instance validator options
//!
//! Every validator ships a default [`ValidatorOptions`] (its message table and
//! code remapping). Overrides supplied at construction are merged on top.
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

use crate::context::Context;
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Error codes, message templates and static message values of a validator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Reported code remapping (`original → reported`)
    pub error_code_map: IndexMap<String, String>,
    /// Message templates by code
    pub error_messages: IndexMap<String, String>,
    /// Static substitution values
    pub message_values: IndexMap<String, Value>,
    /// Redact `value` in messages
    pub hidden: bool,
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `code` as `mapped`
    pub fn with_code(mut self, code: impl Into<String>, mapped: impl Into<String>) -> Self {
        self.error_code_map.insert(code.into(), mapped.into());
        self
    }

    /// Use `template` for `code`
    pub fn with_message(mut self, code: impl Into<String>, template: impl Into<String>) -> Self {
        self.error_messages.insert(code.into(), template.into());
        self
    }

    pub fn with_message_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.message_values.insert(name.into(), value.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Merge `overrides` on top of these options
    pub fn merged(mut self, overrides: &ValidatorOptions) -> Self {
        self.error_code_map.extend(
            overrides
                .error_code_map
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self.error_messages.extend(
            overrides
                .error_messages
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self.message_values.extend(
            overrides
                .message_values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self.hidden |= overrides.hidden;
        self
    }

    /// Code reported for `code`
    pub fn code_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.error_code_map
            .get(code)
            .map(String::as_str)
            .unwrap_or(code)
    }

    fn template_for<'a>(&'a self, code: &'a str, default_template: &'a str) -> &'a str {
        let mapped = self.code_for(code);
        self.error_messages
            .get(mapped)
            .or_else(|| self.error_messages.get(code))
            .map(String::as_str)
            .unwrap_or(default_template)
    }

    /// Register `code` against the context's own value
    pub fn report(
        &self,
        ctx: &Context<'_>,
        code: &str,
        default_template: &str,
        extra: IndexMap<String, Value>,
    ) {
        self.report_for(ctx, code, default_template, ctx.value(), extra);
    }

    /// Register `code` against `value`
    pub fn report_for(
        &self,
        ctx: &Context<'_>,
        code: &str,
        default_template: &str,
        value: &Value,
        extra: IndexMap<String, Value>,
    ) {
        let mut values = self.message_values.clone();
        values.extend(extra);

        let reported = self.code_for(code);
        let template = self.template_for(code, default_template);

        if self.hidden {
            let placeholder = Value::from(ctx.hidden_placeholder());
            ctx.error_for(reported, template, &placeholder, values);
        } else {
            ctx.error_for(reported, template, value, values);
        }
    }
}

/// Build an `IndexMap<String, Value>` of message values
macro_rules! message_values {
    () => {
        ::indexmap::IndexMap::<String, $crate::Value>::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut values = ::indexmap::IndexMap::<String, $crate::Value>::new();
        $(values.insert(String::from($name), $crate::Value::from($value));)+
        values
    }};
}

pub(crate) use message_values;
