//! Structural validators for mappings and records
//!
//! A [`SpecConfig`] names a validator per field, plus optional validators for
//! unexpected keys and for the values held under them. [`DictValidate`]
//! applies it to a mapping, [`ModelValidate`] to a [`Model`].
//!
//! Evaluation runs in three phases, each honoring `stop_on_fail`:
//!
//! 1. every key outside the field set is checked by the key validator
//! 2. every declared field is checked, in declaration order
//! 3. the entries outside the field set are checked together, as one
//!    mapping, by the value validator
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

use super::{impl_configurable, SharedValidator, Validator};
use crate::context::Context;
use crate::options::{message_values, ValidatorOptions};
use crate::value::{Key, Model, Value};
use indexmap::IndexMap;
use std::borrow::Cow;

const INVALID_KEY: &str = "invalidKey";
const INVALID_KEY_TEMPLATE: &str = "'$value' is not a valid key";

/// Field validators and catch-all validators of a structure
#[derive(Debug, Clone, Default)]
pub struct SpecConfig {
    fields: IndexMap<String, SharedValidator>,
    key_validator: Option<SharedValidator>,
    value_validator: Option<SharedValidator>,
    stop_on_fail: Option<bool>,
}

impl SpecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate field `name` with `validator`
    pub fn field(mut self, name: impl Into<String>, validator: SharedValidator) -> Self {
        self.fields.insert(name.into(), validator);
        self
    }

    /// Validate keys outside the field set
    pub fn key_validator(mut self, validator: SharedValidator) -> Self {
        self.key_validator = Some(validator);
        self
    }

    /// Validate the entries outside the field set, as a mapping
    pub fn value_validator(mut self, validator: SharedValidator) -> Self {
        self.value_validator = Some(validator);
        self
    }

    /// Stop at the first failing key or field (default `true`)
    pub fn stop_on_fail(mut self, stop_on_fail: bool) -> Self {
        self.stop_on_fail = Some(stop_on_fail);
        self
    }

    pub fn fields(&self) -> &IndexMap<String, SharedValidator> {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&SharedValidator> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn stops_on_fail(&self) -> bool {
        self.stop_on_fail.unwrap_or(true)
    }

    /// Layer this configuration over `base`
    ///
    /// Fields keep the base order; fields redefined here replace the base
    /// ones in place and new fields are appended. Unset settings fall back
    /// to the base.
    pub fn extend(self, base: &SpecConfig) -> SpecConfig {
        let mut fields = base.fields.clone();
        for (name, validator) in self.fields {
            if fields.contains_key(&name) {
                log::debug!("Field '{}' shadows the base definition", name);
            }
            fields.insert(name, validator);
        }

        SpecConfig {
            fields,
            key_validator: self.key_validator.or_else(|| base.key_validator.clone()),
            value_validator: self
                .value_validator
                .or_else(|| base.value_validator.clone()),
            stop_on_fail: self.stop_on_fail.or(base.stop_on_fail),
        }
    }

    /// Layer `overrides` over this configuration
    pub fn merged_with(self, overrides: &SpecConfig) -> SpecConfig {
        overrides.clone().extend(&self)
    }

    fn evaluate(
        &self,
        options: &ValidatorOptions,
        ctx: &Context<'_>,
        declared: Vec<(&SharedValidator, Entry<'_>)>,
        extras: Vec<Entry<'_>>,
    ) -> bool {
        let stop_on_fail = self.stops_on_fail();
        let mut valid = true;

        if let Some(key_validator) = &self.key_validator {
            for entry in &extras {
                let key = entry.key.to_value();
                let child = ctx.build_child(Cow::Borrowed(&key), key_validator.is_step());
                if key_validator.validate_with_context(&child) {
                    continue;
                }

                options.report_for(ctx, INVALID_KEY, INVALID_KEY_TEMPLATE, &key, message_values!());
                ctx.import_errors(&child, Some(&entry.key.to_string()));
                valid = false;
                if stop_on_fail {
                    return false;
                }
            }
        }

        for (validator, entry) in declared {
            let path = entry.key.to_string();
            let mut child = ctx.build_child(entry.value, validator.is_step());
            if let Some(modified) = entry.modified {
                child = child.with_modified(modified);
            }

            if !validator.validate_with_context(&child) {
                ctx.import_errors(&child, Some(&path));
                valid = false;
                if stop_on_fail {
                    log::trace!("Structure validation stopped at field '{}'", path);
                    return false;
                }
            }
        }

        if let Some(value_validator) = &self.value_validator {
            let remaining: IndexMap<Key, Value> = extras
                .into_iter()
                .map(|entry| (entry.key, entry.value.into_owned()))
                .collect();
            let child = ctx.build_child(Cow::Owned(Value::Map(remaining)), value_validator.is_step());
            if !value_validator.validate_with_context(&child) {
                ctx.import_errors(&child, None);
                valid = false;
            }
        }

        valid
    }
}

/// An entry of the structure under test
struct Entry<'v> {
    key: Key,
    value: Cow<'v, Value>,
    modified: Option<bool>,
}

/// Validates a mapping against a [`SpecConfig`]
#[derive(Debug, Clone)]
pub struct DictValidate {
    spec: SpecConfig,
    options: ValidatorOptions,
}

impl DictValidate {
    pub const INVALID_KEY: &'static str = INVALID_KEY;
    pub const NOT_DICT: &'static str = "notDict";
    const NOT_DICT_TEMPLATE: &'static str = "'$value' is not a dictionary";

    pub fn new(spec: SpecConfig) -> Self {
        Self {
            spec,
            options: Self::default_options(),
        }
    }

    /// Layer `overrides` over the current field set
    pub fn with_spec(mut self, overrides: SpecConfig) -> Self {
        self.spec = self.spec.merged_with(&overrides);
        self
    }

    pub fn spec(&self) -> &SpecConfig {
        &self.spec
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }
}

impl Validator for DictValidate {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let Some(map) = ctx.value().as_map() else {
            self.options
                .report(ctx, Self::NOT_DICT, Self::NOT_DICT_TEMPLATE, message_values!());
            return false;
        };

        let extras = map
            .iter()
            .filter(|(key, _)| !matches!(key, Key::Str(name) if self.spec.contains(name)))
            .map(|(key, value)| Entry {
                key: key.clone(),
                value: Cow::Borrowed(value),
                modified: None,
            })
            .collect();

        let declared = self
            .spec
            .fields
            .iter()
            .map(|(name, validator)| {
                let key = Key::Str(name.clone());
                let value = match map.get(&key) {
                    Some(value) => Cow::Borrowed(value),
                    None => Cow::Owned(Value::Null),
                };
                (
                    validator,
                    Entry {
                        key,
                        value,
                        modified: None,
                    },
                )
            })
            .collect();

        self.spec.evaluate(&self.options, ctx, declared, extras)
    }

    fn is_step(&self) -> bool {
        true
    }
}

/// Validates a structured record against a [`SpecConfig`]
///
/// Field names of the configuration are declared names; values are read, and
/// errors reported, under the record's storage names. When a model name is
/// set, records of any other type are rejected.
#[derive(Debug, Clone)]
pub struct ModelValidate {
    spec: SpecConfig,
    model_name: Option<String>,
    options: ValidatorOptions,
}

impl ModelValidate {
    pub const INVALID_KEY: &'static str = INVALID_KEY;
    pub const NOT_MODEL: &'static str = "notModel";
    const NOT_MODEL_TEMPLATE: &'static str = "'$value' is not an instance of $model";

    pub fn new(spec: SpecConfig) -> Self {
        Self {
            spec,
            model_name: None,
            options: Self::default_options(),
        }
    }

    /// Only accept records named `name`
    pub fn model(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    /// Layer `overrides` over the current field set
    pub fn with_spec(mut self, overrides: SpecConfig) -> Self {
        self.spec = self.spec.merged_with(&overrides);
        self
    }

    pub fn spec(&self) -> &SpecConfig {
        &self.spec
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model_name.as_deref()
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }

    fn accepts(&self, model: &dyn Model) -> bool {
        self.model_name
            .as_deref()
            .map_or(true, |name| model.model_name() == name)
    }
}

impl Validator for ModelValidate {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let model = match ctx.value().as_model() {
            Some(model) if self.accepts(model) => model,
            _ => {
                let expected = self.model_name.as_deref().unwrap_or("Model");
                self.options.report(
                    ctx,
                    Self::NOT_MODEL,
                    Self::NOT_MODEL_TEMPLATE,
                    message_values!("model" => expected),
                );
                return false;
            }
        };

        let declared: Vec<_> = self
            .spec
            .fields
            .iter()
            .map(|(name, validator)| {
                let storage = model.storage_name(name).unwrap_or_else(|| name.clone());
                let value = model.field_value(&storage).unwrap_or_default();
                let modified = model.is_modified(&storage);
                (
                    validator,
                    Entry {
                        key: Key::Str(storage),
                        value: Cow::Owned(value),
                        modified: Some(modified),
                    },
                )
            })
            .collect();

        let extras = model
            .field_names()
            .into_iter()
            .filter(|name| {
                !declared
                    .iter()
                    .any(|(_, entry)| matches!(&entry.key, Key::Str(storage) if storage == name))
            })
            .map(|name| Entry {
                value: Cow::Owned(model.field_value(&name).unwrap_or_default()),
                key: Key::Str(name),
                modified: None,
            })
            .collect();

        self.spec.evaluate(&self.options, ctx, declared, extras)
    }

    fn is_step(&self) -> bool {
        true
    }
}

impl_configurable!(DictValidate, ModelValidate);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::basic::{Length, NotNone};
    use crate::validators::complex::{IfField, Optional, Required};
    use crate::Record;
    use serde_json::json;

    fn errors(ctx: &Context<'_>) -> Vec<(Option<String>, String)> {
        ctx.errors()
            .iter()
            .map(|e| (e.field_path().map(str::to_string), e.code().to_string()))
            .collect()
    }

    fn e(path: Option<&str>, code: &str) -> (Option<String>, String) {
        (path.map(str::to_string), code.to_string())
    }

    fn length(min: usize, max: usize) -> SharedValidator {
        Length::range(min, max).unwrap().shared()
    }

    fn fake_dict() -> SpecConfig {
        SpecConfig::new()
            .field(
                "fieldName1",
                Optional::new(vec![length(2, 4)]).shared(),
            )
            .field(
                "fieldName2",
                Required::new(vec![IfField::new("fieldName1", length(6, 8)).shared()]).shared(),
            )
    }

    #[test]
    fn test_dict_success() {
        let validator = DictValidate::new(fake_dict());
        let result = validator.validate(Value::from(json!({
            "fieldName1": "abc",
            "fieldName2": "abcdefg"
        })));
        assert!(result.is_valid());
    }

    #[test]
    fn test_dict_conditional_field_fails() {
        let validator = DictValidate::new(fake_dict());
        let result = validator.validate(Value::from(json!({
            "fieldName1": "abc",
            "fieldName2": "abc"
        })));
        assert_eq!(
            errors(&result),
            vec![
                e(Some("fieldName2"), Length::TOO_SHORT),
                e(Some("fieldName2"), IfField::NEEDS_VALIDATE),
            ]
        );
        assert_eq!(
            result.errors()[1].message(),
            "Some validate error due to field 'fieldName1' has value 'abc'."
        );
    }

    #[test]
    fn test_dict_missing_required() {
        let validator = DictValidate::new(fake_dict());
        let result = validator.validate(Value::from(json!({"fieldName1": "abc"})));
        assert_eq!(
            errors(&result),
            vec![e(Some("fieldName2"), Required::REQUIRED)]
        );
    }

    #[test]
    fn test_dict_not_a_mapping() {
        let validator = DictValidate::new(fake_dict());
        let result = validator.validate(Value::from("abc"));
        assert_eq!(errors(&result), vec![e(None, DictValidate::NOT_DICT)]);
    }

    #[test]
    fn test_dict_invalid_key() {
        let spec = fake_dict().key_validator(length(1, 3));
        let validator = DictValidate::new(spec);
        let result = validator.validate(Value::from(json!({
            "fieldName1": "abc",
            "fieldName2": "abcdefg",
            "fakeField": 1
        })));
        assert_eq!(
            errors(&result),
            vec![
                e(None, DictValidate::INVALID_KEY),
                e(Some("fakeField"), Length::TOO_LONG),
            ]
        );
        assert_eq!(result.errors()[0].message(), "'fakeField' is not a valid key");
    }

    #[test]
    fn test_dict_stop_on_fail() {
        let data = Value::from(json!({"fieldName1": "a", "fieldName2": "abc"}));

        let result = DictValidate::new(fake_dict()).validate(data.clone());
        assert_eq!(result.len(), 1);

        let result = DictValidate::new(fake_dict().stop_on_fail(false)).validate(data);
        assert_eq!(
            errors(&result),
            vec![
                e(Some("fieldName1"), Length::TOO_SHORT),
                e(Some("fieldName2"), Length::TOO_SHORT),
                e(Some("fieldName2"), IfField::NEEDS_VALIDATE),
            ]
        );
    }

    #[test]
    fn test_dict_value_validator_sees_remaining_entries() {
        let spec = SpecConfig::new()
            .field("a", NotNone::new().shared())
            .value_validator(crate::AllItems::new(length(1, 2)).shared());
        let result = DictValidate::new(spec).validate(Value::from(json!({
            "a": 1,
            "b": "ok",
            "c": "toolong"
        })));
        assert_eq!(
            errors(&result),
            vec![e(Some("c"), Length::TOO_LONG)]
        );
    }

    #[test]
    fn test_spec_override() {
        let validator = DictValidate::new(fake_dict())
            .with_spec(SpecConfig::new().field("fieldName3", Optional::value().shared()));
        let names: Vec<&String> = validator.spec().fields().keys().collect();
        assert_eq!(names, vec!["fieldName1", "fieldName2", "fieldName3"]);

        let replaced = fake_dict().merged_with(&SpecConfig::new().field(
            "fieldName1",
            Required::value().shared(),
        ));
        let names: Vec<&String> = replaced.fields().keys().collect();
        assert_eq!(names, vec!["fieldName1", "fieldName2"]);
        assert!(replaced.stops_on_fail());
    }

    #[test]
    fn test_model_validate() {
        let validator = ModelValidate::new(
            SpecConfig::new()
                .field("fieldName2", Required::new(vec![length(1, 3)]).shared())
                .field("hard_field", Optional::new(vec![length(1, 3)]).shared()),
        )
        .model("FakeModel");

        let record = Record::new("FakeModel")
            .with_alias("hard_field", "hardField")
            .with_field("fieldName2", "ab")
            .with_field("hardField", "abcdef");
        let result = validator.validate(record.into_value());
        assert_eq!(
            errors(&result),
            vec![e(Some("hardField"), Length::TOO_LONG)]
        );

        let result = validator.validate(Record::new("FakeModelInner").into_value());
        assert_eq!(errors(&result), vec![e(None, ModelValidate::NOT_MODEL)]);
        assert_eq!(
            result.errors()[0].message(),
            "'FakeModelInner()' is not an instance of FakeModel"
        );
    }

    #[test]
    fn test_model_modified_flag_reaches_field_context() {
        #[derive(Debug)]
        struct ModifiedOnly;

        impl Validator for ModifiedOnly {
            fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
                if ctx.is_modified() == Some(true) {
                    ctx.error("modified", "modified", message_values!());
                    return false;
                }
                true
            }
        }

        let validator = ModelValidate::new(SpecConfig::new().field("a", ModifiedOnly.shared()));
        let record = Record::new("R").with_field("a", 1);
        assert!(validator.validate(record.clone().into_value()).is_valid());

        let result = validator.validate(record.with_modified("a").into_value());
        assert_eq!(errors(&result), vec![e(Some("a"), "modified")]);
    }
}
