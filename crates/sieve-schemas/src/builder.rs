//! Rule trees to validator trees
//!
//! Definitions are built once into a shared table. `ref` nodes become
//! [`Deferred`] validators holding a weak handle on that table, so recursive
//! definitions do not loop at build time or form reference cycles. Validators
//! handed out by a [`RuleSet`] hold the table strongly, so their references
//! keep resolving after the rule set itself is dropped.
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

use crate::document::{Rule, RuleDocument, SpecRule};
use crate::loader::error::{LoaderError, LoaderResult};
use indexmap::IndexMap;
use sieve_core::{
    AllItems, AnyOf, Bounds, Chain, Context, Deferred, DictValidate, Email, EqualTo, IfField,
    IpAddress, IsEmpty, IsNone, ItemLimitedOccurrences, Length, MacAddress, ModelValidate,
    NoneOf, NotEmpty, NotEmptyString, NotEqualTo, NotNone, NumberRange, Optional, Regexp,
    Required, SharedValidator, SomeItems, SomeOf, SpecConfig, StringNotContaining, Url, Uuid,
    Validator, Value,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, Weak};

/// Code reported by a `ref` whose definitions are gone
pub const UNRESOLVED_REFERENCE: &str = "unresolvedReference";

/// Built definitions, filled once every definition has been built
#[derive(Debug, Default)]
struct DefinitionTable {
    validators: OnceLock<IndexMap<String, SharedValidator>>,
}

impl DefinitionTable {
    fn get(&self, name: &str) -> Option<SharedValidator> {
        self.validators.get()?.get(name).cloned()
    }
}

/// Validators built from a [`RuleDocument`]
#[derive(Debug, Clone)]
pub struct RuleSet {
    definitions: Arc<DefinitionTable>,
    root: Option<SharedValidator>,
    source: PathBuf,
}

impl RuleSet {
    /// Build every rule of `document`
    ///
    /// `source` is only used to give errors a location.
    pub fn build(document: &RuleDocument, source: impl AsRef<Path>) -> LoaderResult<Self> {
        let source = source.as_ref().to_path_buf();
        check_alias_cycles(document, &source)?;

        let definitions = Arc::new(DefinitionTable::default());
        let builder = RuleBuilder {
            names: document.definitions.keys().cloned().collect(),
            table: Arc::downgrade(&definitions),
            source: &source,
        };

        let mut built = IndexMap::with_capacity(document.definitions.len());
        for (name, rule) in &document.definitions {
            let validator = builder.build(rule, &format!("definitions.{}", name))?;
            built.insert(name.clone(), validator);
        }
        // The table is fresh and private, so it cannot be set yet
        let _ = definitions.validators.set(built);

        let root = document
            .rule
            .as_ref()
            .map(|rule| builder.build(rule, "rule"))
            .transpose()?
            .map(|validator| Anchored::wrap(validator, &definitions));

        log::debug!(
            "Built rule set from '{}': {} definition(s), root rule {}",
            source.display(),
            document.definitions.len(),
            if root.is_some() { "present" } else { "absent" }
        );

        Ok(Self {
            definitions,
            root,
            source,
        })
    }

    /// The document's root rule
    pub fn root(&self) -> Option<SharedValidator> {
        self.root.clone()
    }

    /// A named definition
    pub fn definition(&self, name: &str) -> Option<SharedValidator> {
        self.definitions
            .get(name)
            .map(|validator| Anchored::wrap(validator, &self.definitions))
    }

    /// Names of all definitions, in document order
    pub fn definition_names(&self) -> Vec<String> {
        self.definitions
            .validators
            .get()
            .map(|table| table.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The definition called `name`, or the root rule when `name` is `None`
    pub fn select(&self, name: Option<&str>) -> LoaderResult<SharedValidator> {
        match name {
            Some(name) => self
                .definition(name)
                .ok_or_else(|| LoaderError::missing_rule(name, self.source.clone())),
            None => self
                .root()
                .ok_or_else(|| LoaderError::missing_rule("rule", self.source.clone())),
        }
    }

    /// Validate `value` against the root rule
    pub fn validate(&self, value: Value) -> LoaderResult<Context<'static>> {
        Ok(self.select(None)?.validate(value))
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// A validator keeping its rule set's definitions alive
#[derive(Debug)]
struct Anchored {
    inner: SharedValidator,
    _definitions: Arc<DefinitionTable>,
}

impl Anchored {
    fn wrap(inner: SharedValidator, definitions: &Arc<DefinitionTable>) -> SharedValidator {
        Self {
            inner,
            _definitions: Arc::clone(definitions),
        }
        .shared()
    }
}

impl Validator for Anchored {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        self.inner.validate_with_context(ctx)
    }

    fn is_step(&self) -> bool {
        self.inner.is_step()
    }
}

/// Stands in for a definition that can no longer be reached
#[derive(Debug)]
struct Unresolved {
    name: String,
}

impl Validator for Unresolved {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let mut values = IndexMap::new();
        values.insert("name".to_string(), Value::from(self.name.as_str()));
        ctx.error(
            UNRESOLVED_REFERENCE,
            "Definition '$name' is no longer available",
            values,
        );
        false
    }
}

/// Reject definitions that are only references to each other
fn check_alias_cycles(document: &RuleDocument, source: &Path) -> LoaderResult<()> {
    for start in document.definitions.keys() {
        let mut chain = vec![start.clone()];
        let mut current = start;
        while let Some(Rule::Ref { name }) = document.definitions.get(current) {
            if chain.contains(name) {
                chain.push(name.clone());
                return Err(LoaderError::circular_reference(&chain, source.to_path_buf()));
            }
            chain.push(name.clone());
            current = name;
        }
    }
    Ok(())
}

struct RuleBuilder<'a> {
    names: Vec<String>,
    table: Weak<DefinitionTable>,
    source: &'a Path,
}

impl RuleBuilder<'_> {
    fn build(&self, rule: &Rule, at: &str) -> LoaderResult<SharedValidator> {
        let validator = match rule {
            Rule::Chain {
                validators,
                stop_on_fail,
            } => Chain::new(self.build_all(validators, at)?)
                .stop_on_fail(*stop_on_fail)
                .shared(),
            Rule::SomeOf { validators } => SomeOf::new(self.build_all(validators, at)?).shared(),
            Rule::AllItems {
                validator,
                stop_on_fail,
                options,
            } => AllItems::new(self.build(validator, &format!("{}.validator", at))?)
                .stop_on_fail(*stop_on_fail)
                .with_options(options.clone())
                .shared(),
            Rule::SomeItems {
                validator,
                min,
                max,
                stop_on_fail,
                options,
            } => {
                let bounds = Bounds::new(*min, *max).map_err(|e| self.invalid(at, e))?;
                SomeItems::new(self.build(validator, &format!("{}.validator", at))?)
                    .with_bounds(bounds)
                    .stop_on_fail(*stop_on_fail)
                    .with_options(options.clone())
                    .shared()
            }
            Rule::ItemLimitedOccurrences {
                min_occ,
                max_occ,
                options,
            } => ItemLimitedOccurrences::with_limits(*min_occ, *max_occ)
                .map_err(|e| self.invalid(at, e))?
                .with_options(options.clone())
                .shared(),
            Rule::IfField {
                field,
                validator,
                when,
                run_if_none,
                add_check_info,
                options,
            } => {
                let mut if_field =
                    IfField::new(field, self.build(validator, &format!("{}.validator", at))?)
                        .run_if_none(*run_if_none)
                        .add_check_info(*add_check_info)
                        .with_options(options.clone());
                if let Some(when) = when {
                    if_field = if_field.when(self.build(when, &format!("{}.when", at))?);
                }
                if_field.shared()
            }
            Rule::Required {
                validators,
                empty,
                stop_on_fail,
                options,
            } => {
                let mut required = Required::new(self.build_all(validators, at)?)
                    .stop_on_fail(*stop_on_fail)
                    .with_options(options.clone());
                if let Some(empty) = empty {
                    required =
                        required.with_empty_validator(self.build(empty, &format!("{}.empty", at))?);
                }
                required.shared()
            }
            Rule::Optional {
                validators,
                empty,
                stop_on_fail,
            } => {
                let mut optional =
                    Optional::new(self.build_all(validators, at)?).stop_on_fail(*stop_on_fail);
                if let Some(empty) = empty {
                    optional =
                        optional.with_empty_validator(self.build(empty, &format!("{}.empty", at))?);
                }
                optional.shared()
            }
            Rule::Dict { spec, options } => DictValidate::new(self.build_spec(spec, at)?)
                .with_options(options.clone())
                .shared(),
            Rule::Model {
                model,
                spec,
                options,
            } => {
                let mut validator =
                    ModelValidate::new(self.build_spec(spec, at)?).with_options(options.clone());
                if let Some(model) = model {
                    validator = validator.model(model);
                }
                validator.shared()
            }
            Rule::Ref { name } => self.build_ref(name, at)?,
            leaf => self.build_leaf(leaf, at)?,
        };
        Ok(validator)
    }

    fn build_leaf(&self, rule: &Rule, at: &str) -> LoaderResult<SharedValidator> {
        let validator = match rule {
            Rule::EqualTo { value, options } => EqualTo::new(value.clone())
                .with_options(options.clone())
                .shared(),
            Rule::NotEqualTo { value, options } => NotEqualTo::new(value.clone())
                .with_options(options.clone())
                .shared(),
            Rule::StringNotContaining {
                token,
                case_insensitive,
                options,
            } => {
                let mut validator = StringNotContaining::new(token.as_str());
                if *case_insensitive {
                    validator = validator.case_insensitive();
                }
                validator.with_options(options.clone()).shared()
            }
            Rule::Length { min, max, options } => Length::new(*min, *max)
                .map_err(|e| self.invalid(at, e))?
                .with_options(options.clone())
                .shared(),
            Rule::NumberRange { min, max, options } => NumberRange::new(min.clone(), max.clone())
                .map_err(|e| self.invalid(at, e))?
                .with_options(options.clone())
                .shared(),
            Rule::Regexp {
                pattern,
                case_insensitive,
                options,
            } => {
                let regexp = if *case_insensitive {
                    Regexp::case_insensitive(pattern)
                } else {
                    Regexp::new(pattern)
                };
                regexp
                    .map_err(|e| self.invalid(at, e))?
                    .with_options(options.clone())
                    .shared()
            }
            Rule::Email { options } => Email::new().with_options(options.clone()).shared(),
            Rule::MacAddress { options } => {
                MacAddress::new().with_options(options.clone()).shared()
            }
            Rule::Url {
                require_tld,
                options,
            } => Url::new()
                .require_tld(*require_tld)
                .with_options(options.clone())
                .shared(),
            Rule::Uuid { options } => Uuid::new().with_options(options.clone()).shared(),
            Rule::IpAddress {
                ipv4,
                ipv6,
                options,
            } => IpAddress::new(*ipv4, *ipv6)
                .map_err(|e| self.invalid(at, e))?
                .with_options(options.clone())
                .shared(),
            Rule::AnyOf { values, options } => AnyOf::new(values.iter().cloned())
                .with_options(options.clone())
                .shared(),
            Rule::NoneOf { values, options } => NoneOf::new(values.iter().cloned())
                .with_options(options.clone())
                .shared(),
            Rule::IsEmpty { options } => IsEmpty::new().with_options(options.clone()).shared(),
            Rule::NotEmpty { options } => NotEmpty::new().with_options(options.clone()).shared(),
            Rule::NotEmptyString { options } => {
                NotEmptyString::new().with_options(options.clone()).shared()
            }
            Rule::IsNone { options } => IsNone::new().with_options(options.clone()).shared(),
            Rule::NotNone { options } => NotNone::new().with_options(options.clone()).shared(),
            composite => {
                return Err(LoaderError::invalid_document(
                    self.source.to_path_buf(),
                    format!("'{}' at '{}' is not a leaf rule", composite.kind(), at),
                ))
            }
        };
        Ok(validator)
    }

    fn build_all(&self, rules: &[Rule], at: &str) -> LoaderResult<Vec<SharedValidator>> {
        rules
            .iter()
            .enumerate()
            .map(|(i, rule)| self.build(rule, &format!("{}.validators.{}", at, i)))
            .collect()
    }

    fn build_spec(&self, spec: &SpecRule, at: &str) -> LoaderResult<SpecConfig> {
        let mut config = SpecConfig::new();
        for (name, rule) in &spec.fields {
            config = config.field(name.clone(), self.build(rule, &format!("{}.fields.{}", at, name))?);
        }
        if let Some(rule) = &spec.key_validator {
            config = config.key_validator(self.build(rule, &format!("{}.key_validator", at))?);
        }
        if let Some(rule) = &spec.value_validator {
            config = config.value_validator(self.build(rule, &format!("{}.value_validator", at))?);
        }
        if let Some(stop_on_fail) = spec.stop_on_fail {
            config = config.stop_on_fail(stop_on_fail);
        }
        Ok(config)
    }

    fn build_ref(&self, name: &str, at: &str) -> LoaderResult<SharedValidator> {
        if !self.names.iter().any(|known| known == name) {
            return Err(LoaderError::unknown_reference(
                name,
                at,
                self.source.to_path_buf(),
            ));
        }

        let table = self.table.clone();
        let name = name.to_string();
        Ok(Deferred::new(move |_| resolve_definition(&table, &name)).shared())
    }

    fn invalid(&self, at: &str, error: sieve_core::ConfigError) -> LoaderError {
        LoaderError::invalid_validator(at, self.source.to_path_buf(), error)
    }
}

fn resolve_definition(table: &Weak<DefinitionTable>, name: &str) -> SharedValidator {
    match table.upgrade().and_then(|table| table.get(name)) {
        Some(validator) => validator,
        None => {
            log::warn!("Definition '{}' is no longer available", name);
            Unresolved {
                name: name.to_string(),
            }
            .shared()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule_set(yaml: &str) -> LoaderResult<RuleSet> {
        let document: RuleDocument = serde_yaml::from_str(yaml).unwrap();
        RuleSet::build(&document, "test.yaml")
    }

    #[test]
    fn test_build_root_rule() {
        let rules = rule_set(
            r#"
rule:
  type: all_items
  validator: { type: length, min: 14, max: 16 }
"#,
        )
        .unwrap();

        let result = rules.validate(Value::from(json!(["test", "12345678901234"]))).unwrap();
        let errors = result.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field_path(), Some("0"));
        assert_eq!(errors[0].message(), "'test' is less than 14 unit length");
    }

    #[test]
    fn test_recursive_definition() {
        let rules = rule_set(
            r#"
definitions:
  node:
    type: dict
    fields:
      value: { type: required, validators: [{ type: number_range, min: 0 }] }
      children:
        type: optional
        validators:
          - type: all_items
            validator: { type: ref, name: node }
rule: { type: ref, name: node }
"#,
        )
        .unwrap();

        let tree = json!({"value": 1, "children": [{"value": 2}, {"value": 3, "children": [{"value": -1}]}]});
        let result = rules.validate(Value::from(tree)).unwrap();
        let paths: Vec<String> = result
            .errors()
            .iter()
            .map(|e| e.field_path().unwrap_or_default().to_string())
            .collect();
        assert_eq!(paths, vec!["children.1.children.0.value".to_string()]);
        assert_eq!(rules.definition_names(), vec!["node".to_string()]);
    }

    #[test]
    fn test_unknown_reference() {
        let err = rule_set("rule: { type: ref, name: missing }").unwrap_err();
        assert!(matches!(
            err,
            LoaderError::UnknownReference { ref reference, ref location, .. }
                if reference == "missing" && location == "rule"
        ));
    }

    #[test]
    fn test_alias_cycle() {
        let err = rule_set(
            r#"
definitions:
  a: { type: ref, name: b }
  b: { type: ref, name: a }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoaderError::CircularReference { .. }));
    }

    #[test]
    fn test_invalid_configuration_location() {
        let err = rule_set(
            r#"
rule:
  type: dict
  fields:
    name: { type: length, min: 5, max: 2 }
"#,
        )
        .unwrap_err();
        match err {
            LoaderError::InvalidValidator { location, .. } => {
                assert_eq!(location, "rule.fields.name")
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_select() {
        let rules = rule_set("definitions:\n  short: { type: length, max: 2 }").unwrap();
        assert!(rules.select(None).is_err());
        assert!(rules.select(Some("short")).is_ok());
        assert!(matches!(
            rules.select(Some("long")),
            Err(LoaderError::MissingRule { .. })
        ));
    }

    #[test]
    fn test_root_outlives_rule_set() {
        let root = rule_set(
            r#"
definitions:
  short: { type: length, max: 2 }
rule:
  type: all_items
  stop_on_fail: false
  validator: { type: ref, name: short }
"#,
        )
        .unwrap()
        .root()
        .unwrap();

        let result = root.validate(Value::from(json!(["way too long", "also too long"])));
        let found: Vec<(String, Option<String>)> = result
            .errors()
            .iter()
            .map(|e| (e.code().to_string(), e.field_path().map(str::to_string)))
            .collect();
        assert_eq!(
            found,
            vec![
                ("tooLong".to_string(), Some("0".to_string())),
                ("tooLong".to_string(), Some("1".to_string())),
            ]
        );
    }

    #[test]
    fn test_definition_outlives_rule_set() {
        let rules = rule_set(
            r#"
definitions:
  short: { type: length, max: 2 }
  alias: { type: chain, validators: [{ type: ref, name: short }] }
"#,
        )
        .unwrap();

        let alias = rules.definition("alias").unwrap();
        drop(rules);

        let result = alias.validate(Value::from("abc"));
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].code(), "tooLong");
    }

    #[test]
    fn test_unreachable_definition_fails_closed() {
        let validator = resolve_definition(&Weak::new(), "gone");
        let result = validator.validate(Value::from("anything"));
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code(), UNRESOLVED_REFERENCE);
        assert_eq!(
            result.errors()[0].message(),
            "Definition 'gone' is no longer available"
        );
    }
}
