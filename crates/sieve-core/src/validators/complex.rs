//! Composite validators
//!
//! Composites own child validators and decide how child errors reach the
//! context they were given: merged as is, prefixed by item segment, or held
//! back until an aggregate verdict is known.
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

use super::basic::NotNone;
use super::{impl_configurable, SharedValidator, Validator};
use crate::context::path::FieldPath;
use crate::context::Context;
use crate::error::{ConfigError, Result};
use crate::options::{message_values, ValidatorOptions};
use crate::value::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

const NOT_ITERABLE: &str = "notIterable";
const NOT_ITERABLE_TEMPLATE: &str = "'$value' is not iterable";

/// Run `validator` against `value` in a fresh child of `parent`
fn run_child<'c>(
    validator: &dyn Validator,
    value: Cow<'c, Value>,
    parent: &'c Context<'c>,
) -> (bool, Context<'c>) {
    let child = parent.build_child(value, validator.is_step());
    let valid = validator.validate_with_context(&child);
    (valid, child)
}

/// Runs validators one after another against the same value
#[derive(Debug, Clone)]
pub struct Chain {
    validators: Vec<SharedValidator>,
    stop_on_fail: bool,
}

impl Chain {
    pub fn new(validators: Vec<SharedValidator>) -> Self {
        Self {
            validators,
            stop_on_fail: true,
        }
    }

    /// Append a validator
    pub fn then(mut self, validator: SharedValidator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Keep running after a failing validator when `false`
    pub fn stop_on_fail(mut self, stop_on_fail: bool) -> Self {
        self.stop_on_fail = stop_on_fail;
        self
    }

    pub fn validators(&self) -> &[SharedValidator] {
        &self.validators
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Validator for Chain {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let mut valid = true;
        for (index, validator) in self.validators.iter().enumerate() {
            if !validator.validate_within(ctx) {
                valid = false;
                if self.stop_on_fail {
                    log::trace!(
                        "Chain stopped at validator {} of {}",
                        index + 1,
                        self.validators.len()
                    );
                    return false;
                }
            }
        }
        valid
    }
}

/// Passes when any of its validators passes
///
/// When every alternative fails, all their errors are reported in order.
#[derive(Debug, Clone)]
pub struct SomeOf {
    validators: Vec<SharedValidator>,
}

impl SomeOf {
    pub fn new(validators: Vec<SharedValidator>) -> Self {
        Self { validators }
    }
}

impl Validator for SomeOf {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let mut attempts = Vec::with_capacity(self.validators.len());
        for validator in &self.validators {
            let (valid, child) = run_child(validator.as_ref(), Cow::Borrowed(ctx.value()), ctx);
            if valid {
                return true;
            }
            attempts.push(child);
        }

        for attempt in &attempts {
            ctx.import_errors(attempt, None);
        }
        false
    }
}

/// Validates every item of a list, mapping or record
///
/// Item errors are reported under the item's index, key or field name.
#[derive(Debug, Clone)]
pub struct AllItems {
    validator: SharedValidator,
    stop_on_fail: bool,
    options: ValidatorOptions,
}

impl AllItems {
    pub const NOT_ITERABLE: &'static str = NOT_ITERABLE;

    pub fn new(validator: SharedValidator) -> Self {
        Self {
            validator,
            stop_on_fail: true,
            options: Self::default_options(),
        }
    }

    pub fn stop_on_fail(mut self, stop_on_fail: bool) -> Self {
        self.stop_on_fail = stop_on_fail;
        self
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }
}

impl Validator for AllItems {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let Some(items) = ctx.value().items() else {
            self.options
                .report(ctx, NOT_ITERABLE, NOT_ITERABLE_TEMPLATE, message_values!());
            return false;
        };

        let mut valid = true;
        for (segment, item) in items {
            let (item_valid, child) = run_child(self.validator.as_ref(), item, ctx);
            if !item_valid {
                ctx.import_errors(&child, Some(&segment));
                valid = false;
                if self.stop_on_fail {
                    log::trace!("AllItems stopped at item '{}'", segment);
                    return false;
                }
            }
        }
        valid
    }
}

/// Bounds on the number of passing items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    min: Option<usize>,
    max: Option<usize>,
}

impl Bounds {
    /// Create bounds; at least one is required and `min` may not exceed `max`
    pub fn new(min: Option<usize>, max: Option<usize>) -> Result<Self> {
        match (min, max) {
            (None, None) => Err(ConfigError::missing_bounds("SomeItems")),
            (Some(min), Some(max)) if min > max => {
                Err(ConfigError::inverted_bounds("SomeItems", min, max))
            }
            _ => Ok(Self { min, max }),
        }
    }

    pub fn between(min: usize, max: usize) -> Result<Self> {
        Self::new(Some(min), Some(max))
    }

    pub fn min(&self) -> Option<usize> {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Some(1),
            max: None,
        }
    }
}

/// Requires the number of passing items to lie within [`Bounds`]
///
/// Errors of failing items are only reported when the count is out of
/// bounds; a successful outcome discards them.
#[derive(Debug, Clone)]
pub struct SomeItems {
    validator: SharedValidator,
    bounds: Bounds,
    stop_on_fail: bool,
    options: ValidatorOptions,
}

impl SomeItems {
    pub const TOO_MANY_VALID_ITEMS: &'static str = "tooManyValidItems";
    pub const TOO_FEW_VALID_ITEMS: &'static str = "tooFewValidItems";
    pub const NOT_ITERABLE: &'static str = NOT_ITERABLE;

    const TOO_MANY_TEMPLATE: &'static str = "Too many items pass validation";
    const TOO_FEW_TEMPLATE: &'static str = "Too few items pass validation";

    /// At least one item must pass
    pub fn new(validator: SharedValidator) -> Self {
        Self {
            validator,
            bounds: Bounds::default(),
            stop_on_fail: true,
            options: Self::default_options(),
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn stop_on_fail(mut self, stop_on_fail: bool) -> Self {
        self.stop_on_fail = stop_on_fail;
        self
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }

    fn bound_values(&self) -> indexmap::IndexMap<String, Value> {
        message_values!("min" => self.bounds.min, "max" => self.bounds.max)
    }
}

impl Validator for SomeItems {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let Some(items) = ctx.value().items() else {
            self.options
                .report(ctx, NOT_ITERABLE, NOT_ITERABLE_TEMPLATE, message_values!());
            return false;
        };

        let detail = ctx.build_child(Cow::Borrowed(ctx.value()), false);
        let mut passed = 0usize;
        let mut too_many = false;

        for (segment, item) in items {
            let (item_valid, child) = run_child(self.validator.as_ref(), item, ctx);
            if !item_valid {
                detail.import_errors(&child, Some(&segment));
                continue;
            }

            passed += 1;
            if !too_many && self.bounds.max.is_some_and(|max| passed > max) {
                too_many = true;
                self.options.report(
                    ctx,
                    Self::TOO_MANY_VALID_ITEMS,
                    Self::TOO_MANY_TEMPLATE,
                    self.bound_values(),
                );
                if self.stop_on_fail {
                    break;
                }
            }
        }

        let mut valid = !too_many;
        if valid && self.bounds.min.is_some_and(|min| passed < min) {
            self.options.report(
                ctx,
                Self::TOO_FEW_VALID_ITEMS,
                Self::TOO_FEW_TEMPLATE,
                self.bound_values(),
            );
            valid = false;
        }

        log::trace!("SomeItems: {} item(s) passed, valid={}", passed, valid);
        if !valid {
            ctx.import_errors(&detail, None);
        }
        valid
    }
}

/// Limits how many times equal items may occur
///
/// Reports at most one error: the first item (in order of first appearance)
/// repeated more than `max_occ` times, otherwise the first one occurring
/// fewer than `min_occ` times.
#[derive(Debug, Clone)]
pub struct ItemLimitedOccurrences {
    min_occ: usize,
    max_occ: usize,
    options: ValidatorOptions,
}

impl ItemLimitedOccurrences {
    pub const TOO_MANY_ITEM_OCCURRENCES: &'static str = "tooManyItemOccurrences";
    pub const TOO_FEW_ITEM_OCCURRENCES: &'static str = "tooFewItemOccurrences";
    pub const NOT_ITERABLE: &'static str = NOT_ITERABLE;

    const TOO_MANY_TEMPLATE: &'static str =
        "Item '$item' is repeated to many times. Limit is $max_occ.";
    const TOO_FEW_TEMPLATE: &'static str = "Item '$item' is not enough repeated. Limit is $min_occ.";

    /// Every item at most once
    pub fn new() -> Self {
        Self {
            min_occ: 0,
            max_occ: 1,
            options: Self::default_options(),
        }
    }

    pub fn with_limits(min_occ: usize, max_occ: usize) -> Result<Self> {
        if min_occ > max_occ {
            return Err(ConfigError::inverted_bounds(
                "ItemLimitedOccurrences",
                min_occ,
                max_occ,
            ));
        }
        Ok(Self {
            min_occ,
            max_occ,
            options: Self::default_options(),
        })
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }
}

impl Default for ItemLimitedOccurrences {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for ItemLimitedOccurrences {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let Some(items) = ctx.value().items() else {
            self.options
                .report(ctx, NOT_ITERABLE, NOT_ITERABLE_TEMPLATE, message_values!());
            return false;
        };

        let mut counts: Vec<(Cow<'_, Value>, usize)> = Vec::new();
        for (_, item) in items {
            match counts.iter_mut().find(|(seen, _)| seen.as_ref() == item.as_ref()) {
                Some((_, count)) => *count += 1,
                None => counts.push((item, 1)),
            }
        }

        let limits = message_values!("min_occ" => self.min_occ, "max_occ" => self.max_occ);

        if let Some((item, _)) = counts.iter().find(|(_, count)| *count > self.max_occ) {
            let mut values = limits;
            values.insert("item".to_string(), item.as_ref().clone());
            self.options
                .report(ctx, Self::TOO_MANY_ITEM_OCCURRENCES, Self::TOO_MANY_TEMPLATE, values);
            return false;
        }

        if let Some((item, _)) = counts.iter().find(|(_, count)| *count < self.min_occ) {
            let mut values = limits;
            values.insert("item".to_string(), item.as_ref().clone());
            self.options
                .report(ctx, Self::TOO_FEW_ITEM_OCCURRENCES, Self::TOO_FEW_TEMPLATE, values);
            return false;
        }

        true
    }
}

/// Applies a validator only when another field satisfies a precondition
///
/// The field is located by a [`FieldPath`] relative to the context. A null
/// field (unless `run_if_none`) or a field rejected by the field validator
/// makes the rule vacuously satisfied.
#[derive(Debug, Clone)]
pub struct IfField {
    validator: SharedValidator,
    field: FieldPath,
    field_validator: Option<SharedValidator>,
    run_if_none: bool,
    add_check_info: bool,
    options: ValidatorOptions,
}

impl IfField {
    pub const NEEDS_VALIDATE: &'static str = "needsValidate";
    const NEEDS_VALIDATE_TEMPLATE: &'static str =
        "Some validate error due to field '$field_name' has value '$field_value'.";

    pub fn new(field: &str, validator: SharedValidator) -> Self {
        Self {
            validator,
            field: FieldPath::parse(field),
            field_validator: None,
            run_if_none: false,
            add_check_info: true,
            options: Self::default_options(),
        }
    }

    /// Only apply the rule when the field passes `validator`
    pub fn when(mut self, validator: SharedValidator) -> Self {
        self.field_validator = Some(validator);
        self
    }

    /// Evaluate even when the field resolves to null
    pub fn run_if_none(mut self, run_if_none: bool) -> Self {
        self.run_if_none = run_if_none;
        self
    }

    /// Append an error naming the field on failure
    pub fn add_check_info(mut self, add_check_info: bool) -> Self {
        self.add_check_info = add_check_info;
        self
    }

    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }
}

impl Validator for IfField {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let field_value = self.field.resolve(ctx);

        if field_value.is_null() && !self.run_if_none {
            return true;
        }

        if let Some(field_validator) = &self.field_validator {
            let (applies, _) = run_child(field_validator.as_ref(), Cow::Borrowed(&field_value), ctx);
            if !applies {
                log::trace!("IfField precondition on '{}' does not hold", self.field);
                return true;
            }
        }

        if self.validator.validate_within(ctx) {
            return true;
        }

        if self.add_check_info {
            self.options.report(
                ctx,
                Self::NEEDS_VALIDATE,
                Self::NEEDS_VALIDATE_TEMPLATE,
                message_values!("field_name" => self.field.as_str(), "field_value" => field_value),
            );
        }
        false
    }
}

/// Builds its validator when evaluated
///
/// Allows self-referential trees: the factory may return a validator that
/// contains this `Deferred` again.
#[derive(Clone)]
pub struct Deferred {
    factory: Arc<dyn Fn(&Context<'_>) -> SharedValidator + Send + Sync>,
}

impl Deferred {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&Context<'_>) -> SharedValidator + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
        }
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").finish_non_exhaustive()
    }
}

impl Validator for Deferred {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let validator = (self.factory)(ctx);
        let (valid, child) = run_child(validator.as_ref(), Cow::Borrowed(ctx.value()), ctx);
        ctx.import_errors(&child, None);
        valid
    }
}

/// Rejects empty values, then runs a [`Chain`]
///
/// Emptiness is decided by a validator, [`NotNone`] by default.
#[derive(Debug, Clone)]
pub struct Required {
    chain: Chain,
    empty_validator: SharedValidator,
    options: ValidatorOptions,
}

impl Required {
    pub const REQUIRED: &'static str = "required";
    const REQUIRED_TEMPLATE: &'static str = "Value is required and can not be empty";

    pub fn new(validators: Vec<SharedValidator>) -> Self {
        Self {
            chain: Chain::new(validators),
            empty_validator: NotNone::new().shared(),
            options: Self::default_options(),
        }
    }

    /// Required with nothing else to check
    pub fn value() -> Self {
        Self::new(Vec::new())
    }

    /// Decide emptiness with `validator` instead of a null check
    pub fn with_empty_validator(mut self, validator: SharedValidator) -> Self {
        self.empty_validator = validator;
        self
    }

    pub fn stop_on_fail(mut self, stop_on_fail: bool) -> Self {
        self.chain = self.chain.stop_on_fail(stop_on_fail);
        self
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }
}

impl Validator for Required {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let (present, _) = run_child(self.empty_validator.as_ref(), Cow::Borrowed(ctx.value()), ctx);
        if !present {
            self.options.report(
                ctx,
                Self::REQUIRED,
                Self::REQUIRED_TEMPLATE,
                message_values!(),
            );
            return false;
        }
        self.chain.validate_with_context(ctx)
    }
}

/// Accepts empty values, otherwise runs a [`Chain`]
#[derive(Debug, Clone)]
pub struct Optional {
    chain: Chain,
    empty_validator: SharedValidator,
}

impl Optional {
    pub fn new(validators: Vec<SharedValidator>) -> Self {
        Self {
            chain: Chain::new(validators),
            empty_validator: NotNone::new().shared(),
        }
    }

    /// Optional with nothing else to check
    pub fn value() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_empty_validator(mut self, validator: SharedValidator) -> Self {
        self.empty_validator = validator;
        self
    }

    pub fn stop_on_fail(mut self, stop_on_fail: bool) -> Self {
        self.chain = self.chain.stop_on_fail(stop_on_fail);
        self
    }
}

impl Validator for Optional {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let (present, _) = run_child(self.empty_validator.as_ref(), Cow::Borrowed(ctx.value()), ctx);
        if !present {
            return true;
        }
        self.chain.validate_with_context(ctx)
    }
}

impl_configurable!(AllItems, SomeItems, ItemLimitedOccurrences, IfField, Required);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::basic::{Email, Length, NotEmpty, Regexp};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn errors(ctx: &Context<'_>) -> Vec<(Option<String>, String, String)> {
        ctx.errors()
            .iter()
            .map(|e| {
                (
                    e.field_path().map(str::to_string),
                    e.code().to_string(),
                    e.message().to_string(),
                )
            })
            .collect()
    }

    fn length(min: usize, max: usize) -> SharedValidator {
        Length::range(min, max).unwrap().shared()
    }

    /// Counts its evaluations, passing or failing as configured
    #[derive(Debug)]
    struct Counting {
        calls: Arc<AtomicUsize>,
        passes: bool,
    }

    fn counting(passes: bool) -> (SharedValidator, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let validator = Counting {
            calls: Arc::clone(&calls),
            passes,
        };
        (validator.shared(), calls)
    }

    impl Validator for Counting {
        fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.passes {
                ctx.error("counted", "'$value' was counted", message_values!());
            }
            self.passes
        }
    }

    #[test]
    fn test_chain_stops_on_first_failure() {
        let chain = Chain::new(vec![
            length(14, 16),
            Regexp::new("^abc").unwrap().shared(),
            Email::new().shared(),
        ]);

        assert!(chain.validate(Value::from("abcdefg@test.com")).is_valid());

        let result = chain.validate(Value::from("abcdefghijklmnoqp"));
        assert_eq!(
            errors(&result),
            vec![(
                None,
                Length::TOO_LONG.to_string(),
                "'abcdefghijklmnoqp' is more than 16 unit length".to_string()
            )]
        );
    }

    #[test]
    fn test_chain_skips_children_after_failure() {
        let (first, first_calls) = counting(false);
        let (second, second_calls) = counting(true);
        let chain = Chain::new(vec![first, second]);

        let result = chain.validate(Value::from("x"));
        assert_eq!(result.len(), 1);
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);

        let (first, first_calls) = counting(false);
        let (second, second_calls) = counting(true);
        let chain = Chain::new(vec![first, second]).stop_on_fail(false);

        assert!(!chain.validate(Value::from("x")).is_valid());
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_chain_collects_all_failures() {
        let chain = Chain::new(vec![
            length(14, 16),
            Regexp::new("^abc").unwrap().shared(),
            Email::new().shared(),
        ])
        .stop_on_fail(false);

        let result = chain.validate(Value::from("abadefghijk+test.com"));
        let codes: Vec<String> = errors(&result).into_iter().map(|e| e.1).collect();
        assert_eq!(codes, vec!["tooLong", "notMatch", "notMail"]);
    }

    #[test]
    fn test_some_of() {
        let some = SomeOf::new(vec![
            Regexp::new("^cba").unwrap().shared(),
            Regexp::new("^abc")
                .unwrap()
                .with_options(ValidatorOptions::new().with_code(Regexp::NOT_MATCH, "ouch"))
                .shared(),
            Email::new().shared(),
        ]);

        assert!(some.validate(Value::from("cbaaaa")).is_valid());
        assert!(some.validate(Value::from("abcdefg")).is_valid());
        assert!(some.validate(Value::from("bcdefg@test.com")).is_valid());

        let result = some.validate(Value::from("abadefghijk+test.com"));
        let codes: Vec<String> = errors(&result).into_iter().map(|e| e.1).collect();
        assert_eq!(codes, vec!["notMatch", "ouch", "notMail"]);
        assert_eq!(
            result.errors()[1].message(),
            "'abadefghijk+test.com' does not match against pattern '^abc'"
        );
    }

    #[test]
    fn test_some_of_stops_at_first_success() {
        let (failing, failing_calls) = counting(false);
        let (passing, passing_calls) = counting(true);
        let (unreached, unreached_calls) = counting(true);
        let some = SomeOf::new(vec![failing, passing, unreached]);

        let result = some.validate(Value::from("x"));
        assert!(result.is_valid());
        assert_eq!(failing_calls.load(Ordering::SeqCst), 1);
        assert_eq!(passing_calls.load(Ordering::SeqCst), 1);
        assert_eq!(unreached_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_all_items_paths() {
        let validator = AllItems::new(length(14, 16)).stop_on_fail(false);
        let result = validator.validate(Value::from(vec![
            "test",
            "12345678901234567",
            "abcdefghijklmnsssssssso",
        ]));
        let paths: Vec<Option<String>> = errors(&result).into_iter().map(|e| e.0).collect();
        assert_eq!(
            paths,
            vec![Some("0".to_string()), Some("1".to_string()), Some("2".to_string())]
        );

        let nested = AllItems::new(AllItems::new(length(5, 16)).shared());
        let result = nested.validate(Value::from(json!([["testaaa", "assa"], ["auds", "aass"]])));
        assert_eq!(
            errors(&result),
            vec![(
                Some("0.1".to_string()),
                Length::TOO_SHORT.to_string(),
                "'assa' is less than 5 unit length".to_string()
            )]
        );
    }

    #[test]
    fn test_all_items_not_iterable() {
        let result = AllItems::new(length(1, 2)).validate(Value::Int(3));
        assert_eq!(
            errors(&result),
            vec![(
                None,
                AllItems::NOT_ITERABLE.to_string(),
                "'3' is not iterable".to_string()
            )]
        );
    }

    #[test]
    fn test_some_items_too_few() {
        let validator = SomeItems::new(length(4, 6)).with_bounds(Bounds::between(2, 3).unwrap());

        assert!(validator
            .validate(Value::from(vec!["abcde", "12345678901234", "abcd", "qawsw"]))
            .is_valid());

        let result = validator.validate(Value::from(vec!["tes", "1234", "abcdefghijklmno"]));
        assert_eq!(
            errors(&result),
            vec![
                (
                    None,
                    SomeItems::TOO_FEW_VALID_ITEMS.to_string(),
                    "Too few items pass validation".to_string()
                ),
                (
                    Some("0".to_string()),
                    Length::TOO_SHORT.to_string(),
                    "'tes' is less than 4 unit length".to_string()
                ),
                (
                    Some("2".to_string()),
                    Length::TOO_LONG.to_string(),
                    "'abcdefghijklmno' is more than 6 unit length".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_some_items_too_many() {
        let data = Value::from(vec!["test", "12345", "asaa", "abcde", "wewwwwww", "sd"]);

        let validator = SomeItems::new(length(4, 6)).with_bounds(Bounds::between(2, 3).unwrap());
        let result = validator.validate(data.clone());
        assert_eq!(result.len(), 1);
        assert_eq!(result.errors()[0].code(), SomeItems::TOO_MANY_VALID_ITEMS);

        let validator = SomeItems::new(length(4, 6))
            .with_bounds(Bounds::between(1, 2).unwrap())
            .stop_on_fail(false);
        let result = validator.validate(data);
        let paths: Vec<Option<String>> = errors(&result).into_iter().map(|e| e.0).collect();
        assert_eq!(paths, vec![None, Some("4".to_string()), Some("5".to_string())]);
        assert_eq!(result.errors()[0].code(), SomeItems::TOO_MANY_VALID_ITEMS);
    }

    #[test]
    fn test_some_items_success_discards_item_errors() {
        let validator = SomeItems::new(length(4, 6));
        let result = validator.validate(Value::from(vec!["a", "abcd"]));
        assert!(result.is_valid());
    }

    #[test]
    fn test_bounds_configuration() {
        assert!(Bounds::new(None, None).is_err());
        assert!(Bounds::between(3, 2).is_err());
        assert_eq!(Bounds::default().min(), Some(1));
    }

    #[test]
    fn test_item_limited_occurrences_default() {
        let validator = ItemLimitedOccurrences::new();
        assert!(validator.validate(Value::from(Vec::<Value>::new())).is_valid());
        assert!(validator.validate(Value::from(vec!["aaa", "bbb"])).is_valid());

        let result = validator.validate(Value::from(vec!["aaa", "aaa", "bbb", "ccc", "ccc"]));
        assert_eq!(
            errors(&result),
            vec![(
                None,
                ItemLimitedOccurrences::TOO_MANY_ITEM_OCCURRENCES.to_string(),
                "Item 'aaa' is repeated to many times. Limit is 1.".to_string()
            )]
        );
    }

    #[test]
    fn test_item_limited_occurrences_custom_limits() {
        let validator = ItemLimitedOccurrences::with_limits(2, 3).unwrap();
        assert!(validator
            .validate(Value::from(vec!["aaa", "aaa", "bbb", "bbb", "bbb"]))
            .is_valid());

        let result =
            validator.validate(Value::from(vec!["aaa", "bbb", "bbb", "ccc", "ccc", "ccc"]));
        assert_eq!(
            result.errors()[0].message(),
            "Item 'aaa' is not enough repeated. Limit is 2."
        );

        let result = validator.validate(Value::from(vec![
            "aaa", "bbb", "bbb", "ccc", "ccc", "ccc", "ccc",
        ]));
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.errors()[0].message(),
            "Item 'ccc' is repeated to many times. Limit is 3."
        );

        assert!(ItemLimitedOccurrences::with_limits(3, 2).is_err());
    }

    #[test]
    fn test_if_field() {
        let validator = IfField::new("fieldname1", length(4, 6)).when(length(1, 2));

        let parent = Context::new(Value::from(json!({"fieldname1": "a"})));
        assert!(validator
            .validate_in(Cow::Owned(Value::from("abcd")), Some(&parent))
            .is_valid());

        let parent = Context::new(Value::from(json!({"fieldname1": "abcd"})));
        assert!(validator
            .validate_in(Cow::Owned(Value::from("a")), Some(&parent))
            .is_valid());

        assert!(validator.validate(Value::from("a")).is_valid());

        let parent = Context::new(Value::from(json!({"fieldname1": "a"})));
        let result = validator.validate_in(Cow::Owned(Value::from("abcdefg")), Some(&parent));
        assert_eq!(
            errors(&result),
            vec![
                (
                    None,
                    Length::TOO_LONG.to_string(),
                    "'abcdefg' is more than 6 unit length".to_string()
                ),
                (
                    None,
                    IfField::NEEDS_VALIDATE.to_string(),
                    "Some validate error due to field 'fieldname1' has value 'a'.".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_if_field_skips_target_when_guard_rejects() {
        let (target, calls) = counting(false);
        let validator = IfField::new("fieldname1", target).when(length(1, 2));

        let parent = Context::new(Value::from(json!({"fieldname1": "abcd"})));
        assert!(validator
            .validate_in(Cow::Owned(Value::from("x")), Some(&parent))
            .is_valid());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(validator.validate(Value::from("x")).is_valid());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let parent = Context::new(Value::from(json!({"fieldname1": "a"})));
        assert!(!validator
            .validate_in(Cow::Owned(Value::from("x")), Some(&parent))
            .is_valid());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_if_field_run_if_none() {
        let validator = IfField::new("fieldname1", length(4, 6));
        assert!(validator.validate(Value::from("abcdefg")).is_valid());

        let validator = IfField::new("fieldname1", length(4, 6)).run_if_none(true);
        let result = validator.validate(Value::from("abcdefg"));
        assert_eq!(result.len(), 2);
        assert_eq!(
            result.errors()[1].message(),
            "Some validate error due to field 'fieldname1' has value 'null'."
        );

        let validator = IfField::new("fieldname1", length(4, 6))
            .run_if_none(true)
            .add_check_info(false);
        let result = validator.validate(Value::from("abcdefg"));
        assert_eq!(result.len(), 1);
        assert_eq!(result.errors()[0].code(), Length::TOO_LONG);
    }

    #[test]
    fn test_required() {
        let validator = Required::new(vec![length(7, 8)]);
        assert!(validator.validate(Value::from("asdfghw")).is_valid());

        let result = validator.validate(Value::Null);
        assert_eq!(
            errors(&result),
            vec![(
                None,
                Required::REQUIRED.to_string(),
                "Value is required and can not be empty".to_string()
            )]
        );

        let result = validator.validate(Value::from("as"));
        assert_eq!(result.errors()[0].code(), Length::TOO_SHORT);

        let validator =
            Required::new(vec![length(7, 8)]).with_empty_validator(NotEmpty::new().shared());
        let result = validator.validate(Value::from(""));
        assert_eq!(result.errors()[0].code(), Required::REQUIRED);
    }

    #[test]
    fn test_optional() {
        let validator = Optional::new(vec![length(7, 8)]);
        assert!(validator.validate(Value::Null).is_valid());
        assert!(validator.validate(Value::from("asdfghw")).is_valid());

        let result = validator.validate(Value::from(""));
        assert_eq!(
            errors(&result),
            vec![(
                None,
                Length::TOO_SHORT.to_string(),
                "'' is less than 7 unit length".to_string()
            )]
        );

        let validator =
            Optional::new(vec![length(7, 8)]).with_empty_validator(NotEmpty::new().shared());
        assert!(validator.validate(Value::from("")).is_valid());
    }

    #[test]
    fn test_deferred_builds_at_evaluation() {
        let validator = Deferred::new(|ctx| {
            if ctx.value().as_str().is_some() {
                Length::at_least(3).shared()
            } else {
                AllItems::new(Length::at_least(3).shared()).shared()
            }
        });

        assert!(validator.validate(Value::from("abc")).is_valid());
        let result = validator.validate(Value::from(vec!["abc", "a"]));
        assert_eq!(result.errors()[0].field_path(), Some("1"));
    }
}
