//! Evaluation contexts
//!
//! A [`Context`] is one node of the parent-linked chain built while a value
//! is validated. It owns the errors found at its node; errors reach a parent
//! only through an explicit [`Context::import_errors`]. Structural
//! validators create *step* contexts, which are the units field paths
//! navigate through.
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

pub mod path;

use crate::message::ValidationError;
use crate::value::Value;
use indexmap::IndexMap;
use path::FieldPath;
use std::borrow::Cow;
use std::cell::{Ref, RefCell};
use std::fmt;

/// Replacement for `value` in messages of redacting contexts
pub const DEFAULT_HIDDEN_PLACEHOLDER: &str = "***hidden***";

/// A scoped node of the validation tree
pub struct Context<'a> {
    value: Cow<'a, Value>,
    parent: Option<&'a Context<'a>>,
    is_step: bool,
    message_values: IndexMap<String, Value>,
    hide_value: bool,
    hidden_placeholder: String,
    modified: Option<bool>,
    errors: RefCell<Vec<ValidationError>>,
}

/// Builder for root contexts, or children with an explicit configuration
pub struct ContextBuilder<'a> {
    value: Cow<'a, Value>,
    parent: Option<&'a Context<'a>>,
    is_step: bool,
    message_values: IndexMap<String, Value>,
    hide_value: bool,
    hidden_placeholder: String,
    modified: Option<bool>,
}

impl ContextBuilder<'static> {
    /// Start a builder owning `value`
    pub fn owned(value: impl Into<Value>) -> Self {
        Self::from_cow(Cow::Owned(value.into()))
    }
}

impl<'a> ContextBuilder<'a> {
    /// Start a builder borrowing `value`
    pub fn borrowed(value: &'a Value) -> Self {
        Self::from_cow(Cow::Borrowed(value))
    }

    pub fn from_cow(value: Cow<'a, Value>) -> Self {
        Self {
            value,
            parent: None,
            is_step: false,
            message_values: IndexMap::new(),
            hide_value: false,
            hidden_placeholder: DEFAULT_HIDDEN_PLACEHOLDER.to_string(),
            modified: None,
        }
    }

    /// Mark the context as a step
    pub fn step(mut self, is_step: bool) -> Self {
        self.is_step = is_step;
        self
    }

    pub fn message_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.message_values.insert(name.into(), value.into());
        self
    }

    /// Redact `value` in every message raised under this context
    pub fn hide_value(mut self, hide: bool) -> Self {
        self.hide_value = hide;
        self
    }

    pub fn hidden_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.hidden_placeholder = placeholder.into();
        self
    }

    pub fn modified(mut self, modified: bool) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Attach the context under `parent`
    pub fn parent<'b>(self, parent: &'b Context<'b>) -> ContextBuilder<'b>
    where
        'a: 'b,
    {
        ContextBuilder {
            value: self.value,
            parent: Some(parent),
            is_step: self.is_step,
            message_values: self.message_values,
            hide_value: self.hide_value,
            hidden_placeholder: self.hidden_placeholder,
            modified: self.modified,
        }
    }

    /// Build the context; a context without parent is always a step
    pub fn build(self) -> Context<'a> {
        Context {
            is_step: self.is_step || self.parent.is_none(),
            value: self.value,
            parent: self.parent,
            message_values: self.message_values,
            hide_value: self.hide_value,
            hidden_placeholder: self.hidden_placeholder,
            modified: self.modified,
            errors: RefCell::new(Vec::new()),
        }
    }
}

impl Context<'static> {
    /// Root context owning `value`
    pub fn new(value: impl Into<Value>) -> Self {
        ContextBuilder::owned(value).build()
    }

    /// Builder for a root context owning `value`
    pub fn builder(value: impl Into<Value>) -> ContextBuilder<'static> {
        ContextBuilder::owned(value)
    }
}

impl<'a> Context<'a> {
    /// Root context borrowing `value`
    pub fn borrowed(value: &'a Value) -> Self {
        ContextBuilder::borrowed(value).build()
    }

    /// Child context inheriting message values and redaction policy
    pub fn build_child<'c>(&'c self, value: Cow<'c, Value>, is_step: bool) -> Context<'c> {
        self.build_child_with(value, is_step, IndexMap::new())
    }

    /// Child context with extra message values overriding inherited ones
    pub fn build_child_with<'c>(
        &'c self,
        value: Cow<'c, Value>,
        is_step: bool,
        message_values: IndexMap<String, Value>,
    ) -> Context<'c> {
        let mut values = self.message_values.clone();
        values.extend(message_values);

        Context {
            value,
            parent: Some(self),
            is_step,
            message_values: values,
            hide_value: self.hide_value,
            hidden_placeholder: self.hidden_placeholder.clone(),
            modified: None,
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Attach the record's modification flag for the field under test
    pub fn with_modified(mut self, modified: bool) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn parent(&self) -> Option<&'a Context<'a>> {
        self.parent
    }

    pub fn is_step(&self) -> bool {
        self.is_step
    }

    pub fn message_values(&self) -> &IndexMap<String, Value> {
        &self.message_values
    }

    pub fn hides_value(&self) -> bool {
        self.hide_value
    }

    pub fn hidden_placeholder(&self) -> &str {
        &self.hidden_placeholder
    }

    /// Whether the record field under test was modified, when known
    pub fn is_modified(&self) -> Option<bool> {
        self.modified
    }

    /// Closest step context strictly above this one
    pub fn parent_step(&self) -> Option<&'a Context<'a>> {
        let mut current = self.parent;
        while let Some(ctx) = current {
            if ctx.is_step {
                return Some(ctx);
            }
            current = ctx.parent;
        }
        None
    }

    /// This context when it is a step, otherwise the closest step above
    pub fn nearest_step(&self) -> Option<&Context<'a>> {
        if self.is_step {
            Some(self)
        } else {
            self.parent_step()
        }
    }

    /// First step context of the chain
    pub fn outermost_step(&self) -> Option<&Context<'a>> {
        let mut step = self.nearest_step()?;
        while let Some(up) = step.parent_step() {
            step = up;
        }
        Some(step)
    }

    /// Register an error about this context's value
    pub fn error(&self, code: &str, template: &str, values: IndexMap<String, Value>) {
        self.error_for(code, template, &self.value, values);
    }

    /// Register an error about `value`, e.g. a rejected key
    ///
    /// Placeholders are resolved from the context message values, then
    /// `values`, then `value` itself (redacted when the context hides values).
    pub fn error_for(
        &self,
        code: &str,
        template: &str,
        value: &Value,
        values: IndexMap<String, Value>,
    ) {
        let mut placeholders = self.message_values.clone();
        placeholders.extend(values);
        let shown = if self.hide_value {
            Value::String(self.hidden_placeholder.clone())
        } else {
            value.clone()
        };
        placeholders.insert("value".to_string(), shown);

        self.add_error(ValidationError::new(code, template).with_values(placeholders));
    }

    pub fn add_error(&self, error: ValidationError) {
        self.errors.borrow_mut().push(error);
    }

    /// Copy `child`'s errors into this context under `field_path`
    pub fn import_errors(&self, child: &Context<'_>, field_path: Option<&str>) {
        let imported: Vec<ValidationError> = child
            .errors
            .borrow()
            .iter()
            .map(|error| error.copy_as_child(field_path))
            .collect();
        self.errors.borrow_mut().extend(imported);
    }

    /// A context is valid when its own error list is empty
    pub fn is_valid(&self) -> bool {
        self.errors.borrow().is_empty()
    }

    pub fn errors(&self) -> Ref<'_, Vec<ValidationError>> {
        self.errors.borrow()
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors.into_inner()
    }

    /// Number of errors held by this context
    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a field path expression against the context chain
    pub fn get_field_value(&self, field_path: &str) -> Value {
        FieldPath::parse(field_path).resolve(self)
    }
}

impl IntoIterator for Context<'_> {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_errors().into_iter()
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("value", &self.value)
            .field("is_step", &self.is_step)
            .field("has_parent", &self.parent.is_some())
            .field("errors", &*self.errors.borrow())
            .finish()
    }
}

impl fmt::Display for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors.borrow();
        if errors.is_empty() {
            return f.write_str("Context<valid>");
        }
        writeln!(f, "Context<invalid>:")?;
        for error in errors.iter() {
            writeln!(f, "  {}", error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_is_step() {
        let ctx = ContextBuilder::owned(Value::Null).step(false).build();
        assert!(ctx.is_step());
        assert!(ctx.is_valid());
    }

    #[test]
    fn test_error_placeholders() {
        let ctx = Context::builder("abc").message_value("min", 4).build();
        ctx.error(
            "tooShort",
            "'$value' is less than $min unit length",
            IndexMap::new(),
        );

        let errors = ctx.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "'abc' is less than 4 unit length");
        assert_eq!(errors[0].field_path(), None);
    }

    #[test]
    fn test_hidden_value() {
        let ctx = Context::builder("secret").hide_value(true).build();
        let child = ctx.build_child(Cow::Owned(Value::from("s3cret")), false);
        child.error("notMatch", "'$value' is wrong", IndexMap::new());

        assert_eq!(child.errors()[0].message(), "'***hidden***' is wrong");
    }

    #[test]
    fn test_import_errors_prefixes() {
        let root = Context::new(Value::from(json!({"a": ["x"]})));
        let child = root.build_child(Cow::Owned(Value::from(json!(["x"]))), false);
        let grandchild = child.build_child(Cow::Owned(Value::from("x")), false);

        grandchild.error("bad", "bad", IndexMap::new());
        child.import_errors(&grandchild, Some("0"));
        root.import_errors(&child, Some("a"));

        assert!(!root.is_valid());
        assert_eq!(root.errors()[0].field_path(), Some("a.0"));
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn test_child_message_values_override() {
        let root = Context::builder(1).message_value("unit", "cm").build();
        let mut extra = IndexMap::new();
        extra.insert("unit".to_string(), Value::from("mm"));
        let child = root.build_child_with(Cow::Owned(Value::Int(2)), false, extra);

        assert_eq!(child.message_values()["unit"], Value::from("mm"));
        assert_eq!(root.message_values()["unit"], Value::from("cm"));
    }

    #[test]
    fn test_step_navigation() {
        let root = Context::new(Value::from(json!({"level": 0})));
        let pass = root.build_child(Cow::Owned(Value::Null), false);
        let step = pass.build_child(Cow::Owned(Value::from(json!({"level": 1}))), true);
        let leaf = step.build_child(Cow::Owned(Value::Null), false);

        assert!(std::ptr::eq(leaf.parent_step().unwrap(), &step));
        assert!(std::ptr::eq(step.parent_step().unwrap(), &root));
        assert!(std::ptr::eq(leaf.outermost_step().unwrap(), &root));
        assert!(root.parent_step().is_none());
    }
}
