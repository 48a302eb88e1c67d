//! The validator capability and its implementations
//!
//! - [`basic`]: leaf validators judging a single value
//! - [`complex`]: composites combining child validators
//! - [`spec`]: structural validators for mappings and records
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

pub mod basic;
pub mod complex;
pub mod spec;

use crate::context::{Context, ContextBuilder};
use crate::value::Value;
use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;

/// Shared handle to a validator node
pub type SharedValidator = Arc<dyn Validator>;

/// A node of a validator tree
///
/// Implementations judge `ctx.value()` and register failures into `ctx`.
/// They hold no per-call state, so one tree can serve any number of
/// concurrent validations.
pub trait Validator: Debug + Send + Sync {
    /// Judge the context's value, returning whether it passed
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool;

    /// Structural validators run in step contexts
    fn is_step(&self) -> bool {
        false
    }

    /// Validate `value` in a fresh root context
    fn validate(&self, value: Value) -> Context<'static> {
        self.validate_in(Cow::Owned(value), None)
    }

    /// Validate `value` in a context built under `parent`, if any
    fn validate_in<'p>(&self, value: Cow<'p, Value>, parent: Option<&'p Context<'p>>) -> Context<'p> {
        let ctx = match parent {
            Some(parent) => parent.build_child(value, self.is_step()),
            None => ContextBuilder::from_cow(value).build(),
        };
        self.validate_with_context(&ctx);
        ctx
    }

    /// Validate `value` in a child of `parent`; errors stay in the child
    fn validate_child<'p>(&self, value: Cow<'p, Value>, parent: &'p Context<'p>) -> Context<'p> {
        self.validate_in(value, Some(parent))
    }

    /// Validate the value of `ctx`, leaving errors in `ctx` unprefixed
    ///
    /// Pass-through validators share `ctx`; structural ones get a step
    /// child whose errors are imported back.
    fn validate_within(&self, ctx: &Context<'_>) -> bool {
        if !self.is_step() {
            return self.validate_with_context(ctx);
        }

        let child = ctx.build_child(Cow::Borrowed(ctx.value()), true);
        let valid = self.validate_with_context(&child);
        ctx.import_errors(&child, None);
        valid
    }

    /// Wrap into a [`SharedValidator`]
    fn shared(self) -> SharedValidator
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        (**self).validate_with_context(ctx)
    }

    fn is_step(&self) -> bool {
        (**self).is_step()
    }
}

/// Option accessors for validators carrying `options: ValidatorOptions`
/// and a `default_options()` table
macro_rules! impl_configurable {
    ($($ty:ty),+ $(,)?) => {$(
        impl $ty {
            /// Merge `options` over this validator's defaults
            pub fn with_options(mut self, options: $crate::ValidatorOptions) -> Self {
                self.options = Self::default_options().merged(&options);
                self
            }

            pub fn options(&self) -> &$crate::ValidatorOptions {
                &self.options
            }
        }
    )+};
}

pub(crate) use impl_configurable;
