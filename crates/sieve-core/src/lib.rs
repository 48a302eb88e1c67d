//! Sieve Core - composable structural validation engine
//!
//! Validators are composed into a tree and evaluated against a dynamic
//! [`Value`]. Every evaluation produces a [`Context`]: a scoped node holding
//! the value under test and the path-addressed [`ValidationError`]s found
//! below it. A context with no errors is valid.
//!
//! ## Building blocks
//!
//! - **Leaf validators** ([`validators::basic`]): single-verdict predicates such
//!   as [`Length`], [`Regexp`] or [`NotNone`]
//! - **Composites** ([`validators::complex`]): [`Chain`], [`SomeOf`],
//!   [`AllItems`], [`SomeItems`], [`ItemLimitedOccurrences`], [`IfField`],
//!   [`Required`], [`Optional`] and [`Deferred`]
//! - **Structural validators** ([`validators::spec`]): [`DictValidate`] and
//!   [`ModelValidate`], driven by a [`SpecConfig`]
//!
//! ## Quick Start
//!
//! ```rust
//! use sieve_core::{AllItems, Length, Validator, Value};
//!
//! let validator = AllItems::new(Length::range(14, 16).unwrap().shared());
//! let result = validator.validate(Value::from(vec!["test", "12345678901234"]));
//!
//! assert!(!result.is_valid());
//! let errors = result.errors();
//! assert_eq!(errors[0].field_path(), Some("0"));
//! assert_eq!(errors[0].message(), "'test' is less than 14 unit length");
//! ```
//!
//! Field paths used by conditional validators may climb the context chain:
//! `<context>.name` reads `name` from the enclosing structure and
//! `<root>.name` from the outermost one.
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

pub mod context;
pub mod error;
pub mod legacy;
pub mod message;
pub mod options;
pub mod record;
pub mod validators;
pub mod value;

pub use context::{path::FieldPath, Context, ContextBuilder, DEFAULT_HIDDEN_PLACEHOLDER};
pub use error::{ConfigError, Result};
pub use legacy::to_legacy_messages;
pub use message::ValidationError;
pub use options::ValidatorOptions;
pub use record::Record;
pub use validators::basic::{
    AnyOf, Email, EqualTo, IpAddress, IsEmpty, IsNone, Length, MacAddress, NoneOf, NotEmpty,
    NotEmptyString, NotEqualTo, NotNone, NumberRange, Regexp, StringNotContaining, Url, Uuid,
};
pub use validators::complex::{
    AllItems, Bounds, Chain, Deferred, IfField, ItemLimitedOccurrences, Optional, Required,
    SomeItems, SomeOf,
};
pub use validators::spec::{DictValidate, ModelValidate, SpecConfig};
pub use validators::{SharedValidator, Validator};
pub use value::{Key, Model, Value};
