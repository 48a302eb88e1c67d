//! Sieve Schemas - declarative rule documents
//!
//! This crate describes validator trees as YAML or JSON documents and builds
//! them into [`sieve_core`] validators:
//! - **Rule documents**: a `type`-tagged tree of rules plus named
//!   `definitions` ([`document`])
//! - **Builder**: rules to validators, with lazily resolved references so
//!   definitions may be recursive ([`RuleSet`])
//! - **Loader**: format detection and path-contextual errors ([`loader`])
//!
//! ## Quick Start
//!
//! ```rust
//! use sieve_schemas::{Format, RuleLoader};
//! use sieve_core::Value;
//! use std::path::Path;
//!
//! let rules = RuleLoader::new()
//!     .rules_from_str(
//!         "rule: { type: all_items, validator: { type: length, min: 2 } }",
//!         Format::Yaml,
//!         Path::new("inline.yaml"),
//!     )
//!     .unwrap();
//!
//! let result = rules.validate(Value::from(vec!["ok", "x"])).unwrap();
//! assert_eq!(result.errors()[0].field_path(), Some("1"));
//! ```
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

pub mod builder;
pub mod document;
pub mod loader;

pub use builder::{RuleSet, UNRESOLVED_REFERENCE};
pub use document::{Rule, RuleDocument, SpecRule};
pub use loader::{DocumentParser, Format, LoaderError, LoaderResult, RuleLoader};
