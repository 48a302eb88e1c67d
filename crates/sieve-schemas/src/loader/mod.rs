//! Rule document and data file loading
//!
//! This module reads YAML or JSON files and turns them into either a built
//! [`RuleSet`](crate::RuleSet) or a [`Value`] to validate.
//!
//! # Example Usage
//!
//! ```no_run
//! use sieve_schemas::loader::RuleLoader;
//! use std::path::Path;
//!
//! let loader = RuleLoader::new();
//! let rules = loader.load_rules(Path::new("rules.yaml"))?;
//! let data = loader.load_data(Path::new("user.json"))?;
//!
//! let result = rules.validate(data)?;
//! println!("{}", result);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;

pub use error::{LoaderError, LoaderResult};
pub use parser::{DocumentParser, Format};

use crate::builder::RuleSet;
use crate::document::RuleDocument;
use sieve_core::Value;
use std::path::Path;

/// Loads rule documents and data files
#[derive(Debug, Default)]
pub struct RuleLoader {
    parser: DocumentParser,
}

impl RuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and deserialize a rule document
    pub fn load_document(&self, path: &Path) -> LoaderResult<RuleDocument> {
        let raw = self.parser.parse_file(path)?;
        self.document_from_value(raw, path)
    }

    /// Read a rule document and build its validators
    pub fn load_rules(&self, path: &Path) -> LoaderResult<RuleSet> {
        log::debug!("Loading rule document '{}'", path.display());
        let document = self.load_document(path)?;
        RuleSet::build(&document, path)
    }

    /// Build validators from rule document text
    pub fn rules_from_str(&self, content: &str, format: Format, path: &Path) -> LoaderResult<RuleSet> {
        let raw = self.parser.parse_content(content, format, path)?;
        let document = self.document_from_value(raw, path)?;
        RuleSet::build(&document, path)
    }

    /// Read a data file as a [`Value`]
    pub fn load_data(&self, path: &Path) -> LoaderResult<Value> {
        log::debug!("Loading data file '{}'", path.display());
        self.parser.parse_file(path).map(Value::from)
    }

    /// Parse data text of unknown format
    pub fn data_from_str(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        self.parser
            .parse_with_fallback(content, path)
            .map(|(value, _)| Value::from(value))
    }

    fn document_from_value(&self, raw: serde_json::Value, path: &Path) -> LoaderResult<RuleDocument> {
        if !raw.is_object() {
            return Err(LoaderError::invalid_document(
                path.to_path_buf(),
                "a rule document must be a mapping at the root",
            ));
        }
        serde_json::from_value(raw)
            .map_err(|e| LoaderError::invalid_document(path.to_path_buf(), e.to_string()))
    }
}
