//! Serde model of rule documents
//!
//! A rule document holds an optional root `rule` and a table of named
//! `definitions`. Every rule node is an object tagged by `type`:
//!
//! ```yaml
//! definitions:
//!   name:
//!     type: required
//!     validators:
//!       - type: length
//!         min: 2
//!         max: 32
//! rule:
//!   type: dict
//!   fields:
//!     name: { type: ref, name: name }
//!     tags:
//!       type: optional
//!       validators:
//!         - type: all_items
//!           validator: { type: regexp, pattern: "[a-z]+" }
//! ```
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sieve_core::{ValidatorOptions, Value};

fn default_true() -> bool {
    true
}

fn default_min_items() -> Option<usize> {
    Some(1)
}

fn default_max_occ() -> usize {
    1
}

/// A parsed rule document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDocument {
    /// Named rules, referable with `type: ref`
    #[serde(default)]
    pub definitions: IndexMap<String, Rule>,

    /// Rule applied when no definition is selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<Rule>,
}

/// A node of a rule tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    // Composites
    Chain {
        validators: Vec<Rule>,
        #[serde(default = "default_true")]
        stop_on_fail: bool,
    },
    #[serde(rename = "some", alias = "some_of")]
    SomeOf { validators: Vec<Rule> },
    AllItems {
        validator: Box<Rule>,
        #[serde(default = "default_true")]
        stop_on_fail: bool,
        #[serde(default)]
        options: ValidatorOptions,
    },
    SomeItems {
        validator: Box<Rule>,
        #[serde(default = "default_min_items")]
        min: Option<usize>,
        #[serde(default)]
        max: Option<usize>,
        #[serde(default = "default_true")]
        stop_on_fail: bool,
        #[serde(default)]
        options: ValidatorOptions,
    },
    ItemLimitedOccurrences {
        #[serde(default)]
        min_occ: usize,
        #[serde(default = "default_max_occ")]
        max_occ: usize,
        #[serde(default)]
        options: ValidatorOptions,
    },
    IfField {
        field: String,
        validator: Box<Rule>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        when: Option<Box<Rule>>,
        #[serde(default)]
        run_if_none: bool,
        #[serde(default = "default_true")]
        add_check_info: bool,
        #[serde(default)]
        options: ValidatorOptions,
    },
    Required {
        #[serde(default)]
        validators: Vec<Rule>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        empty: Option<Box<Rule>>,
        #[serde(default = "default_true")]
        stop_on_fail: bool,
        #[serde(default)]
        options: ValidatorOptions,
    },
    Optional {
        #[serde(default)]
        validators: Vec<Rule>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        empty: Option<Box<Rule>>,
        #[serde(default = "default_true")]
        stop_on_fail: bool,
    },
    Dict {
        #[serde(flatten)]
        spec: SpecRule,
        #[serde(default)]
        options: ValidatorOptions,
    },
    Model {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<String>,
        #[serde(flatten)]
        spec: SpecRule,
        #[serde(default)]
        options: ValidatorOptions,
    },
    /// Named definition, resolved when evaluated
    Ref { name: String },

    // Leaves
    EqualTo {
        value: Value,
        #[serde(default)]
        options: ValidatorOptions,
    },
    NotEqualTo {
        value: Value,
        #[serde(default)]
        options: ValidatorOptions,
    },
    StringNotContaining {
        token: String,
        #[serde(default)]
        case_insensitive: bool,
        #[serde(default)]
        options: ValidatorOptions,
    },
    Length {
        #[serde(default)]
        min: Option<usize>,
        #[serde(default)]
        max: Option<usize>,
        #[serde(default)]
        options: ValidatorOptions,
    },
    NumberRange {
        #[serde(default)]
        min: Option<Value>,
        #[serde(default)]
        max: Option<Value>,
        #[serde(default)]
        options: ValidatorOptions,
    },
    Regexp {
        pattern: String,
        #[serde(default)]
        case_insensitive: bool,
        #[serde(default)]
        options: ValidatorOptions,
    },
    Email {
        #[serde(default)]
        options: ValidatorOptions,
    },
    MacAddress {
        #[serde(default)]
        options: ValidatorOptions,
    },
    Url {
        #[serde(default = "default_true")]
        require_tld: bool,
        #[serde(default)]
        options: ValidatorOptions,
    },
    Uuid {
        #[serde(default)]
        options: ValidatorOptions,
    },
    IpAddress {
        #[serde(default = "default_true")]
        ipv4: bool,
        #[serde(default)]
        ipv6: bool,
        #[serde(default)]
        options: ValidatorOptions,
    },
    AnyOf {
        values: Vec<Value>,
        #[serde(default)]
        options: ValidatorOptions,
    },
    NoneOf {
        values: Vec<Value>,
        #[serde(default)]
        options: ValidatorOptions,
    },
    IsEmpty {
        #[serde(default)]
        options: ValidatorOptions,
    },
    NotEmpty {
        #[serde(default)]
        options: ValidatorOptions,
    },
    NotEmptyString {
        #[serde(default)]
        options: ValidatorOptions,
    },
    IsNone {
        #[serde(default)]
        options: ValidatorOptions,
    },
    NotNone {
        #[serde(default)]
        options: ValidatorOptions,
    },
}

/// Field set of a `dict` or `model` rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecRule {
    #[serde(default)]
    pub fields: IndexMap<String, Rule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_validator: Option<Box<Rule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_validator: Option<Box<Rule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_on_fail: Option<bool>,
}

impl Rule {
    /// The `type` tag of this rule
    pub fn kind(&self) -> &'static str {
        match self {
            Rule::Chain { .. } => "chain",
            Rule::SomeOf { .. } => "some",
            Rule::AllItems { .. } => "all_items",
            Rule::SomeItems { .. } => "some_items",
            Rule::ItemLimitedOccurrences { .. } => "item_limited_occurrences",
            Rule::IfField { .. } => "if_field",
            Rule::Required { .. } => "required",
            Rule::Optional { .. } => "optional",
            Rule::Dict { .. } => "dict",
            Rule::Model { .. } => "model",
            Rule::Ref { .. } => "ref",
            Rule::EqualTo { .. } => "equal_to",
            Rule::NotEqualTo { .. } => "not_equal_to",
            Rule::StringNotContaining { .. } => "string_not_containing",
            Rule::Length { .. } => "length",
            Rule::NumberRange { .. } => "number_range",
            Rule::Regexp { .. } => "regexp",
            Rule::Email { .. } => "email",
            Rule::MacAddress { .. } => "mac_address",
            Rule::Url { .. } => "url",
            Rule::Uuid { .. } => "uuid",
            Rule::IpAddress { .. } => "ip_address",
            Rule::AnyOf { .. } => "any_of",
            Rule::NoneOf { .. } => "none_of",
            Rule::IsEmpty { .. } => "is_empty",
            Rule::NotEmpty { .. } => "not_empty",
            Rule::NotEmptyString { .. } => "not_empty_string",
            Rule::IsNone { .. } => "is_none",
            Rule::NotNone { .. } => "not_none",
        }
    }
}
