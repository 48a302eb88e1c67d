//! Leaf validators
//!
//! Each leaf judges a single value and, on failure, registers exactly one
//! error through its [`ValidatorOptions`]. Codes are exposed as associated
//! constants so callers can match on them or remap them.
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

use super::{impl_configurable, Validator};
use crate::context::Context;
use crate::error::{ConfigError, Result};
use crate::options::{message_values, ValidatorOptions};
use crate::value::Value;
use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

fn fail(
    options: &ValidatorOptions,
    ctx: &Context<'_>,
    code: &str,
    template: &str,
    extra: IndexMap<String, Value>,
) -> bool {
    options.report(ctx, code, template, extra);
    false
}

/// Comma-joined rendering of a value list, strings quoted
fn format_values(values: &[Value]) -> String {
    values.iter().map(Value::repr).collect::<Vec<_>>().join(", ")
}

/// Compares the value with a static value
#[derive(Debug, Clone)]
pub struct EqualTo {
    comp_value: Value,
    options: ValidatorOptions,
}

impl EqualTo {
    pub const NOT_EQUAL: &'static str = "notEqual";
    const NOT_EQUAL_TEMPLATE: &'static str = "'$value' is not equal to '$comp_value'";

    pub fn new(comp_value: impl Into<Value>) -> Self {
        Self {
            comp_value: comp_value.into(),
            options: Self::default_options(),
        }
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }
}

impl Validator for EqualTo {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        if ctx.value() != &self.comp_value {
            return fail(
                &self.options,
                ctx,
                Self::NOT_EQUAL,
                Self::NOT_EQUAL_TEMPLATE,
                message_values!("comp_value" => self.comp_value.clone()),
            );
        }
        true
    }
}

/// Rejects a value equal to a static value
#[derive(Debug, Clone)]
pub struct NotEqualTo {
    comp_value: Value,
    options: ValidatorOptions,
}

impl NotEqualTo {
    pub const IS_EQUAL: &'static str = "isEqual";
    const IS_EQUAL_TEMPLATE: &'static str = "'$value' is equal to '$comp_value'";

    pub fn new(comp_value: impl Into<Value>) -> Self {
        Self {
            comp_value: comp_value.into(),
            options: Self::default_options(),
        }
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }
}

impl Validator for NotEqualTo {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        if ctx.value() == &self.comp_value {
            return fail(
                &self.options,
                ctx,
                Self::IS_EQUAL,
                Self::IS_EQUAL_TEMPLATE,
                message_values!("comp_value" => self.comp_value.clone()),
            );
        }
        true
    }
}

/// Rejects strings containing a token
///
/// Values that are not strings pass.
#[derive(Debug, Clone)]
pub struct StringNotContaining {
    token: String,
    case_sensitive: bool,
    options: ValidatorOptions,
}

impl StringNotContaining {
    pub const NOT_CONTAINS: &'static str = "notContains";
    const NOT_CONTAINS_TEMPLATE: &'static str = "'$value' contains '$token'";

    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            case_sensitive: true,
            options: Self::default_options(),
        }
    }

    /// Compare ignoring case
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }
}

impl Validator for StringNotContaining {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let Some(text) = ctx.value().as_str() else {
            return true;
        };

        let contains = if self.case_sensitive {
            text.contains(&self.token)
        } else {
            text.to_lowercase().contains(&self.token.to_lowercase())
        };

        if contains {
            return fail(
                &self.options,
                ctx,
                Self::NOT_CONTAINS,
                Self::NOT_CONTAINS_TEMPLATE,
                message_values!("token" => self.token.as_str()),
            );
        }
        true
    }
}

/// Validates the length of strings, sequences, mappings and records
#[derive(Debug, Clone)]
pub struct Length {
    min: Option<usize>,
    max: Option<usize>,
    options: ValidatorOptions,
}

impl Length {
    pub const TOO_SHORT: &'static str = "tooShort";
    pub const TOO_LONG: &'static str = "tooLong";
    pub const INVALID_TYPE: &'static str = "notLength";

    const TOO_SHORT_TEMPLATE: &'static str = "'$value' is less than $min unit length";
    const TOO_LONG_TEMPLATE: &'static str = "'$value' is more than $max unit length";
    const INVALID_TYPE_TEMPLATE: &'static str = "'$value' has no length";

    /// Create a length validator; at least one bound is required
    pub fn new(min: Option<usize>, max: Option<usize>) -> Result<Self> {
        match (min, max) {
            (None, None) => return Err(ConfigError::missing_bounds("Length")),
            (Some(min), Some(max)) if min > max => {
                return Err(ConfigError::inverted_bounds("Length", min, max))
            }
            _ => {}
        }

        Ok(Self {
            min,
            max,
            options: Self::default_options(),
        })
    }

    /// Inclusive range
    pub fn range(min: usize, max: usize) -> Result<Self> {
        Self::new(Some(min), Some(max))
    }

    pub fn at_least(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
            options: Self::default_options(),
        }
    }

    pub fn at_most(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
            options: Self::default_options(),
        }
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }

    fn bounds(&self) -> IndexMap<String, Value> {
        message_values!("min" => self.min, "max" => self.max)
    }
}

impl Validator for Length {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let Some(length) = ctx.value().length() else {
            return fail(
                &self.options,
                ctx,
                Self::INVALID_TYPE,
                Self::INVALID_TYPE_TEMPLATE,
                self.bounds(),
            );
        };

        if self.min.is_some_and(|min| length < min) {
            return fail(
                &self.options,
                ctx,
                Self::TOO_SHORT,
                Self::TOO_SHORT_TEMPLATE,
                self.bounds(),
            );
        }

        if self.max.is_some_and(|max| length > max) {
            return fail(
                &self.options,
                ctx,
                Self::TOO_LONG,
                Self::TOO_LONG_TEMPLATE,
                self.bounds(),
            );
        }

        true
    }
}

/// Validates that a number lies in an inclusive range
///
/// Null and non-numeric values are out of range.
#[derive(Debug, Clone)]
pub struct NumberRange {
    min: Option<Value>,
    max: Option<Value>,
    options: ValidatorOptions,
}

impl NumberRange {
    pub const OUT_OF_RANGE: &'static str = "outOfRange";
    const OUT_OF_RANGE_TEMPLATE: &'static str = "'$value' is out of range ($min, $max)";

    /// Create a range from optional numeric bounds
    pub fn new(min: Option<Value>, max: Option<Value>) -> Result<Self> {
        for bound in [&min, &max].into_iter().flatten() {
            if bound.as_f64().is_none() {
                return Err(ConfigError::NonNumericBound {
                    validator: "NumberRange",
                    bound: bound.to_string(),
                });
            }
        }

        if let (Some(low), Some(high)) = (&min, &max) {
            if low.as_f64() > high.as_f64() {
                return Err(ConfigError::inverted_bounds("NumberRange", low, high));
            }
        }

        Ok(Self {
            min,
            max,
            options: Self::default_options(),
        })
    }

    pub fn between(min: impl Into<Value>, max: impl Into<Value>) -> Result<Self> {
        Self::new(Some(min.into()), Some(max.into()))
    }

    pub fn at_least(min: impl Into<Value>) -> Result<Self> {
        Self::new(Some(min.into()), None)
    }

    pub fn at_most(max: impl Into<Value>) -> Result<Self> {
        Self::new(None, Some(max.into()))
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }

    fn in_range(&self, value: &Value) -> bool {
        let Some(number) = value.as_f64() else {
            return false;
        };
        let above_min = self
            .min
            .as_ref()
            .and_then(Value::as_f64)
            .map_or(true, |min| number >= min);
        let below_max = self
            .max
            .as_ref()
            .and_then(Value::as_f64)
            .map_or(true, |max| number <= max);
        above_min && below_max
    }
}

impl Validator for NumberRange {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        if !self.in_range(ctx.value()) {
            return fail(
                &self.options,
                ctx,
                Self::OUT_OF_RANGE,
                Self::OUT_OF_RANGE_TEMPLATE,
                message_values!("min" => self.min.clone(), "max" => self.max.clone()),
            );
        }
        true
    }
}

/// Matches strings against a regular expression anchored at the start
///
/// Null is matched as the empty string; other non-string values fail.
#[derive(Debug, Clone)]
pub struct Regexp {
    regex: Regex,
    pattern: String,
    options: ValidatorOptions,
}

impl Regexp {
    pub const NOT_MATCH: &'static str = "notMatch";
    const NOT_MATCH_TEMPLATE: &'static str = "'$value' does not match against pattern '$regex'";

    pub fn new(pattern: &str) -> Result<Self> {
        Self::build(pattern, false)
    }

    /// Compile `pattern` ignoring case
    pub fn case_insensitive(pattern: &str) -> Result<Self> {
        Self::build(pattern, true)
    }

    fn build(pattern: &str, ignore_case: bool) -> Result<Self> {
        let regex = RegexBuilder::new(&format!("^(?:{})", pattern))
            .case_insensitive(ignore_case)
            .build()
            .map_err(|e| ConfigError::invalid_pattern(pattern, e))?;

        Ok(Self {
            regex,
            pattern: pattern.to_string(),
            options: Self::default_options(),
        })
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Validator for Regexp {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        match_pattern(&self.regex, &self.pattern, &self.options, ctx)
    }
}

fn match_pattern(
    regex: &Regex,
    pattern: &str,
    options: &ValidatorOptions,
    ctx: &Context<'_>,
) -> bool {
    let matched = match ctx.value() {
        Value::String(text) => regex.is_match(text),
        Value::Null => regex.is_match(""),
        _ => false,
    };

    if !matched {
        return fail(
            options,
            ctx,
            Regexp::NOT_MATCH,
            Regexp::NOT_MATCH_TEMPLATE,
            message_values!("regex" => pattern),
        );
    }
    true
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        RegexBuilder::new(r"^.+@[^.].*\.[a-z]{2,10}$")
            .case_insensitive(true)
            .build()
            .expect("valid email regex")
    })
}

fn mac_regex() -> &'static Regex {
    static MAC: OnceLock<Regex> = OnceLock::new();
    MAC.get_or_init(|| {
        Regex::new(r"^(?:[0-9a-fA-F]{2}:){5}[0-9a-fA-F]{2}$").expect("valid mac regex")
    })
}

fn uuid_regex() -> &'static Regex {
    static UUID: OnceLock<Regex> = OnceLock::new();
    UUID.get_or_init(|| {
        Regex::new(r"^[0-9a-fA-F]{8}-([0-9a-fA-F]{4}-){3}[0-9a-fA-F]{12}$")
            .expect("valid uuid regex")
    })
}

const URL_PATTERN_WITH_TLD: &str =
    r"^[a-z]+://([^/:]+\.[a-z]{2,10}|([0-9]{1,3}\.){3}[0-9]{1,3})(:[0-9]+)?(/.*)?$";
const URL_PATTERN: &str = r"^[a-z]+://([^/:]+|([0-9]{1,3}\.){3}[0-9]{1,3})(:[0-9]+)?(/.*)?$";

fn url_regex(require_tld: bool) -> &'static Regex {
    static WITH_TLD: OnceLock<Regex> = OnceLock::new();
    static WITHOUT_TLD: OnceLock<Regex> = OnceLock::new();

    let (cell, pattern) = if require_tld {
        (&WITH_TLD, URL_PATTERN_WITH_TLD)
    } else {
        (&WITHOUT_TLD, URL_PATTERN)
    };
    cell.get_or_init(|| {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .expect("valid url regex")
    })
}

/// Primitive email address syntax check
#[derive(Debug, Clone)]
pub struct Email {
    options: ValidatorOptions,
}

impl Email {
    pub const NOT_MAIL: &'static str = "notMail";

    pub fn new() -> Self {
        Self {
            options: Self::default_options(),
        }
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::new()
            .with_code(Regexp::NOT_MATCH, Self::NOT_MAIL)
            .with_message(Self::NOT_MAIL, "'$value' is not a valid email address.")
    }
}

impl Default for Email {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for Email {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let regex = email_regex();
        match_pattern(regex, regex.as_str(), &self.options, ctx)
    }
}

/// Colon-separated MAC address
#[derive(Debug, Clone)]
pub struct MacAddress {
    options: ValidatorOptions,
}

impl MacAddress {
    pub const INVALID_MAC_ADDRESS: &'static str = "invalidMacAddress";

    pub fn new() -> Self {
        Self {
            options: Self::default_options(),
        }
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::new()
            .with_code(Regexp::NOT_MATCH, Self::INVALID_MAC_ADDRESS)
            .with_message(Self::INVALID_MAC_ADDRESS, "'$value' is not a valid mac address.")
    }
}

impl Default for MacAddress {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for MacAddress {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let regex = mac_regex();
        match_pattern(regex, regex.as_str(), &self.options, ctx)
    }
}

/// Simple URL syntax check
///
/// With `require_tld` (the default) the host must end in a `.tld` suffix or
/// be a dotted IPv4 address; without it hosts like `localhost` pass.
#[derive(Debug, Clone)]
pub struct Url {
    require_tld: bool,
    options: ValidatorOptions,
}

impl Url {
    pub const INVALID_URL: &'static str = "invalidUrl";

    pub fn new() -> Self {
        Self {
            require_tld: true,
            options: Self::default_options(),
        }
    }

    pub fn require_tld(mut self, require_tld: bool) -> Self {
        self.require_tld = require_tld;
        self
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::new()
            .with_code(Regexp::NOT_MATCH, Self::INVALID_URL)
            .with_message(Self::INVALID_URL, "'$value' is not a valid url.")
    }
}

impl Default for Url {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for Url {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let regex = url_regex(self.require_tld);
        match_pattern(regex, regex.as_str(), &self.options, ctx)
    }
}

/// Hyphenated hexadecimal UUID
#[derive(Debug, Clone)]
pub struct Uuid {
    options: ValidatorOptions,
}

impl Uuid {
    pub const INVALID_UUID: &'static str = "invalidUuid";

    pub fn new() -> Self {
        Self {
            options: Self::default_options(),
        }
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::new()
            .with_code(Regexp::NOT_MATCH, Self::INVALID_UUID)
            .with_message(Self::INVALID_UUID, "'$value' is not a valid UUID.")
    }
}

impl Default for Uuid {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for Uuid {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let regex = uuid_regex();
        match_pattern(regex, regex.as_str(), &self.options, ctx)
    }
}

/// Validates IPv4 and/or IPv6 textual addresses
#[derive(Debug, Clone)]
pub struct IpAddress {
    ipv4: bool,
    ipv6: bool,
    options: ValidatorOptions,
}

impl IpAddress {
    pub const NOT_IP_ADDRESS: &'static str = "notIpAddress";
    pub const IPV4_NOT_ALLOWED: &'static str = "ipv4NotAllowed";
    pub const IPV6_NOT_ALLOWED: &'static str = "ipv6NotAllowed";

    const NOT_IP_ADDRESS_TEMPLATE: &'static str =
        "'$value' does not appear to be a valid IP address. Allowed $types";
    const IPV4_NOT_ALLOWED_TEMPLATE: &'static str =
        "'$value' is an ipv4 address that is not allowed. Allowed $types";
    const IPV6_NOT_ALLOWED_TEMPLATE: &'static str =
        "'$value' is an ipv6 address that is not allowed. Allowed $types";

    /// Create a validator accepting the enabled families
    pub fn new(ipv4: bool, ipv6: bool) -> Result<Self> {
        if !ipv4 && !ipv6 {
            return Err(ConfigError::NoAddressFamily);
        }
        Ok(Self {
            ipv4,
            ipv6,
            options: Self::default_options(),
        })
    }

    /// IPv4 only
    pub fn v4() -> Self {
        Self {
            ipv4: true,
            ipv6: false,
            options: Self::default_options(),
        }
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }

    fn types(&self) -> String {
        let mut types = Vec::new();
        if self.ipv4 {
            types.push("ipv4");
        }
        if self.ipv6 {
            types.push("ipv6");
        }
        types.join(" and ")
    }

    fn is_ipv4(text: &str) -> bool {
        let parts: Vec<&str> = text.split('.').collect();
        parts.len() == 4
            && parts.iter().all(|part| {
                !part.is_empty()
                    && part.bytes().all(|b| b.is_ascii_digit())
                    && part.parse::<u32>().is_ok_and(|n| n < 256)
            })
    }

    fn is_ipv6(text: &str) -> bool {
        let parts: Vec<&str> = text.split(':').collect();
        if !(2..=8).contains(&parts.len()) {
            return false;
        }

        let mut blanks = 0;
        for part in &parts {
            if part.is_empty() {
                blanks += 1;
                continue;
            }
            let valid_group = part.bytes().all(|b| b.is_ascii_hexdigit())
                && u32::from_str_radix(part, 16).is_ok_and(|n| n < 65536);
            if !valid_group {
                return false;
            }
        }

        blanks < 2 || (blanks == 2 && parts[0].is_empty() && parts[1].is_empty())
    }
}

impl Validator for IpAddress {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        let text = ctx.value().as_str().unwrap_or_default();
        let types = message_values!("types" => self.types());

        if Self::is_ipv4(text) {
            if !self.ipv4 {
                return fail(
                    &self.options,
                    ctx,
                    Self::IPV4_NOT_ALLOWED,
                    Self::IPV4_NOT_ALLOWED_TEMPLATE,
                    types,
                );
            }
            return true;
        }

        if Self::is_ipv6(text) {
            if !self.ipv6 {
                return fail(
                    &self.options,
                    ctx,
                    Self::IPV6_NOT_ALLOWED,
                    Self::IPV6_NOT_ALLOWED_TEMPLATE,
                    types,
                );
            }
            return true;
        }

        fail(
            &self.options,
            ctx,
            Self::NOT_IP_ADDRESS,
            Self::NOT_IP_ADDRESS_TEMPLATE,
            types,
        )
    }
}

/// Accepts only values from a fixed list
#[derive(Debug, Clone)]
pub struct AnyOf {
    values: Vec<Value>,
    options: ValidatorOptions,
}

impl AnyOf {
    pub const NOT_IN_LIST: &'static str = "notInList";
    const NOT_IN_LIST_TEMPLATE: &'static str = "'$value' is none of $values.";

    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            options: Self::default_options(),
        }
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }
}

impl Validator for AnyOf {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        if !self.values.contains(ctx.value()) {
            return fail(
                &self.options,
                ctx,
                Self::NOT_IN_LIST,
                Self::NOT_IN_LIST_TEMPLATE,
                message_values!("values" => format_values(&self.values)),
            );
        }
        true
    }
}

/// Rejects values from a fixed list
#[derive(Debug, Clone)]
pub struct NoneOf {
    values: Vec<Value>,
    options: ValidatorOptions,
}

impl NoneOf {
    pub const IN_LIST: &'static str = "inList";
    const IN_LIST_TEMPLATE: &'static str = "'$value' is one of $values.";

    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            options: Self::default_options(),
        }
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }
}

impl Validator for NoneOf {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        if self.values.contains(ctx.value()) {
            return fail(
                &self.options,
                ctx,
                Self::IN_LIST,
                Self::IN_LIST_TEMPLATE,
                message_values!("values" => format_values(&self.values)),
            );
        }
        true
    }
}

/// Requires a falsy value
#[derive(Debug, Clone, Default)]
pub struct IsEmpty {
    options: ValidatorOptions,
}

impl IsEmpty {
    pub const EMPTY: &'static str = "Empty";

    pub fn new() -> Self {
        Self::default()
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }
}

impl Validator for IsEmpty {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        if ctx.value().is_truthy() {
            return fail(
                &self.options,
                ctx,
                Self::EMPTY,
                "'$value' must be empty",
                message_values!(),
            );
        }
        true
    }
}

/// Requires a truthy value
#[derive(Debug, Clone, Default)]
pub struct NotEmpty {
    options: ValidatorOptions,
}

impl NotEmpty {
    pub const NOT_EMPTY: &'static str = "notEmpty";
    const NOT_EMPTY_TEMPLATE: &'static str = "Value can not be empty";

    pub fn new() -> Self {
        Self::default()
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }
}

impl Validator for NotEmpty {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        if !ctx.value().is_truthy() {
            return fail(
                &self.options,
                ctx,
                Self::NOT_EMPTY,
                Self::NOT_EMPTY_TEMPLATE,
                message_values!(),
            );
        }
        true
    }
}

/// Requires a string that is not blank
#[derive(Debug, Clone, Default)]
pub struct NotEmptyString {
    options: ValidatorOptions,
}

impl NotEmptyString {
    pub const NOT_EMPTY: &'static str = NotEmpty::NOT_EMPTY;
    pub const NOT_STRING: &'static str = "notString";

    pub fn new() -> Self {
        Self::default()
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }
}

impl Validator for NotEmptyString {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        match ctx.value().as_str() {
            None => fail(
                &self.options,
                ctx,
                Self::NOT_STRING,
                "Value must be a string",
                message_values!(),
            ),
            Some(text) if text.trim().is_empty() => fail(
                &self.options,
                ctx,
                Self::NOT_EMPTY,
                NotEmpty::NOT_EMPTY_TEMPLATE,
                message_values!(),
            ),
            Some(_) => true,
        }
    }
}

/// Requires null
#[derive(Debug, Clone, Default)]
pub struct IsNone {
    options: ValidatorOptions,
}

impl IsNone {
    pub const NONE: &'static str = "None";

    pub fn new() -> Self {
        Self::default()
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }
}

impl Validator for IsNone {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        if !ctx.value().is_null() {
            return fail(
                &self.options,
                ctx,
                Self::NONE,
                "'$value' must be None",
                message_values!(),
            );
        }
        true
    }
}

/// Rejects null
#[derive(Debug, Clone, Default)]
pub struct NotNone {
    options: ValidatorOptions,
}

impl NotNone {
    pub const NOT_NONE: &'static str = "notNone";

    pub fn new() -> Self {
        Self::default()
    }

    fn default_options() -> ValidatorOptions {
        ValidatorOptions::default()
    }
}

impl Validator for NotNone {
    fn validate_with_context(&self, ctx: &Context<'_>) -> bool {
        if ctx.value().is_null() {
            return fail(
                &self.options,
                ctx,
                Self::NOT_NONE,
                "Value must not be None",
                message_values!(),
            );
        }
        true
    }
}

impl_configurable!(
    EqualTo,
    NotEqualTo,
    StringNotContaining,
    Length,
    NumberRange,
    Regexp,
    Email,
    MacAddress,
    Url,
    Uuid,
    IpAddress,
    AnyOf,
    NoneOf,
    IsEmpty,
    NotEmpty,
    NotEmptyString,
    IsNone,
    NotNone,
);
