//! Unit tests for rule documents built into validator trees
//!
//! Each scenario is written as a YAML document and checked against the
//! errors the built tree reports.

use serde_json::json;
use sieve_core::{to_legacy_messages, Value};
use sieve_schemas::{Format, LoaderError, RuleLoader, RuleSet};
use std::path::Path;

fn rules(yaml: &str) -> RuleSet {
    RuleLoader::new()
        .rules_from_str(yaml, Format::Yaml, Path::new("rules.yaml"))
        .expect("rule document should build")
}

fn summary(rules: &RuleSet, data: serde_json::Value) -> Vec<String> {
    let result = rules.validate(Value::from(data)).unwrap();
    let summary = result.errors().iter().map(|e| e.to_string()).collect();
    summary
}

const DICT_TREE: &str = r#"
definitions:
  inner:
    type: dict
    fields:
      fieldName1: { type: optional, validators: [{ type: length, min: 4, max: 6 }] }
      fieldName2:
        type: if_field
        field: "<context>.fieldName2"
        when: { type: not_none }
        run_if_none: true
        add_check_info: false
        validator: { type: not_none }
      fieldName3:
        type: chain
        validators: [{ type: not_none }, { type: length, min: 7, max: 8 }]
rule:
  type: dict
  fields:
    fieldName1: { type: optional, validators: [{ type: length, min: 4, max: 6 }] }
    fieldName2:
      type: if_field
      field: fieldName1
      when: { type: not_none }
      run_if_none: true
      add_check_info: false
      validator: { type: length, min: 1, max: 2 }
    fieldName3:
      type: chain
      validators: [{ type: not_none }, { type: length, min: 7, max: 8 }]
    fieldTree1:
      type: chain
      validators: [{ type: not_empty }, { type: ref, name: inner }]
  key_validator: { type: regexp, pattern: "^field" }
  value_validator:
    type: some_items
    validator: { type: number_range, min: 1 }
"#;

mod dict_tree {
    use super::*;

    #[test]
    fn test_only_required() {
        let rules = rules(DICT_TREE);
        let data = json!({
            "fieldName3": "123456qw",
            "fieldTree1": {"fieldName3": "123456qw"},
            "fieldNumber": 2
        });
        assert!(summary(&rules, data).is_empty());
    }

    #[test]
    fn test_dependent_field_fails() {
        let rules = rules(DICT_TREE);
        let data = json!({
            "fieldName1": "asas",
            "fieldName2": "1322",
            "fieldName3": "123456qw",
            "fieldTree1": {"fieldName3": "123456qw"},
            "fieldNumber": 2
        });
        assert_eq!(
            summary(&rules, data),
            vec!["fieldName2 -> tooLong: '1322' is more than 2 unit length"]
        );
    }

    #[test]
    fn test_invalid_key() {
        let rules = rules(DICT_TREE);
        let data = json!({
            "fieldName3": "123456qw",
            "fakeField": "123456qw",
            "fieldTree1": {"fieldName3": "123456qw"},
            "fieldNumber": 2
        });
        assert_eq!(
            summary(&rules, data),
            vec![
                "invalidKey: 'fakeField' is not a valid key",
                "fakeField -> notMatch: 'fakeField' does not match against pattern '^field'",
            ]
        );
    }

    #[test]
    fn test_extra_fields_required() {
        let rules = rules(DICT_TREE);
        let data = json!({
            "fieldName3": "123456qw",
            "fieldTree1": {"fieldName3": "123456qw"}
        });
        assert_eq!(
            summary(&rules, data),
            vec!["tooFewValidItems: Too few items pass validation"]
        );
    }
}

mod options {
    use super::*;

    #[test]
    fn test_code_map_and_messages() {
        let rules = rules(
            r#"
rule:
  type: some
  validators:
    - { type: regexp, pattern: "^cba" }
    - type: regexp
      pattern: "^abc"
      options:
        error_code_map: { notMatch: ouch }
        error_messages: { ouch: "no abc prefix in '$value'" }
    - { type: email }
"#,
        );

        assert!(summary(&rules, json!("abcdef")).is_empty());
        assert_eq!(
            summary(&rules, json!("xyz")),
            vec![
                "notMatch: 'xyz' does not match against pattern '^cba'",
                "ouch: no abc prefix in 'xyz'",
                "notMail: 'xyz' is not a valid email address.",
            ]
        );
    }

    #[test]
    fn test_hidden_value() {
        let rules = rules(
            r#"
rule:
  type: dict
  fields:
    password:
      type: length
      min: 8
      options: { hidden: true }
"#,
        );
        assert_eq!(
            summary(&rules, json!({"password": "hunter2"})),
            vec!["password -> tooShort: '***hidden***' is less than 8 unit length"]
        );
    }

    #[test]
    fn test_message_values() {
        let rules = rules(
            r#"
rule:
  type: not_empty
  options:
    error_messages: { notEmpty: "$label can not be empty" }
    message_values: { label: Nickname }
"#,
        );
        assert_eq!(
            summary(&rules, json!("")),
            vec!["notEmpty: Nickname can not be empty"]
        );
    }
}

mod leaves {
    use super::*;

    #[test]
    fn test_leaf_kinds() {
        let rules = rules(
            r#"
rule:
  type: dict
  stop_on_fail: false
  fields:
    ip: { type: ip_address, ipv6: true }
    mac: { type: mac_address }
    url: { type: url, require_tld: false }
    id: { type: uuid }
    role: { type: any_of, values: [admin, user] }
    name: { type: none_of, values: [root] }
    bio: { type: string_not_containing, token: SPAM, case_insensitive: true }
    score: { type: number_range, min: 0, max: 10 }
    code: { type: equal_to, value: 7 }
    alias: { type: not_empty_string }
"#,
        );

        let valid = json!({
            "ip": "::1",
            "mac": "01:23:45:67:89:ab",
            "url": "http://localhost/x",
            "id": "12345678-1234-1234-1234-123456789abc",
            "role": "admin",
            "name": "alice",
            "bio": "hello",
            "score": 2.5,
            "code": 7,
            "alias": "al"
        });
        assert!(summary(&rules, valid).is_empty());

        let invalid = json!({
            "ip": "300.1.1.1",
            "mac": "01:23",
            "url": "localhost",
            "id": "nope",
            "role": "guest",
            "name": "root",
            "bio": "buy spam now",
            "score": 11,
            "code": 8,
            "alias": "  "
        });
        let codes: Vec<String> = rules
            .validate(Value::from(invalid))
            .unwrap()
            .errors()
            .iter()
            .map(|e| format!("{}:{}", e.field_path().unwrap_or_default(), e.code()))
            .collect();
        assert_eq!(
            codes,
            vec![
                "ip:notIpAddress",
                "mac:invalidMacAddress",
                "url:invalidUrl",
                "id:invalidUuid",
                "role:notInList",
                "name:inList",
                "bio:notContains",
                "score:outOfRange",
                "code:notEqual",
                "alias:notEmpty",
            ]
        );
    }
}

mod errors {
    use super::*;

    #[test]
    fn test_invalid_regexp() {
        let err = RuleLoader::new()
            .rules_from_str(
                "rule: { type: regexp, pattern: '(' }",
                Format::Yaml,
                Path::new("rules.yaml"),
            )
            .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidValidator { .. }));
    }

    #[test]
    fn test_missing_bounds() {
        let err = RuleLoader::new()
            .rules_from_str(
                r#"{"rule": {"type": "length"}}"#,
                Format::Json,
                Path::new("rules.json"),
            )
            .unwrap_err();
        assert!(err.to_string().contains("min"));
    }

    #[test]
    fn test_no_address_family() {
        let err = RuleLoader::new()
            .rules_from_str(
                "rule: { type: ip_address, ipv4: false }",
                Format::Yaml,
                Path::new("rules.yaml"),
            )
            .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidValidator { .. }));
    }
}

#[test]
fn test_legacy_export_of_built_rules() {
    let rules = rules(
        r#"
rule:
  type: dict
  stop_on_fail: false
  key_validator: { type: regexp, pattern: "^field" }
  value_validator:
    type: all_items
    validator:
      type: chain
      stop_on_fail: false
      validators:
        - { type: regexp, pattern: "^value" }
        - { type: length, min: 10 }
"#,
    );

    let result = rules
        .validate(Value::from(json!({"field_1": "v", "my_field_2": "v"})))
        .unwrap();
    assert_eq!(
        to_legacy_messages(&result),
        json!({
            "invalidKey": "'my_field_2' is not a valid key",
            "my_field_2": {"notMatch": "'my_field_2' does not match against pattern '^field'"},
            "field_1": {
                "notMatch": "'v' does not match against pattern '^value'",
                "tooShort": "'v' is less than 10 unit length"
            }
        })
    );
}
