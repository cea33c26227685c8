//! Engine-level behavior: skip policies, ordering, depth limits, rule
//! discovery.

use pretty_assertions::assert_eq;
use rulekit::prelude::*;
use serde_json::{Value, json};

#[test]
fn skip_on_error_truncates_the_rule_set() {
    let validator = Validator::new();

    let rules = rule_map! {
        "payload" => [Length::at_least(30).skip_on_error(true), Json::new()]
    };
    let outcome = validator.validate(&json!({"payload": "nope"}), &rules).unwrap();
    assert_eq!(
        outcome.messages(),
        vec!["Payload must contain at least 30 characters."]
    );

    let rules = rule_map! {
        "payload" => [Length::at_least(30), Json::new()]
    };
    let outcome = validator.validate(&json!({"payload": "nope"}), &rules).unwrap();
    assert_eq!(
        outcome.messages(),
        vec![
            "Payload must contain at least 30 characters.",
            "Payload is not a valid JSON.",
        ]
    );
}

#[test]
fn skip_on_error_only_affects_its_own_property() {
    let validator = Validator::new();
    let rules = rule_map! {
        "first" => [Json::new().skip_on_error(true)],
        "second" => [Json::new()]
    };
    let outcome = validator
        .validate(&json!({"first": 1, "second": 2}), &rules)
        .unwrap();
    assert_eq!(outcome.messages().len(), 2);
}

#[test]
fn when_predicate_reads_the_context_dataset() {
    let validator = Validator::new();
    // Validate "port" only when "kind" is "tcp".
    let rules = rule_map! {
        "port" => [Number::new().min(1.0).when(|_, context| {
            context.resolve_property("kind").and_then(Value::as_str) == Some("tcp")
        })]
    };

    let outcome = validator
        .validate(&json!({"kind": "tcp", "port": 0}), &rules)
        .unwrap();
    assert_eq!(outcome.messages(), vec!["Port must be no less than 1."]);

    let outcome = validator
        .validate(&json!({"kind": "unix", "port": 0}), &rules)
        .unwrap();
    assert!(outcome.is_valid());
}

#[test]
fn skip_on_empty_skips_null_empty_string_and_empty_containers() {
    let validator = Validator::new();
    let rules = rule_map! {
        "a" => [Json::new().skip_on_empty(true)],
        "b" => [Length::at_least(2).skip_on_empty(true)],
        "c" => [Count::at_least(1).skip_on_empty(true)]
    };
    let outcome = validator
        .validate(&json!({"a": null, "b": "", "c": []}), &rules)
        .unwrap();
    assert!(outcome.is_valid());
}

#[test]
fn grouped_messages_follow_declaration_and_evaluation_order() {
    let validator = Validator::new();
    let rules = rule_map! {
        "b" => [Json::new(), Length::at_least(99)],
        "a" => [Json::new()]
    };
    let outcome = validator
        .validate(&json!({"a": 1, "b": "x"}), &rules)
        .unwrap();

    let indexed = outcome.messages_indexed_by_path();
    let paths: Vec<&str> = indexed.keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["b", "a"]);
    assert_eq!(
        indexed["b"],
        vec![
            "B is not a valid JSON.".to_string(),
            "B must contain at least 99 characters.".to_string(),
        ]
    );
    assert!(!outcome.is_valid());
}

#[test]
fn passing_validation_yields_an_empty_outcome() {
    let validator = Validator::new();
    let rules = rule_map! {
        "host" => [Ip::new()],
        "payload" => [Json::new()]
    };
    let outcome = validator
        .validate(&json!({"host": "10.0.0.1", "payload": "{}"}), &rules)
        .unwrap();
    assert!(outcome.is_valid());
    assert!(outcome.messages().is_empty());
    assert!(outcome.messages_indexed_by_path().is_empty());
}

#[test]
fn max_depth_aborts_with_a_dedicated_error() {
    let validator = Validator::new().with_max_depth(1);
    let rules = rule_set![Each::new(rule_set![Each::new(rule_set![Number::new()])])];
    let error = validator
        .validate_value(&json!([[1]]), &rules)
        .unwrap_err();
    assert!(matches!(error, RuleError::MaxDepthExceeded { limit: 1 }));

    // The same shape passes with a roomier limit.
    let validator = Validator::new().with_max_depth(10);
    assert!(
        validator
            .validate_value(&json!([[1]]), &rules)
            .unwrap()
            .is_valid()
    );
}

// ============================================================================
// RULE DISCOVERY
// ============================================================================

struct Profile {
    data: Value,
    rules: Option<RuleMap>,
}

impl ValidateSource for Profile {
    fn dataset(&self) -> &Value {
        &self.data
    }

    fn attached_rules(&self) -> Option<&RuleMap> {
        self.rules.as_ref()
    }

    fn subject(&self) -> &str {
        "profile"
    }
}

#[test]
fn sources_with_attached_rules_validate_like_plain_data() {
    let validator = Validator::new();
    let profile = Profile {
        data: json!({"host": "not an ip"}),
        rules: Some(rule_map! { "host" => [Ip::new()] }),
    };
    let outcome = validator.validate_source(&profile).unwrap();
    assert_eq!(outcome.messages(), vec!["Host must be a valid IP address."]);
}

#[test]
fn sources_without_rules_fail_with_rules_not_found() {
    let validator = Validator::new();
    let profile = Profile {
        data: json!({}),
        rules: None,
    };
    let error = validator.validate_source(&profile).unwrap_err();
    assert_eq!(
        error.to_string(),
        "no validation rules found for \"profile\""
    );
}
