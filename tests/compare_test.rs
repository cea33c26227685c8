//! Comparison rule behavior: operators, strictness, cross-field targets.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rulekit::prelude::*;
use serde_json::{Value, json};

fn check(rule: Compare, value: &Value) -> Vec<String> {
    let outcome = Validator::new()
        .validate_value(value, &rule_set![rule])
        .unwrap();
    outcome.messages().into_iter().map(String::from).collect()
}

// ============================================================================
// EQUALITY
// ============================================================================

#[test]
fn not_equal_against_a_fixed_target() {
    assert_eq!(check(Compare::not_equal(100), &json!(101)), Vec::<String>::new());
    assert_eq!(
        check(Compare::not_equal(100), &json!(100)),
        vec!["Value must not be equal to \"100\".".to_string()]
    );
}

#[test]
fn strict_not_equal_reports_its_own_message() {
    assert_eq!(
        check(Compare::not_equal(100).strict(), &json!(100)),
        vec!["Value must not be strictly equal to \"100\".".to_string()]
    );
    // A numeric string is loosely but not strictly equal.
    assert_eq!(
        check(Compare::not_equal(101).strict(), &json!("101")),
        Vec::<String>::new()
    );
}

#[test]
fn equal_coerces_numeric_strings() {
    assert_eq!(check(Compare::equal(100), &json!("100")), Vec::<String>::new());
    assert_eq!(
        check(Compare::equal(100), &json!("abc")),
        vec!["Value must be equal to \"100\".".to_string()]
    );
}

#[test]
fn original_type_distinguishes_containers_of_scalars() {
    let rule = Compare::equal("abc").compare_type(CompareType::Original);
    assert_eq!(check(rule, &json!("abc")), Vec::<String>::new());
}

// ============================================================================
// ORDERING
// ============================================================================

#[rstest]
#[case::greater_pass(Compare::greater_than(10), json!(11), None)]
#[case::greater_fail(
    Compare::greater_than(10),
    json!(10),
    Some("Value must be greater than \"10\".")
)]
#[case::greater_or_equal_pass(Compare::greater_or_equal(10), json!(10), None)]
#[case::less_pass(Compare::less_than(10), json!(9), None)]
#[case::less_fail(Compare::less_than(10), json!(10), Some("Value must be less than \"10\"."))]
#[case::less_or_equal_fail(
    Compare::less_or_equal(10),
    json!(11),
    Some("Value must be less than or equal to \"10\".")
)]
fn ordering_operators(#[case] rule: Compare, #[case] input: Value, #[case] expected: Option<&str>) {
    let messages = check(rule, &input);
    match expected {
        None => assert_eq!(messages, Vec::<String>::new()),
        Some(message) => assert_eq!(messages, vec![message.to_string()]),
    }
}

#[test]
fn string_type_orders_lexicographically() {
    let rule = Compare::greater_than("b").compare_type(CompareType::String);
    assert_eq!(check(rule, &json!("c")), Vec::<String>::new());
    assert_eq!(
        check(
            Compare::greater_than("b").compare_type(CompareType::String),
            &json!("a")
        ),
        vec!["Value must be greater than \"b\".".to_string()]
    );
}

// ============================================================================
// CROSS-FIELD TARGETS
// ============================================================================

#[test]
fn target_property_resolves_from_the_dataset() {
    let validator = Validator::new();
    let rules = rule_map! {
        "password_repeat" => [Compare::to_property(CompareOperator::Equal, "password")
            .compare_type(CompareType::String)]
    };

    let outcome = validator
        .validate(
            &json!({"password": "s3cret", "password_repeat": "s3cret"}),
            &rules,
        )
        .unwrap();
    assert!(outcome.is_valid());

    let outcome = validator
        .validate(
            &json!({"password": "s3cret", "password_repeat": "typo"}),
            &rules,
        )
        .unwrap();
    assert_eq!(
        outcome.messages(),
        vec!["Password_repeat must be equal to \"password\"."]
    );
}

#[test]
fn non_scalar_dataset_target_reports_data_set_type() {
    let validator = Validator::new();
    let rules = rule_map! {
        "a" => [Compare::to_property(CompareOperator::Equal, "b")]
    };
    let outcome = validator
        .validate(&json!({"a": 1, "b": [1, 2]}), &rules)
        .unwrap();
    assert_eq!(
        outcome.messages(),
        vec![
            "A returned from a custom data set must have one of the following types: integer, \
             float, string, boolean or null."
        ]
    );
}

// ============================================================================
// INPUT TYPE GATE
// ============================================================================

#[rstest]
#[case::array(json!([1, 2]), "array")]
#[case::object(json!({"k": 1}), "object")]
fn non_scalar_input_reports_incorrect_input(#[case] input: Value, #[case] kind: &str) {
    let messages = check(Compare::equal(1), &input);
    assert_eq!(
        messages,
        vec![format!(
            "The allowed types for value are integer, float, string, boolean and null. {kind} given."
        )]
    );
}

#[test]
fn custom_message_overrides_the_operator_default() {
    assert_eq!(
        check(Compare::not_equal(100).message("Custom error"), &json!(100)),
        vec!["Custom error".to_string()]
    );
}
