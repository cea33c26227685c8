//! Json rule behavior, including the json.org checker pass fixtures.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rulekit::prelude::*;
use serde_json::{Value, json};

// JSON test from https://www.json.org/JSON_checker/test/pass1.json
const PASS1: &str = r##"[
    "JSON Test Pattern pass1",
    {"object with 1 member":["array with 1 element"]},
    {},
    [],
    -42,
    true,
    false,
    null,
    {
        "integer": 1234567890,
        "real": -9876.543210,
        "e": 0.123456789e-12,
        "E": 1.234567890E+34,
        "":  23456789012E66,
        "zero": 0,
        "one": 1,
        "space": " ",
        "quote": "\"",
        "backslash": "\\",
        "controls": "\b\f\n\r\t",
        "slash": "/ & \/",
        "alpha": "abcdefghijklmnopqrstuvwyz",
        "ALPHA": "ABCDEFGHIJKLMNOPQRSTUVWYZ",
        "digit": "0123456789",
        "0123456789": "digit",
        "special": "`1~!@#$%^&*()_+-={':[,]}|;.</>?",
        "hex": "\u0123\u4567\u89AB\uCDEF\uabcd\uef4A",
        "true": true,
        "false": false,
        "null": null,
        "array":[  ],
        "object":{  },
        "address": "50 St. James Street",
        "url": "http://www.JSON.org/",
        "comment": "// /* <!-- --",
        "# -- --> */": " ",
        " s p a c e d " :[1,2 , 3

,

4 , 5        ,          6           ,7        ],"compact":[1,2,3,4,5,6,7],
        "jsontext": "{\"object with 1 member\":[\"array with 1 element\"]}",
        "quotes": "&#34; \u0022 %22 0x22 034 &#x22;",
        "\/\\\"\uCAFE\uBABE\uAB98\uFCDE\ubcda\uef4A\b\f\n\r\t`1~!@#$%^&*()_+-=[]{}|;:',./<>?"
: "A key can be any string"
    },
    0.5 ,98.6
,
99.44
,

1066,
1e1,
0.1e1,
1e-1,
1e00,2e+00,2e-00
,"rosebud"]"##;

// JSON test from https://www.json.org/JSON_checker/test/pass2.json
const PASS2: &str = r#"[[[[[[[[[[[[[[[[[[["Not too deep"]]]]]]]]]]]]]]]]]]]"#;

// JSON test from https://www.json.org/JSON_checker/test/pass3.json
const PASS3: &str = r#"{
    "JSON Test Pattern pass3": {
        "The outermost value": "must be an object or array.",
        "In this test": "It is an object."
    }
}"#;

fn check(rule: Json, value: &Value) -> Vec<String> {
    let outcome = Validator::new()
        .validate_value(value, &rule_set![rule])
        .unwrap();
    outcome.messages().into_iter().map(String::from).collect()
}

#[rstest]
#[case::pass1(PASS1)]
#[case::pass2(PASS2)]
#[case::pass3(PASS3)]
fn json_checker_pass_fixtures_are_valid(#[case] document: &str) {
    assert_eq!(check(Json::new(), &json!(document)), Vec::<String>::new());
}

#[rstest]
#[case::truncated(r#"{"name": "tester""#)]
#[case::unquoted_token(r#"{"name": tester}"#)]
#[case::bare_word("bad json")]
fn malformed_documents_fail_with_the_generic_message(#[case] document: &str) {
    assert_eq!(
        check(Json::new(), &json!(document)),
        vec!["Value is not a valid JSON.".to_string()]
    );
}

#[rstest]
#[case::array(json!(["json"]), "Value must be a string. array given.")]
#[case::integer(json!(10), "Value must be a string. integer given.")]
#[case::null(json!(null), "Value must be a string. null given.")]
fn incorrect_input_reports_the_actual_type(#[case] input: Value, #[case] expected: &str) {
    assert_eq!(check(Json::new(), &input), vec![expected.to_string()]);
}

#[test]
fn custom_messages_render_parameters() {
    assert_eq!(
        check(
            Json::new().incorrect_input_message("Custom incorrect input message."),
            &json!(["json"])
        ),
        vec!["Custom incorrect input message.".to_string()]
    );
    assert_eq!(
        check(
            Json::new().message("Property - {property}, value - {value}."),
            &json!("bad json")
        ),
        vec!["Property - value, value - bad json.".to_string()]
    );
}

#[test]
fn property_name_capitalizes_in_messages() {
    let validator = Validator::new();
    let rules = rule_map! {
        "data" => [Json::new().message("Property - {Property}, value - {value}.")]
    };
    let outcome = validator
        .validate(&json!({"data": "bad json"}), &rules)
        .unwrap();
    assert_eq!(
        outcome.messages(),
        vec!["Property - Data, value - bad json."]
    );
}
