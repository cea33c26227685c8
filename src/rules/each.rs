//! Each rule: apply a rule set to every element of a collection.

use std::any::Any;
use std::borrow::Cow;

use serde_json::Value;

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::path::PathSegment;
use crate::core::result::ValidationOutcome;
use crate::core::rule::{Rule, RuleHandler, RuleOptions, RuleSet, expect_rule};
use crate::rules::add_incorrect_input;

// ============================================================================
// EACH RULE
// ============================================================================

/// Applies one rule set to every element of an array or object.
///
/// Array elements extend the path by their index, object members by their
/// original key; keys are never re-numbered. Non-iterable input records
/// the incorrect-input failure with the actual type name.
///
/// # Examples
///
/// ```rust,ignore
/// use rulekit::rules::{Each, Number};
/// use rulekit::rule_set;
///
/// let rgb = Each::new(rule_set![Number::new().min(0.0).max(255.0)]);
/// ```
#[derive(Debug)]
pub struct Each {
    rules: RuleSet,
    incorrect_input_message: Cow<'static, str>,
    options: RuleOptions,
}

impl Each {
    /// Creates an each rule over a rule set.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            incorrect_input_message: Cow::Borrowed(
                "{Property} must be array or iterable. {type} given.",
            ),
            options: RuleOptions::default(),
        }
    }

    /// Overrides the incorrect-input message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn incorrect_input_message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.incorrect_input_message = template.into();
        self
    }

    /// The per-element rule set.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

crate::impl_rule_options!(Each);

impl Rule for Each {
    fn name(&self) -> &'static str {
        "each"
    }

    fn handler(&self) -> &'static dyn RuleHandler {
        &EachHandler
    }

    fn options(&self) -> &RuleOptions {
        &self.options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// EACH HANDLER
// ============================================================================

/// Stateless evaluator for [`Each`].
#[derive(Debug)]
pub struct EachHandler;

impl RuleHandler for EachHandler {
    fn validate<'v>(
        &self,
        target: &'v Value,
        rule: &dyn Rule,
        context: &ValidationContext<'v>,
    ) -> Result<ValidationOutcome, RuleError> {
        let rule: &Each = expect_rule(rule, "each")?;
        let mut outcome = ValidationOutcome::new();
        let validator = context.validator();

        match target {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let child = context.enter(PathSegment::index(index), item)?;
                    validator.validate_set(item, &rule.rules, &child, &mut outcome)?;
                }
            }
            Value::Object(members) => {
                for (key, item) in members {
                    let child = context.enter(PathSegment::key(key.as_str()), item)?;
                    validator.validate_set(item, &rule.rules, &child, &mut outcome)?;
                }
            }
            other => {
                add_incorrect_input(&mut outcome, context, &rule.incorrect_input_message, other);
            }
        }
        Ok(outcome)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Validator;
    use crate::rules::Number;
    use crate::{rule_map, rule_set};
    use serde_json::json;

    #[test]
    fn only_failing_indices_are_reported() {
        let validator = Validator::new();
        let rules = rule_map! {
            "rgb" => [Each::new(rule_set![Number::new().min(0.0).max(255.0)])]
        };
        let outcome = validator
            .validate(&json!({"rgb": [0, 256, 255]}), &rules)
            .unwrap();
        let indexed = outcome.messages_indexed_by_path();
        assert_eq!(indexed.len(), 1);
        assert_eq!(indexed["rgb.1"], ["Rgb must be no greater than 255."]);
        assert!(outcome.messages_at("rgb.0").is_empty());
        assert!(outcome.messages_at("rgb.2").is_empty());
    }

    #[test]
    fn object_members_keep_their_keys() {
        let validator = Validator::new();
        let rules = rule_set![Each::new(rule_set![Number::new().min(0.0)])];
        let outcome = validator
            .validate_value(&json!({"first": 1, "second": -2}), &rules)
            .unwrap();
        assert_eq!(
            outcome.messages_indexed_by_path().keys().collect::<Vec<_>>(),
            ["second"]
        );
    }

    #[test]
    fn non_iterable_input_is_reported_with_type() {
        let validator = Validator::new();
        let rules = rule_set![Each::new(rule_set![Number::new()])];
        let outcome = validator.validate_value(&json!("scalar"), &rules).unwrap();
        assert_eq!(
            outcome.messages(),
            ["Value must be array or iterable. string given."]
        );
    }

    #[test]
    fn empty_collections_are_valid() {
        let validator = Validator::new();
        let rules = rule_set![Each::new(rule_set![Number::new()])];
        assert!(
            validator
                .validate_value(&json!([]), &rules)
                .unwrap()
                .is_valid()
        );
    }
}
