//! Numeric bounds rule.

use std::any::Any;
use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::result::ValidationOutcome;
use crate::core::rule::{Rule, RuleHandler, RuleOptions, expect_rule};
use crate::rules::{add_failure, add_incorrect_input, base_params};

// ============================================================================
// NUMBER RULE
// ============================================================================

/// Validates that a value is a number, optionally bounded.
///
/// Without bounds it is a pure type check; with `min`/`max` it also tests
/// the range (bounds are inclusive).
///
/// # Examples
///
/// ```rust,ignore
/// use rulekit::rules::Number;
///
/// let channel = Number::new().min(0.0).max(255.0);
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Number {
    min: Option<f64>,
    max: Option<f64>,
    incorrect_input_message: Cow<'static, str>,
    less_than_min_message: Cow<'static, str>,
    greater_than_max_message: Cow<'static, str>,
    #[serde(flatten)]
    options: RuleOptions,
}

impl Default for Number {
    fn default() -> Self {
        Self::new()
    }
}

impl Number {
    /// Creates an unbounded number rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min: None,
            max: None,
            incorrect_input_message: Cow::Borrowed("{Property} must be a number. {type} given."),
            less_than_min_message: Cow::Borrowed("{Property} must be no less than {min}."),
            greater_than_max_message: Cow::Borrowed("{Property} must be no greater than {max}."),
            options: RuleOptions::default(),
        }
    }

    /// Sets the inclusive lower bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the inclusive upper bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

crate::impl_rule_options!(Number);

impl Rule for Number {
    fn name(&self) -> &'static str {
        "number"
    }

    fn handler(&self) -> &'static dyn RuleHandler {
        &NumberHandler
    }

    fn options(&self) -> &RuleOptions {
        &self.options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// NUMBER HANDLER
// ============================================================================

/// Stateless evaluator for [`Number`].
#[derive(Debug)]
pub struct NumberHandler;

impl RuleHandler for NumberHandler {
    fn validate<'v>(
        &self,
        target: &'v Value,
        rule: &dyn Rule,
        context: &ValidationContext<'v>,
    ) -> Result<ValidationOutcome, RuleError> {
        let rule: &Number = expect_rule(rule, "number")?;
        let mut outcome = ValidationOutcome::new();

        let Some(number) = target.as_f64() else {
            add_incorrect_input(&mut outcome, context, &rule.incorrect_input_message, target);
            return Ok(outcome);
        };

        if let Some(min) = rule.min
            && number < min
        {
            let mut params = base_params(context, target);
            params.push(("min".into(), display_bound(min)));
            add_failure(&mut outcome, context, &rule.less_than_min_message, &params);
            return Ok(outcome);
        }
        if let Some(max) = rule.max
            && number > max
        {
            let mut params = base_params(context, target);
            params.push(("max".into(), display_bound(max)));
            add_failure(&mut outcome, context, &rule.greater_than_max_message, &params);
        }
        Ok(outcome)
    }
}

/// Renders whole bounds without a trailing fraction: `255`, not `255.0`.
fn display_bound(bound: f64) -> String {
    if bound.fract() == 0.0 && bound.is_finite() {
        format!("{bound:.0}")
    } else {
        bound.to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
