//! JSON syntax rule.

use std::any::Any;
use std::borrow::Cow;

use serde::Serialize;
use serde::de::IgnoredAny;
use serde_json::Value;

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::result::ValidationOutcome;
use crate::core::rule::{Rule, RuleHandler, RuleOptions, expect_rule};
use crate::rules::{add_failure, add_incorrect_input, base_params};

// ============================================================================
// JSON RULE
// ============================================================================

/// Validates that a string is well-formed JSON per RFC 8259.
///
/// Objects, arrays, strings with escapes, numbers with exponents, booleans
/// and null all pass; any parse failure yields the single generic message.
/// No partial or line-level diagnostics are surfaced.
///
/// # Examples
///
/// ```rust,ignore
/// use rulekit::rules::Json;
///
/// let rule = Json::new();
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Json {
    incorrect_input_message: Cow<'static, str>,
    message: Cow<'static, str>,
    #[serde(flatten)]
    options: RuleOptions,
}

impl Default for Json {
    fn default() -> Self {
        Self::new()
    }
}

impl Json {
    /// Creates a JSON rule with the default messages.
    #[must_use]
    pub fn new() -> Self {
        Self {
            incorrect_input_message: Cow::Borrowed("{Property} must be a string. {type} given."),
            message: Cow::Borrowed("{Property} is not a valid JSON."),
            options: RuleOptions::default(),
        }
    }

    /// Overrides the incorrect-input message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn incorrect_input_message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.incorrect_input_message = template.into();
        self
    }

    /// Overrides the invalid-JSON message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.message = template.into();
        self
    }
}

crate::impl_rule_options!(Json);

impl Rule for Json {
    fn name(&self) -> &'static str {
        "json"
    }

    fn handler(&self) -> &'static dyn RuleHandler {
        &JsonHandler
    }

    fn options(&self) -> &RuleOptions {
        &self.options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// JSON HANDLER
// ============================================================================

/// Stateless evaluator for [`Json`].
#[derive(Debug)]
pub struct JsonHandler;

impl RuleHandler for JsonHandler {
    fn validate<'v>(
        &self,
        target: &'v Value,
        rule: &dyn Rule,
        context: &ValidationContext<'v>,
    ) -> Result<ValidationOutcome, RuleError> {
        let rule: &Json = expect_rule(rule, "json")?;
        let mut outcome = ValidationOutcome::new();

        let Some(input) = target.as_str() else {
            add_incorrect_input(&mut outcome, context, &rule.incorrect_input_message, target);
            return Ok(outcome);
        };

        if serde_json::from_str::<IgnoredAny>(input).is_err() {
            let params = base_params(context, target);
            add_failure(&mut outcome, context, &rule.message, &params);
        }
        Ok(outcome)
    }
}

// ============================================================================
// TESTS
// ============================================================================
