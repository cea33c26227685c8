//! Regular-expression rule.

use std::any::Any;
use std::borrow::Cow;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::result::ValidationOutcome;
use crate::core::rule::{Rule, RuleHandler, RuleOptions, expect_rule};
use crate::rules::{add_failure, add_incorrect_input, base_params};

// ============================================================================
// PATTERN RULE
// ============================================================================

/// Validates a string against a regular expression.
///
/// With [`not`](Self::not), the rule inverts: the string must NOT match.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pattern: String,
    not: bool,
    #[serde(skip)]
    regex: Regex,
    incorrect_input_message: Cow<'static, str>,
    message: Cow<'static, str>,
    #[serde(flatten)]
    options: RuleOptions,
}

impl Pattern {
    /// Compiles a pattern rule.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidArgument`] when the pattern does not compile.
    pub fn new(pattern: impl Into<String>) -> Result<Self, RuleError> {
        let pattern = pattern.into();
        let regex = Regex::new(&pattern).map_err(|error| {
            RuleError::invalid_argument(format!("Invalid pattern \"{pattern}\": {error}"))
        })?;
        Ok(Self {
            pattern,
            not: false,
            regex,
            incorrect_input_message: Cow::Borrowed("{Property} must be a string. {type} given."),
            message: Cow::Borrowed("{Property} is invalid."),
            options: RuleOptions::default(),
        })
    }

    /// Inverts the rule: the string must not match the pattern.
    #[must_use = "builder methods must be chained or built"]
    pub fn not(mut self) -> Self {
        self.not = true;
        self
    }

    /// Overrides the failure message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.message = template.into();
        self
    }

    /// The source pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

crate::impl_rule_options!(Pattern);

impl Rule for Pattern {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn handler(&self) -> &'static dyn RuleHandler {
        &PatternHandler
    }

    fn options(&self) -> &RuleOptions {
        &self.options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// PATTERN HANDLER
// ============================================================================

/// Stateless evaluator for [`Pattern`].
#[derive(Debug)]
pub struct PatternHandler;

impl RuleHandler for PatternHandler {
    fn validate<'v>(
        &self,
        target: &'v Value,
        rule: &dyn Rule,
        context: &ValidationContext<'v>,
    ) -> Result<ValidationOutcome, RuleError> {
        let rule: &Pattern = expect_rule(rule, "pattern")?;
        let mut outcome = ValidationOutcome::new();

        let Some(input) = target.as_str() else {
            add_incorrect_input(&mut outcome, context, &rule.incorrect_input_message, target);
            return Ok(outcome);
        };

        if rule.regex.is_match(input) == rule.not {
            let mut params = base_params(context, target);
            params.push(("pattern".into(), rule.pattern.clone()));
            add_failure(&mut outcome, context, &rule.message, &params);
        }
        Ok(outcome)
    }
}

// ============================================================================
// TESTS
// ============================================================================
