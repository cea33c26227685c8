//! String length rule.
//!
//! Length is measured in Unicode scalar values, not bytes.

use std::any::Any;
use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::result::ValidationOutcome;
use crate::core::rule::{Rule, RuleHandler, RuleOptions, expect_rule};
use crate::rules::add_incorrect_input;
use crate::rules::limit::{LimitMessages, LimitSpec, check_limits};

// ============================================================================
// LENGTH RULE
// ============================================================================

/// Validates the character length of a string.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Length {
    #[serde(flatten)]
    limit: LimitSpec,
    incorrect_input_message: Cow<'static, str>,
    less_than_min_message: Cow<'static, str>,
    greater_than_max_message: Cow<'static, str>,
    not_exactly_message: Cow<'static, str>,
    #[serde(flatten)]
    options: RuleOptions,
}

impl Length {
    /// Requires an exact character count.
    #[must_use]
    pub fn exactly(exactly: usize) -> Self {
        Self::with_spec(LimitSpec::exact(exactly))
    }

    /// Requires at least `min` characters.
    #[must_use]
    pub fn at_least(min: usize) -> Self {
        Self::with_spec(LimitSpec::at_least(min))
    }

    /// Requires at most `max` characters.
    #[must_use]
    pub fn at_most(max: usize) -> Self {
        Self::with_spec(LimitSpec::at_most(max))
    }

    /// Requires the character count to stay within bounds.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidArgument`] on an unusable bound combination.
    pub fn within(min: Option<usize>, max: Option<usize>) -> Result<Self, RuleError> {
        LimitSpec::new(min, max, None).map(Self::with_spec)
    }

    fn with_spec(limit: LimitSpec) -> Self {
        Self {
            limit,
            incorrect_input_message: Cow::Borrowed("{Property} must be a string. {type} given."),
            less_than_min_message: Cow::Borrowed(
                "{Property} must contain at least {min} characters.",
            ),
            greater_than_max_message: Cow::Borrowed(
                "{Property} must contain at most {max} characters.",
            ),
            not_exactly_message: Cow::Borrowed(
                "{Property} must contain exactly {exactly} characters.",
            ),
            options: RuleOptions::default(),
        }
    }

    /// The configured limits.
    #[must_use]
    pub fn limit(&self) -> &LimitSpec {
        &self.limit
    }
}

crate::impl_rule_options!(Length);

impl Rule for Length {
    fn name(&self) -> &'static str {
        "length"
    }

    fn handler(&self) -> &'static dyn RuleHandler {
        &LengthHandler
    }

    fn options(&self) -> &RuleOptions {
        &self.options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// LENGTH HANDLER
// ============================================================================

/// Stateless evaluator for [`Length`].
#[derive(Debug)]
pub struct LengthHandler;

impl RuleHandler for LengthHandler {
    fn validate<'v>(
        &self,
        target: &'v Value,
        rule: &dyn Rule,
        context: &ValidationContext<'v>,
    ) -> Result<ValidationOutcome, RuleError> {
        let rule: &Length = expect_rule(rule, "length")?;
        let mut outcome = ValidationOutcome::new();

        let Some(input) = target.as_str() else {
            add_incorrect_input(&mut outcome, context, &rule.incorrect_input_message, target);
            return Ok(outcome);
        };

        check_limits(
            &rule.limit,
            input.chars().count(),
            &LimitMessages {
                not_exactly: &rule.not_exactly_message,
                less_than_min: &rule.less_than_min_message,
                greater_than_max: &rule.greater_than_max_message,
            },
            context,
            target,
            &mut outcome,
        );
        Ok(outcome)
    }
}

// ============================================================================
// TESTS
// ============================================================================
