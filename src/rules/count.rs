//! Element-count rule.

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
// COUNT RULE
// ============================================================================

/// Validates the number of elements of an array or object.
///
/// # Examples
///
/// ```rust,ignore
/// use rulekit::rules::Count;
///
/// let rgb = Count::exactly(3);
/// let tags = Count::within(Some(1), Some(10))?;
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Count {
    #[serde(flatten)]
    limit: LimitSpec,
    incorrect_input_message: Cow<'static, str>,
    less_than_min_message: Cow<'static, str>,
    greater_than_max_message: Cow<'static, str>,
    not_exactly_message: Cow<'static, str>,
    #[serde(flatten)]
    options: RuleOptions,
}

impl Count {
    /// Requires an exact element count.
    #[must_use]
    pub fn exactly(exactly: usize) -> Self {
        Self::with_spec(LimitSpec::exact(exactly))
    }

    /// Requires at least `min` elements.
    #[must_use]
    pub fn at_least(min: usize) -> Self {
        Self::with_spec(LimitSpec::at_least(min))
    }

    /// Requires at most `max` elements.
    #[must_use]
    pub fn at_most(max: usize) -> Self {
        Self::with_spec(LimitSpec::at_most(max))
    }

    /// Requires the element count to stay within bounds.
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
            incorrect_input_message: Cow::Borrowed("{Property} must be an array. {type} given."),
            less_than_min_message: Cow::Borrowed("{Property} must contain at least {min} items."),
            greater_than_max_message: Cow::Borrowed(
                "{Property} must contain at most {max} items.",
            ),
            not_exactly_message: Cow::Borrowed("{Property} must contain exactly {exactly} items."),
            options: RuleOptions::default(),
        }
    }

    /// The configured limits.
    #[must_use]
    pub fn limit(&self) -> &LimitSpec {
        &self.limit
    }

    /// Overrides the incorrect-input message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn incorrect_input_message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.incorrect_input_message = template.into();
        self
    }
}

crate::impl_rule_options!(Count);

impl Rule for Count {
    fn name(&self) -> &'static str {
        "count"
    }

    fn handler(&self) -> &'static dyn RuleHandler {
        &CountHandler
    }

    fn options(&self) -> &RuleOptions {
        &self.options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// COUNT HANDLER
// ============================================================================

/// Stateless evaluator for [`Count`].
#[derive(Debug)]
pub struct CountHandler;

impl RuleHandler for CountHandler {
    fn validate<'v>(
        &self,
        target: &'v Value,
        rule: &dyn Rule,
        context: &ValidationContext<'v>,
    ) -> Result<ValidationOutcome, RuleError> {
        let rule: &Count = expect_rule(rule, "count")?;
        let mut outcome = ValidationOutcome::new();

        let measure = match target {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            other => {
                add_incorrect_input(&mut outcome, context, &rule.incorrect_input_message, other);
                return Ok(outcome);
            }
        };

        check_limits(
            &rule.limit,
            measure,
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
