//! Composite rule: several rules against the same value.

use std::any::Any;

use serde_json::Value;

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::result::ValidationOutcome;
use crate::core::rule::{Rule, RuleHandler, RuleOptions, RuleSet, expect_rule};

// ============================================================================
// COMPOSITE RULE
// ============================================================================

/// Runs an ordered list of rules against the same value and path, merging
/// every resulting message.
///
/// The composite's own `skip_on_error` only affects the outer rule set it
/// belongs to; inside the composite, each sub-rule's own `skip_on_error`
/// applies to the remaining sub-rules as in any rule set.
///
/// # Examples
///
/// ```rust,ignore
/// use rulekit::rules::{Composite, Json, Length};
/// use rulekit::rule_set;
///
/// let rule = Composite::new(rule_set![Length::at_least(2), Json::new()]);
/// ```
#[derive(Debug)]
pub struct Composite {
    rules: RuleSet,
    options: RuleOptions,
}

impl Composite {
    /// Creates a composite over an ordered rule set.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            options: RuleOptions::default(),
        }
    }

    /// The sub-rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

crate::impl_rule_options!(Composite);

impl Rule for Composite {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn handler(&self) -> &'static dyn RuleHandler {
        &CompositeHandler
    }

    fn options(&self) -> &RuleOptions {
        &self.options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// COMPOSITE HANDLER
// ============================================================================

/// Stateless evaluator for [`Composite`].
#[derive(Debug)]
pub struct CompositeHandler;

impl RuleHandler for CompositeHandler {
    fn validate<'v>(
        &self,
        target: &'v Value,
        rule: &dyn Rule,
        context: &ValidationContext<'v>,
    ) -> Result<ValidationOutcome, RuleError> {
        let rule: &Composite = expect_rule(rule, "composite")?;
        let child = context.descend()?;
        let mut outcome = ValidationOutcome::new();
        context
            .validator()
            .validate_set(target, &rule.rules, &child, &mut outcome)?;
        Ok(outcome)
    }
}

// ============================================================================
// TESTS
// ============================================================================
