//! Nested rule: descend into sub-properties of a keyed structure.

use std::any::Any;
use std::borrow::Cow;

use serde_json::Value;

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::message::format_message;
use crate::core::path::PathSegment;
use crate::core::result::ValidationOutcome;
use crate::core::rule::{Rule, RuleHandler, RuleMap, RuleOptions, expect_rule};
use crate::core::value;
use crate::rules::base_params;

// ============================================================================
// NESTED RULE
// ============================================================================

/// Applies a property → rule set mapping to the current value treated as a
/// keyed structure, extending the path by each property name.
///
/// Missing or untraversable sub-properties are silently skipped unless
/// [`require_property_path`](Self::require_property_path) is set, in which
/// case the configurable not-found failure is recorded instead.
///
/// # Examples
///
/// ```rust,ignore
/// use rulekit::rules::{Nested, Number};
/// use rulekit::rule_map;
///
/// let point = Nested::new(rule_map! {
///     "x" => [Number::new()],
///     "y" => [Number::new()],
/// });
/// ```
#[derive(Debug)]
pub struct Nested {
    rules: RuleMap,
    require_property_path: bool,
    no_property_path_message: Cow<'static, str>,
    options: RuleOptions,
}

impl Nested {
    /// Creates a nested rule over a property → rule set mapping.
    #[must_use]
    pub fn new(rules: RuleMap) -> Self {
        Self {
            rules,
            require_property_path: false,
            no_property_path_message: Cow::Borrowed("Property \"{path}\" is not found."),
            options: RuleOptions::default(),
        }
    }

    /// Fails on sub-properties the value does not have instead of
    /// skipping them.
    #[must_use = "builder methods must be chained or built"]
    pub fn require_property_path(mut self, require: bool) -> Self {
        self.require_property_path = require;
        self
    }

    /// Overrides the property-not-found message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn no_property_path_message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.no_property_path_message = template.into();
        self
    }

    /// The nested mapping.
    #[must_use]
    pub fn rules(&self) -> &RuleMap {
        &self.rules
    }
}

crate::impl_rule_options!(Nested);

impl Rule for Nested {
    fn name(&self) -> &'static str {
        "nested"
    }

    fn handler(&self) -> &'static dyn RuleHandler {
        &NestedHandler
    }

    fn options(&self) -> &RuleOptions {
        &self.options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// NESTED HANDLER
// ============================================================================

/// Stateless evaluator for [`Nested`].
#[derive(Debug)]
pub struct NestedHandler;

impl RuleHandler for NestedHandler {
    fn validate<'v>(
        &self,
        target: &'v Value,
        rule: &dyn Rule,
        context: &ValidationContext<'v>,
    ) -> Result<ValidationOutcome, RuleError> {
        let rule: &Nested = expect_rule(rule, "nested")?;
        let mut outcome = ValidationOutcome::new();

        for (property, set) in &rule.rules {
            let segment = PathSegment::for_property(property, target);
            match value::get_property(target, property) {
                Some(sub) => {
                    // The descended structure becomes the dataset, so
                    // sibling sub-properties stay reachable for
                    // cross-field references.
                    let child = context.enter(segment, target)?;
                    context
                        .validator()
                        .validate_set(sub, set, &child, &mut outcome)?;
                }
                None if rule.require_property_path => {
                    let missing = context.path().child(segment);
                    let mut params = base_params(context, target);
                    params.push(("path".into(), missing.to_string()));
                    let message = format_message(&rule.no_property_path_message, &params);
                    outcome.add(missing, message);
                }
                None => {}
            }
        }
        Ok(outcome)
    }
}

// ============================================================================
// TESTS
// ============================================================================
