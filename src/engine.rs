//! The validation engine.
//!
//! [`Validator`] orchestrates a run: for every property it walks the
//! ordered rule set, consults the per-rule `when` / skip-on-empty /
//! skip-on-error policies, dispatches to the rule's handler and merges the
//! results into one [`ValidationOutcome`]. Recursive evaluators (composite,
//! nested, each) re-enter the engine through the context.
//!
//! The engine is synchronous; a single call never blocks or yields.
//! Independent calls may run concurrently on separate threads: rules are
//! immutable, handlers are stateless, and every call owns its context and
//! outcome.

use serde_json::Value;
use tracing::trace;

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::path::PathSegment;
use crate::core::result::ValidationOutcome;
use crate::core::rule::{RuleMap, RuleSet};
use crate::core::value;

/// Default bound on recursive descent.
///
/// Depth is otherwise limited only by the input data, so hostile deeply
/// nested input must hit a wall before the call stack does.
pub const DEFAULT_MAX_DEPTH: usize = 500;

// ============================================================================
// VALIDATE SOURCE
// ============================================================================

/// External rule discovery: a data holder with pre-attached rules.
///
/// The engine does not care how the mapping was produced (attributes,
/// a fluent builder, a config file). It only asks for the dataset and the
/// rules; a source without rules fails with [`RuleError::RulesNotFound`].
pub trait ValidateSource {
    /// The dataset under validation.
    fn dataset(&self) -> &Value;

    /// Rules attached to this source, if any.
    fn attached_rules(&self) -> Option<&RuleMap>;

    /// Subject description used in `RulesNotFound` errors.
    fn subject(&self) -> &str {
        "data set"
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// The rule evaluation engine.
#[derive(Debug, Clone)]
pub struct Validator {
    max_depth: usize,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Creates an engine with the default depth limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the recursion depth limit.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured recursion depth limit.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Validates a dataset against a property → rule set mapping.
    ///
    /// Properties missing from the dataset validate as `null`. The outcome
    /// carries all validation failures; the `Err` channel carries only
    /// configuration errors (kind mismatches, depth exhaustion).
    pub fn validate(
        &self,
        data: &Value,
        rules: &RuleMap,
    ) -> Result<ValidationOutcome, RuleError> {
        let context = ValidationContext::new(self, data);
        let mut outcome = ValidationOutcome::new();
        for (property, set) in rules {
            let target = value::get_property(data, property).unwrap_or(&Value::Null);
            let child = context.enter(PathSegment::key(property.as_str()), data)?;
            self.validate_set(target, set, &child, &mut outcome)?;
        }
        Ok(outcome)
    }

    /// Validates a single value against one rule set at the root path.
    pub fn validate_value(
        &self,
        target: &Value,
        rules: &RuleSet,
    ) -> Result<ValidationOutcome, RuleError> {
        let context = ValidationContext::new(self, target);
        let mut outcome = ValidationOutcome::new();
        self.validate_set(target, rules, &context, &mut outcome)?;
        Ok(outcome)
    }

    /// Validates a source carrying its own pre-attached rules.
    ///
    /// # Errors
    ///
    /// [`RuleError::RulesNotFound`] when the source has no rules attached.
    pub fn validate_source<S: ValidateSource>(
        &self,
        source: &S,
    ) -> Result<ValidationOutcome, RuleError> {
        match source.attached_rules() {
            Some(rules) => self.validate(source.dataset(), rules),
            None => Err(RuleError::RulesNotFound {
                subject: source.subject().to_string(),
            }),
        }
    }

    /// Runs one rule set against one value in an existing context.
    ///
    /// This is the per-property state machine: skip on `when`, skip on
    /// empty, evaluate, record, truncate on `skip_on_error`.
    pub(crate) fn validate_set<'v>(
        &self,
        target: &'v Value,
        rules: &RuleSet,
        context: &ValidationContext<'v>,
        outcome: &mut ValidationOutcome,
    ) -> Result<(), RuleError> {
        for rule in rules {
            let options = rule.options();
            if let Some(when) = &options.when
                && !when(target, context)
            {
                continue;
            }
            if options.skip_on_empty && value::is_empty(target) {
                continue;
            }

            trace!(rule = rule.name(), path = %context.path(), "evaluating rule");
            let result = rule.handler().validate(target, rule.as_ref(), context)?;
            let failed = !result.is_valid();
            outcome.merge(result);

            if failed && options.skip_on_error {
                trace!(rule = rule.name(), path = %context.path(), "skip_on_error truncated rule set");
                break;
            }
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
