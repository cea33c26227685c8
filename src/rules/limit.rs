//! Shared min/max/exactly limit behavior.
//!
//! Several rule kinds ([`Count`](crate::rules::Count),
//! [`Length`](crate::rules::Length)) validate an integer measure of the
//! value against the same configuration shape: either bounds (`min`, `max`)
//! or an exact target, never both. The configuration is checked once at
//! construction; evaluation emits at most one message.

use serde::Serialize;
use serde_json::Value;

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::result::ValidationOutcome;
use crate::rules::{add_failure, base_params};

// ============================================================================
// LIMIT SPEC
// ============================================================================

/// Validated min/max/exactly configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitSpec {
    min: Option<usize>,
    max: Option<usize>,
    exactly: Option<usize>,
}

impl LimitSpec {
    /// Creates a spec from raw options, failing fast on nonsense.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidArgument`] when nothing is configured, when
    /// `exactly` is combined with bounds, when the bounds are inverted, or
    /// when `min == max` (use `exactly` for that).
    pub fn new(
        min: Option<usize>,
        max: Option<usize>,
        exactly: Option<usize>,
    ) -> Result<Self, RuleError> {
        if min.is_none() && max.is_none() && exactly.is_none() {
            return Err(RuleError::invalid_argument(
                "At least one of \"min\", \"max\" or \"exactly\" must be specified.",
            ));
        }
        if exactly.is_some() && (min.is_some() || max.is_some()) {
            return Err(RuleError::invalid_argument(
                "\"exactly\" is mutually exclusive with \"min\" and \"max\".",
            ));
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(RuleError::invalid_argument(
                    "\"min\" must be lower than \"max\".",
                ));
            }
            if min == max {
                return Err(RuleError::invalid_argument(
                    "Equal \"min\" and \"max\" are redundant, use \"exactly\" instead.",
                ));
            }
        }
        Ok(Self { min, max, exactly })
    }

    /// A spec requiring an exact measure.
    #[must_use]
    pub fn exact(exactly: usize) -> Self {
        Self {
            min: None,
            max: None,
            exactly: Some(exactly),
        }
    }

    /// A spec with only a lower bound.
    #[must_use]
    pub fn at_least(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
            exactly: None,
        }
    }

    /// A spec with only an upper bound.
    #[must_use]
    pub fn at_most(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
            exactly: None,
        }
    }

    /// The lower bound, if configured.
    #[must_use]
    pub fn min(&self) -> Option<usize> {
        self.min
    }

    /// The upper bound, if configured.
    #[must_use]
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// The exact target, if configured.
    #[must_use]
    pub fn exactly(&self) -> Option<usize> {
        self.exactly
    }
}

// ============================================================================
// LIMIT EVALUATION
// ============================================================================

/// Message templates for the three limit failure reasons.
pub(crate) struct LimitMessages<'a> {
    pub not_exactly: &'a str,
    pub less_than_min: &'a str,
    pub greater_than_max: &'a str,
}

/// Checks a measure against a spec, recording at most one failure.
///
/// The `{number}` parameter carries the computed measure in every message;
/// `{exactly}`, `{min}` and `{max}` carry the violated bound.
pub(crate) fn check_limits(
    spec: &LimitSpec,
    measure: usize,
    messages: &LimitMessages<'_>,
    context: &ValidationContext<'_>,
    target: &Value,
    outcome: &mut ValidationOutcome,
) {
    let mut params = base_params(context, target);
    params.push(("number".into(), measure.to_string()));

    if let Some(exactly) = spec.exactly {
        if measure != exactly {
            params.push(("exactly".into(), exactly.to_string()));
            add_failure(outcome, context, messages.not_exactly, &params);
        }
        return;
    }
    if let Some(min) = spec.min
        && measure < min
    {
        params.push(("min".into(), min.to_string()));
        add_failure(outcome, context, messages.less_than_min, &params);
        return;
    }
    if let Some(max) = spec.max
        && measure > max
    {
        params.push(("max".into(), max.to_string()));
        add_failure(outcome, context, messages.greater_than_max, &params);
    }
}

// ============================================================================
// TESTS
// ============================================================================
