//! The rule / handler pair.
//!
//! A [`Rule`] is an immutable configuration value object: a stable kind
//! tag, kind-specific options, message templates, and the universal
//! modifiers in [`RuleOptions`]. A [`RuleHandler`] is the stateless
//! behavior evaluating exactly one rule kind; the same handler instance is
//! shared across concurrent validation calls and must stay reentrant.
//!
//! Handlers receive rules as `&dyn Rule` and must check the kind they were
//! given: a mismatched kind is a programmer error surfaced as
//! [`RuleError::UnexpectedRule`], never as a validation failure.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::result::ValidationOutcome;

// ============================================================================
// RULE OPTIONS
// ============================================================================

/// Condition deciding whether a rule applies to the current value.
pub type WhenFn = Arc<dyn Fn(&Value, &ValidationContext<'_>) -> bool + Send + Sync>;

/// Universal modifiers shared by every rule kind.
#[derive(Clone, Default)]
pub struct RuleOptions {
    /// Skip evaluation when the value is semantically empty.
    pub skip_on_empty: bool,
    /// Abort the remaining rules of the owning set after a failure.
    pub skip_on_error: bool,
    /// Suppress evaluation entirely when the condition returns `false`.
    pub when: Option<WhenFn>,
}

impl fmt::Debug for RuleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleOptions")
            .field("skip_on_empty", &self.skip_on_empty)
            .field("skip_on_error", &self.skip_on_error)
            .field("when", &self.when.as_ref().map(|_| "<condition>"))
            .finish()
    }
}

impl Serialize for RuleOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("skipOnEmpty", &self.skip_on_empty)?;
        map.serialize_entry("skipOnError", &self.skip_on_error)?;
        map.end()
    }
}

// ============================================================================
// RULE TRAIT
// ============================================================================

/// An immutable validation rule.
///
/// Rules are pure data: created before validation, never mutated during it,
/// and freely shared across concurrent calls via `Arc<dyn Rule>`.
pub trait Rule: fmt::Debug + Send + Sync + 'static {
    /// Stable kind identifier, e.g. `"ip"`.
    fn name(&self) -> &'static str;

    /// The stateless handler that evaluates this rule kind.
    fn handler(&self) -> &'static dyn RuleHandler;

    /// The universal modifiers.
    fn options(&self) -> &RuleOptions;

    /// Kind-check support for handlers.
    fn as_any(&self) -> &dyn Any;
}

/// Downcasts a rule to the kind a handler evaluates.
///
/// # Errors
///
/// [`RuleError::UnexpectedRule`] when the rule is of a different kind,
/// a contract violation by the calling code that is always fatal.
pub fn expect_rule<'r, R: Rule>(
    rule: &'r dyn Rule,
    expected: &'static str,
) -> Result<&'r R, RuleError> {
    rule.as_any()
        .downcast_ref::<R>()
        .ok_or(RuleError::UnexpectedRule {
            expected,
            actual: rule.name(),
        })
}

// ============================================================================
// RULE HANDLER TRAIT
// ============================================================================

/// Stateless evaluator bound to one rule kind.
pub trait RuleHandler: Send + Sync {
    /// Evaluates `rule` against `value` in `context`.
    ///
    /// The value borrows from the same dataset as the context, so
    /// recursive evaluators can derive child contexts from sub-values.
    /// Validation failures are recorded in the returned outcome; the
    /// `Err` channel is reserved for configuration errors.
    fn validate<'v>(
        &self,
        value: &'v Value,
        rule: &dyn Rule,
        context: &ValidationContext<'v>,
    ) -> Result<ValidationOutcome, RuleError>;
}

// ============================================================================
// RULE COLLECTIONS
// ============================================================================

/// Ordered rules bound to one property (or to the root value).
///
/// Order matters: rules evaluate in sequence, and a failing rule with
/// `skip_on_error` truncates the rest of its set.
pub type RuleSet = Vec<Arc<dyn Rule>>;

/// Ordered mapping from property name to its rule set.
pub type RuleMap = IndexMap<String, RuleSet>;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Ip, Json};

    #[test]
    fn expect_rule_accepts_matching_kind() {
        let rule = Json::new();
        let dynamic: &dyn Rule = &rule;
        assert!(expect_rule::<Json>(dynamic, "json").is_ok());
    }

    #[test]
    fn expect_rule_rejects_mismatched_kind() {
        let rule = Ip::new();
        let dynamic: &dyn Rule = &rule;
        let error = expect_rule::<Json>(dynamic, "json").unwrap_err();
        assert!(matches!(
            error,
            RuleError::UnexpectedRule {
                expected: "json",
                actual: "ip"
            }
        ));
    }

    #[test]
    fn options_serialize_as_camel_case_flags() {
        let options = RuleOptions {
            skip_on_empty: true,
            ..RuleOptions::default()
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"skipOnEmpty": true, "skipOnError": false})
        );
    }
}
