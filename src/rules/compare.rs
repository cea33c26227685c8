//! Value comparison rules.
//!
//! One configuration covers the whole equality/ordering family: a target
//! (a fixed value or a reference to another property of the same dataset),
//! an operator, and a comparison type deciding how operands are coerced.

use std::any::Any;
use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::result::ValidationOutcome;
use crate::core::rule::{Rule, RuleHandler, RuleOptions, expect_rule};
use crate::core::value;
use crate::rules::{add_failure, add_incorrect_input, base_params};

// ============================================================================
// COMPARE TYPE
// ============================================================================

/// How operands are interpreted before comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareType {
    /// Compare string representations.
    String,
    /// Compare numerically (numeric strings are parsed).
    Number,
    /// Compare native values.
    Original,
}

// ============================================================================
// COMPARE OPERATOR
// ============================================================================

/// The comparison predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOperator {
    /// `==`
    Equal,
    /// `===` — equality plus matching operand kinds.
    StrictEqual,
    /// `!=`
    NotEqual,
    /// `!==`
    StrictNotEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessOrEqual,
}

impl CompareOperator {
    /// The conventional symbol, used when serializing rule options.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::StrictEqual => "===",
            Self::NotEqual => "!=",
            Self::StrictNotEqual => "!==",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
        }
    }

    fn default_message(&self) -> &'static str {
        match self {
            Self::Equal => "{Property} must be equal to \"{targetValueOrProperty}\".",
            Self::StrictEqual => "{Property} must be strictly equal to \"{targetValueOrProperty}\".",
            Self::NotEqual => "{Property} must not be equal to \"{targetValueOrProperty}\".",
            Self::StrictNotEqual => {
                "{Property} must not be strictly equal to \"{targetValueOrProperty}\"."
            }
            Self::GreaterThan => "{Property} must be greater than \"{targetValueOrProperty}\".",
            Self::GreaterOrEqual => {
                "{Property} must be greater than or equal to \"{targetValueOrProperty}\"."
            }
            Self::LessThan => "{Property} must be less than \"{targetValueOrProperty}\".",
            Self::LessOrEqual => {
                "{Property} must be less than or equal to \"{targetValueOrProperty}\"."
            }
        }
    }
}

impl Serialize for CompareOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

// ============================================================================
// COMPARE RULE
// ============================================================================

/// Compares the validated value against a target.
///
/// Exactly one of a fixed target value or a target property is configured.
/// Property targets are resolved against the context's current dataset at
/// evaluation time, so the rule itself stays context-free and reusable.
///
/// # Examples
///
/// ```rust,ignore
/// use rulekit::rules::Compare;
///
/// let not_hundred = Compare::not_equal(100);
/// let strict = Compare::not_equal(100).strict();
/// let confirm = Compare::to_property(CompareOperator::Equal, "password");
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Compare {
    target_value: Option<Value>,
    target_property: Option<String>,
    #[serde(rename = "type")]
    compare_type: CompareType,
    operator: CompareOperator,
    incorrect_input_message: Cow<'static, str>,
    incorrect_data_set_type_message: Cow<'static, str>,
    message: Option<Cow<'static, str>>,
    #[serde(flatten)]
    options: RuleOptions,
}

impl Compare {
    /// Creates a comparison from raw parts.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidArgument`] when both or neither of
    /// `target_value` / `target_property` are set, or when the target
    /// value is not a comparable kind (array/object).
    pub fn new(
        operator: CompareOperator,
        target_value: Option<Value>,
        target_property: Option<String>,
    ) -> Result<Self, RuleError> {
        match (&target_value, &target_property) {
            (Some(_), Some(_)) | (None, None) => {
                return Err(RuleError::invalid_argument(
                    "Either \"targetValue\" or \"targetProperty\" must be specified, but not both.",
                ));
            }
            (Some(target), None) if !is_comparable(target) => {
                return Err(RuleError::invalid_argument(format!(
                    "The target value must be an integer, float, string, boolean or null. {} given.",
                    value::type_name(target),
                )));
            }
            _ => {}
        }
        let mut rule = Self::base(operator);
        rule.target_value = target_value;
        rule.target_property = target_property;
        Ok(rule)
    }

    fn base(operator: CompareOperator) -> Self {
        Self {
            target_value: None,
            target_property: None,
            compare_type: CompareType::Number,
            operator,
            incorrect_input_message: Cow::Borrowed(
                "The allowed types for {property} are integer, float, string, boolean and null. \
                 {type} given.",
            ),
            incorrect_data_set_type_message: Cow::Borrowed(
                "{Property} returned from a custom data set must have one of the following types: \
                 integer, float, string, boolean or null.",
            ),
            message: None,
            options: RuleOptions::default(),
        }
    }

    /// Compares against a fixed target value.
    ///
    /// The target must be a comparable kind; arrays and objects are
    /// rejected at the rule's first evaluation.
    #[must_use]
    pub fn to_value(operator: CompareOperator, target: impl Into<Value>) -> Self {
        let mut rule = Self::base(operator);
        rule.target_value = Some(target.into());
        rule
    }

    /// Compares against another property of the same dataset.
    #[must_use]
    pub fn to_property(operator: CompareOperator, property: impl Into<String>) -> Self {
        let mut rule = Self::base(operator);
        rule.target_property = Some(property.into());
        rule
    }

    /// `value == target`.
    #[must_use]
    pub fn equal(target: impl Into<Value>) -> Self {
        Self::to_value(CompareOperator::Equal, target)
    }

    /// `value != target`.
    #[must_use]
    pub fn not_equal(target: impl Into<Value>) -> Self {
        Self::to_value(CompareOperator::NotEqual, target)
    }

    /// `value > target`.
    #[must_use]
    pub fn greater_than(target: impl Into<Value>) -> Self {
        Self::to_value(CompareOperator::GreaterThan, target)
    }

    /// `value >= target`.
    #[must_use]
    pub fn greater_or_equal(target: impl Into<Value>) -> Self {
        Self::to_value(CompareOperator::GreaterOrEqual, target)
    }

    /// `value < target`.
    #[must_use]
    pub fn less_than(target: impl Into<Value>) -> Self {
        Self::to_value(CompareOperator::LessThan, target)
    }

    /// `value <= target`.
    #[must_use]
    pub fn less_or_equal(target: impl Into<Value>) -> Self {
        Self::to_value(CompareOperator::LessOrEqual, target)
    }

    /// Upgrades equality operators to their strict variants
    /// (`==` → `===`, `!=` → `!==`); other operators are unchanged.
    #[must_use = "builder methods must be chained or built"]
    pub fn strict(mut self) -> Self {
        self.operator = match self.operator {
            CompareOperator::Equal => CompareOperator::StrictEqual,
            CompareOperator::NotEqual => CompareOperator::StrictNotEqual,
            other => other,
        };
        self
    }

    /// Sets the comparison type.
    #[must_use = "builder methods must be chained or built"]
    pub fn compare_type(mut self, compare_type: CompareType) -> Self {
        self.compare_type = compare_type;
        self
    }

    /// Overrides the failure message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(template.into());
        self
    }

    /// The configured operator.
    #[must_use]
    pub fn operator(&self) -> CompareOperator {
        self.operator
    }

    fn target_value_or_property(&self) -> String {
        match (&self.target_value, &self.target_property) {
            (_, Some(property)) => property.clone(),
            (Some(target), None) => value::display(target),
            (None, None) => String::new(),
        }
    }
}

crate::impl_rule_options!(Compare);

impl Rule for Compare {
    fn name(&self) -> &'static str {
        "compare"
    }

    fn handler(&self) -> &'static dyn RuleHandler {
        &CompareHandler
    }

    fn options(&self) -> &RuleOptions {
        &self.options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// COMPARE HANDLER
// ============================================================================

/// Stateless evaluator for [`Compare`].
#[derive(Debug)]
pub struct CompareHandler;

impl RuleHandler for CompareHandler {
    fn validate<'v>(
        &self,
        target: &'v Value,
        rule: &dyn Rule,
        context: &ValidationContext<'v>,
    ) -> Result<ValidationOutcome, RuleError> {
        let rule: &Compare = expect_rule(rule, "compare")?;
        let mut outcome = ValidationOutcome::new();

        if !is_comparable(target) {
            add_incorrect_input(&mut outcome, context, &rule.incorrect_input_message, target);
            return Ok(outcome);
        }

        let other = match (&rule.target_value, &rule.target_property) {
            (Some(fixed), None) => {
                if !is_comparable(fixed) {
                    return Err(RuleError::invalid_argument(format!(
                        "The target value must be an integer, float, string, boolean or null. \
                         {} given.",
                        value::type_name(fixed),
                    )));
                }
                fixed
            }
            (None, Some(property)) => {
                let resolved = context.resolve_property(property).unwrap_or(&Value::Null);
                if !is_comparable(resolved) {
                    let mut params = base_params(context, target);
                    params.push(("targetProperty".into(), property.clone()));
                    params.push((
                        "targetValueOrProperty".into(),
                        rule.target_value_or_property(),
                    ));
                    add_failure(
                        &mut outcome,
                        context,
                        &rule.incorrect_data_set_type_message,
                        &params,
                    );
                    return Ok(outcome);
                }
                resolved
            }
            // Unreachable through the public constructors.
            _ => {
                return Err(RuleError::invalid_argument(
                    "Either \"targetValue\" or \"targetProperty\" must be specified, but not both.",
                ));
            }
        };

        if !evaluate(rule.compare_type, rule.operator, target, other) {
            let template = rule
                .message
                .as_deref()
                .unwrap_or_else(|| rule.operator.default_message());
            let mut params = base_params(context, target);
            params.push(("targetValue".into(), match &rule.target_value {
                Some(fixed) => value::display(fixed),
                None => String::new(),
            }));
            if let Some(property) = &rule.target_property {
                params.push(("targetProperty".into(), property.clone()));
            }
            params.push((
                "targetValueOrProperty".into(),
                rule.target_value_or_property(),
            ));
            add_failure(&mut outcome, context, template, &params);
        }
        Ok(outcome)
    }
}

// ============================================================================
// COMPARISON SEMANTICS
// ============================================================================

/// Operand kinds accepted on both sides of a comparison.
fn is_comparable(operand: &Value) -> bool {
    !matches!(operand, Value::Array(_) | Value::Object(_))
}

fn evaluate(compare_type: CompareType, operator: CompareOperator, a: &Value, b: &Value) -> bool {
    match operator {
        CompareOperator::Equal => loose_eq(compare_type, a, b),
        CompareOperator::StrictEqual => strict_eq(compare_type, a, b),
        CompareOperator::NotEqual => !loose_eq(compare_type, a, b),
        CompareOperator::StrictNotEqual => !strict_eq(compare_type, a, b),
        CompareOperator::GreaterThan => {
            matches!(order(compare_type, a, b), Some(Ordering::Greater))
        }
        CompareOperator::GreaterOrEqual => matches!(
            order(compare_type, a, b),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        CompareOperator::LessThan => matches!(order(compare_type, a, b), Some(Ordering::Less)),
        CompareOperator::LessOrEqual => matches!(
            order(compare_type, a, b),
            Some(Ordering::Less | Ordering::Equal)
        ),
    }
}

fn loose_eq(compare_type: CompareType, a: &Value, b: &Value) -> bool {
    match compare_type {
        CompareType::Number => match (as_number(a), as_number(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
        CompareType::String => value::display(a) == value::display(b),
        CompareType::Original => {
            a == b
                || matches!((as_number(a), as_number(b)), (Some(x), Some(y)) if x == y)
                || value::display(a) == value::display(b)
        }
    }
}

/// Strict equality: equal under the comparison type AND matching operand
/// kinds (integer and float count as distinct kinds).
fn strict_eq(compare_type: CompareType, a: &Value, b: &Value) -> bool {
    kind(a) == kind(b) && loose_eq(compare_type, a, b)
}

fn order(compare_type: CompareType, a: &Value, b: &Value) -> Option<Ordering> {
    match compare_type {
        CompareType::Number => numeric_order(a, b),
        CompareType::String => Some(value::display(a).cmp(&value::display(b))),
        CompareType::Original => numeric_order(a, b).or_else(|| match (a, b) {
            (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
            _ => None,
        }),
    }
}

fn numeric_order(a: &Value, b: &Value) -> Option<Ordering> {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y),
        _ => None,
    }
}

/// Numeric coercion: numbers as-is, numeric strings parsed.
fn as_number(operand: &Value) -> Option<f64> {
    match operand {
        Value::Number(number) => number.as_f64(),
        Value::String(string) => string.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn kind(operand: &Value) -> &'static str {
    value::type_name(operand)
}

// ============================================================================
// TESTS
// ============================================================================
