//! Built-in rules and their handlers.
//!
//! Leaf rules test a value directly ([`Ip`], [`Json`], [`Compare`],
//! [`Count`], [`Length`], [`Number`], [`Pattern`]); recursive evaluators
//! re-enter the engine ([`Composite`], [`Nested`], [`Each`]).

pub mod compare;
pub mod composite;
pub mod count;
pub mod each;
pub mod ip;
pub mod json;
pub mod length;
pub mod limit;
pub mod nested;
pub mod number;
pub mod pattern;

pub use compare::{Compare, CompareOperator, CompareType};
pub use composite::Composite;
pub use count::Count;
pub use each::Each;
pub use ip::Ip;
pub use json::Json;
pub use length::Length;
pub use limit::LimitSpec;
pub use nested::Nested;
pub use number::Number;
pub use pattern::Pattern;

use serde_json::Value;
use smallvec::smallvec;

use crate::core::context::ValidationContext;
use crate::core::message::{MessageParams, format_message};
use crate::core::result::ValidationOutcome;
use crate::core::value;

/// The parameters every rule message starts from: `{property}` (and its
/// `{Property}` case variant) plus `{value}`.
pub(crate) fn base_params(context: &ValidationContext<'_>, target: &Value) -> MessageParams {
    smallvec![
        ("property".into(), context.property_name().to_string()),
        ("value".into(), value::display(target)),
    ]
}

/// Renders a template and records the failure at the context's path.
pub(crate) fn add_failure(
    outcome: &mut ValidationOutcome,
    context: &ValidationContext<'_>,
    template: &str,
    params: &MessageParams,
) {
    outcome.add(context.path().clone(), format_message(template, params));
}

/// Records the shared "incorrect input" failure with the `{type}` parameter.
pub(crate) fn add_incorrect_input(
    outcome: &mut ValidationOutcome,
    context: &ValidationContext<'_>,
    template: &str,
    target: &Value,
) {
    let mut params = base_params(context, target);
    params.push(("type".into(), value::type_name(target).to_string()));
    add_failure(outcome, context, template, &params);
}
