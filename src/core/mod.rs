//! Core building blocks of the rule evaluation engine.
//!
//! - **Errors**: [`RuleError`] — configuration mistakes, fatal and distinct
//!   from per-field validation failures.
//! - **Messages**: [`format_message`] — `{name}` template substitution with
//!   `{Name}` first-letter-uppercase variants.
//! - **Paths**: [`Path`], [`PathSegment`] — key/index addresses inside
//!   nested data.
//! - **Rules**: [`Rule`], [`RuleHandler`], [`RuleOptions`] — configuration /
//!   behavior split with universal skip modifiers.
//! - **Context**: [`ValidationContext`] — per-call state threaded through
//!   every recursive descent.
//! - **Outcome**: [`ValidationOutcome`] — the accumulated result tree.

pub mod context;
pub mod error;
pub mod message;
pub mod path;
pub mod result;
pub mod rule;
pub mod value;

pub use context::ValidationContext;
pub use error::RuleError;
pub use message::{MessageParams, format_message};
pub use path::{Path, PathSegment};
pub use result::{ValidationOutcome, Violation};
pub use rule::{Rule, RuleHandler, RuleMap, RuleOptions, RuleSet, WhenFn, expect_rule};
