//! # rulekit
//!
//! A declarative rule evaluation engine for structured data.
//!
//! Rules are immutable configuration objects attached to values or object
//! properties; stateless handlers evaluate them and collect rendered error
//! messages into a tree-shaped outcome keyed by property path.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rulekit::prelude::*;
//! use serde_json::json;
//!
//! let validator = Validator::new();
//! let rules = rule_map! {
//!     "host" => [Ip::new()],
//!     "payload" => [Json::new()],
//! };
//!
//! let outcome = validator.validate(&json!({"host": "10.0.0.1", "payload": "{}"}), &rules)?;
//! assert!(outcome.is_valid());
//! ```
//!
//! ## Architecture
//!
//! - [`Rule`] — immutable configuration with a stable kind tag, shareable
//!   across concurrent validations via `Arc<dyn Rule>`.
//! - [`RuleHandler`] — stateless, reentrant evaluator bound to one rule kind.
//! - [`Validator`] — the orchestrator: walks property rule sets, applies
//!   skip-on-empty / skip-on-error / `when` policies and merges results.
//! - [`ValidationOutcome`] — ordered `(path, message)` failures, also
//!   available grouped by dotted property path.
//!
//! Configuration mistakes (invalid rule construction, handler/rule kind
//! mismatches) surface as [`RuleError`] and abort the call. Validation
//! failures never do: `validate` returns them inside the outcome.

pub mod core;
pub mod engine;
mod macros;
pub mod prelude;
pub mod rules;

pub use crate::core::{
    MessageParams, Path, PathSegment, Rule, RuleError, RuleHandler, RuleMap, RuleOptions, RuleSet,
    ValidationContext, ValidationOutcome, Violation, WhenFn, format_message,
};
pub use crate::engine::{DEFAULT_MAX_DEPTH, ValidateSource, Validator};

/// The dynamic value model validated by the engine.
pub use serde_json::Value;
