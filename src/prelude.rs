//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use rulekit::prelude::*;
//!
//! let validator = Validator::new();
//! let rules = rule_map! { "host" => [Ip::new()] };
//! ```

// ============================================================================
// CORE: traits, errors, context, outcome
// ============================================================================

pub use crate::core::{
    MessageParams, Path, PathSegment, Rule, RuleError, RuleHandler, RuleMap, RuleOptions, RuleSet,
    ValidationContext, ValidationOutcome, Violation, format_message,
};

// ============================================================================
// ENGINE
// ============================================================================

pub use crate::engine::{ValidateSource, Validator};

// ============================================================================
// RULES: the built-in catalog
// ============================================================================

pub use crate::rules::{
    Compare, CompareOperator, CompareType, Composite, Count, Each, Ip, Json, Length, Nested,
    Number, Pattern,
};

// ============================================================================
// MACROS
// ============================================================================

pub use crate::{rule_map, rule_set};
