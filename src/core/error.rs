//! Configuration-error taxonomy.
//!
//! These errors signal programmer mistakes: invalid rule construction, a
//! handler fed a rule kind it does not evaluate, runaway nesting, or data
//! with no resolvable rules. They are fatal to the calling code path and
//! are never recorded as per-field validation messages; expected
//! validation failures live in
//! [`ValidationOutcome`](crate::ValidationOutcome) instead.

use thiserror::Error;

/// A fatal configuration or usage error raised by the engine.
#[derive(Debug, Error)]
pub enum RuleError {
    /// Invalid rule configuration supplied by the calling code.
    #[error("{message}")]
    InvalidArgument {
        /// Description of the misconfiguration.
        message: String,
    },

    /// A handler received a rule kind it does not evaluate.
    #[error("expected \"{expected}\" rule, \"{actual}\" given")]
    UnexpectedRule {
        /// Kind the handler evaluates.
        expected: &'static str,
        /// Kind it actually received.
        actual: &'static str,
    },

    /// Recursive descent exceeded the configured depth limit.
    #[error("validation exceeded the maximum nesting depth of {limit}")]
    MaxDepthExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// No rules could be resolved for the data under validation.
    #[error("no validation rules found for \"{subject}\"")]
    RulesNotFound {
        /// Description of the data the rules were looked up for.
        subject: String,
    },
}

impl RuleError {
    /// Creates an [`RuleError::InvalidArgument`] from any message.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_displays_message_verbatim() {
        let error = RuleError::invalid_argument("Both IPv4 and IPv6 checks can not be disabled.");
        assert_eq!(
            error.to_string(),
            "Both IPv4 and IPv6 checks can not be disabled."
        );
    }

    #[test]
    fn unexpected_rule_names_both_kinds() {
        let error = RuleError::UnexpectedRule {
            expected: "ip",
            actual: "json",
        };
        assert_eq!(error.to_string(), "expected \"ip\" rule, \"json\" given");
    }
}
