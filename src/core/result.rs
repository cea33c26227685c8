//! The accumulated result tree.
//!
//! A [`ValidationOutcome`] collects `(path, message)` entries across a
//! whole validation run in insertion order. Every entry's path corresponds
//! to a path actually visited during the run; a property with no entries
//! is implicitly valid.

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::path::Path;

// ============================================================================
// VIOLATION
// ============================================================================

/// One recorded validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Where in the data the failure occurred.
    pub path: Path,
    /// The rendered message.
    pub message: String,
}

// ============================================================================
// VALIDATION OUTCOME
// ============================================================================

/// The result of one `validate` call.
///
/// `is_valid()` holds exactly when no violations were recorded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationOutcome {
    violations: Vec<Violation>,
}

impl ValidationOutcome {
    /// Creates an empty (valid) outcome.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no violations were recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Records a violation at a path.
    pub fn add(&mut self, path: Path, message: impl Into<String>) {
        self.violations.push(Violation {
            path,
            message: message.into(),
        });
    }

    /// Appends another outcome's violations, preserving order.
    pub fn merge(&mut self, other: ValidationOutcome) {
        self.violations.extend(other.violations);
    }

    /// All violations in evaluation order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// All messages in evaluation order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.violations
            .iter()
            .map(|violation| violation.message.as_str())
            .collect()
    }

    /// Messages grouped by dotted path string, groups and messages both in
    /// evaluation order.
    #[must_use]
    pub fn messages_indexed_by_path(&self) -> IndexMap<String, Vec<String>> {
        let mut indexed: IndexMap<String, Vec<String>> = IndexMap::new();
        for violation in &self.violations {
            indexed
                .entry(violation.path.to_string())
                .or_default()
                .push(violation.message.clone());
        }
        indexed
    }

    /// Messages recorded at one dotted path.
    #[must_use]
    pub fn messages_at(&self, path: &str) -> Vec<&str> {
        self.violations
            .iter()
            .filter(|violation| violation.path.to_string() == path)
            .map(|violation| violation.message.as_str())
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_outcome_is_valid() {
        assert!(ValidationOutcome::new().is_valid());
    }

    #[test]
    fn grouped_view_preserves_order_and_appends_per_path() {
        let mut outcome = ValidationOutcome::new();
        outcome.add(Path::root().child("b"), "first");
        outcome.add(Path::root().child("a"), "second");
        outcome.add(Path::root().child("b"), "third");

        let indexed = outcome.messages_indexed_by_path();
        let paths: Vec<&str> = indexed.keys().map(String::as_str).collect();
        assert_eq!(paths, ["b", "a"]);
        assert_eq!(indexed["b"], ["first", "third"]);
        assert_eq!(outcome.messages(), ["first", "second", "third"]);
    }

    #[test]
    fn merge_appends_in_order() {
        let mut first = ValidationOutcome::new();
        first.add(Path::root(), "one");
        let mut second = ValidationOutcome::new();
        second.add(Path::root(), "two");
        first.merge(second);
        assert_eq!(first.messages(), ["one", "two"]);
        assert!(!first.is_valid());
    }
}
