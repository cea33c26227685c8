//! Per-call validation state.
//!
//! A context is created once per top-level `validate` call and threaded
//! through every recursive descent. Children are copies with the path
//! extended and the dataset re-pointed at the sub-structure. Sibling
//! branches never share mutable state, while every branch reads the same
//! root dataset snapshot.

use serde_json::Value;

use crate::core::error::RuleError;
use crate::core::path::{Path, PathSegment};
use crate::core::value;
use crate::engine::Validator;

/// State carried through one `validate` call.
#[derive(Debug, Clone)]
pub struct ValidationContext<'v> {
    validator: &'v Validator,
    root: &'v Value,
    dataset: &'v Value,
    path: Path,
    depth: usize,
}

impl<'v> ValidationContext<'v> {
    pub(crate) fn new(validator: &'v Validator, root: &'v Value) -> Self {
        Self {
            validator,
            root,
            dataset: root,
            path: Path::root(),
            depth: 0,
        }
    }

    /// The engine running this call; recursive evaluators re-enter it.
    #[must_use]
    pub fn validator(&self) -> &'v Validator {
        self.validator
    }

    /// The full dataset the top-level call was invoked with.
    #[must_use]
    pub fn root(&self) -> &'v Value {
        self.root
    }

    /// The structure currently descended into. Cross-field references
    /// resolve against this dataset.
    #[must_use]
    pub fn dataset(&self) -> &'v Value {
        self.dataset
    }

    /// The current property path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current recursion depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The property name used for `{property}` message parameters;
    /// `"value"` at the root.
    #[must_use]
    pub fn property_name(&self) -> &str {
        self.path.property_name().unwrap_or("value")
    }

    /// Resolves another property of the current dataset (cross-field
    /// references such as comparison targets).
    #[must_use]
    pub fn resolve_property(&self, property: &str) -> Option<&'v Value> {
        value::get_property(self.dataset, property)
    }

    /// Whether the current dataset has the given property.
    #[must_use]
    pub fn has_property(&self, property: &str) -> bool {
        value::has_property(self.dataset, property)
    }

    /// Child context for descending into a sub-structure.
    ///
    /// # Errors
    ///
    /// [`RuleError::MaxDepthExceeded`] when the descent would pass the
    /// engine's depth limit.
    pub fn enter(
        &self,
        segment: impl Into<PathSegment>,
        dataset: &'v Value,
    ) -> Result<Self, RuleError> {
        self.guard_depth()?;
        Ok(Self {
            validator: self.validator,
            root: self.root,
            dataset,
            path: self.path.child(segment),
            depth: self.depth + 1,
        })
    }

    /// Child context at the same path and dataset: composite-style
    /// re-entry that still counts against the depth limit.
    pub fn descend(&self) -> Result<Self, RuleError> {
        self.guard_depth()?;
        Ok(Self {
            validator: self.validator,
            root: self.root,
            dataset: self.dataset,
            path: self.path.clone(),
            depth: self.depth + 1,
        })
    }

    fn guard_depth(&self) -> Result<(), RuleError> {
        let limit = self.validator.max_depth();
        if self.depth + 1 > limit {
            return Err(RuleError::MaxDepthExceeded { limit });
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
