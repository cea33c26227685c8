//! Property paths.
//!
//! A path addresses a value inside nested data as an ordered sequence of
//! string keys and integer indices, e.g. `coordinates.0.x` or `rgb.2`.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

// ============================================================================
// PATH SEGMENT
// ============================================================================

/// One step of a property path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object property name.
    Key(String),
    /// Array element index (original index, never re-numbered).
    Index(usize),
}

impl PathSegment {
    /// Creates a key segment.
    pub fn key(name: impl Into<String>) -> Self {
        Self::Key(name.into())
    }

    /// Creates an index segment.
    #[must_use]
    pub fn index(index: usize) -> Self {
        Self::Index(index)
    }

    /// Picks the segment kind matching how `property` addresses `container`:
    /// numeric properties of arrays become index segments.
    pub fn for_property(property: &str, container: &Value) -> Self {
        if container.is_array()
            && let Ok(index) = property.parse::<usize>()
        {
            return Self::Index(index);
        }
        Self::Key(property.to_string())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

// ============================================================================
// PATH
// ============================================================================

/// An ordered sequence of path segments locating a value in nested data.
///
/// The string form joins segments with `.`; the root path renders empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// The root path (no segments).
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns true for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The segments in order.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// A copy of this path extended by one segment.
    #[must_use]
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// The nearest property name, scanning from the end past index
    /// segments. `coordinates.0` resolves to `coordinates`.
    #[must_use]
    pub fn property_name(&self) -> Option<&str> {
        self.0.iter().rev().find_map(|segment| match segment {
            PathSegment::Key(key) => Some(key.as_str()),
            PathSegment::Index(_) => None,
        })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_joins_segments_with_dots() {
        let path: Path = ["coordinates"].into_iter().map(PathSegment::from).collect();
        let path = path.child(0usize).child("x");
        assert_eq!(path.to_string(), "coordinates.0.x");
    }

    #[test]
    fn root_renders_empty() {
        assert_eq!(Path::root().to_string(), "");
        assert!(Path::root().is_root());
    }

    #[test]
    fn property_name_skips_trailing_indices() {
        let path = Path::root().child("rgb").child(1usize);
        assert_eq!(path.property_name(), Some("rgb"));
        assert_eq!(Path::root().property_name(), None);
    }

    #[test]
    fn for_property_uses_indices_on_arrays() {
        assert_eq!(
            PathSegment::for_property("2", &json!([1, 2, 3])),
            PathSegment::Index(2)
        );
        assert_eq!(
            PathSegment::for_property("2", &json!({"2": true})),
            PathSegment::Key("2".to_string())
        );
    }
}
