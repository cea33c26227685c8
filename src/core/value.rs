//! Helpers over the dynamic value model.
//!
//! The engine validates [`serde_json::Value`] trees: integers, floats,
//! strings, booleans, null, arrays and objects: exactly the runtime types
//! the rules accept. The dataset is always borrowed read-only.

use serde_json::Value;

use crate::core::path::{Path, PathSegment};

/// The runtime type name used for `{type}` message parameters.
#[must_use]
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) => {
            if number.is_f64() {
                "float"
            } else {
                "integer"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Whether a value is semantically empty: null, the empty string, an empty
/// array or an empty object. This is the condition `skip_on_empty` tests.
#[must_use]
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(string) => string.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// The display form used for `{value}`-style message parameters.
///
/// Strings render without quotes; containers render as compact JSON.
#[must_use]
pub fn display(value: &Value) -> String {
    match value {
        Value::String(string) => string.clone(),
        other => other.to_string(),
    }
}

/// Reads a direct property of a keyed structure.
///
/// Objects resolve keys; arrays resolve numeric properties as indices.
#[must_use]
pub fn get_property<'v>(container: &'v Value, property: &str) -> Option<&'v Value> {
    match container {
        Value::Object(map) => map.get(property),
        Value::Array(items) => property.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Whether a direct property exists on a keyed structure.
#[must_use]
pub fn has_property(container: &Value, property: &str) -> bool {
    get_property(container, property).is_some()
}

/// Reads a value by full path from a root structure.
#[must_use]
pub fn lookup<'v>(root: &'v Value, path: &Path) -> Option<&'v Value> {
    let mut current = root;
    for segment in path.segments() {
        current = match segment {
            PathSegment::Key(key) => get_property(current, key)?,
            PathSegment::Index(index) => current.as_array()?.get(*index)?,
        };
    }
    Some(current)
}

// ============================================================================
// TESTS
// ============================================================================
