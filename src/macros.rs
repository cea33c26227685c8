//! Macros for reducing rule boilerplate.
//!
//! - [`impl_rule_options!`] — generates the universal modifier builders
//!   (`skip_on_empty`, `skip_on_error`, `when`) for a rule struct.
//! - [`rule_set!`] — builds an ordered [`RuleSet`](crate::RuleSet).
//! - [`rule_map!`] — builds an ordered property → rule set mapping.

// ============================================================================
// RULE OPTIONS MACRO
// ============================================================================

/// Generates the universal modifier builders for a rule struct.
///
/// The struct must have an `options: RuleOptions` field.
///
/// ```rust,ignore
/// #[derive(Debug, Clone)]
/// pub struct MyRule {
///     options: RuleOptions,
/// }
///
/// crate::impl_rule_options!(MyRule);
///
/// let rule = MyRule::new().skip_on_empty(true).skip_on_error(true);
/// ```
#[macro_export]
macro_rules! impl_rule_options {
    ($rule:ty) => {
        impl $rule {
            /// Skips this rule when the validated value is semantically empty
            /// (null, empty string, empty array or empty object).
            #[must_use = "builder methods must be chained or built"]
            pub fn skip_on_empty(mut self, skip: bool) -> Self {
                self.options.skip_on_empty = skip;
                self
            }

            /// Aborts the remaining rules of the owning rule set after this
            /// rule fails.
            #[must_use = "builder methods must be chained or built"]
            pub fn skip_on_error(mut self, skip: bool) -> Self {
                self.options.skip_on_error = skip;
                self
            }

            /// Evaluates this rule only when the condition returns `true`.
            #[must_use = "builder methods must be chained or built"]
            pub fn when<F>(mut self, condition: F) -> Self
            where
                F: Fn(&$crate::Value, &$crate::ValidationContext<'_>) -> bool
                    + Send
                    + Sync
                    + 'static,
            {
                self.options.when = Some(::std::sync::Arc::new(condition));
                self
            }
        }
    };
}

// ============================================================================
// RULE SET MACRO
// ============================================================================

/// Builds an ordered [`RuleSet`](crate::RuleSet) from rule values.
///
/// ```rust,ignore
/// let set = rule_set![Json::new(), Length::at_least(2)];
/// ```
#[macro_export]
macro_rules! rule_set {
    ($($rule:expr),* $(,)?) => {
        ::std::vec![
            $(::std::sync::Arc::new($rule) as ::std::sync::Arc<dyn $crate::Rule>),*
        ]
    };
}

// ============================================================================
// RULE MAP MACRO
// ============================================================================

/// Builds an ordered property → [`RuleSet`](crate::RuleSet) mapping.
///
/// ```rust,ignore
/// let rules = rule_map! {
///     "name" => [Length::at_least(1)],
///     "age" => [Number::new().min(0.0)],
/// };
/// ```
#[macro_export]
macro_rules! rule_map {
    ($($property:expr => [$($rule:expr),* $(,)?]),* $(,)?) => {{
        let mut map = $crate::RuleMap::new();
        $(
            map.insert(
                ::std::string::String::from($property),
                $crate::rule_set![$($rule),*],
            );
        )*
        map
    }};
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::rules::Json;

    #[test]
    fn rule_set_builds_ordered_set() {
        let set = rule_set![Json::new(), Json::new()];
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].name(), "json");
    }

    #[test]
    fn rule_map_preserves_declaration_order() {
        let map = rule_map! {
            "b" => [Json::new()],
            "a" => [Json::new(), Json::new()],
        };
        let properties: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(properties, ["b", "a"]);
        assert_eq!(map["a"].len(), 2);
    }
}
