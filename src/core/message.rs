//! Message template rendering.
//!
//! Templates are plain strings with `{name}` placeholders. A placeholder
//! whose first letter is upper-cased (`{Name}`) substitutes the same
//! parameter with its first letter upper-cased. This serves property-name
//! placeholders, so `{property}` renders `value` while `{Property}` renders
//! `Value`. Unknown placeholders render literally.

use std::borrow::Cow;

use smallvec::SmallVec;

/// Ordered named parameters for one message rendering.
///
/// Most messages carry 2–4 parameters (property, value, plus one or two
/// rule-specific ones), so they stay inline.
pub type MessageParams = SmallVec<[(Cow<'static, str>, String); 4]>;

/// Renders a message template by substituting named placeholders.
///
/// Rendering is a pure function: the template and parameters are never
/// mutated, and the same inputs always produce the same output.
///
/// # Examples
///
/// ```rust,ignore
/// use rulekit::{MessageParams, format_message};
/// use smallvec::smallvec;
///
/// let params: MessageParams = smallvec![("property".into(), "value".to_string())];
/// assert_eq!(format_message("{Property} is invalid.", &params), "Value is invalid.");
/// ```
#[must_use]
pub fn format_message(template: &str, params: &MessageParams) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        rendered.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match resolve(params, name) {
                    Some(value) => rendered.push_str(&value),
                    None => {
                        rendered.push('{');
                        rendered.push_str(name);
                        rendered.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                rendered.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

/// Looks up a placeholder, falling back to the first-letter-lower-cased
/// name with a capitalized substitution.
fn resolve(params: &MessageParams, name: &str) -> Option<String> {
    if let Some((_, value)) = params.iter().find(|(key, _)| key.as_ref() == name) {
        return Some(value.clone());
    }

    let mut chars = name.chars();
    let first = chars.next()?;
    if !first.is_uppercase() {
        return None;
    }
    let lowered: String = first.to_lowercase().chain(chars).collect();
    params
        .iter()
        .find(|(key, _)| key.as_ref() == lowered)
        .map(|(_, value)| capitalize_first(value))
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn params() -> MessageParams {
        smallvec![
            ("property".into(), "value".to_string()),
            ("type".into(), "integer".to_string()),
        ]
    }

    #[test]
    fn substitutes_named_placeholders() {
        let rendered = format_message("{property} must be a string. {type} given.", &params());
        assert_eq!(rendered, "value must be a string. integer given.");
    }

    #[test]
    fn capitalized_placeholder_capitalizes_substitution() {
        let rendered = format_message("{Property} must be a string.", &params());
        assert_eq!(rendered, "Value must be a string.");
    }

    #[test]
    fn capitalized_placeholder_uses_property_name() {
        let params: MessageParams = smallvec![("property".into(), "data".to_string())];
        assert_eq!(format_message("{Property} is bad.", &params), "Data is bad.");
    }

    #[test]
    fn exact_key_wins_over_case_variant() {
        let params: MessageParams = smallvec![
            ("property".into(), "lower".to_string()),
            ("Property".into(), "explicit".to_string()),
        ];
        assert_eq!(format_message("{Property}", &params), "explicit");
    }

    #[test]
    fn unknown_placeholder_renders_literally() {
        assert_eq!(format_message("{missing} stays", &params()), "{missing} stays");
    }

    #[test]
    fn unterminated_brace_renders_literally() {
        assert_eq!(format_message("oops {property", &params()), "oops {property");
    }

    #[test]
    fn empty_template_renders_empty() {
        assert_eq!(format_message("", &params()), "");
    }
}
