// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! BEM selector helpers.
//!
//! Class names follow the `block__element--modifier` convention. Responsive
//! variants append the breakpoint to the element part:
//! `column__width-tablet--12`.

use serde_json::{Map, Value};

use crate::error::{ComponentError, Result};
use crate::manifest::json_type_name;

/// Builds a BEM class name.
///
/// Inputs are trimmed. An empty element yields the bare block, an empty
/// modifier yields `block__element`.
///
/// ```
/// use component_kit::selectors::selector;
///
/// assert_eq!(selector("button", "icon", "blue"), "button__icon--blue");
/// assert_eq!(selector("button", "icon", ""), "button__icon");
/// assert_eq!(selector("button", "   ", ""), "button");
/// ```
pub fn selector(block: &str, element: &str, modifier: &str) -> String {
    let block = block.trim();
    let element = element.trim();
    let modifier = modifier.trim();

    if element.is_empty() {
        return block.to_string();
    }
    if modifier.is_empty() {
        return format!("{}__{}", block, element);
    }
    format!("{}__{}--{}", block, element, modifier)
}

/// Like [`selector`] but returns an empty string when `condition` is false.
pub fn selector_if(condition: bool, block: &str, element: &str, modifier: &str) -> String {
    if condition {
        selector(block, element, modifier)
    } else {
        String::new()
    }
}

/// Builds one class per breakpoint with a non-blank value, in input order.
///
/// With `use_modifier` the value becomes the modifier
/// (`block__property-breakpoint--value`); without it only the breakpoint is
/// encoded (`block__property-breakpoint`). Blank values are skipped either
/// way.
pub fn responsive_selectors(
    items: &Map<String, Value>,
    property: &str,
    block: &str,
    use_modifier: bool,
) -> String {
    items
        .iter()
        .filter_map(|(breakpoint, value)| {
            let value = scalar_to_string(value)?;
            let value = value.trim();
            if value.is_empty() {
                return None;
            }

            let element = format!("{}-{}", property, breakpoint);
            let modifier = if use_modifier { value } else { "" };
            Some(selector(block, &element, modifier))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Joins the non-blank class names with single spaces.
pub fn classnames<I, S>(classes: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    classes
        .into_iter()
        .filter_map(|class| {
            let class = class.as_ref().trim();
            (!class.is_empty()).then(|| class.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collects class names from a template value.
///
/// Strings and numbers are class names, arrays are flattened, and objects
/// contribute each key whose value is truthy:
///
/// ```
/// use component_kit::selectors::class_list;
/// use serde_json::json;
///
/// let classes = class_list(&json!(["btn", { "is-active": true, "is-hidden": false }]));
/// assert_eq!(classes, ["btn", "is-active"]);
/// ```
pub fn class_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().flat_map(class_list).collect(),
        Value::Object(bag) => bag
            .iter()
            .filter(|(_, enabled)| is_truthy(enabled))
            .map(|(class, _)| class.clone())
            .collect(),
        scalar => scalar_to_string(scalar).into_iter().collect(),
    }
}

/// [`classnames`] over a template value; see [`class_list`].
pub fn classnames_value(value: &Value) -> String {
    classnames(class_list(value))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(enabled) => *enabled,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Turns a string or a list of scalars into a single string.
///
/// Lists are joined with spaces; `null` and `false` entries contribute
/// empty strings.
///
/// # Errors
///
/// Returns [`ComponentError::InvalidArgument`] for anything else, including
/// lists holding lists or objects.
pub fn ensure_string(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Array(items) => {
            let parts = items
                .iter()
                .map(|item| match item {
                    Value::Null | Value::Bool(false) => Ok(String::new()),
                    Value::Bool(true) => Ok("1".to_string()),
                    other => scalar_to_string(other).ok_or_else(|| not_string_or_array(other)),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(parts.join(" "))
        }
        other => Err(not_string_or_array(other)),
    }
}

fn not_string_or_array(value: &Value) -> ComponentError {
    ComponentError::InvalidArgument(format!(
        "expected a string or an array of strings, got {}",
        json_type_name(value)
    ))
}

/// String form of a string or number; `None` for everything else.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn breakpoints(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("breakpoints fixture must be an object"),
        }
    }

    #[test]
    fn test_selector() {
        assert_eq!(selector("button", "icon", "blue"), "button__icon--blue");
        assert_eq!(selector("button", "", ""), "button");
        assert_eq!(selector("button", "    ", ""), "button");
        assert_eq!(selector("button", "icon", "  "), "button__icon");
        assert_eq!(selector("button", "", "blue"), "button");
    }

    #[test]
    fn test_selector_if() {
        assert_eq!(selector_if(true, "button", "icon", ""), "button__icon");
        assert_eq!(selector_if(false, "button", "icon", ""), "");
    }

    #[test]
    fn test_responsive_selectors() {
        let modifiers = breakpoints(json!({ "mobile": "12", "tablet": "12", "desktop": "6" }));
        let modifiers_alt = breakpoints(json!({ "mobile": "12", "tablet": "12", "desktop": "" }));

        assert_eq!(
            responsive_selectors(&modifiers, "width", "column", true),
            "column__width-mobile--12 column__width-tablet--12 column__width-desktop--6"
        );
        assert_eq!(
            responsive_selectors(&modifiers, "width", "column", false),
            "column__width-mobile column__width-tablet column__width-desktop"
        );
        assert_eq!(
            responsive_selectors(&modifiers_alt, "width", "column", true),
            "column__width-mobile--12 column__width-tablet--12"
        );
    }

    #[test]
    fn test_responsive_selectors_keep_order_and_skip_blank() {
        let items = breakpoints(json!({ "desktop": 4, "mobile": "  ", "large": "8" }));
        assert_eq!(
            responsive_selectors(&items, "offset", "grid", false),
            "grid__offset-desktop grid__offset-large"
        );
        assert_eq!(responsive_selectors(&Map::new(), "width", "column", true), "");
    }

    #[test]
    fn test_classnames() {
        assert_eq!(classnames(["a", "", "b", "  "]), "a b");
        assert_eq!(classnames(Vec::<String>::new()), "");
    }

    #[test]
    fn test_classnames_value_keeps_enabled_keys() {
        let classes = json!({ "is-active": true, "is-hidden": false, "has-icon": 1, "is-empty": "" });
        assert_eq!(classnames_value(&classes), "is-active has-icon");
    }

    #[test]
    fn test_classnames_value_mixed() {
        let classes = json!(["btn", "", null, ["btn--large"], { "is-active": true }]);
        assert_eq!(classnames_value(&classes), "btn btn--large is-active");
        assert_eq!(classnames_value(&json!("  card ")), "card");
        assert_eq!(classnames_value(&json!(false)), "");
    }

    #[test]
    fn test_ensure_string() {
        assert_eq!(ensure_string(&json!("btn")).unwrap(), "btn");
        assert_eq!(ensure_string(&json!(["a", "b"])).unwrap(), "a b");
        assert_eq!(ensure_string(&json!(["a", 2])).unwrap(), "a 2");
        assert_eq!(ensure_string(&json!([])).unwrap(), "");
    }

    #[test]
    fn test_ensure_string_rejects_other_types() {
        for value in [json!(1), json!(true), json!(null), json!({ "a": "b" }), json!([["a"]])] {
            assert!(matches!(
                ensure_string(&value),
                Err(ComponentError::InvalidArgument(_))
            ));
        }
    }
}
