// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CSS custom property output.
//!
//! Two kinds of blocks are produced:
//!
//! - **Global**: every design token of the global manifest as
//!   `--global-{category}-{name}` inside `:root`.
//! - **Component**: the CSS-tagged attributes of one component instance,
//!   scoped with `.{class}[data-id='{unique}']`.
//!
//! # Token Layout
//!
//! Categories in `globalVariables` may be written as a list of slugged
//! entries (`[{ "slug": "primary", "color": "#C3151B" }]`), a plain mapping
//! (`{ "big": "2.5em" }`) or nested mappings such as breakpoint tables, which
//! are flattened with `-` between the keys.

use serde_json::{Map, Value};

use crate::attributes::AttributeBag;
use crate::manifest::Manifest;
use crate::selectors::scalar_to_string;
use crate::strings::camel_to_kebab_case;

/// Scope class used when a manifest declares no `componentClass`.
pub const DEFAULT_SCOPE_CLASS: &str = "btn";

/// Fields holding the value of a slugged token, in lookup order. Entries
/// with none of them use their slug as the value.
const SLUG_VALUE_FIELDS: [&str; 4] = ["color", "gradient", "size", "value"];

/// `variable` tags that emit the attribute value verbatim.
const LITERAL_TAGS: [&str; 2] = ["value", "select"];

/// One flattened design token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Kebab-cased category, e.g. `font-sizes`.
    pub category: String,
    /// Kebab-cased token name, nested keys joined with `-`.
    pub name: String,
    /// CSS value.
    pub value: String,
}

impl Token {
    /// Custom property name without the value, e.g. `--global-colors-primary`.
    pub fn property(&self) -> String {
        format!("--global-{}-{}", self.category, self.name)
    }

    /// Full declaration, e.g. `--global-colors-primary: #C3151B;`.
    pub fn declaration(&self) -> String {
        format!("{}: {};", self.property(), self.value)
    }
}

/// Flattens one `globalVariables` category into tokens.
pub fn global_tokens(items: &Value, category: &str) -> Vec<Token> {
    let category = camel_to_kebab_case(category);
    let mut tokens = Vec::new();
    if category.is_empty() {
        return tokens;
    }
    collect_tokens(items, &category, None, &mut tokens);
    tokens
}

fn collect_tokens(items: &Value, category: &str, parent: Option<&str>, tokens: &mut Vec<Token>) {
    let join = |name: &str| match parent {
        Some(parent) => format!("{}-{}", parent, name),
        None => name.to_string(),
    };

    match items {
        Value::Array(entries) => {
            for (index, entry) in entries.iter().enumerate() {
                match entry {
                    Value::Object(fields) if fields.contains_key("slug") => {
                        if let Some(token) = slugged_token(fields, category, parent) {
                            tokens.push(token);
                        }
                    }
                    Value::Object(_) | Value::Array(_) => {
                        collect_tokens(entry, category, Some(&join(&index.to_string())), tokens);
                    }
                    scalar => push_scalar(scalar, category, join(&index.to_string()), tokens),
                }
            }
        }
        Value::Object(fields) => {
            for (key, value) in fields {
                let name = join(&camel_to_kebab_case(key));
                match value {
                    Value::Object(_) | Value::Array(_) => {
                        collect_tokens(value, category, Some(&name), tokens);
                    }
                    scalar => push_scalar(scalar, category, name, tokens),
                }
            }
        }
        _ => {}
    }
}

fn slugged_token(fields: &Map<String, Value>, category: &str, parent: Option<&str>) -> Option<Token> {
    let slug = fields.get("slug").and_then(scalar_to_string)?;
    let value = SLUG_VALUE_FIELDS
        .iter()
        .find_map(|field| fields.get(*field).and_then(scalar_to_string))
        .unwrap_or_else(|| slug.clone());

    let slug = camel_to_kebab_case(&slug);
    let name = match parent {
        Some(parent) => format!("{}-{}", parent, slug),
        None => slug,
    };

    Some(Token {
        category: category.to_string(),
        name,
        value,
    })
}

fn push_scalar(value: &Value, category: &str, name: String, tokens: &mut Vec<Token>) {
    match scalar_to_string(value) {
        Some(value) => tokens.push(Token {
            category: category.to_string(),
            name,
            value,
        }),
        None => tracing::trace!("Skipping non-scalar token {}-{}", category, name),
    }
}

/// Declarations for one token category, one per line, without a wrapper.
///
/// Returns an empty string for an empty category name or empty items.
pub fn output_css_variables_global_inner(items: &Value, category: &str) -> String {
    global_tokens(items, category)
        .iter()
        .map(|token| format!("{}\n", token.declaration()))
        .collect()
}

/// The `:root` style block for a global manifest.
///
/// Returns an empty string when the manifest has no `globalVariables` or
/// none of them produce a declaration.
pub fn output_css_variables_global(global_manifest: &Manifest) -> String {
    let Some(variables) = global_manifest.global_variables.as_ref() else {
        return String::new();
    };

    let mut output = String::new();
    for (key, value) in variables {
        match value {
            Value::Object(_) | Value::Array(_) => {
                output.push_str(&output_css_variables_global_inner(value, key));
            }
            scalar => {
                if let Some(value) = scalar_to_string(scalar) {
                    output.push_str(&format!("--global-{}: {};\n", camel_to_kebab_case(key), value));
                }
            }
        }
    }

    if output.is_empty() {
        return String::new();
    }
    format!("<style>:root {{\n{}}}</style>", output)
}

/// The scoped style block for one component instance, using the manifest's
/// `componentClass` or [`DEFAULT_SCOPE_CLASS`].
pub fn output_css_variables(attributes: &AttributeBag, manifest: &Manifest, unique: &str) -> String {
    output_css_variables_scoped(attributes, manifest, unique, DEFAULT_SCOPE_CLASS)
}

/// Like [`output_css_variables`] with an explicit fallback scope class.
///
/// Only attributes that are supplied, tagged with `variable` in the manifest
/// and non-empty produce a declaration. Returns an empty string when none do.
pub fn output_css_variables_scoped(
    attributes: &AttributeBag,
    manifest: &Manifest,
    unique: &str,
    default_scope: &str,
) -> String {
    let mut output = String::new();

    for (key, value) in attributes {
        let Some(tag) = manifest
            .attributes
            .get(key)
            .and_then(|spec| spec.variable.as_deref())
        else {
            continue;
        };
        let Some(value) = scalar_to_string(value) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        let name = camel_to_kebab_case(key);
        if LITERAL_TAGS.contains(&tag) {
            output.push_str(&format!("--{}: {};\n", name, value));
        } else {
            output.push_str(&format!(
                "--{}: var(--global-{}-{});\n",
                name,
                camel_to_kebab_case(tag),
                camel_to_kebab_case(value)
            ));
        }
    }

    if output.is_empty() {
        return String::new();
    }

    let scope = manifest
        .component_class
        .as_deref()
        .filter(|class| !class.is_empty())
        .unwrap_or(default_scope);
    format!("<style>.{}[data-id='{}'] {{\n{}}}</style>", scope, unique, output)
}
