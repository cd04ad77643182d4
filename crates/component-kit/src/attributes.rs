// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Attribute resolution against a component manifest.
//!
//! Callers hand over a loosely typed [`AttributeBag`]. [`check_attr`] turns a
//! single key of that bag into a value that is guaranteed to match the type
//! the manifest declares, falling back to the declared default or the type's
//! zero value. [`default_render_attributes`] pre-populates a bag with every
//! declared default before a template is rendered.

use serde_json::{Map, Value};

use crate::error::{ComponentError, Result};
use crate::manifest::{json_type_name, Manifest};
use crate::strings::{kebab_to_camel_case, ucfirst};

/// Caller-supplied attributes, in insertion order.
pub type AttributeBag = Map<String, Value>;

/// Bag key carrying the prefix of a parent component.
pub const PREFIX_KEY: &str = "prefix";

/// Returns the manifest key for `name` under an optional component prefix.
///
/// `align` under prefix `button` becomes `buttonAlign`; names that already
/// carry the prefix are returned unchanged.
pub fn manifest_key(name: &str, component_prefix: Option<&str>) -> String {
    match component_prefix {
        Some(prefix) if !prefix.is_empty() && !name.starts_with(prefix) => {
            format!("{}{}", prefix, ucfirst(name))
        }
        _ => name.to_string(),
    }
}

/// Returns the bag key holding the value of manifest key `key`.
///
/// A component rendered inside another one receives its attributes under the
/// parent's prefix (the bag's `prefix` entry). The component's own camelCased
/// name at the start of `key` is swapped for that prefix. Block manifests and
/// bags without a foreign prefix use `key` as is.
pub fn attr_key(key: &str, attributes: &AttributeBag, manifest: &Manifest) -> String {
    if manifest.is_block() {
        return key.to_string();
    }

    let prefix = match attributes.get(PREFIX_KEY).and_then(Value::as_str) {
        Some(prefix) if !prefix.is_empty() => prefix,
        _ => return key.to_string(),
    };

    let own = kebab_to_camel_case(&manifest.component_name);
    if own.is_empty() || prefix == own {
        return key.to_string();
    }

    match key.strip_prefix(own.as_str()) {
        Some(rest) => format!("{}{}", prefix, rest),
        None => key.to_string(),
    }
}

/// Resolves attribute `name` of `manifest` from `attributes`.
///
/// # Errors
///
/// - [`ComponentError::UnknownAttribute`] when the manifest does not declare
///   the attribute
/// - [`ComponentError::AttributeType`] when the supplied value has the wrong
///   type
pub fn check_attr(
    name: &str,
    attributes: &AttributeBag,
    manifest: &Manifest,
    component_prefix: Option<&str>,
) -> Result<Value> {
    let key = manifest_key(name, component_prefix);
    let component = component_label(manifest, component_prefix);

    let spec = manifest
        .attributes
        .get(&key)
        .ok_or_else(|| ComponentError::UnknownAttribute {
            attribute: name.to_string(),
            component: component.clone(),
        })?;

    let bag_key = attr_key(&key, attributes, manifest);
    match attributes.get(&bag_key) {
        Some(value) if !value.is_null() => {
            if spec.kind.matches(value) {
                Ok(value.clone())
            } else {
                Err(ComponentError::AttributeType {
                    attribute: name.to_string(),
                    component,
                    expected: spec.kind,
                    found: json_type_name(value),
                })
            }
        }
        _ => Ok(spec
            .default
            .clone()
            .unwrap_or_else(|| spec.kind.zero_value())),
    }
}

/// Merges every declared default of `manifest` into a copy of `supplied`.
///
/// Supplied values win. Attributes without a default that were not supplied
/// stay absent.
pub fn default_render_attributes(manifest: &Manifest, supplied: &AttributeBag) -> AttributeBag {
    let mut merged = supplied.clone();

    for (name, spec) in &manifest.attributes {
        let Some(default) = &spec.default else {
            continue;
        };
        match merged.get(name) {
            Some(value) if !value.is_null() => {}
            _ => {
                merged.insert(name.clone(), default.clone());
            }
        }
    }

    merged
}

fn component_label(manifest: &Manifest, component_prefix: Option<&str>) -> String {
    if !manifest.component_name.is_empty() {
        return manifest.component_name.clone();
    }
    if let Some(block) = manifest.block_name.as_deref() {
        return block.to_string();
    }
    component_prefix.unwrap_or_default().to_string()
}
