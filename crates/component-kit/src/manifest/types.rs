// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Manifest document types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// The closed set of attribute types a manifest may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    /// A JSON string.
    String,
    /// A JSON boolean.
    Boolean,
    /// A JSON array.
    Array,
    /// A JSON object. An empty array also counts as an empty object.
    Object,
    /// Any JSON number.
    #[serde(alias = "integer")]
    Number,
}

impl AttributeType {
    /// Returns true when `value` is an instance of this type.
    pub fn matches(self, value: &Value) -> bool {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => true,
            (AttributeType::Boolean, Value::Bool(_)) => true,
            (AttributeType::Array, Value::Array(_)) => true,
            (AttributeType::Object, Value::Object(_)) => true,
            (AttributeType::Object, Value::Array(items)) => items.is_empty(),
            (AttributeType::Number, Value::Number(_)) => true,
            _ => false,
        }
    }

    /// The value returned for a known attribute that was neither supplied
    /// nor given a default.
    pub fn zero_value(self) -> Value {
        match self {
            AttributeType::String => Value::String(String::new()),
            AttributeType::Boolean => Value::Bool(false),
            AttributeType::Array | AttributeType::Object => Value::Array(Vec::new()),
            AttributeType::Number => Value::from(0),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeType::String => "string",
            AttributeType::Boolean => "boolean",
            AttributeType::Array => "array",
            AttributeType::Object => "object",
            AttributeType::Number => "number",
        };
        f.write_str(name)
    }
}

/// Short JSON type name, used in type mismatch errors.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One allowed attribute of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpec {
    /// Declared type of the attribute.
    #[serde(rename = "type")]
    pub kind: AttributeType,

    /// Default value, which must match `kind`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// CSS variable tag. `"value"` (or `"select"`) emits the raw value; any
    /// other tag names the global token category the value refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
}

impl AttributeSpec {
    /// Creates a spec with no default and no CSS tag.
    pub fn new(kind: AttributeType) -> Self {
        Self {
            kind,
            default: None,
            variable: None,
        }
    }

    /// Sets the default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets the CSS variable tag.
    pub fn with_variable(mut self, tag: &str) -> Self {
        self.variable = Some(tag.to_string());
        self
    }
}

/// A parsed component (or global) manifest.
///
/// Manifests are shared read-only through the manifest cache. To change one,
/// clone it first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Component name, empty for the global manifest.
    #[serde(default)]
    pub component_name: String,

    /// Present on block manifests. Blocks never get prefixed attribute keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_name: Option<String>,

    /// Class used to scope the component's CSS variable block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_class: Option<String>,

    /// Declared attributes.
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeSpec>,

    /// Design tokens, only on the global manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_variables: Option<Map<String, Value>>,

    /// Every other key of the document, kept for templates.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Manifest {
    /// Creates an empty manifest for `component_name`.
    pub fn new(component_name: &str) -> Self {
        Self {
            component_name: component_name.to_string(),
            ..Self::default()
        }
    }

    /// Adds an attribute declaration.
    pub fn with_attribute(mut self, name: &str, spec: AttributeSpec) -> Self {
        self.attributes.insert(name.to_string(), spec);
        self
    }

    /// Parses and validates a manifest document.
    ///
    /// Returns the validation message on failure; the store wraps it in a
    /// [`ComponentError::ManifestParse`](crate::ComponentError::ManifestParse).
    pub fn parse(source: impl AsRef<[u8]>) -> std::result::Result<Self, String> {
        let manifest: Manifest =
            serde_json::from_slice(source.as_ref()).map_err(|e| e.to_string())?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Checks that every declared default matches its declared type.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, spec) in &self.attributes {
            if let Some(default) = &spec.default {
                if !spec.kind.matches(default) {
                    return Err(format!(
                        "default of attribute '{}' is {} but its type is {}",
                        name,
                        json_type_name(default),
                        spec.kind
                    ));
                }
            }
        }
        Ok(())
    }

    /// True for block manifests.
    pub fn is_block(&self) -> bool {
        self.block_name.as_deref().is_some_and(|name| !name.is_empty())
    }

    /// True when the manifest carries a non-empty `globalVariables` entry.
    pub fn has_global_variables(&self) -> bool {
        self.global_variables
            .as_ref()
            .is_some_and(|variables| !variables.is_empty())
    }
}
