// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # Component Kit
//!
//! Manifest-driven helpers for rendering UI components.
//!
//! Every component ships a `manifest.json` declaring its typed attributes.
//! This crate loads and caches those manifests, resolves caller attributes
//! against them, builds BEM class names, emits CSS custom properties from
//! design tokens and renders component templates.
//!
//! ## Features
//!
//! - Typed attribute resolution with defaults and zero values
//! - BEM and responsive selector builders
//! - Global and per-instance CSS variable blocks
//! - Handlebars component templates with parent-class wrapping
//! - Process-wide, append-only manifest cache
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use component_kit::Components;
//!
//! let components = Components::new("src/Blocks/components");
//! let manifest = components.get_manifest("src/Blocks/components/button")?;
//!
//! let align = components.check_attr("buttonAlign", &attributes, &manifest, None)?;
//! let class = components.selector("btn", "align", align.as_str().unwrap_or_default());
//! let html = components.render("button", &attributes, "card", true)?;
//! ```

/// Attribute resolution against manifests.
pub mod attributes;
/// The `Components` facade.
pub mod components;
/// `components.toml` configuration.
pub mod config;
/// CSS custom property output.
pub mod css;
/// Error types.
pub mod error;
/// Manifest types, loading and caching.
pub mod manifest;
/// Template rendering.
pub mod renderer;
/// Template resolution (filesystem, memory).
pub mod resolver;
/// BEM selector helpers.
pub mod selectors;
/// String helpers.
pub mod strings;

pub use attributes::{check_attr, default_render_attributes, AttributeBag};
pub use components::Components;
pub use config::ComponentsConfig;
pub use error::{ComponentError, Result};
pub use manifest::{
    AssetsManifest, AttributeSpec, AttributeType, Manifest, ManifestCache, ManifestStore,
};
pub use renderer::{RenderContext, Renderer};
pub use resolver::{MemoryResolver, ResolvedTemplate, TemplateResolver};
pub use selectors::{
    class_list, classnames, classnames_value, ensure_string, responsive_selectors, selector,
    selector_if,
};
pub use strings::{camel_to_kebab_case, get_unique};

#[cfg(feature = "filesystem")]
pub use resolver::FileSystemResolver;
