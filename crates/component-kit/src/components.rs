// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! The [`Components`] facade.
//!
//! Bundles a [`ManifestStore`], a [`Renderer`] and the CSS settings behind
//! one handle, so callers do not have to wire the pieces themselves.
//!
//! ```rust,ignore
//! use component_kit::{Components, ComponentsConfig};
//!
//! let config = ComponentsConfig::load("components.toml")?;
//! let components = Components::from_config(".", &config);
//!
//! let manifest = components.get_manifest("src/Blocks/components/button")?;
//! let align = components.check_attr("buttonAlign", &attributes, &manifest, None)?;
//! let html = components.render("button", &attributes, "card", true)?;
//! ```

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::attributes::{check_attr, default_render_attributes, AttributeBag};
use crate::css;
use crate::error::{ComponentError, Result};
use crate::manifest::{Manifest, ManifestStore};
use crate::renderer::{RenderContext, Renderer};
use crate::resolver::TemplateResolver;
use crate::selectors;
use crate::strings;

#[cfg(feature = "filesystem")]
use crate::{config::ComponentsConfig, resolver::FileSystemResolver};

/// Component helper facade.
pub struct Components<R: TemplateResolver> {
    manifests: ManifestStore,
    renderer: Renderer<R>,
    scope_class: String,
    global_manifest_dir: Option<PathBuf>,
    assets_manifest_path: Option<PathBuf>,
}

impl<R: TemplateResolver> std::fmt::Debug for Components<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Components")
            .field("manifests", &self.manifests)
            .field("renderer", &self.renderer)
            .field("scope_class", &self.scope_class)
            .field("global_manifest_dir", &self.global_manifest_dir)
            .field("assets_manifest_path", &self.assets_manifest_path)
            .finish()
    }
}

#[cfg(feature = "filesystem")]
impl Components<FileSystemResolver> {
    /// Creates a facade for the components under `root` with default
    /// settings and the process-wide manifest cache.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let manifests = ManifestStore::new();
        let resolver = FileSystemResolver::with_manifests(root, manifests.clone());
        Self::with_resolver(resolver).with_manifests(manifests)
    }

    /// Creates a facade for a project directory from its configuration.
    pub fn from_config<P: AsRef<Path>>(project_dir: P, config: &ComponentsConfig) -> Self {
        let project_dir = project_dir.as_ref();
        let manifests = ManifestStore::new().with_file_name(&config.components.manifest_file);
        let resolver =
            FileSystemResolver::with_manifests(config.components_root(project_dir), manifests.clone())
                .with_extension(&config.components.template_extension);

        tracing::debug!(
            "Components root at {}",
            config.components_root(project_dir).display()
        );

        Self::with_resolver(resolver)
            .with_manifests(manifests)
            .with_scope_class(&config.css.scope_class)
            .with_global_manifest_dir(config.global_manifest_dir(project_dir))
            .with_assets_manifest(config.assets_manifest_path(project_dir))
    }
}

impl<R: TemplateResolver> Components<R> {
    /// Creates a facade rendering through `resolver`.
    pub fn with_resolver(resolver: R) -> Self {
        Self {
            manifests: ManifestStore::new(),
            renderer: Renderer::new(resolver),
            scope_class: css::DEFAULT_SCOPE_CLASS.to_string(),
            global_manifest_dir: None,
            assets_manifest_path: None,
        }
    }

    /// Replaces the manifest store used by [`Components::get_manifest`].
    pub fn with_manifests(mut self, manifests: ManifestStore) -> Self {
        self.manifests = manifests;
        self
    }

    /// Sets the fallback scope class for component CSS variables.
    pub fn with_scope_class(mut self, scope_class: &str) -> Self {
        self.scope_class = scope_class.to_string();
        self
    }

    /// Sets the directory holding the global manifest.
    pub fn with_global_manifest_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.global_manifest_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Sets the assets manifest file used by
    /// [`Components::get_assets_manifest_item`].
    pub fn with_assets_manifest<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.assets_manifest_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// The renderer used by [`Components::render`].
    pub fn renderer(&self) -> &Renderer<R> {
        &self.renderer
    }

    /// The manifest store.
    pub fn manifests(&self) -> &ManifestStore {
        &self.manifests
    }

    /// Loads the manifest of the component directory `path`.
    pub fn get_manifest<P: AsRef<Path>>(&self, path: P) -> Result<Arc<Manifest>> {
        self.manifests.get_manifest(path)
    }

    /// Loads the global manifest from the configured directory.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidArgument`] when no global manifest
    /// directory is configured, and manifest errors otherwise.
    pub fn global_manifest(&self) -> Result<Arc<Manifest>> {
        let dir = self.global_manifest_dir.as_ref().ok_or_else(|| {
            ComponentError::InvalidArgument("no global manifest directory configured".to_string())
        })?;
        self.manifests.get_manifest(dir)
    }

    /// Full public path of the build asset `key`, for cache-busted URLs.
    ///
    /// # Errors
    ///
    /// - [`ComponentError::InvalidArgument`] when no assets manifest is configured
    /// - [`ComponentError::AssetNotFound`] when the build emitted no such asset
    /// - manifest errors when the assets manifest is missing or malformed
    pub fn get_assets_manifest_item(&self, key: &str) -> Result<String> {
        let path = self.assets_manifest_path.as_ref().ok_or_else(|| {
            ComponentError::InvalidArgument("no assets manifest configured".to_string())
        })?;
        self.manifests.get_assets_manifest(path)?.get_assets_manifest_item(key)
    }

    /// See [`check_attr`].
    pub fn check_attr(
        &self,
        name: &str,
        attributes: &AttributeBag,
        manifest: &Manifest,
        component_prefix: Option<&str>,
    ) -> Result<Value> {
        check_attr(name, attributes, manifest, component_prefix)
    }

    /// See [`default_render_attributes`].
    pub fn get_default_render_attributes(
        &self,
        manifest: &Manifest,
        supplied: &AttributeBag,
    ) -> AttributeBag {
        default_render_attributes(manifest, supplied)
    }

    /// See [`selectors::selector`].
    pub fn selector(&self, block: &str, element: &str, modifier: &str) -> String {
        selectors::selector(block, element, modifier)
    }

    /// See [`selectors::selector_if`].
    pub fn selector_if(&self, condition: bool, block: &str, element: &str, modifier: &str) -> String {
        selectors::selector_if(condition, block, element, modifier)
    }

    /// See [`selectors::responsive_selectors`].
    pub fn responsive_selectors(
        &self,
        items: &Map<String, Value>,
        property: &str,
        block: &str,
        use_modifier: bool,
    ) -> String {
        selectors::responsive_selectors(items, property, block, use_modifier)
    }

    /// See [`selectors::classnames`].
    pub fn classnames<I, S>(&self, classes: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        selectors::classnames(classes)
    }

    /// See [`selectors::classnames_value`].
    pub fn classnames_value(&self, classes: &Value) -> String {
        selectors::classnames_value(classes)
    }

    /// See [`selectors::ensure_string`].
    pub fn ensure_string(&self, value: &Value) -> Result<String> {
        selectors::ensure_string(value)
    }

    /// See [`css::output_css_variables_global`].
    pub fn output_css_variables_global(&self, global_manifest: &Manifest) -> String {
        css::output_css_variables_global(global_manifest)
    }

    /// See [`css::output_css_variables_global_inner`].
    pub fn output_css_variables_global_inner(&self, items: &Value, category: &str) -> String {
        css::output_css_variables_global_inner(items, category)
    }

    /// Scoped CSS variables for one instance, falling back to the configured
    /// scope class.
    pub fn output_css_variables(
        &self,
        attributes: &AttributeBag,
        manifest: &Manifest,
        unique: &str,
    ) -> String {
        css::output_css_variables_scoped(attributes, manifest, unique, &self.scope_class)
    }

    /// See [`Renderer::render`].
    pub fn render(
        &self,
        component: &str,
        attributes: &AttributeBag,
        parent_class: &str,
        use_component_defaults: bool,
    ) -> Result<String> {
        self.renderer
            .render(component, attributes, parent_class, use_component_defaults)
    }

    /// See [`Renderer::render_with_context`].
    pub fn render_with_context(&self, component: &str, context: &RenderContext) -> Result<String> {
        self.renderer.render_with_context(component, context)
    }

    /// See [`strings::get_unique`].
    pub fn get_unique(&self) -> String {
        strings::get_unique()
    }

    /// See [`strings::camel_to_kebab_case`].
    pub fn camel_to_kebab_case(&self, input: &str) -> String {
        strings::camel_to_kebab_case(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{AttributeSpec, AttributeType};
    use crate::resolver::MemoryResolver;
    use serde_json::json;

    fn memory_components() -> Components<MemoryResolver> {
        let resolver = MemoryResolver::new();
        resolver.add_template("heading/heading.hbs", "<h2>{{headingContent}}</h2>");
        resolver.add_manifest(Manifest::new("heading").with_attribute(
            "headingContent",
            AttributeSpec::new(AttributeType::String).with_default(json!("Title")),
        ));
        Components::with_resolver(resolver)
    }

    #[test]
    fn test_render_through_facade() {
        let components = memory_components();
        let output = components
            .render("heading", &AttributeBag::new(), "card", true)
            .unwrap();
        assert_eq!(output, "<div class=\"card__heading\"><h2>Title</h2></div>");
    }

    #[test]
    fn test_scope_class_fallback() {
        let components = memory_components().with_scope_class("component");
        let manifest = Manifest::new("heading").with_attribute(
            "headingColor",
            AttributeSpec::new(AttributeType::String).with_variable("colors"),
        );
        let attributes = match json!({ "headingColor": "primary" }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        assert_eq!(
            components.output_css_variables(&attributes, &manifest, "abc"),
            "<style>.component[data-id='abc'] {\n--heading-color: var(--global-colors-primary);\n}</style>"
        );
    }

    #[test]
    fn test_global_manifest_requires_dir() {
        let components = memory_components();
        assert!(matches!(
            components.global_manifest(),
            Err(ComponentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_assets_manifest_requires_path() {
        let components = memory_components();
        assert!(matches!(
            components.get_assets_manifest_item("application.js"),
            Err(ComponentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_string_helpers() {
        let components = memory_components();
        assert_eq!(components.get_unique().len(), strings::UNIQUE_LENGTH);
        assert_eq!(components.camel_to_kebab_case("buttonColor"), "button-color");
        assert_eq!(components.classnames(["a", "", "b"]), "a b");
        assert_eq!(
            components.classnames_value(&json!({ "is-open": true, "is-closed": false })),
            "is-open"
        );
        assert_eq!(components.selector_if(false, "a", "b", "c"), "");
    }
}
