// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Component template rendering.
//!
//! This module provides the [`Renderer`] type that handles the component
//! lifecycle: resolution, optional default merging, compilation and
//! rendering.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use component_kit::{FileSystemResolver, Renderer};
//!
//! let renderer = Renderer::new(FileSystemResolver::new("src/Blocks/components"));
//! let html = renderer.render("button", &attributes, "card", true)?;
//! ```
//!
//! # Template Scope
//!
//! Templates are Handlebars sources. The data bound to a template is built
//! by [`RenderContext::to_data`] and contains exactly:
//!
//! - every attribute at the top level (`{{buttonContent}}`)
//! - `attributes`: the full attribute bag
//! - `parentClass`, `unique`, `responsive`
//! - `manifest`: the component manifest, when defaults were merged
//!
//! The scope names in [`RESERVED_KEYS`] cannot be used as attribute names.
//! `parentClass` may appear in the bag; it is replaced by the effective
//! parent class.
//!
//! # Helpers
//!
//! - `{{selector block element modifier}}`: BEM class name
//! - `{{kebab value}}`: camelCase to kebab-case
//! - `{{classnames a b c}}`: joins non-empty class names; object arguments
//!   contribute their keys with truthy values

use handlebars::{handlebars_helper, html_escape, Handlebars};
use serde_json::{Map, Value};
use std::sync::{Arc, PoisonError, RwLock};

use crate::attributes::{default_render_attributes, AttributeBag};
use crate::error::{ComponentError, Result};
use crate::manifest::Manifest;
use crate::resolver::{component_stem, TemplateResolver};
use crate::selectors::{class_list, classnames, scalar_to_string, selector};
use crate::strings::{camel_to_kebab_case, get_unique};

/// Bag key a caller may use instead of the explicit parent class argument.
pub const PARENT_CLASS_KEY: &str = "parentClass";

/// Scope names bound by the renderer that an attribute bag may not carry.
pub const RESERVED_KEYS: [&str; 4] = ["attributes", "unique", "responsive", "manifest"];

handlebars_helper!(kebab_helper: |value: str| camel_to_kebab_case(value));

handlebars_helper!(selector_helper: |*args| {
    let part = |index: usize| {
        args.get(index)
            .and_then(|value| scalar_to_string(value))
            .unwrap_or_default()
    };
    selector(&part(0), &part(1), &part(2))
});

handlebars_helper!(classnames_helper: |*args| {
    classnames(args.into_iter().flat_map(class_list))
});

/// Per-call rendering input.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// Attributes bound into the template scope. Must not use any of the
    /// [`RESERVED_KEYS`].
    pub attributes: AttributeBag,
    /// Parent block class. When non-empty the output is wrapped in
    /// `<div class="{parent_class}__{component}">`.
    pub parent_class: String,
    /// Instance identifier; generated when absent.
    pub unique: Option<String>,
    /// Exposed to templates as `responsive`.
    pub responsive: bool,
    /// Merge manifest defaults into `attributes` before rendering.
    pub use_component_defaults: bool,
}

impl RenderContext {
    /// Creates a context for `attributes`.
    pub fn new(attributes: AttributeBag) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Sets the parent class.
    pub fn with_parent_class(mut self, parent_class: &str) -> Self {
        self.parent_class = parent_class.to_string();
        self
    }

    /// Sets the instance identifier.
    pub fn with_unique(mut self, unique: &str) -> Self {
        self.unique = Some(unique.to_string());
        self
    }

    /// Sets the responsive flag.
    pub fn with_responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    /// Enables default merging.
    pub fn with_component_defaults(mut self, enabled: bool) -> Self {
        self.use_component_defaults = enabled;
        self
    }

    /// The parent class to wrap with: the explicit one, else a string
    /// `parentClass` from the attributes.
    pub fn effective_parent_class(&self) -> String {
        let explicit = self.parent_class.trim();
        if !explicit.is_empty() {
            return explicit.to_string();
        }
        self.attributes
            .get(PARENT_CLASS_KEY)
            .and_then(Value::as_str)
            .map(|class| class.trim().to_string())
            .unwrap_or_default()
    }

    /// Builds the template data.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidArgument`] when the attributes use
    /// one of the [`RESERVED_KEYS`].
    pub fn to_data(&self, unique: &str, manifest: Option<&Manifest>) -> Result<Value> {
        if let Some(key) = RESERVED_KEYS
            .iter()
            .find(|key| self.attributes.contains_key(**key))
        {
            return Err(ComponentError::InvalidArgument(format!(
                "attribute name '{}' is reserved by the template scope",
                key
            )));
        }

        let mut data: Map<String, Value> = self.attributes.clone();
        data.insert(
            "attributes".to_string(),
            Value::Object(self.attributes.clone()),
        );
        data.insert(
            PARENT_CLASS_KEY.to_string(),
            Value::String(self.effective_parent_class()),
        );
        data.insert("unique".to_string(), Value::String(unique.to_string()));
        data.insert("responsive".to_string(), Value::Bool(self.responsive));
        if let Some(manifest) = manifest {
            let manifest = serde_json::to_value(manifest).map_err(|e| {
                ComponentError::InvalidArgument(format!("manifest is not serializable: {}", e))
            })?;
            data.insert("manifest".to_string(), manifest);
        }
        Ok(Value::Object(data))
    }
}

/// Handlebars-backed component renderer.
///
/// The renderer is generic over the resolver type `R`, allowing different
/// template loading strategies. Templates are compiled once per resolved
/// path and kept for the life of the renderer.
pub struct Renderer<R: TemplateResolver> {
    resolver: R,
    registry: RwLock<Handlebars<'static>>,
}

impl<R: TemplateResolver> std::fmt::Debug for Renderer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Renderer")
            .field("templates", &registry.get_templates().len())
            .finish()
    }
}

impl<R: TemplateResolver> Renderer<R> {
    /// Creates a renderer with the built-in helpers registered.
    pub fn new(resolver: R) -> Self {
        let mut registry = Handlebars::new();
        registry.register_helper("kebab", Box::new(kebab_helper));
        registry.register_helper("selector", Box::new(selector_helper));
        registry.register_helper("classnames", Box::new(classnames_helper));

        Self {
            resolver,
            registry: RwLock::new(registry),
        }
    }

    /// Returns a reference to the resolver used by this renderer.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Checks whether the template at `path` has been compiled.
    pub fn is_compiled(&self, path: &str) -> bool {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        registry.has_template(path)
    }

    /// Renders `component` with `attributes`.
    ///
    /// See [`Renderer::render_with_context`].
    pub fn render(
        &self,
        component: &str,
        attributes: &AttributeBag,
        parent_class: &str,
        use_component_defaults: bool,
    ) -> Result<String> {
        let context = RenderContext::new(attributes.clone())
            .with_parent_class(parent_class)
            .with_component_defaults(use_component_defaults);
        self.render_with_context(component, &context)
    }

    /// Renders `component` with a full [`RenderContext`].
    ///
    /// # Errors
    ///
    /// - [`ComponentError::ComponentNotFound`] when the template cannot be located
    /// - manifest errors when defaults are requested and the manifest is missing
    /// - [`ComponentError::Template`] when compilation or rendering fails
    pub fn render_with_context(&self, component: &str, context: &RenderContext) -> Result<String> {
        let path = self.compile(component)?;

        let mut manifest: Option<Arc<Manifest>> = None;
        let mut context = context.clone();
        if context.use_component_defaults {
            let template = self.resolver.resolve(component)?;
            let loaded = self.resolver.load_manifest(&template)?;
            context.attributes = default_render_attributes(&loaded, &context.attributes);
            manifest = Some(loaded);
        }

        let unique = context.unique.clone().unwrap_or_else(get_unique);
        let data = context.to_data(&unique, manifest.as_deref())?;

        let rendered = {
            let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
            registry
                .render(&path, &data)
                .map_err(|e| ComponentError::Template {
                    template: path.clone(),
                    message: e.to_string(),
                })?
        };

        let parent_class = context.effective_parent_class();
        let output = if parent_class.is_empty() {
            rendered
        } else {
            let class = format!("{}__{}", parent_class, component_stem(component));
            format!("<div class=\"{}\">{}</div>", html_escape(&class), rendered)
        };

        Ok(output.trim().to_string())
    }

    /// Resolves and compiles `component` if needed; returns its path.
    fn compile(&self, component: &str) -> Result<String> {
        let path = self.resolver.get_resolved_path(component)?;
        if self.is_compiled(&path) {
            tracing::trace!("Template cache hit for {}", path);
            return Ok(path);
        }

        let template = self.resolver.resolve(component)?;
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        registry
            .register_template_string(&template.path, &template.source)
            .map_err(|e| ComponentError::Template {
                template: template.path.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!("Compiled template for '{}' at {}", component, template.path);
        Ok(template.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{AttributeSpec, AttributeType};
    use crate::resolver::MemoryResolver;
    use serde_json::json;

    fn bag(value: Value) -> AttributeBag {
        match value {
            Value::Object(map) => map,
            _ => panic!("bag fixture must be an object"),
        }
    }

    fn button_renderer() -> Renderer<MemoryResolver> {
        let resolver = MemoryResolver::new();
        resolver.add_template(
            "button/button.hbs",
            "\n<button class=\"{{selector \"btn\" \"size\" buttonSize}}\">{{buttonContent}}</button>\n",
        );
        resolver.add_manifest(
            Manifest::new("button")
                .with_attribute(
                    "buttonContent",
                    AttributeSpec::new(AttributeType::String).with_default(json!("Hello!")),
                )
                .with_attribute(
                    "buttonSize",
                    AttributeSpec::new(AttributeType::String).with_default(json!("default")),
                ),
        );
        Renderer::new(resolver)
    }

    #[test]
    fn test_render_binds_attributes() {
        let renderer = button_renderer();
        let output = renderer
            .render("button", &bag(json!({ "buttonContent": "Save" })), "", false)
            .unwrap();

        assert_eq!(output, "<button class=\"btn__size\">Save</button>");
    }

    #[test]
    fn test_render_with_component_defaults() {
        let renderer = button_renderer();
        let output = renderer.render("button", &AttributeBag::new(), "", true).unwrap();

        assert_eq!(output, "<button class=\"btn__size--default\">Hello!</button>");
    }

    #[test]
    fn test_render_wraps_with_parent_class() {
        let renderer = button_renderer();
        let output = renderer.render("button", &AttributeBag::new(), "test", true).unwrap();

        assert!(output.starts_with("<div class=\"test__button\">"));
        assert!(output.ends_with("</div>"));
        assert!(output.contains("Hello!"));
    }

    #[test]
    fn test_parent_class_from_attributes() {
        let renderer = button_renderer();
        let output = renderer
            .render("button.hbs", &bag(json!({ "parentClass": "test" })), "", true)
            .unwrap();

        assert!(output.contains("test__button"));
        assert!(!output.contains("test__button.hbs"));
    }

    #[test]
    fn test_missing_component() {
        let renderer = button_renderer();
        for name in ["component", "component-a.php"] {
            assert!(matches!(
                renderer.render(name, &AttributeBag::new(), "", false),
                Err(ComponentError::ComponentNotFound { .. })
            ));
        }
    }

    #[test]
    fn test_defaults_require_manifest() {
        let resolver = MemoryResolver::new();
        resolver.add_template("divider.hbs", "<hr>");
        let renderer = Renderer::new(resolver);

        assert_eq!(renderer.render("divider", &AttributeBag::new(), "", false).unwrap(), "<hr>");
        assert!(matches!(
            renderer.render("divider", &AttributeBag::new(), "", true),
            Err(ComponentError::ManifestNotFound { .. })
        ));
    }

    #[test]
    fn test_templates_compile_once() {
        let renderer = button_renderer();
        assert!(!renderer.is_compiled("button/button.hbs"));

        renderer.render("button", &AttributeBag::new(), "", false).unwrap();
        renderer.resolver().add_template("button/button.hbs", "changed");

        assert!(renderer.is_compiled("button/button.hbs"));
        let output = renderer
            .render("button", &bag(json!({ "buttonContent": "Again" })), "", false)
            .unwrap();
        assert!(output.contains("Again"));
    }

    #[test]
    fn test_context_scope() {
        let resolver = MemoryResolver::new();
        resolver.add_template(
            "scope.hbs",
            "{{unique}}|{{responsive}}|{{attributes.title}}|{{kebab title}}|{{classnames \"a\" \"\" \"b\"}}",
        );
        let renderer = Renderer::new(resolver);
        let context = RenderContext::new(bag(json!({ "title": "pageTitle" })))
            .with_unique("abc123")
            .with_responsive(true);

        let output = renderer.render_with_context("scope", &context).unwrap();
        assert_eq!(output, "abc123|true|pageTitle|page-title|a b");
    }

    #[test]
    fn test_template_errors_are_reported() {
        let resolver = MemoryResolver::new();
        resolver.add_template("broken.hbs", "{{#if}}");
        let renderer = Renderer::new(resolver);

        assert!(matches!(
            renderer.render("broken", &AttributeBag::new(), "", false),
            Err(ComponentError::Template { .. })
        ));
    }

    #[test]
    fn test_classnames_object_argument() {
        let resolver = MemoryResolver::new();
        resolver.add_template("tags.hbs", "[{{classnames classes}}] [{{classnames \"card\" classes}}]");
        let renderer = Renderer::new(resolver);
        let attributes = bag(json!({ "classes": { "is-active": true, "is-hidden": false } }));

        let output = renderer.render("tags", &attributes, "", false).unwrap();
        assert_eq!(output, "[is-active] [card is-active]");
    }

    #[test]
    fn test_reserved_attribute_names() {
        let resolver = MemoryResolver::new();
        resolver.add_template("scope.hbs", "{{unique}}|{{responsive}}");
        let renderer = Renderer::new(resolver);

        let err = renderer
            .render("scope", &bag(json!({ "unique": "mine", "responsive": "yes" })), "", false)
            .unwrap_err();
        assert!(matches!(err, ComponentError::InvalidArgument(ref message) if message.contains("unique")));

        let output = renderer
            .render_with_context(
                "scope",
                &RenderContext::new(bag(json!({ "parentClass": "card" }))).with_unique("mine"),
            )
            .unwrap();
        assert_eq!(output, "<div class=\"card__scope\">mine|false</div>");
    }
}
