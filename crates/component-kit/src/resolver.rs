// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Component template resolution.
//!
//! This module provides the [`TemplateResolver`] trait and implementations
//! for locating component templates and their manifests.
//!
//! # Resolver Implementations
//!
//! - [`FileSystemResolver`]: Loads components from a components root directory
//! - [`MemoryResolver`]: Loads components from in-memory storage (testing/embedding)
//!
//! # Resolution Algorithm
//!
//! Both resolvers make two attempts for a component name:
//!
//! 1. **Without extension** (`button`): `button/button.{ext}`, then `button.{ext}`
//! 2. **With extension** (`button.hbs`): `button.hbs`, then `button/button.hbs`
//!
//! Anything else is a [`ComponentError::ComponentNotFound`] naming the
//! component as the caller wrote it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{ComponentError, Result};
use crate::manifest::Manifest;

#[cfg(feature = "filesystem")]
use crate::manifest::ManifestStore;
#[cfg(feature = "filesystem")]
use std::fs;

/// Default template file extension.
pub const DEFAULT_TEMPLATE_EXTENSION: &str = "hbs";

/// A located component template.
#[derive(Debug, Clone)]
pub struct ResolvedTemplate {
    /// Component name without directories or extension, e.g. `button`.
    pub component: String,
    /// Canonical path (filesystem) or key (memory) of the template.
    pub path: String,
    /// The template source.
    pub source: String,
}

/// Trait for locating component templates and manifests.
///
/// Implement this trait for custom loading strategies (embedded assets, a
/// database, etc.). Implementations must be thread-safe.
pub trait TemplateResolver: Send + Sync + 'static {
    /// Resolves a component name and returns its template source.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::ComponentNotFound`] when neither lookup
    /// attempt matches.
    fn resolve(&self, component: &str) -> Result<ResolvedTemplate>;

    /// Resolves a component name to its canonical path without reading it.
    fn get_resolved_path(&self, component: &str) -> Result<String>;

    /// Loads the manifest that belongs to a resolved template.
    fn load_manifest(&self, template: &ResolvedTemplate) -> Result<Arc<Manifest>>;

    /// Creates a boxed clone.
    fn clone_box(&self) -> Box<dyn TemplateResolver>;
}

impl Clone for Box<dyn TemplateResolver> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Strips leading separators and surrounding whitespace from a component name.
fn clean_component_name(component: &str) -> &str {
    component.trim().trim_start_matches(['/', '\\'])
}

/// Component name used for wrapper classes: the last path segment without
/// its extension.
pub fn component_stem(component: &str) -> String {
    let cleaned = clean_component_name(component);
    Path::new(cleaned)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| cleaned.to_string())
}

/// The relative paths tried for `component`, in order.
pub fn candidate_paths(component: &str, extension: &str) -> Vec<String> {
    let cleaned = clean_component_name(component);
    if cleaned.is_empty() {
        return Vec::new();
    }

    let path = Path::new(cleaned);
    let stem = component_stem(cleaned);

    if path.extension().is_some() {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| cleaned.to_string());
        vec![cleaned.to_string(), format!("{}/{}", stem, file_name)]
    } else {
        vec![
            format!("{}/{}.{}", cleaned, stem, extension),
            format!("{}.{}", cleaned, extension),
        ]
    }
}

/// Filesystem resolver rooted at a components directory.
///
/// Each component lives in its own directory next to its `manifest.json`:
///
/// ```text
/// components/
///   button/
///     button.hbs
///     manifest.json
/// ```
#[cfg(feature = "filesystem")]
#[derive(Debug, Clone)]
pub struct FileSystemResolver {
    root_dir: PathBuf,
    extension: String,
    manifests: ManifestStore,
}

#[cfg(feature = "filesystem")]
impl FileSystemResolver {
    /// Creates a resolver for `root_dir` using the process-wide manifest cache.
    pub fn new<P: AsRef<Path>>(root_dir: P) -> Self {
        Self::with_manifests(root_dir, ManifestStore::new())
    }

    /// Creates a resolver that loads manifests through `manifests`.
    pub fn with_manifests<P: AsRef<Path>>(root_dir: P, manifests: ManifestStore) -> Self {
        Self {
            root_dir: root_dir.as_ref().to_path_buf(),
            extension: DEFAULT_TEMPLATE_EXTENSION.to_string(),
            manifests,
        }
    }

    /// Overrides the template extension (without the dot).
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Returns the components root.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn resolve_internal(&self, component: &str) -> Result<PathBuf> {
        let not_found = || ComponentError::ComponentNotFound {
            component: component.to_string(),
        };

        let found = candidate_paths(component, &self.extension)
            .into_iter()
            .map(|candidate| self.root_dir.join(candidate))
            .find(|path| path.is_file())
            .ok_or_else(not_found)?;

        let canonical = fs::canonicalize(&found)?;
        let canonical_root = fs::canonicalize(&self.root_dir)?;

        // Reject `..` segments and symlinks that leave the components root.
        if !canonical.starts_with(&canonical_root) {
            tracing::warn!(
                "Component '{}' resolved outside of {}",
                component,
                canonical_root.display()
            );
            return Err(not_found());
        }

        tracing::debug!("Resolved component '{}' to {}", component, canonical.display());
        Ok(canonical)
    }
}

#[cfg(feature = "filesystem")]
impl TemplateResolver for FileSystemResolver {
    fn resolve(&self, component: &str) -> Result<ResolvedTemplate> {
        let path = self.resolve_internal(component)?;
        let source = fs::read_to_string(&path)?;
        Ok(ResolvedTemplate {
            component: component_stem(component),
            path: path.to_string_lossy().to_string(),
            source,
        })
    }

    fn get_resolved_path(&self, component: &str) -> Result<String> {
        let path = self.resolve_internal(component)?;
        Ok(path.to_string_lossy().to_string())
    }

    fn load_manifest(&self, template: &ResolvedTemplate) -> Result<Arc<Manifest>> {
        self.manifests.get_manifest(Path::new(&template.path))
    }

    fn clone_box(&self) -> Box<dyn TemplateResolver> {
        Box::new(self.clone())
    }
}

/// In-memory resolver for tests and embedded component sets.
///
/// Keys are relative paths (`button/button.hbs`); manifests are registered
/// per component name.
#[derive(Debug, Clone)]
pub struct MemoryResolver {
    templates: Arc<RwLock<HashMap<String, String>>>,
    manifests: Arc<RwLock<HashMap<String, Arc<Manifest>>>>,
    extension: String,
}

impl Default for MemoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryResolver {
    /// Creates an empty memory resolver.
    pub fn new() -> Self {
        Self {
            templates: Arc::new(RwLock::new(HashMap::new())),
            manifests: Arc::new(RwLock::new(HashMap::new())),
            extension: DEFAULT_TEMPLATE_EXTENSION.to_string(),
        }
    }

    /// Adds a template under a relative path key.
    pub fn add_template(&self, path: &str, source: &str) {
        let mut templates = self.templates.write().unwrap_or_else(PoisonError::into_inner);
        templates.insert(path.to_string(), source.to_string());
    }

    /// Registers the manifest for a component.
    pub fn add_manifest(&self, manifest: Manifest) {
        let mut manifests = self.manifests.write().unwrap_or_else(PoisonError::into_inner);
        manifests.insert(manifest.component_name.clone(), Arc::new(manifest));
    }

    fn resolve_internal(&self, component: &str) -> Result<(String, String)> {
        let templates = self.templates.read().unwrap_or_else(PoisonError::into_inner);
        candidate_paths(component, &self.extension)
            .into_iter()
            .find_map(|key| templates.get(&key).map(|source| (key, source.clone())))
            .ok_or_else(|| ComponentError::ComponentNotFound {
                component: component.to_string(),
            })
    }
}

impl TemplateResolver for MemoryResolver {
    fn resolve(&self, component: &str) -> Result<ResolvedTemplate> {
        let (path, source) = self.resolve_internal(component)?;
        Ok(ResolvedTemplate {
            component: component_stem(component),
            path,
            source,
        })
    }

    fn get_resolved_path(&self, component: &str) -> Result<String> {
        let (path, _) = self.resolve_internal(component)?;
        Ok(path)
    }

    fn load_manifest(&self, template: &ResolvedTemplate) -> Result<Arc<Manifest>> {
        let manifests = self.manifests.read().unwrap_or_else(PoisonError::into_inner);
        manifests
            .get(&template.component)
            .cloned()
            .ok_or_else(|| ComponentError::ManifestNotFound {
                path: PathBuf::from(&template.path),
            })
    }

    fn clone_box(&self) -> Box<dyn TemplateResolver> {
        Box::new(self.clone())
    }
}
