// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Component manifest loading.
//!
//! Every component directory carries a `manifest.json` describing the
//! component name, its typed attributes and, for the global manifest, the
//! design tokens. [`ManifestStore`] finds, parses and caches these documents.
//!
//! ```rust,ignore
//! use component_kit::manifest::{ManifestCache, ManifestStore};
//!
//! let store = ManifestStore::with_cache(ManifestCache::new());
//! let manifest = store.get_manifest("src/Blocks/components/button")?;
//! assert_eq!(manifest.component_name, "button");
//! ```

mod assets;
mod cache;
mod types;

pub use assets::{AssetsManifest, DEFAULT_ASSETS_MANIFEST_FILE};
pub use cache::ManifestCache;
pub use types::{json_type_name, AttributeSpec, AttributeType, Manifest};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ComponentError, Result};

/// Default manifest file name inside a component directory.
pub const DEFAULT_MANIFEST_FILE: &str = "manifest.json";

/// Loads manifests from component directories through a [`ManifestCache`].
#[derive(Debug, Clone)]
pub struct ManifestStore {
    cache: ManifestCache,
    assets: ManifestCache<AssetsManifest>,
    file_name: String,
}

impl Default for ManifestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestStore {
    /// Creates a store backed by the process-wide caches.
    pub fn new() -> Self {
        Self::with_cache(ManifestCache::global()).with_assets_cache(ManifestCache::global_assets())
    }

    /// Creates a store backed by the given component manifest cache and an
    /// isolated assets cache.
    pub fn with_cache(cache: ManifestCache) -> Self {
        Self {
            cache,
            assets: ManifestCache::new(),
            file_name: DEFAULT_MANIFEST_FILE.to_string(),
        }
    }

    /// Replaces the assets manifest cache.
    pub fn with_assets_cache(mut self, assets: ManifestCache<AssetsManifest>) -> Self {
        self.assets = assets;
        self
    }

    /// Overrides the manifest file name.
    pub fn with_file_name(mut self, file_name: &str) -> Self {
        self.file_name = file_name.to_string();
        self
    }

    /// Returns the cache this store writes component manifests to.
    pub fn cache(&self) -> &ManifestCache {
        &self.cache
    }

    /// Returns the manifest file path for a component directory.
    ///
    /// A path naming an existing file (usually the component template) is
    /// replaced by its parent directory.
    pub fn manifest_path(&self, path: &Path) -> PathBuf {
        let dir = if path.is_file() {
            path.parent().unwrap_or(path)
        } else {
            path
        };
        dir.join(&self.file_name)
    }

    /// Loads the manifest for the component directory `path`.
    ///
    /// Repeated calls for the same directory return the same cached `Arc`
    /// without re-reading the file.
    ///
    /// # Errors
    ///
    /// - [`ComponentError::ManifestNotFound`] when no manifest file exists
    /// - [`ComponentError::ManifestParse`] when the document is malformed,
    ///   including content that is not UTF-8
    pub fn get_manifest<P: AsRef<Path>>(&self, path: P) -> Result<Arc<Manifest>> {
        load_cached(&self.cache, self.manifest_path(path.as_ref()), |source| {
            Manifest::parse(source)
        })
    }

    /// Loads the build assets manifest at the file path `path`.
    ///
    /// # Errors
    ///
    /// Same as [`ManifestStore::get_manifest`].
    pub fn get_assets_manifest<P: AsRef<Path>>(&self, path: P) -> Result<Arc<AssetsManifest>> {
        load_cached(&self.assets, path.as_ref().to_path_buf(), |source| {
            AssetsManifest::parse(source)
        })
    }
}

/// Canonicalizes `manifest_path`, then returns the cached document or reads,
/// parses and caches it.
fn load_cached<T>(
    cache: &ManifestCache<T>,
    manifest_path: PathBuf,
    parse: impl Fn(&[u8]) -> std::result::Result<T, String>,
) -> Result<Arc<T>> {
    let canonical = match fs::canonicalize(&manifest_path) {
        Ok(canonical) if canonical.is_file() => canonical,
        _ => {
            return Err(ComponentError::ManifestNotFound {
                path: manifest_path,
            })
        }
    };

    if let Some(document) = cache.get(&canonical) {
        tracing::debug!("Manifest cache hit for {}", canonical.display());
        return Ok(document);
    }

    let source = fs::read(&canonical)?;
    let document = parse(&source).map_err(|message| ComponentError::ManifestParse {
        path: canonical.clone(),
        message,
    })?;

    let document = cache.insert(canonical.clone(), document);
    tracing::debug!(
        "Loaded manifest {} ({} cached)",
        canonical.display(),
        cache.len()
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BUTTON_MANIFEST: &str = r#"{
        "componentName": "button",
        "attributes": {
            "buttonAlign": { "type": "string", "default": "left" }
        }
    }"#;

    fn write_component(root: &Path, name: &str, manifest: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(DEFAULT_MANIFEST_FILE), manifest).unwrap();
        dir
    }

    #[test]
    fn test_get_manifest_reads_and_caches() {
        let temp_dir = TempDir::new().unwrap();
        let dir = write_component(temp_dir.path(), "button", BUTTON_MANIFEST);
        let store = ManifestStore::with_cache(ManifestCache::new());

        let first = store.get_manifest(&dir).unwrap();
        let second = store.get_manifest(&dir).unwrap();

        assert_eq!(first.component_name, "button");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.cache().len(), 1);
    }

    #[test]
    fn test_trailing_separator_hits_same_entry() {
        let temp_dir = TempDir::new().unwrap();
        let dir = write_component(temp_dir.path(), "button", BUTTON_MANIFEST);
        let store = ManifestStore::with_cache(ManifestCache::new());

        let plain = store.get_manifest(&dir).unwrap();
        let with_slash = store
            .get_manifest(format!("{}/", dir.to_string_lossy()))
            .unwrap();

        assert!(Arc::ptr_eq(&plain, &with_slash));
    }

    #[test]
    fn test_file_path_uses_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = write_component(temp_dir.path(), "button", BUTTON_MANIFEST);
        let template = dir.join("button.hbs");
        fs::write(&template, "<button></button>").unwrap();
        let store = ManifestStore::with_cache(ManifestCache::new());

        let manifest = store.get_manifest(&template).unwrap();
        assert_eq!(manifest.component_name, "button");
    }

    #[test]
    fn test_cached_manifest_survives_file_changes() {
        let temp_dir = TempDir::new().unwrap();
        let dir = write_component(temp_dir.path(), "button", BUTTON_MANIFEST);
        let store = ManifestStore::with_cache(ManifestCache::new());

        store.get_manifest(&dir).unwrap();
        fs::write(dir.join(DEFAULT_MANIFEST_FILE), "not json").unwrap();

        let manifest = store.get_manifest(&dir).unwrap();
        assert_eq!(manifest.component_name, "button");
    }

    #[test]
    fn test_clone_does_not_touch_cache() {
        let temp_dir = TempDir::new().unwrap();
        let button = write_component(temp_dir.path(), "button", BUTTON_MANIFEST);
        let heading = write_component(
            temp_dir.path(),
            "heading",
            r#"{ "componentName": "heading", "attributes": {} }"#,
        );
        let store = ManifestStore::with_cache(ManifestCache::new());

        let mut local = (*store.get_manifest(&button).unwrap()).clone();
        local.component_name = "changed".to_string();

        assert_eq!(store.get_manifest(&button).unwrap().component_name, "button");
        assert_eq!(store.get_manifest(&heading).unwrap().component_name, "heading");
    }

    #[test]
    fn test_missing_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let store = ManifestStore::with_cache(ManifestCache::new());

        let result = store.get_manifest(temp_dir.path());
        assert!(matches!(result, Err(ComponentError::ManifestNotFound { .. })));
        assert!(store.cache().is_empty());
    }

    #[test]
    fn test_malformed_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let dir = write_component(temp_dir.path(), "broken", "{ \"componentName\": ");
        let store = ManifestStore::with_cache(ManifestCache::new());

        let result = store.get_manifest(&dir);
        assert!(matches!(result, Err(ComponentError::ManifestParse { .. })));
        assert!(store.cache().is_empty());
    }

    #[test]
    fn test_non_utf8_manifest_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("binary");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(DEFAULT_MANIFEST_FILE), b"{\"componentName\": \"\xff\xfe\"}").unwrap();
        let store = ManifestStore::with_cache(ManifestCache::new());

        match store.get_manifest(&dir) {
            Err(ComponentError::ManifestParse { path, .. }) => {
                assert!(path.ends_with(DEFAULT_MANIFEST_FILE));
            }
            other => panic!("Expected ManifestParse, got {:?}", other),
        }
    }

    #[test]
    fn test_get_assets_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_ASSETS_MANIFEST_FILE);
        fs::write(&path, r#"{ "application.js": "/public/application-3f2a9c.js" }"#).unwrap();
        let store = ManifestStore::with_cache(ManifestCache::new());

        let first = store.get_assets_manifest(&path).unwrap();
        let second = store.get_assets_manifest(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            first.get_assets_manifest_item("application.js").unwrap(),
            "/public/application-3f2a9c.js"
        );
        assert!(store.cache().is_empty());

        assert!(matches!(
            store.get_assets_manifest(temp_dir.path().join("missing.json")),
            Err(ComponentError::ManifestNotFound { .. })
        ));
    }

    #[test]
    fn test_custom_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("card");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("component.json"), r#"{ "componentName": "card" }"#).unwrap();
        let store = ManifestStore::with_cache(ManifestCache::new()).with_file_name("component.json");

        assert_eq!(store.get_manifest(&dir).unwrap().component_name, "card");
    }
}
