// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Parsed manifest caching.
//!
//! Manifests are immutable for the life of the process, so the cache is
//! append-only: entries are inserted on first load and never evicted or
//! refreshed. There is no `remove` or `clear`.
//!
//! [`ManifestCache::global`] hands out the process-wide instance. Tests and
//! embedders that need isolation create their own with [`ManifestCache::new`]
//! and inject it into a [`ManifestStore`](super::ManifestStore).

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use super::assets::AssetsManifest;
use super::types::Manifest;

lazy_static! {
    static ref GLOBAL_CACHE: ManifestCache = ManifestCache::new();
    static ref GLOBAL_ASSETS_CACHE: ManifestCache<AssetsManifest> = ManifestCache::new();
}

/// Append-only map from canonical manifest path to a parsed document.
///
/// Component manifests use the default `T = Manifest`; asset manifests get a
/// cache of their own. Cloning is cheap and shares the underlying storage.
#[derive(Debug)]
pub struct ManifestCache<T = Manifest> {
    entries: Arc<RwLock<HashMap<PathBuf, Arc<T>>>>,
}

impl<T> Clone for ManifestCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> Default for ManifestCache<T> {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl ManifestCache<Manifest> {
    /// Returns a handle to the process-wide component manifest cache.
    pub fn global() -> Self {
        GLOBAL_CACHE.clone()
    }
}

impl ManifestCache<AssetsManifest> {
    /// Returns a handle to the process-wide assets manifest cache.
    pub fn global_assets() -> Self {
        GLOBAL_ASSETS_CACHE.clone()
    }
}

impl<T> ManifestCache<T> {
    /// Creates an empty, isolated cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a document by canonical path.
    pub fn get(&self, path: &Path) -> Option<Arc<T>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(path).cloned()
    }

    /// Inserts a document unless the path is already cached, and returns the
    /// cached instance. The first writer wins so every caller sees the same
    /// `Arc`.
    pub fn insert(&self, path: PathBuf, document: T) -> Arc<T> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(path)
            .or_insert_with(|| Arc::new(document))
            .clone()
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }

    /// True when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let cache: ManifestCache = ManifestCache::new();
        let path = PathBuf::from("/components/button/manifest.json");

        assert!(cache.get(&path).is_none());
        let stored = cache.insert(path.clone(), Manifest::new("button"));

        assert_eq!(cache.len(), 1);
        let retrieved = cache.get(&path).unwrap();
        assert!(Arc::ptr_eq(&stored, &retrieved));
        assert_eq!(retrieved.component_name, "button");
    }

    #[test]
    fn test_first_insert_wins() {
        let cache: ManifestCache = ManifestCache::new();
        let path = PathBuf::from("/components/button/manifest.json");

        let first = cache.insert(path.clone(), Manifest::new("button"));
        let second = cache.insert(path.clone(), Manifest::new("other"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.component_name, "button");
    }

    #[test]
    fn test_clones_share_storage() {
        let cache: ManifestCache = ManifestCache::new();
        let handle = cache.clone();
        cache.insert(PathBuf::from("/a/manifest.json"), Manifest::new("a"));

        assert!(handle.get(Path::new("/a/manifest.json")).is_some());
    }

    #[test]
    fn test_isolated_caches_do_not_share() {
        let first: ManifestCache = ManifestCache::new();
        let second: ManifestCache = ManifestCache::new();
        first.insert(PathBuf::from("/a/manifest.json"), Manifest::new("a"));

        assert!(second.is_empty());
    }
}

