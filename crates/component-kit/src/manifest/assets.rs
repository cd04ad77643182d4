// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Build assets manifest.
//!
//! The frontend build writes a flat JSON object mapping each source file name
//! to its hashed public path:
//!
//! ```json
//! { "application.js": "/public/application-3f2a9c.js" }
//! ```
//!
//! Looking assets up through it keeps URLs cache-busted.

use std::collections::BTreeMap;

use crate::error::{ComponentError, Result};

/// Default assets manifest file name.
pub const DEFAULT_ASSETS_MANIFEST_FILE: &str = "manifest.json";

/// A parsed assets manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetsManifest {
    items: BTreeMap<String, String>,
}

impl AssetsManifest {
    /// Parses an assets manifest document.
    ///
    /// Returns the parser message on failure; the store wraps it in a
    /// [`ComponentError::ManifestParse`].
    pub fn parse(source: impl AsRef<[u8]>) -> std::result::Result<Self, String> {
        let items: BTreeMap<String, String> =
            serde_json::from_slice(source.as_ref()).map_err(|e| e.to_string())?;
        Ok(Self { items })
    }

    /// Returns the full public path of the asset `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::AssetNotFound`] when the build did not emit
    /// an asset under `key`.
    pub fn get_assets_manifest_item(&self, key: &str) -> Result<String> {
        self.items
            .get(key.trim())
            .cloned()
            .ok_or_else(|| ComponentError::AssetNotFound {
                key: key.to_string(),
            })
    }

    /// Number of assets listed.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the manifest lists no assets.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<(String, String)> for AssetsManifest {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
