// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Component library configuration.
//!
//! Configuration is loaded from `components.toml` at the project root.
//!
//! # Example Configuration
//!
//! ```toml
//! [components]
//! root = "src/Blocks/components"
//! template_extension = "hbs"
//! manifest_file = "manifest.json"
//! global_manifest = "src/Blocks"
//!
//! [css]
//! scope_class = "btn"
//!
//! [assets]
//! manifest = "public/manifest.json"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::css::DEFAULT_SCOPE_CLASS;
use crate::error::{ComponentError, Result};
use crate::manifest::{DEFAULT_ASSETS_MANIFEST_FILE, DEFAULT_MANIFEST_FILE};
use crate::resolver::DEFAULT_TEMPLATE_EXTENSION;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "components.toml";

/// Main configuration structure loaded from `components.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ComponentsConfig {
    /// Component lookup settings.
    #[serde(default)]
    pub components: ComponentsSection,
    /// CSS variable output settings.
    #[serde(default)]
    pub css: CssSection,
    /// Build assets settings.
    #[serde(default)]
    pub assets: AssetsSection,
}

/// Where components, templates and manifests live.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ComponentsSection {
    /// Components root, relative to the project (default: "src/Blocks/components").
    #[serde(default = "default_root")]
    pub root: String,

    /// Template file extension without the dot (default: "hbs").
    #[serde(default = "default_template_extension")]
    pub template_extension: String,

    /// Manifest file name inside each component directory (default: "manifest.json").
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,

    /// Directory holding the global manifest (default: "src/Blocks").
    #[serde(default = "default_global_manifest")]
    pub global_manifest: String,
}

/// CSS variable output settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CssSection {
    /// Scope class for manifests without `componentClass` (default: "btn").
    #[serde(default = "default_scope_class")]
    pub scope_class: String,
}

/// Build assets settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AssetsSection {
    /// Assets manifest written by the frontend build (default: "public/manifest.json").
    #[serde(default = "default_assets_manifest")]
    pub manifest: String,
}

fn default_root() -> String {
    "src/Blocks/components".to_string()
}

fn default_template_extension() -> String {
    DEFAULT_TEMPLATE_EXTENSION.to_string()
}

fn default_manifest_file() -> String {
    DEFAULT_MANIFEST_FILE.to_string()
}

fn default_global_manifest() -> String {
    "src/Blocks".to_string()
}

fn default_assets_manifest() -> String {
    format!("public/{}", DEFAULT_ASSETS_MANIFEST_FILE)
}

fn default_scope_class() -> String {
    DEFAULT_SCOPE_CLASS.to_string()
}

impl Default for ComponentsSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            template_extension: default_template_extension(),
            manifest_file: default_manifest_file(),
            global_manifest: default_global_manifest(),
        }
    }
}

impl Default for CssSection {
    fn default() -> Self {
        Self {
            scope_class: default_scope_class(),
        }
    }
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            manifest: default_assets_manifest(),
        }
    }
}

impl ComponentsConfig {
    /// Parses configuration from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::Config`] when the source is not valid TOML
    /// or has fields of the wrong type.
    pub fn from_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| ComponentError::Config(e.to_string()))
    }

    /// Loads configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Components root resolved against `project_dir`.
    pub fn components_root(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.components.root)
    }

    /// Global manifest directory resolved against `project_dir`.
    pub fn global_manifest_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.components.global_manifest)
    }

    /// Assets manifest file resolved against `project_dir`.
    pub fn assets_manifest_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.assets.manifest)
    }
}
